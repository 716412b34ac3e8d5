#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::{Config, ConfigFairing, LedgerFairing};
use crate::logging::LoggerFairing;
use crate::model::Ledger;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

/// Build the server, loading its config and creating an empty ledger on ignition.
pub fn build() -> Rocket<Build> {
    with_routes(rocket::build())
        .attach(ConfigFairing)
        .attach(LedgerFairing)
}

/// Build the server around an existing config and ledger.
pub fn rocket_for(config: Config, ledger: Ledger) -> Rocket<Build> {
    with_routes(rocket::build()).manage(config).manage(ledger)
}

fn with_routes(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .register("/", api::catchers())
        .attach(LoggerFairing)
}
