pub mod api;
pub mod authority;
pub mod common;
pub mod course;
pub mod election;
pub mod ledger;

pub use ledger::{Ledger, Registries};
