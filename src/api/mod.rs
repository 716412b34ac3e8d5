use rocket::{Catcher, Route};

pub mod auth;
pub mod course;
pub mod election;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(auth::routes());
    routes.extend(election::routes());
    routes.extend(course::routes());
    routes
}

pub fn catchers() -> Vec<Catcher> {
    auth::catchers()
}
