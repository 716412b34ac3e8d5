//! API-compatible types.
//!
//! Request bodies the routes accept, response shapes they return, and the
//! session token that carries a caller identity between requests.

pub mod auth;
pub mod course;
pub mod election;
