//! HTTP surface: axum router, error envelope and process startup.

pub mod errors;
pub mod extract;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run;
