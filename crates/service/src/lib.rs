//! Business operations for the pest-control backend, independent of HTTP.
//! - Request validation and partial updates over the `models` entities.
//! - Serializers producing the JSON views the API returns.
//! - Calendar feed export and first-run seeding.

pub mod errors;
pub mod payload;
pub mod views;
pub mod job_service;
pub mod customer_service;
pub mod property_service;
pub mod contact_service;
pub mod user_service;
pub mod auth_service;
pub mod inventory_service;
pub mod marketing_service;
pub mod report_service;
pub mod calendar;
pub mod seed;
#[cfg(test)]
pub mod test_support;
