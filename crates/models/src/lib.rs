//! Entity store: sea-orm entities plus the validation and derivation helpers
//! that only depend on a row's own columns.

pub mod errors;
pub mod db;
pub mod user;
pub mod customer;
pub mod property;
pub mod contact;
pub mod job;
pub mod inventory;
pub mod marketing_campaign;

#[cfg(test)]
mod tests;
