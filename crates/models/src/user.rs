use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors, job};

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_TECHNICIAN: &str = "Technician";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Jobs,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Jobs => Entity::has_many(job::Entity).into() }
    }
}

impl Related<job::Entity> for Entity {
    fn to() -> RelationDef { Relation::Jobs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn display_name(&self) -> String {
        display_name(&self.email)
    }
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    if email.is_empty() { return Err(errors::ModelError::Validation("Email and role are required".into())); }
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), errors::ModelError> {
    if role.trim().is_empty() { return Err(errors::ModelError::Validation("Email and role are required".into())); }
    Ok(())
}

/// Human label for a staff member: the local part of the email, capitalized
/// (first letter upper case, the rest lower case).
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
