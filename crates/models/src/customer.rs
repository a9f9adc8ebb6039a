use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{contact, errors, job, property};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Properties,
    Contacts,
    Jobs,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Properties => Entity::has_many(property::Entity).into(),
            Relation::Contacts => Entity::has_many(contact::Entity).into(),
            Relation::Jobs => Entity::has_many(job::Entity).into(),
        }
    }
}

impl Related<property::Entity> for Entity {
    fn to() -> RelationDef { Relation::Properties.def() }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef { Relation::Contacts.def() }
}

impl Related<job::Entity> for Entity {
    fn to() -> RelationDef { Relation::Jobs.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Customer name is required".into())); }
    Ok(())
}
