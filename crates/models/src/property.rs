use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{customer, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub customer_id: i32,
    pub label: Option<String>,
    pub address: String,
    pub notes: Option<String>,
    pub is_primary: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Customer,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Customer => Entity::belongs_to(customer::Entity)
                .from(Column::CustomerId)
                .to(customer::Column::Id)
                .into(),
        }
    }
}

impl Related<customer::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_address(address: &str) -> Result<(), errors::ModelError> {
    if address.trim().is_empty() { return Err(errors::ModelError::Validation("Address is required".into())); }
    Ok(())
}
