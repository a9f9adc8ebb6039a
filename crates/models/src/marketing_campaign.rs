use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const STATUS_DRAFT: &str = "Draft";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "marketing_campaign")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub campaign_type: Option<String>,
    pub audience: Option<String>,
    pub status: String,
    pub sent: i32,
    pub opened: i32,
    pub clicked: i32,
    #[sea_orm(column_type = "Double")]
    pub revenue: f64,
    pub created_date: Option<NaiveDate>,
    pub content_subject: Option<String>,
    pub content_body: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("Campaign name is required".into())); }
    Ok(())
}
