use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use models::contact;
use crate::customer_service::find_customer;
use crate::errors::ServiceError;
use crate::payload;
use crate::views::{serialize_contact, ContactView};

#[derive(Debug, Default, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "payload::lenient_bool")]
    pub is_primary: bool,
}

pub async fn list_contacts(db: &DatabaseConnection, customer_id: i32) -> Result<Vec<ContactView>, ServiceError> {
    find_customer(db, customer_id).await?;
    let rows = contact::Entity::find()
        .filter(contact::Column::CustomerId.eq(customer_id))
        .order_by_asc(contact::Column::Id)
        .all(db)
        .await?;
    Ok(rows.iter().map(serialize_contact).collect())
}

/// Adds a contact; a primary one replaces the customer's current primary atomically.
pub async fn create_contact(
    db: &DatabaseConnection,
    customer_id: i32,
    input: NewContact,
) -> Result<ContactView, ServiceError> {
    find_customer(db, customer_id).await?;
    let name = input.name.unwrap_or_default().trim().to_string();
    contact::validate_name(&name)?;

    let txn = db.begin().await?;
    if input.is_primary {
        contact::Entity::update_many()
            .col_expr(contact::Column::IsPrimary, Expr::value(false))
            .filter(contact::Column::CustomerId.eq(customer_id))
            .filter(contact::Column::IsPrimary.eq(true))
            .exec(&txn)
            .await?;
    }
    let created = contact::ActiveModel {
        id: NotSet,
        customer_id: Set(customer_id),
        name: Set(name),
        phone: Set(input.phone),
        email: Set(input.email),
        title: Set(input.title),
        is_primary: Set(input.is_primary),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(contact_id = created.id, customer_id, primary = created.is_primary, "contact created");
    Ok(serialize_contact(&created))
}
