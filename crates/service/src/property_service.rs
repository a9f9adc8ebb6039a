use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use models::property;
use crate::customer_service::find_customer;
use crate::errors::ServiceError;
use crate::payload;
use crate::views::{serialize_property, PropertyView};

#[derive(Debug, Default, Deserialize)]
pub struct NewProperty {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "payload::lenient_bool")]
    pub is_primary: bool,
}

pub async fn list_properties(db: &DatabaseConnection, customer_id: i32) -> Result<Vec<PropertyView>, ServiceError> {
    find_customer(db, customer_id).await?;
    let rows = property::Entity::find()
        .filter(property::Column::CustomerId.eq(customer_id))
        .order_by_asc(property::Column::Id)
        .all(db)
        .await?;
    Ok(rows.iter().map(serialize_property).collect())
}

/// Adds a property. A new primary demotes the customer's other properties in
/// the same transaction, so there is never more than one primary.
pub async fn create_property(
    db: &DatabaseConnection,
    customer_id: i32,
    input: NewProperty,
) -> Result<PropertyView, ServiceError> {
    find_customer(db, customer_id).await?;
    let address = input.address.unwrap_or_default().trim().to_string();
    property::validate_address(&address)?;

    let txn = db.begin().await?;
    if input.is_primary {
        property::Entity::update_many()
            .col_expr(property::Column::IsPrimary, Expr::value(false))
            .filter(property::Column::CustomerId.eq(customer_id))
            .filter(property::Column::IsPrimary.eq(true))
            .exec(&txn)
            .await?;
    }
    let created = property::ActiveModel {
        id: NotSet,
        customer_id: Set(customer_id),
        label: Set(input.label),
        address: Set(address),
        notes: Set(input.notes),
        is_primary: Set(input.is_primary),
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(property_id = created.id, customer_id, primary = created.is_primary, "property created");
    Ok(serialize_property(&created))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::seeded_db;
    use serde_json::json;

    fn body(v: serde_json::Value) -> NewProperty {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn new_primary_demotes_previous_one() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        create_property(&db, 1, body(json!({"label": "Cabin", "address": "9 Lake Rd", "is_primary": true}))).await?;
        create_property(&db, 1, body(json!({"label": "Shed", "address": "9 Lake Rd", "is_primary": "yes"}))).await?;
        create_property(&db, 1, body(json!({"label": "Barn", "address": "10 Lake Rd"}))).await?;

        let props = list_properties(&db, 1).await?;
        assert_eq!(props.len(), 4);
        let primaries: Vec<_> = props.iter().filter(|p| p.is_primary).map(|p| p.label.clone()).collect();
        assert_eq!(primaries, vec![Some("Shed".to_string())]);

        // other customers keep their primary
        assert!(list_properties(&db, 2).await?.iter().any(|p| p.is_primary));
        Ok(())
    }

    #[tokio::test]
    async fn address_is_required_and_customer_must_exist() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let err = create_property(&db, 1, body(json!({"address": "  "}))).await.unwrap_err();
        assert_eq!(err.message(), "Address is required");
        let err = create_property(&db, 42, body(json!({"address": "x"}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(matches!(list_properties(&db, 42).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
