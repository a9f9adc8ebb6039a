use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use models::{contact, customer, job, property};
use crate::errors::ServiceError;
use crate::job_service::hydrate;
use crate::payload::{self, non_blank};
use crate::views::{
    format_job, serialize_contact, serialize_customer, serialize_property, CustomerDetail, CustomerSummary,
};

#[derive(Debug, Default, Deserialize)]
pub struct NewCustomer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial update; `null` clears the optional contact fields.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "payload::patch")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "payload::patch")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "payload::patch")]
    pub email: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkUploadError {
    pub error: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkUploadReport {
    pub message: String,
    pub added: usize,
    pub skipped: usize,
    pub errors: Vec<BulkUploadError>,
}

/// All customers ordered by name.
pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<CustomerSummary>, ServiceError> {
    let rows = customer::Entity::find()
        .order_by_asc(customer::Column::Name)
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await?;
    Ok(rows.iter().map(serialize_customer).collect())
}

pub async fn create_customer(db: &DatabaseConnection, input: NewCustomer) -> Result<CustomerSummary, ServiceError> {
    let name = input.name.unwrap_or_default();
    customer::validate_name(&name)?;
    let created = customer::ActiveModel {
        id: NotSet,
        name: Set(name.trim().to_string()),
        address: Set(input.address),
        phone: Set(input.phone),
        email: Set(input.email),
    }
    .insert(db)
    .await?;
    info!(customer_id = created.id, "customer created");
    Ok(serialize_customer(&created))
}

/// Customer with its jobs (newest date first), properties and contacts.
pub async fn get_customer(db: &DatabaseConnection, id: i32) -> Result<CustomerDetail, ServiceError> {
    let found = find_customer(db, id).await?;
    let jobs = job::Entity::find()
        .filter(job::Column::CustomerId.eq(id))
        .order_by_desc(job::Column::JobDate)
        .order_by_asc(job::Column::Id)
        .all(db)
        .await?;
    let properties = property::Entity::find()
        .filter(property::Column::CustomerId.eq(id))
        .order_by_asc(property::Column::Id)
        .all(db)
        .await?;
    let contacts = contact::Entity::find()
        .filter(contact::Column::CustomerId.eq(id))
        .order_by_asc(contact::Column::Id)
        .all(db)
        .await?;
    Ok(CustomerDetail {
        customer: serialize_customer(&found),
        jobs: hydrate(db, jobs).await?.iter().map(format_job).collect(),
        properties: properties.iter().map(serialize_property).collect(),
        contacts: contacts.iter().map(serialize_contact).collect(),
    })
}

pub async fn update_customer(
    db: &DatabaseConnection,
    id: i32,
    patch: CustomerUpdate,
) -> Result<CustomerSummary, ServiceError> {
    let mut am: customer::ActiveModel = find_customer(db, id).await?.into();
    if let Some(name) = patch.name {
        customer::validate_name(&name)?;
        am.name = Set(name.trim().to_string());
    }
    if let Some(address) = patch.address {
        am.address = Set(address);
    }
    if let Some(phone) = patch.phone {
        am.phone = Set(phone);
    }
    if let Some(email) = patch.email {
        am.email = Set(email);
    }
    let updated = if am.is_changed() { am.update(db).await? } else { find_customer(db, id).await? };
    info!(customer_id = id, "customer updated");
    Ok(serialize_customer(&updated))
}

/// Refused with a conflict while any job still references the customer.
/// Properties and contacts go with it.
pub async fn delete_customer(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    customer::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer", id))?;
    let jobs = job::Entity::find().filter(job::Column::CustomerId.eq(id)).count(&txn).await?;
    if jobs > 0 {
        warn!(customer_id = id, jobs, "refusing to delete customer with jobs");
        return Err(ServiceError::Conflict("Cannot delete customer with active jobs.".into()));
    }
    property::Entity::delete_many().filter(property::Column::CustomerId.eq(id)).exec(&txn).await?;
    contact::Entity::delete_many().filter(contact::Column::CustomerId.eq(id)).exec(&txn).await?;
    customer::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    info!(customer_id = id, "customer deleted");
    Ok(())
}

/// Import customers from loosely-typed rows. Rows without a name are reported
/// back; rows whose (name, address) pair already exists, including earlier
/// rows of the same upload, are skipped.
pub async fn bulk_upload(db: &DatabaseConnection, rows: Vec<Value>) -> Result<BulkUploadReport, ServiceError> {
    let txn = db.begin().await?;
    let total = rows.len();
    let mut added = 0;
    let mut skipped = 0;
    let mut errors = Vec::new();

    for row in rows {
        let text = |key: &str| row.get(key).and_then(Value::as_str).map(str::to_string);
        let Some(name) = non_blank(row.get("name").and_then(Value::as_str)).map(str::to_string) else {
            errors.push(BulkUploadError { error: "Missing name".into(), data: row.clone() });
            continue;
        };
        let address = text("address");

        let existing = customer::Entity::find()
            .filter(customer::Column::Name.eq(name.as_str()))
            .filter(match &address {
                Some(a) => customer::Column::Address.eq(a.as_str()),
                None => customer::Column::Address.is_null(),
            })
            .one(&txn)
            .await?;
        if existing.is_some() {
            skipped += 1;
            continue;
        }

        customer::ActiveModel {
            id: NotSet,
            name: Set(name),
            address: Set(address),
            phone: Set(text("phone")),
            email: Set(text("email")),
        }
        .insert(&txn)
        .await?;
        added += 1;
    }
    txn.commit().await?;

    info!(total, added, skipped, rejected = errors.len(), "bulk customer upload processed");
    Ok(BulkUploadReport {
        message: format!("Processed {total} records. Added {added} new customers. Skipped {skipped} duplicates."),
        added,
        skipped,
        errors,
    })
}

pub(crate) async fn find_customer(db: &DatabaseConnection, id: i32) -> Result<customer::Model, ServiceError> {
    customer::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("customer", id))
}
