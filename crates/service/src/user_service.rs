use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::{info, warn};

use models::{job, user};
use crate::errors::ServiceError;
use crate::views::{serialize_user, technician_entry, TechnicianView, UserView};

#[derive(Debug, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Only the role of an existing user can change.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub role: Option<String>,
}

pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserView>, ServiceError> {
    let rows = user::Entity::find().order_by_asc(user::Column::Id).all(db).await?;
    Ok(rows.iter().map(serialize_user).collect())
}

/// Users with the Technician role, labelled for the scheduler.
pub async fn list_technicians(db: &DatabaseConnection) -> Result<Vec<TechnicianView>, ServiceError> {
    let rows = user::Entity::find()
        .filter(user::Column::Role.eq(user::ROLE_TECHNICIAN))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(rows.iter().map(technician_entry).collect())
}

pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<UserView, ServiceError> {
    let email = input.email.unwrap_or_default().trim().to_string();
    let role = input.role.unwrap_or_default().trim().to_string();
    user::validate_role(&role)?;
    user::validate_email(&email)?;

    let txn = db.begin().await?;
    let taken = user::Entity::find().filter(user::Column::Email.eq(email.as_str())).count(&txn).await?;
    if taken > 0 {
        return Err(ServiceError::Conflict("User with this email already exists".into()));
    }
    let created = user::ActiveModel { id: NotSet, email: Set(email), role: Set(role) }.insert(&txn).await?;
    txn.commit().await?;

    info!(user_id = created.id, role = %created.role, "user created");
    Ok(serialize_user(&created))
}

pub async fn update_user(db: &DatabaseConnection, id: i32, patch: UserUpdate) -> Result<UserView, ServiceError> {
    let txn = db.begin().await?;
    let current = find_user(&txn, id).await?;
    let Some(role) = patch.role else {
        return Ok(serialize_user(&current));
    };
    let role = role.trim().to_string();
    user::validate_role(&role)?;
    if current.is_admin() && role != user::ROLE_ADMIN && admin_count(&txn).await? <= 1 {
        return Err(ServiceError::Conflict("Cannot demote the last admin user".into()));
    }
    let mut am: user::ActiveModel = current.into();
    am.role = Set(role);
    let updated = am.update(&txn).await?;
    txn.commit().await?;

    info!(user_id = id, role = %updated.role, "user role updated");
    Ok(serialize_user(&updated))
}

/// Deletes a user and unassigns their jobs. The last Admin cannot be deleted;
/// the count and the delete share one transaction.
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    let current = find_user(&txn, id).await?;
    if current.is_admin() && admin_count(&txn).await? <= 1 {
        warn!(user_id = id, "refusing to delete the last admin");
        return Err(ServiceError::Conflict("Cannot delete the last admin user".into()));
    }
    let unassigned = job::Entity::update_many()
        .col_expr(job::Column::TechnicianId, Expr::value(Option::<i32>::None))
        .filter(job::Column::TechnicianId.eq(id))
        .exec(&txn)
        .await?
        .rows_affected;
    user::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!(user_id = id, unassigned, "user deleted");
    Ok(())
}

async fn find_user(txn: &DatabaseTransaction, id: i32) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("user", id))
}

async fn admin_count(txn: &DatabaseTransaction) -> Result<u64, ServiceError> {
    Ok(user::Entity::find().filter(user::Column::Role.eq(user::ROLE_ADMIN)).count(txn).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seeded_db};

    fn new_user(email: &str, role: &str) -> NewUser {
        NewUser { email: Some(email.into()), role: Some(role.into()) }
    }

    #[tokio::test]
    async fn technicians_are_titled_from_email() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let techs = list_technicians(&db).await?;
        let titles: Vec<_> = techs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Tech", "Dave"]);
        assert_eq!(list_users(&db).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn create_validates_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let err = create_user(&db, NewUser { email: Some("x@y.z".into()), role: None }).await.unwrap_err();
        assert_eq!(err.message(), "Email and role are required");
        let err = create_user(&db, new_user("tech@pestpro.com", "Admin")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        let u = create_user(&db, new_user("new@pestpro.com", "Technician")).await?;
        assert_eq!(u.role, "Technician");
        Ok(())
    }

    #[tokio::test]
    async fn sole_admin_cannot_be_deleted_or_demoted() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        let err = delete_user(&db, 1).await.unwrap_err();
        assert_eq!(err.message(), "Cannot delete the last admin user");
        let err = update_user(&db, 1, UserUpdate { role: Some("Technician".into()) }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let second = create_user(&db, new_user("boss@pestpro.com", "Admin")).await?;
        delete_user(&db, 1).await?;
        assert!(matches!(delete_user(&db, second.id).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_technician_unassigns_jobs() -> Result<(), anyhow::Error> {
        let db = seeded_db().await?;
        delete_user(&db, 2).await?;
        let orphaned = job::Entity::find().filter(job::Column::TechnicianId.is_null()).count(&db).await?;
        assert_eq!(orphaned, 2);
        assert!(matches!(delete_user(&db, 2).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_role_only() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let u = create_user(&db, new_user("a@pestpro.com", "Technician")).await?;
        let updated = update_user(&db, u.id, UserUpdate { role: Some("Admin".into()) }).await?;
        assert_eq!(updated.email, "a@pestpro.com");
        assert_eq!(updated.role, "Admin");
        let same = update_user(&db, u.id, UserUpdate::default()).await?;
        assert_eq!(same, updated);
        Ok(())
    }
}
