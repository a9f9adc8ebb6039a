use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::inventory::{self, StockStatus};
use crate::errors::ServiceError;
use crate::views::{serialize_inventory, InventoryView};

/// Every stock item with its derived status.
pub async fn list_inventory(db: &DatabaseConnection) -> Result<Vec<InventoryView>, ServiceError> {
    let rows = inventory::Entity::find().order_by_asc(inventory::Column::Id).all(db).await?;
    Ok(rows.iter().map(serialize_inventory).collect())
}

/// Items running low or out of stock.
pub async fn count_alerts(db: &DatabaseConnection) -> Result<usize, ServiceError> {
    let rows = inventory::Entity::find().all(db).await?;
    Ok(rows.iter().filter(|item| item.status() != StockStatus::InStock).count())
}
