use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub max_stock: i32,
    #[sea_orm(column_type = "Double")]
    pub unit_cost: f64,
    #[sea_orm(column_type = "Double")]
    pub selling_price: f64,
    pub supplier: Option<String>,
    pub last_ordered: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Empty shelves win over the low-stock threshold.
pub fn stock_status(current_stock: i32, min_stock: i32) -> StockStatus {
    if current_stock == 0 {
        StockStatus::OutOfStock
    } else if current_stock <= min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

impl Model {
    pub fn status(&self) -> StockStatus {
        stock_status(self.current_stock, self.min_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(stock_status(0, 10), StockStatus::OutOfStock);
        assert_eq!(stock_status(0, 0), StockStatus::OutOfStock);
        assert_eq!(stock_status(5, 8), StockStatus::LowStock);
        assert_eq!(stock_status(8, 8), StockStatus::LowStock);
        assert_eq!(stock_status(15, 10), StockStatus::InStock);
    }

    #[test]
    fn status_labels() {
        assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
        assert_eq!(serde_json::to_value(StockStatus::OutOfStock).unwrap(), "Out of Stock");
    }
}
