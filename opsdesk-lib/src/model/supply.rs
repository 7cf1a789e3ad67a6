//! Suppliers and purchase orders

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Statuses a purchase order moves through.
pub const PURCHASE_ORDER_STATUSES: [&str; 4] = ["draft", "in_progress", "done", "cancelled"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SupplierInput {
    pub name: String,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub supplier_id: i64,
    #[serde(default)]
    pub supplier_name: String,
    pub site_id: i64,
    #[serde(default)]
    pub site_name: String,
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrderInput {
    pub supplier_id: i64,
    pub site_id: i64,
    pub comment: Option<String>,
}
