//! Report payloads behind the dashboard charts

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: u64,
}

/// Stock positions at or above vs. below their reorder point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct InventoryBreakdown {
    pub ok: u64,
    pub low: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductQuantity {
    pub product_name: String,
    pub quantity: i64,
}
