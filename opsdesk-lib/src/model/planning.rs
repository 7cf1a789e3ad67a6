//! Production plans

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub site_id: i64,
    #[serde(default)]
    pub site_name: String,
    pub period: String,
    pub status: String,
}

/// A plan with its line items, from `/plans/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: Plan,
    #[serde(default)]
    pub items: Vec<PlanItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanItem {
    pub id: i64,
    pub product_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanInput {
    pub site_id: i64,
    /// Period label such as `2025-11`.
    pub period: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanItemInput {
    pub product_name: String,
    pub quantity: i64,
}
