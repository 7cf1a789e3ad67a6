//! Maintenance work orders

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Statuses a work order moves through.
pub const WORK_ORDER_STATUSES: [&str; 4] = ["new", "in_progress", "done", "closed"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub site_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub priority: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub equipment_id: Option<i64>,
    #[serde(default)]
    pub planned_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_team: Option<String>,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Body of the work order create call.
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrderInput {
    pub site_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub priority: String,
    pub title: String,
    pub description: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub assigned_team: Option<String>,
}

impl WorkOrderInput {
    /// A new corrective work order in status `new` with normal priority.
    pub fn new(site_id: i64, title: impl Into<String>) -> Self {
        Self {
            site_id,
            kind: "corrective".to_string(),
            status: "new".to_string(),
            priority: "normal".to_string(),
            title: title.into(),
            description: None,
            planned_date: None,
            assigned_team: None,
        }
    }
}

/// Body of status change calls (work orders and purchase orders).
#[derive(Debug, Clone, Serialize)]
pub struct StatusChange {
    pub status: String,
}

impl StatusChange {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}
