//! Sites, equipment, materials and stock

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    pub id: i64,
    pub name: String,
    pub region: String,
}

/// Body of site create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct SiteInput {
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EquipmentType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub site_id: i64,
    pub equipment_type_id: i64,
    pub code: String,
    pub name: String,
    pub status: String,
    pub commissioning_date: NaiveDate,
}

/// Body of equipment create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentInput {
    pub site_id: i64,
    pub equipment_type_id: i64,
    pub code: String,
    pub name: String,
    pub status: String,
    pub commissioning_date: NaiveDate,
}

impl From<&Equipment> for EquipmentInput {
    fn from(equipment: &Equipment) -> Self {
        Self {
            site_id: equipment.site_id,
            equipment_type_id: equipment.equipment_type_id,
            code: equipment.code.clone(),
            name: equipment.name.clone(),
            status: equipment.status.clone(),
            commissioning_date: equipment.commissioning_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Material {
    pub id: i64,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub reject_percent: Option<f64>,
}

/// Body of material create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct MaterialInput {
    pub name: String,
    pub unit: String,
    pub reject_percent: f64,
}

/// Stock of one site, as returned by `/sites/{id}/inventory`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteInventory {
    pub site_id: i64,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryItem {
    pub material_id: i64,
    pub material_name: String,
    pub unit: String,
    pub qty_on_hand: f64,
    pub reorder_point: f64,
}

impl InventoryItem {
    /// Stock fell below its reorder point.
    pub fn is_low(&self) -> bool {
        self.qty_on_hand < self.reorder_point
    }
}

/// Body of the stock level update call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StockLevel {
    pub qty_on_hand: f64,
    pub reorder_point: f64,
}
