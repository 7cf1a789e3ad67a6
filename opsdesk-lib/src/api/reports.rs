//! Aggregated reports

use crate::OpsClient;
use crate::error::Error;
use crate::model::InventoryBreakdown;
use crate::model::ProductQuantity;
use crate::model::StatusCount;
use crate::response::ListEnvelope;

impl OpsClient {
    pub async fn work_orders_by_status(&self) -> Result<Vec<StatusCount>, Error> {
        let list: ListEnvelope<StatusCount> =
            self.get_json("/reports/work_orders_by_status").await?;
        Ok(list.into_results())
    }

    pub async fn inventory_breakdown(&self) -> Result<InventoryBreakdown, Error> {
        self.get_json("/reports/inventory_breakdown").await
    }

    /// Products with the largest planned quantities.
    pub async fn top_products(&self) -> Result<Vec<ProductQuantity>, Error> {
        let list: ListEnvelope<ProductQuantity> = self.get_json("/reports/top_products").await?;
        Ok(list.into_results())
    }
}
