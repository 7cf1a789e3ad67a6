//! Work orders

use crate::OpsClient;
use crate::error::Error;
use crate::model::StatusChange;
use crate::model::WorkOrder;
use crate::model::WorkOrderInput;
use crate::response::ListEnvelope;

impl OpsClient {
    /// Lists work orders, newest first.
    pub async fn work_orders(&self) -> Result<Vec<WorkOrder>, Error> {
        let list: ListEnvelope<WorkOrder> = self.get_json("/workorders").await?;
        Ok(list.into_results())
    }

    pub async fn create_work_order(&self, input: &WorkOrderInput) -> Result<i64, Error> {
        self.create("/workorders", input).await
    }

    pub async fn set_work_order_status(&self, id: i64, status: &str) -> Result<(), Error> {
        self.post(&format!("/workorders/{id}/status"), &StatusChange::new(status))
            .await?;
        Ok(())
    }
}
