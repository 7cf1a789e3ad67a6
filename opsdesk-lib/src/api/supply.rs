//! Suppliers and purchase orders

use crate::OpsClient;
use crate::error::Error;
use crate::model::PurchaseOrder;
use crate::model::PurchaseOrderInput;
use crate::model::StatusChange;
use crate::model::Supplier;
use crate::model::SupplierInput;
use crate::response::ListEnvelope;

impl OpsClient {
    pub async fn suppliers(&self) -> Result<Vec<Supplier>, Error> {
        let list: ListEnvelope<Supplier> = self.get_json("/suppliers").await?;
        Ok(list.into_results())
    }

    pub async fn create_supplier(&self, input: &SupplierInput) -> Result<i64, Error> {
        self.create("/suppliers", input).await
    }

    pub async fn purchase_orders(&self) -> Result<Vec<PurchaseOrder>, Error> {
        let list: ListEnvelope<PurchaseOrder> = self.get_json("/purchase_orders").await?;
        Ok(list.into_results())
    }

    pub async fn create_purchase_order(&self, input: &PurchaseOrderInput) -> Result<i64, Error> {
        self.create("/purchase_orders", input).await
    }

    pub async fn set_purchase_order_status(&self, id: i64, status: &str) -> Result<(), Error> {
        self.put(&format!("/purchase_orders/{id}"), &StatusChange::new(status))
            .await?;
        Ok(())
    }
}
