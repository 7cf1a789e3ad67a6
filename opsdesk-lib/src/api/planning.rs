//! Production plans

use crate::OpsClient;
use crate::error::Error;
use crate::model::Plan;
use crate::model::PlanDetail;
use crate::model::PlanInput;
use crate::model::PlanItemInput;
use crate::response::ListEnvelope;

impl OpsClient {
    pub async fn plans(&self) -> Result<Vec<Plan>, Error> {
        let list: ListEnvelope<Plan> = self.get_json("/plans").await?;
        Ok(list.into_results())
    }

    pub async fn plan(&self, id: i64) -> Result<PlanDetail, Error> {
        self.get_json(&format!("/plans/{id}")).await
    }

    pub async fn create_plan(&self, input: &PlanInput) -> Result<i64, Error> {
        self.create("/plans", input).await
    }

    pub async fn add_plan_item(&self, plan_id: i64, input: &PlanItemInput) -> Result<i64, Error> {
        self.create(&format!("/plans/{plan_id}/items"), input).await
    }
}
