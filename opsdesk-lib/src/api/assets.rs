//! Sites, equipment, materials and stock

use crate::OpsClient;
use crate::error::Error;
use crate::model::Equipment;
use crate::model::EquipmentInput;
use crate::model::EquipmentType;
use crate::model::Material;
use crate::model::MaterialInput;
use crate::model::Site;
use crate::model::SiteInput;
use crate::model::SiteInventory;
use crate::model::StockLevel;
use crate::response::ListEnvelope;

impl OpsClient {
    pub async fn sites(&self, page: u32, page_size: u32) -> Result<Vec<Site>, Error> {
        let list: ListEnvelope<Site> = self
            .get_json(&format!("/sites?page={page}&page_size={page_size}"))
            .await?;
        Ok(list.into_results())
    }

    pub async fn create_site(&self, input: &SiteInput) -> Result<i64, Error> {
        self.create("/sites", input).await
    }

    pub async fn update_site(&self, id: i64, input: &SiteInput) -> Result<(), Error> {
        self.put(&format!("/sites/{id}"), input).await?;
        Ok(())
    }

    pub async fn delete_site(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("/sites/{id}")).await?;
        Ok(())
    }

    pub async fn equipment_types(&self) -> Result<Vec<EquipmentType>, Error> {
        let list: ListEnvelope<EquipmentType> = self.get_json("/equipment-types").await?;
        Ok(list.into_results())
    }

    pub async fn equipment(&self, page: u32, page_size: u32) -> Result<Vec<Equipment>, Error> {
        let list: ListEnvelope<Equipment> = self
            .get_json(&format!("/equipment?page={page}&page_size={page_size}"))
            .await?;
        Ok(list.into_results())
    }

    pub async fn create_equipment(&self, input: &EquipmentInput) -> Result<i64, Error> {
        self.create("/equipment", input).await
    }

    pub async fn update_equipment(&self, id: i64, input: &EquipmentInput) -> Result<(), Error> {
        self.put(&format!("/equipment/{id}"), input).await?;
        Ok(())
    }

    pub async fn delete_equipment(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("/equipment/{id}")).await?;
        Ok(())
    }

    pub async fn materials(&self, page: u32, page_size: u32) -> Result<Vec<Material>, Error> {
        let list: ListEnvelope<Material> = self
            .get_json(&format!("/materials?page={page}&page_size={page_size}"))
            .await?;
        Ok(list.into_results())
    }

    pub async fn create_material(&self, input: &MaterialInput) -> Result<i64, Error> {
        self.create("/materials", input).await
    }

    pub async fn update_material(&self, id: i64, input: &MaterialInput) -> Result<(), Error> {
        self.put(&format!("/materials/{id}"), input).await?;
        Ok(())
    }

    pub async fn delete_material(&self, id: i64) -> Result<(), Error> {
        self.delete(&format!("/materials/{id}")).await?;
        Ok(())
    }

    pub async fn site_inventory(&self, site_id: i64) -> Result<SiteInventory, Error> {
        self.get_json(&format!("/sites/{site_id}/inventory")).await
    }

    /// Sets on-hand quantity and reorder point of one material at a site.
    pub async fn set_stock_level(
        &self,
        site_id: i64,
        material_id: i64,
        level: &StockLevel,
    ) -> Result<(), Error> {
        self.put(&format!("/sites/{site_id}/inventory/{material_id}"), level)
            .await?;
        Ok(())
    }
}
