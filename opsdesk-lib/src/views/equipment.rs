//! Equipment register screen

use std::collections::HashMap;

use super::Action;
use super::Page;
use super::ViewContext;
use super::actions;
use crate::error::Error;
use crate::model::Equipment;
use crate::model::EquipmentInput;
use crate::model::EquipmentType;
use crate::row;
use crate::table::Table;

pub const COLUMNS: [&str; 8] = ["ID", "Code", "Name", "Status", "Site", "Type", "Commissioned", "Actions"];
pub const SORTABLE: [usize; 6] = [0, 1, 2, 3, 4, 6];

const PAGE_SIZE: u32 = 100;

pub fn table(types: &[EquipmentType], equipment: &[Equipment]) -> Table {
    let type_names: HashMap<i64, &str> = types.iter().map(|t| (t.id, t.name.as_str())).collect();

    Table::with_labels(&COLUMNS, &SORTABLE).with_rows(equipment.iter().map(|e| {
        let type_name = type_names.get(&e.equipment_type_id).copied().unwrap_or_default();
        row![
            e.id,
            &e.code,
            &e.name,
            &e.status,
            e.site_id,
            format!("{} / {}", e.equipment_type_id, type_name),
            e.commissioning_date.to_string(),
            actions([
                Action::new("Edit", "edit-equipment").attr("id", e.id),
                Action::new("Delete", "delete-equipment")
                    .attr("id", e.id)
                    .attr("code", &e.code),
            ])
        ]
    }))
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let (types, equipment) = futures::try_join!(
        ctx.client.equipment_types(),
        ctx.client.equipment(1, PAGE_SIZE)
    )?;
    Ok(Page::new("Equipment", "Register of process equipment.").table(None, table(&types, &equipment)))
}

pub async fn create(ctx: &ViewContext, input: &EquipmentInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_equipment(input), "Equipment added").await
}

pub async fn update(ctx: &ViewContext, id: i64, input: &EquipmentInput) -> Result<(), Error> {
    ctx.perform(ctx.client.update_equipment(id, input), "Saved").await
}

/// Deletes after confirmation. Returns `false` if the user declined.
pub async fn delete(ctx: &ViewContext, id: i64, code: &str) -> Result<bool, Error> {
    if !ctx.confirmed(&format!("Delete equipment {code}?")).await {
        return Ok(false);
    }
    ctx.perform(ctx.client.delete_equipment(id), "Deleted").await?;
    Ok(true)
}
