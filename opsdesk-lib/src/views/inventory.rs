//! Materials and stock screen
//!
//! Without a site the screen is a site picker; with one it shows that
//! site's stock levels plus the material catalogue.

use super::Action;
use super::Page;
use super::SITE_PAGE_SIZE;
use super::ViewContext;
use super::action;
use super::actions;
use crate::error::Error;
use crate::model::InventoryItem;
use crate::model::Material;
use crate::model::MaterialInput;
use crate::model::Site;
use crate::model::StockLevel;
use crate::row;
use crate::table::Cell;
use crate::table::Table;

pub const PICKER_COLUMNS: [&str; 4] = ["ID", "Site", "Region", ""];
pub const PICKER_SORTABLE: [usize; 3] = [0, 1, 2];
pub const STOCK_COLUMNS: [&str; 6] = ["Material", "Name", "Unit", "On hand", "ROP", "Actions"];
pub const STOCK_SORTABLE: [usize; 4] = [0, 1, 3, 4];
pub const MATERIAL_COLUMNS: [&str; 5] = ["ID", "Name", "Unit", "Reject %", "Actions"];
pub const MATERIAL_SORTABLE: [usize; 4] = [0, 1, 2, 3];

const MATERIAL_PAGE_SIZE: u32 = 200;

pub fn picker_table(sites: &[Site]) -> Table {
    Table::with_labels(&PICKER_COLUMNS, &PICKER_SORTABLE).with_rows(sites.iter().map(|site| {
        row![
            site.id,
            &site.name,
            &site.region,
            action(Action::new("Show stock", "open-inventory").attr("site", site.id))
        ]
    }))
}

pub fn stock_table(site_id: i64, items: &[InventoryItem]) -> Table {
    Table::with_labels(&STOCK_COLUMNS, &STOCK_SORTABLE).with_rows(items.iter().map(|item| {
        row![
            item.material_id,
            &item.material_name,
            &item.unit,
            item.qty_on_hand,
            item.reorder_point,
            actions([Action::new("Edit stock", "edit-stock")
                .attr("site", site_id)
                .attr("material", item.material_id)
                .attr("qty", item.qty_on_hand)
                .attr("rop", item.reorder_point)
                .attr("name", &item.material_name)])
        ]
    }))
}

pub fn materials_table(materials: &[Material]) -> Table {
    Table::with_labels(&MATERIAL_COLUMNS, &MATERIAL_SORTABLE).with_rows(materials.iter().map(|m| {
        row![
            m.id,
            &m.name,
            &m.unit,
            Cell::from(m.reject_percent.unwrap_or(0.0)),
            actions([
                Action::new("Edit", "edit-material")
                    .attr("id", m.id)
                    .attr("name", &m.name)
                    .attr("unit", &m.unit)
                    .attr("reject", m.reject_percent.unwrap_or(0.0)),
                Action::new("Delete", "delete-material")
                    .attr("id", m.id)
                    .attr("name", &m.name),
            ])
        ]
    }))
}

pub async fn page(ctx: &ViewContext, site: Option<i64>) -> Result<Page, Error> {
    let Some(site_id) = site else {
        let sites = ctx.client.sites(1, SITE_PAGE_SIZE).await?;
        return Ok(Page::new("Materials and stock", "Stock by site.").table(None, picker_table(&sites)));
    };

    let (inventory, materials) = futures::try_join!(
        ctx.client.site_inventory(site_id),
        ctx.client.materials(1, MATERIAL_PAGE_SIZE)
    )?;

    let stock_title = format!("Stock at site #{}", inventory.site_id);
    Ok(Page::new("Materials and stock", "Stock at the selected site.")
        .table(Some(&stock_title), stock_table(site_id, &inventory.items))
        .table(Some("All materials"), materials_table(&materials)))
}

pub async fn set_stock(
    ctx: &ViewContext,
    site_id: i64,
    material_id: i64,
    level: StockLevel,
) -> Result<(), Error> {
    if !level.qty_on_hand.is_finite() || !level.reorder_point.is_finite() {
        let e = Error::invalid_input("stock levels must be numbers");
        ctx.toasts.error(e.message());
        return Err(e);
    }
    ctx.perform(
        ctx.client.set_stock_level(site_id, material_id, &level),
        "Stock level updated",
    )
    .await
}

pub async fn create_material(ctx: &ViewContext, input: &MaterialInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_material(input), "Material created").await
}

pub async fn update_material(ctx: &ViewContext, id: i64, input: &MaterialInput) -> Result<(), Error> {
    ctx.perform(ctx.client.update_material(id, input), "Saved").await
}

/// Deletes after confirmation. Returns `false` if the user declined.
pub async fn delete_material(ctx: &ViewContext, id: i64, name: &str) -> Result<bool, Error> {
    if !ctx.confirmed(&format!("Delete material «{name}»?")).await {
        return Ok(false);
    }
    ctx.perform(ctx.client.delete_material(id), "Deleted").await?;
    Ok(true)
}
