//! Maintenance work orders screen

use std::collections::HashMap;

use super::Action;
use super::Page;
use super::SITE_LOOKUP_SIZE;
use super::ViewContext;
use super::actions;
use super::or_dash;
use crate::error::Error;
use crate::model::Site;
use crate::model::WORK_ORDER_STATUSES;
use crate::model::WorkOrder;
use crate::model::WorkOrderInput;
use crate::row;
use crate::table::Cell;
use crate::table::Table;

pub const COLUMNS: [&str; 8] = ["ID", "Site", "Title", "Status", "Priority", "Team", "Planned", "Actions"];
pub const SORTABLE: [usize; 6] = [0, 1, 2, 3, 4, 6];

/// Site column: the site's name when known, otherwise its id.
pub(crate) fn site_cell(names: &HashMap<i64, &str>, site_id: i64) -> Cell {
    match names.get(&site_id) {
        Some(name) => Cell::from(*name),
        None => Cell::from(site_id),
    }
}

pub(crate) fn site_names(sites: &[Site]) -> HashMap<i64, &str> {
    sites.iter().map(|s| (s.id, s.name.as_str())).collect()
}

pub fn table(sites: &[Site], orders: &[WorkOrder]) -> Table {
    let names = site_names(sites);
    Table::with_labels(&COLUMNS, &SORTABLE).with_rows(orders.iter().map(|w| {
        row![
            w.id,
            site_cell(&names, w.site_id),
            &w.title,
            &w.status,
            &w.priority,
            or_dash(w.assigned_team.as_deref()),
            w.planned_date.map(|d| d.to_string()).unwrap_or_else(|| super::DASH.to_string()),
            actions([
                Action::new("Start", "work-order-status")
                    .attr("id", w.id)
                    .attr("status", "in_progress"),
                Action::new("Close", "work-order-status")
                    .attr("id", w.id)
                    .attr("status", "done"),
            ])
        ]
    }))
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let (sites, orders) = futures::try_join!(
        ctx.client.sites(1, SITE_LOOKUP_SIZE),
        ctx.client.work_orders()
    )?;
    Ok(Page::new("Work orders", "Create, track status and assign crews.").table(None, table(&sites, &orders)))
}

/// Creates a work order. New orders always start in status `new`.
pub async fn create(ctx: &ViewContext, input: WorkOrderInput) -> Result<i64, Error> {
    let input = WorkOrderInput {
        status: "new".to_string(),
        ..input
    };
    ctx.perform(ctx.client.create_work_order(&input), "Work order created").await
}

pub async fn set_status(ctx: &ViewContext, id: i64, status: &str) -> Result<(), Error> {
    if !WORK_ORDER_STATUSES.contains(&status) {
        let e = Error::invalid_input(format!("unknown work order status: {status}"));
        ctx.toasts.error(e.message());
        return Err(e);
    }
    ctx.perform(ctx.client.set_work_order_status(id, status), "Status updated").await
}
