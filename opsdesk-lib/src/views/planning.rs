//! Production planning screen

use super::Action;
use super::Page;
use super::SITE_LOOKUP_SIZE;
use super::ViewContext;
use super::action;
use super::work_orders::site_cell;
use super::work_orders::site_names;
use crate::error::Error;
use crate::model::Plan;
use crate::model::PlanDetail;
use crate::model::PlanInput;
use crate::model::PlanItemInput;
use crate::model::Site;
use crate::row;
use crate::table::Table;

pub const PLAN_COLUMNS: [&str; 5] = ["ID", "Site", "Period", "Status", ""];
pub const PLAN_SORTABLE: [usize; 4] = [0, 1, 2, 3];
pub const ITEM_COLUMNS: [&str; 3] = ["ID", "Product", "Quantity"];
pub const ITEM_SORTABLE: [usize; 3] = [0, 1, 2];

pub fn plans_table(sites: &[Site], plans: &[Plan]) -> Table {
    let names = site_names(sites);
    Table::with_labels(&PLAN_COLUMNS, &PLAN_SORTABLE).with_rows(plans.iter().map(|p| {
        row![
            p.id,
            site_cell(&names, p.site_id),
            &p.period,
            &p.status,
            action(Action::new("Open", "open-plan").attr("id", p.id))
        ]
    }))
}

pub fn items_table(detail: &PlanDetail) -> Table {
    Table::with_labels(&ITEM_COLUMNS, &ITEM_SORTABLE).with_rows(
        detail
            .items
            .iter()
            .map(|item| row![item.id, &item.product_name, item.quantity]),
    )
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let (plans, sites) = futures::try_join!(ctx.client.plans(), ctx.client.sites(1, SITE_LOOKUP_SIZE))?;
    Ok(Page::new("Production planning", "Yearly, quarterly and monthly plans.").table(None, plans_table(&sites, &plans)))
}

/// The plan list followed by the items of one plan.
pub async fn plan_page(ctx: &ViewContext, id: i64) -> Result<Page, Error> {
    let (page, detail) = futures::try_join!(page(ctx), ctx.client.plan(id))?;
    let title = format!(
        "Plan #{} ({}) @ {}",
        detail.plan.id, detail.plan.period, detail.plan.site_name
    );
    Ok(page.table(Some(&title), items_table(&detail)))
}

pub async fn create(ctx: &ViewContext, input: &PlanInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_plan(input), "Plan created").await
}

pub async fn add_item(ctx: &ViewContext, plan_id: i64, input: &PlanItemInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.add_plan_item(plan_id, input), "Item added").await
}
