//! Suppliers and purchase orders screen

use super::Action;
use super::Page;
use super::SITE_LOOKUP_SIZE;
use super::ViewContext;
use super::actions;
use super::local_datetime;
use super::or_dash;
use super::work_orders::site_cell;
use super::work_orders::site_names;
use crate::error::Error;
use crate::model::PURCHASE_ORDER_STATUSES;
use crate::model::PurchaseOrder;
use crate::model::PurchaseOrderInput;
use crate::model::Site;
use crate::model::Supplier;
use crate::model::SupplierInput;
use crate::row;
use crate::table::Table;

pub const SUPPLIER_COLUMNS: [&str; 3] = ["ID", "Name", "Contact"];
pub const SUPPLIER_SORTABLE: [usize; 2] = [0, 1];
pub const ORDER_COLUMNS: [&str; 7] = ["ID", "Supplier", "Site", "Status", "Comment", "Created", "Actions"];
pub const ORDER_SORTABLE: [usize; 5] = [0, 1, 2, 3, 5];

pub fn suppliers_table(suppliers: &[Supplier]) -> Table {
    Table::with_labels(&SUPPLIER_COLUMNS, &SUPPLIER_SORTABLE).with_rows(
        suppliers
            .iter()
            .map(|s| row![s.id, &s.name, or_dash(s.contact.as_deref())]),
    )
}

pub fn orders_table(sites: &[Site], orders: &[PurchaseOrder]) -> Table {
    let names = site_names(sites);
    Table::with_labels(&ORDER_COLUMNS, &ORDER_SORTABLE).with_rows(orders.iter().map(|p| {
        row![
            p.id,
            &p.supplier_name,
            site_cell(&names, p.site_id),
            &p.status,
            or_dash(p.comment.as_deref()),
            local_datetime(&p.created_at),
            actions([
                Action::new("In progress", "purchase-order-status")
                    .attr("id", p.id)
                    .attr("status", "in_progress"),
                Action::new("Close", "purchase-order-status")
                    .attr("id", p.id)
                    .attr("status", "done"),
            ])
        ]
    }))
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let (suppliers, orders, sites) = futures::try_join!(
        ctx.client.suppliers(),
        ctx.client.purchase_orders(),
        ctx.client.sites(1, SITE_LOOKUP_SIZE)
    )?;
    Ok(Page::new("Supply", "Suppliers and purchase orders.")
        .table(Some("Suppliers"), suppliers_table(&suppliers))
        .table(Some("Purchase orders"), orders_table(&sites, &orders)))
}

pub async fn create_supplier(ctx: &ViewContext, input: &SupplierInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_supplier(input), "Supplier created").await
}

pub async fn create_order(ctx: &ViewContext, input: &PurchaseOrderInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_purchase_order(input), "Order created").await
}

pub async fn set_order_status(ctx: &ViewContext, id: i64, status: &str) -> Result<(), Error> {
    if !PURCHASE_ORDER_STATUSES.contains(&status) {
        let e = Error::invalid_input(format!("unknown purchase order status: {status}"));
        ctx.toasts.error(e.message());
        return Err(e);
    }
    ctx.perform(
        ctx.client.set_purchase_order_status(id, status),
        "Order status updated",
    )
    .await
}
