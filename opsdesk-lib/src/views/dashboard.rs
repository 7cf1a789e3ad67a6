//! Dashboard and reports
//!
//! Both screens show the same three charts, fetched concurrently.

use super::Chart;
use super::ChartKind;
use super::Page;
use super::ViewContext;
use crate::error::Error;
use crate::model::InventoryBreakdown;
use crate::model::ProductQuantity;
use crate::model::StatusCount;

pub fn charts(
    by_status: &[StatusCount],
    inventory: InventoryBreakdown,
    top: &[ProductQuantity],
) -> [Chart; 3] {
    [
        Chart::new(
            "Work orders by status",
            ChartKind::Doughnut,
            by_status
                .iter()
                .map(|s| (s.status.clone(), s.count as f64))
                .collect(),
        ),
        Chart::new(
            "Stock: OK vs LOW",
            ChartKind::Pie,
            vec![
                ("OK".to_string(), inventory.ok as f64),
                ("LOW".to_string(), inventory.low as f64),
            ],
        ),
        Chart::new(
            "Top products in plans",
            ChartKind::Bar,
            top.iter()
                .map(|p| (p.product_name.clone(), p.quantity as f64))
                .collect(),
        ),
    ]
}

async fn with_charts(ctx: &ViewContext, page: Page) -> Result<Page, Error> {
    let (by_status, inventory, top) = futures::try_join!(
        ctx.client.work_orders_by_status(),
        ctx.client.inventory_breakdown(),
        ctx.client.top_products()
    )?;
    Ok(charts(&by_status, inventory, &top)
        .into_iter()
        .fold(page, Page::chart))
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    with_charts(ctx, Page::new("Holding overview", "Key metrics in real time.")).await
}

pub async fn reports(ctx: &ViewContext) -> Result<Page, Error> {
    with_charts(ctx, Page::new("Reports", "Maintenance, stock and planning trends.")).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_series() {
        let [status, stock, top] = charts(
            &[
                StatusCount {
                    status: "new".into(),
                    count: 4,
                },
                StatusCount {
                    status: "done".into(),
                    count: 2,
                },
            ],
            InventoryBreakdown { ok: 10, low: 3 },
            &[],
        );
        assert_eq!(status.kind, ChartKind::Doughnut);
        assert_eq!(status.points, vec![("new".to_string(), 4.0), ("done".to_string(), 2.0)]);
        assert_eq!(stock.points[1], ("LOW".to_string(), 3.0));
        assert!(top.points.is_empty());
    }
}
