//! Sites screen

use super::Action;
use super::Page;
use super::SITE_PAGE_SIZE;
use super::ViewContext;
use super::actions;
use crate::error::Error;
use crate::model::Site;
use crate::model::SiteInput;
use crate::row;
use crate::table::Table;

pub const COLUMNS: [&str; 4] = ["ID", "Site", "Region", "Actions"];
pub const SORTABLE: [usize; 3] = [0, 1, 2];

pub fn table(sites: &[Site]) -> Table {
    Table::with_labels(&COLUMNS, &SORTABLE).with_rows(sites.iter().map(|site| {
        row![
            site.id,
            &site.name,
            &site.region,
            actions([
                Action::new("Stock", "open-inventory").attr("site", site.id),
                Action::new("Edit", "edit-site")
                    .attr("id", site.id)
                    .attr("name", &site.name)
                    .attr("region", &site.region),
                Action::new("Delete", "delete-site")
                    .attr("id", site.id)
                    .attr("name", &site.name),
            ])
        ]
    }))
}

pub async fn page(ctx: &ViewContext) -> Result<Page, Error> {
    let sites = ctx.client.sites(1, SITE_PAGE_SIZE).await?;
    Ok(Page::new("Sites", "Manage the holding's sites.").table(None, table(&sites)))
}

pub async fn create(ctx: &ViewContext, input: &SiteInput) -> Result<i64, Error> {
    ctx.perform(ctx.client.create_site(input), "Site created").await
}

pub async fn update(ctx: &ViewContext, id: i64, input: &SiteInput) -> Result<(), Error> {
    ctx.perform(ctx.client.update_site(id, input), "Saved").await
}

/// Deletes after confirmation. Returns `false` if the user declined.
pub async fn delete(ctx: &ViewContext, id: i64, name: &str) -> Result<bool, Error> {
    if !ctx.confirmed(&format!("Delete site «{name}»?")).await {
        return Ok(false);
    }
    ctx.perform(ctx.client.delete_site(id), "Deleted").await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_rows() {
        let sites = vec![
            Site {
                id: 2,
                name: "Plant B".into(),
                region: "North".into(),
            },
            Site {
                id: 1,
                name: "Plant A".into(),
                region: "South".into(),
            },
        ];
        let mut table = table(&sites);
        assert_eq!(table.columns().len(), 4);
        assert!(!table.columns()[3].sortable);
        assert_eq!(table.column_texts(3)[0], "Stock Edit Delete");

        table.sort_by(1);
        assert_eq!(table.column_texts(0), vec!["1", "2"]);
    }
}
