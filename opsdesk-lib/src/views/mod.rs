//! View controllers
//!
//! Each controller fetches what its screen needs and builds a [`Page`]:
//! titled tables and charts the front end draws as it sees fit. Actions
//! (create, update, delete, status changes) go through [`ViewContext`],
//! which reports every outcome as a toast.

pub mod dashboard;
pub mod equipment;
pub mod inventory;
pub mod planning;
pub mod sites;
pub mod supply;
pub mod users;
pub mod work_orders;

use std::fmt::Write;
use std::future::Future;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Local;
use chrono::Utc;

use crate::OpsClient;
use crate::confirm::Confirm;
use crate::error::Error;
use crate::table::Cell;
use crate::table::Table;
use crate::table::escape_html;
use crate::toast::Toasts;

/// Placeholder shown for missing optional values.
pub const DASH: &str = "—";

/// Page size used when listing sites for a screen.
pub(crate) const SITE_PAGE_SIZE: u32 = 50;
/// Page size used when sites only serve as a name lookup.
pub(crate) const SITE_LOOKUP_SIZE: u32 = 100;

/// Everything a controller needs: the backend, the toast queue and a way to
/// ask the user before destructive actions.
#[derive(Clone)]
pub struct ViewContext {
    pub client: OpsClient,
    pub toasts: Toasts,
    pub confirm: Arc<dyn Confirm>,
}

impl ViewContext {
    pub fn new(client: OpsClient, toasts: Toasts, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            client,
            toasts,
            confirm,
        }
    }

    /// Runs an action and reports its outcome as a toast.
    ///
    /// Success shows `success`; failure shows the error message and is
    /// returned unchanged.
    pub async fn perform<T, F>(&self, action: F, success: &str) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        match action.await {
            Ok(value) => {
                self.toasts.success(success);
                Ok(value)
            }
            Err(e) => {
                self.toasts.error(e.message());
                Err(e)
            }
        }
    }

    /// Asks the user; a declined question is logged and nothing is sent.
    pub async fn confirmed(&self, question: &str) -> bool {
        let accepted = self.confirm.confirm(question).await;
        if !accepted {
            log::debug!("declined: {}", question);
        }
        accepted
    }
}

/// A rendered screen.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<Section>,
}

/// One block of a page.
#[derive(Debug, Clone)]
pub enum Section {
    Table { title: Option<String>, table: Table },
    Chart(Chart),
    Notice(String),
}

/// How a chart should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Pie,
    Bar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Doughnut => "doughnut",
            Self::Pie => "pie",
            Self::Bar => "bar",
        }
    }
}

/// A single labelled series.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<(String, f64)>,
}

impl Page {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            sections: Vec::new(),
        }
    }

    pub fn table(mut self, title: Option<&str>, table: Table) -> Self {
        self.sections.push(Section::Table {
            title: title.map(str::to_string),
            table,
        });
        self
    }

    pub fn chart(mut self, chart: Chart) -> Self {
        self.sections.push(Section::Chart(chart));
        self
    }

    pub fn notice(mut self, text: impl Into<String>) -> Self {
        self.sections.push(Section::Notice(text.into()));
        self
    }

    /// Tables in page order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.sections.iter().filter_map(|section| match section {
            Section::Table { table, .. } => Some(table),
            _ => None,
        })
    }

    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.sections.iter_mut().filter_map(|section| match section {
            Section::Table { table, .. } => Some(table),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.sections.iter().filter_map(|section| match section {
            Section::Chart(chart) => Some(chart),
            _ => None,
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().filter_map(|section| match section {
            Section::Notice(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_html(&self) -> String {
        let mut html = format!(
            r#"<div class="mb-3"><div class="text-2xl font-semibold mb-1">{}</div><div class="text-slate-400">{}</div></div>"#,
            escape_html(&self.title),
            escape_html(&self.subtitle)
        );

        for section in &self.sections {
            match section {
                Section::Table { title, table } => {
                    html.push_str(r#"<div class="card">"#);
                    if let Some(title) = title {
                        let _ = write!(
                            html,
                            r#"<div class="text-lg font-semibold mb-2">{}</div>"#,
                            escape_html(title)
                        );
                    }
                    html.push_str(&table.to_html());
                    html.push_str("</div>");
                }
                Section::Chart(chart) => html.push_str(&chart.to_html()),
                Section::Notice(text) => {
                    let _ = write!(
                        html,
                        r#"<div class="card text-sm text-red-300">{}</div>"#,
                        escape_html(text)
                    );
                }
            }
        }
        html
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("== {} ==\n", self.title);
        if !self.subtitle.is_empty() {
            let _ = writeln!(out, "{}", self.subtitle);
        }

        for section in &self.sections {
            out.push('\n');
            match section {
                Section::Table { title, table } => {
                    if let Some(title) = title {
                        let _ = writeln!(out, "-- {title} --");
                    }
                    out.push_str(&table.to_text());
                }
                Section::Chart(chart) => out.push_str(&chart.to_text()),
                Section::Notice(text) => {
                    let _ = writeln!(out, "! {text}");
                }
            }
        }
        out
    }
}

impl Chart {
    pub fn new(title: impl Into<String>, kind: ChartKind, points: Vec<(String, f64)>) -> Self {
        Self {
            title: title.into(),
            kind,
            points,
        }
    }

    pub fn to_html(&self) -> String {
        let labels: Vec<&str> = self.points.iter().map(|(label, _)| label.as_str()).collect();
        let values: Vec<f64> = self.points.iter().map(|(_, value)| *value).collect();
        format!(
            r#"<div class="card"><div class="text-slate-400 text-sm mb-1">{}</div><canvas data-kind="{}" data-labels="{}" data-values="{}"></canvas></div>"#,
            escape_html(&self.title),
            self.kind.as_str(),
            escape_html(&serde_json::Value::from(labels).to_string()),
            escape_html(&serde_json::Value::from(values).to_string()),
        )
    }

    /// Horizontal bars scaled to the largest value.
    pub fn to_text(&self) -> String {
        const BAR: usize = 30;

        let mut out = format!("-- {} --\n", self.title);
        let label_width = self.points.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let max = self.points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        for (label, value) in &self.points {
            let len = if max > 0.0 {
                ((value / max) * BAR as f64).round() as usize
            } else {
                0
            };
            let pad = label_width - label.chars().count();
            let _ = writeln!(out, "{label}{}  {} {value}", " ".repeat(pad), "#".repeat(len));
        }
        out
    }
}

/// A button in a row's action cell.
///
/// Attributes become `data-*` attributes; all values are escaped.
#[derive(Debug, Clone)]
pub(crate) struct Action {
    label: &'static str,
    name: &'static str,
    attrs: Vec<(&'static str, String)>,
}

impl Action {
    pub(crate) fn new(label: &'static str, name: &'static str) -> Self {
        Self {
            label,
            name,
            attrs: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, key: &'static str, value: impl ToString) -> Self {
        self.attrs.push((key, value.to_string()));
        self
    }

    fn render(&self) -> String {
        let mut html = format!(r#"<button class="btn-ghost" data-action="{}""#, self.name);
        for (key, value) in &self.attrs {
            let _ = write!(html, r#" data-{key}="{}""#, escape_html(value));
        }
        let _ = write!(html, ">{}</button>", self.label);
        html
    }
}

/// Action cell holding one or more buttons.
pub(crate) fn actions(buttons: impl IntoIterator<Item = Action>) -> Cell {
    let inner: String = buttons.into_iter().map(|b| b.render()).collect();
    Cell::markup(format!(r#"<div class="flex gap-2">{inner}</div>"#))
}

/// Action cell with a single bare button.
pub(crate) fn action(button: Action) -> Cell {
    Cell::markup(button.render())
}

/// `value`, or the dash placeholder when missing or empty.
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(DASH)
        .to_string()
}

pub(crate) fn local_datetime(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AlwaysConfirm;
    use crate::row;

    fn context() -> ViewContext {
        let client = OpsClient::builder().url("http://127.0.0.1:9").build().unwrap();
        ViewContext::new(client, Toasts::new(), Arc::new(AlwaysConfirm(false)))
    }

    #[test]
    fn test_action_markup_is_escaped() {
        let cell = actions([
            Action::new("Edit", "edit-site").attr("id", 3).attr("name", "O'Neil <North>"),
            Action::new("Delete", "delete-site").attr("id", 3),
        ]);
        assert_eq!(
            cell.render(),
            r#"<div class="flex gap-2"><button class="btn-ghost" data-action="edit-site" data-id="3" data-name="O&#39;Neil &lt;North&gt;">Edit</button><button class="btn-ghost" data-action="delete-site" data-id="3">Delete</button></div>"#
        );
        assert_eq!(cell.text(), "Edit Delete");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), DASH);
        assert_eq!(or_dash(Some("")), DASH);
        assert_eq!(or_dash(Some("Team 1")), "Team 1");
    }

    #[test]
    fn test_page_rendering() {
        let page = Page::new("Sites", "All sites")
            .table(Some("List"), Table::with_labels(&["ID"], &[0]).with_rows([row![1]]))
            .chart(Chart::new(
                "Stock",
                ChartKind::Pie,
                vec![("OK".into(), 3.0), ("LOW".into(), 1.0)],
            ))
            .notice("Heads up");

        let html = page.to_html();
        assert!(html.contains(r#"<div class="text-lg font-semibold mb-2">List</div>"#));
        assert!(html.contains(r#"data-kind="pie" data-labels="[&quot;OK&quot;,&quot;LOW&quot;]""#));
        assert!(html.contains("Heads up"));

        let text = page.to_text();
        assert!(text.starts_with("== Sites ==\nAll sites\n"));
        assert!(text.contains("-- List --\nID *\n"));
        assert!(text.contains("OK   ############################## 3\n"));
        assert!(text.contains("! Heads up\n"));
        assert_eq!(page.tables().count(), 1);
        assert_eq!(page.charts().count(), 1);
    }

    #[tokio::test]
    async fn test_perform_reports_outcome() {
        let ctx = context();
        let ok: Result<i64, Error> = ctx.perform(async { Ok(5) }, "Created").await;
        assert_eq!(ok.unwrap(), 5);
        let err: Result<(), Error> = ctx
            .perform(async { Err(Error::invalid_input("bad id")) }, "Created")
            .await;
        assert!(err.is_err());

        let toasts = ctx.toasts.drain();
        assert_eq!(toasts[0].message, "Created");
        assert_eq!(toasts[1].message, "Invalid input: bad id");
        assert!(!ctx.confirmed("Delete?").await);
    }
}
