//! Notification feed
//!
//! The feed polls the backend's event log while it is the active view,
//! filters the last batch on the client and flags events the user has
//! already opened. Every poll emits an [`InboxFrame`] describing what to
//! draw.
//!
//! # Lifecycle
//!
//! ```text
//! Inactive --activate()--> Polling --deactivate()--> Inactive
//! ```
//!
//! Each `activate`/`deactivate` bumps a generation counter. A fetch that
//! completes after its generation is gone is discarded, so leaving the feed
//! never produces a late draw.

mod feed;
mod filter;
mod read_state;

pub use feed::*;
pub use filter::EventFilter;
pub use read_state::*;

use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Local;
use chrono::Utc;

use crate::OpsClient;
use crate::api::DEFAULT_EVENT_LIMIT;
use crate::error::Error;
use crate::model::Event;
use crate::model::EventCategory;
use crate::table::escape_html;

/// Where the feed gets its events from.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the `limit` most recent events.
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>, Error>;
}

#[async_trait]
impl EventSource for OpsClient {
    async fn fetch_events(&self, limit: usize) -> Result<Vec<Event>, Error> {
        self.events(limit).await
    }
}

/// Feed polling settings.
#[derive(Debug, Clone)]
pub struct InboxConfig {
    pub poll_interval: Duration,
    pub page_size: usize,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            page_size: DEFAULT_EVENT_LIMIT,
        }
    }
}

/// One drawable feed entry.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxItem {
    pub event: Event,
    pub read: bool,
    pub category: Option<EventCategory>,
}

impl InboxItem {
    pub fn new(event: Event, read: bool) -> Self {
        let category = event.category();
        Self {
            event,
            read,
            category,
        }
    }

    pub fn icon(&self) -> &'static str {
        EventCategory::icon(self.category)
    }

    pub fn badge_class(&self) -> &'static str {
        self.event.severity.badge_class()
    }
}

/// Snapshot of the feed to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct InboxFrame {
    /// Filtered items of the last good batch, newest first.
    pub items: Vec<InboxItem>,
    /// Message of the last fetch failure, cleared by the next success.
    pub error: Option<String>,
    /// When the last good batch arrived.
    pub fetched_at: Option<DateTime<Utc>>,
}

impl InboxFrame {
    /// Unread items in this frame.
    pub fn unread(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if let Some(error) = &self.error {
            let _ = write!(html, r#"<div class="notice err">{}</div>"#, escape_html(error));
        }

        html.push_str(r#"<div class="card"><div class="timeline">"#);
        for item in &self.items {
            let event = &item.event;
            let _ = write!(
                html,
                r#"<div class="timeline-item{}" data-id="{}"><div class="timeline-dot"></div><div class="ev"><span>{}</span><span class="badge {}">{}</span><span class="text-slate-300">{}</span><span class="text-slate-500 text-sm">• {}</span></div></div>"#,
                if item.read { " opacity-60" } else { "" },
                event.id,
                item.icon(),
                item.badge_class(),
                event.severity,
                escape_html(&event.text),
                local_time(&event.created_at),
            );
        }
        html.push_str("</div></div>");
        html
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        if self.items.is_empty() {
            out.push_str("(no events)\n");
        }
        for item in &self.items {
            let event = &item.event;
            let _ = writeln!(
                out,
                "{} {:>6} {} {:<7} {}  ({})",
                if item.read { " " } else { "*" },
                event.id,
                item.icon(),
                event.severity,
                event.text,
                local_time(&event.created_at),
            );
        }
        out
    }
}

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::Severity;

    fn item(id: i64, kind: &str, severity: Severity, text: &str, read: bool) -> InboxItem {
        InboxItem::new(
            Event {
                id,
                kind: kind.to_string(),
                severity,
                text: text.to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 11, 3, 8, 15, 0).unwrap(),
            },
            read,
        )
    }

    #[test]
    fn test_item_decorations() {
        let plan = item(1, "plan_published", Severity::Success, "Plan out", false);
        assert_eq!(plan.icon(), "🗓️");
        assert_eq!(plan.badge_class(), "ok");

        let other = item(2, "site_created", Severity::Info, "Site", false);
        assert_eq!(other.icon(), "ℹ️");
        assert_eq!(other.badge_class(), "");
    }

    #[test]
    fn test_frame_html() {
        let frame = InboxFrame {
            items: vec![
                item(1, "work_order", Severity::Danger, "Pump <3> down", false),
                item(2, "auth_login", Severity::Info, "admin", true),
            ],
            error: None,
            fetched_at: None,
        };
        let html = frame.to_html();
        assert!(html.contains(r#"<div class="timeline-item" data-id="1">"#));
        assert!(html.contains(r#"<div class="timeline-item opacity-60" data-id="2">"#));
        assert!(html.contains(r#"<span class="badge err">danger</span>"#));
        assert!(html.contains("Pump &lt;3&gt; down"));
        assert_eq!(frame.unread(), 1);
    }

    #[test]
    fn test_frame_error_indicator() {
        let frame = InboxFrame {
            items: vec![item(1, "po_created", Severity::Success, "PO", false)],
            error: Some("Bad gateway".to_string()),
            fetched_at: None,
        };
        assert!(frame.to_html().starts_with(r#"<div class="notice err">Bad gateway</div>"#));
        let text = frame.to_text();
        assert!(text.starts_with("! Bad gateway\n"));
        assert!(text.contains("PO"));
    }

    #[test]
    fn test_empty_frame_text() {
        let frame = InboxFrame {
            items: Vec::new(),
            error: None,
            fetched_at: None,
        };
        assert_eq!(frame.to_text(), "(no events)\n");
        assert_eq!(frame.to_html(), r#"<div class="card"><div class="timeline"></div></div>"#);
    }
}
