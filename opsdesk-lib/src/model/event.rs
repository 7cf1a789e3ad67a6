//! Feed events

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// An entry of the backend's event log.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub text: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Returns the category this event's type falls into, if any.
    pub fn category(&self) -> Option<EventCategory> {
        EventCategory::of(&self.kind)
    }
}

/// Event severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    /// Also used for severities this client does not know.
    #[serde(other)]
    Info,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Warning,
        Severity::Danger,
        Severity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
        }
    }

    /// CSS badge class for this severity. Info has none.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Warning => "warn",
            Self::Danger => "err",
            Self::Info => "",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| format!("unknown severity: {s}"))
    }
}

/// Coarse grouping of event types, matched by substring.
///
/// Types are free-form on the backend (`plan_published`, `work_order`,
/// `po_created`, `auth_login`, ...); a category is recognized when its
/// needle occurs anywhere in the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Plan,
    WorkOrder,
    Purchase,
    Auth,
}

impl EventCategory {
    pub const ALL: [EventCategory; 4] = [
        EventCategory::Plan,
        EventCategory::WorkOrder,
        EventCategory::Purchase,
        EventCategory::Auth,
    ];

    /// The substring an event type must contain.
    pub fn needle(&self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::WorkOrder => "work_order",
            Self::Purchase => "po_",
            Self::Auth => "auth",
        }
    }

    /// First category (in `ALL` order) whose needle occurs in `kind`.
    pub fn of(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| kind.contains(c.needle()))
    }

    pub fn icon(category: Option<Self>) -> &'static str {
        match category {
            Some(Self::Plan) => "🗓️",
            Some(Self::WorkOrder) => "🛠️",
            Some(Self::Purchase) => "🧾",
            Some(Self::Auth) => "🔑",
            None => "ℹ️",
        }
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.needle() == s)
            .ok_or_else(|| format!("unknown event type filter: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_event() {
        let event: Event = serde_json::from_str(
            r#"{"id":3,"type":"work_order","text":"Created","severity":"warning","created_at":"2025-11-03T08:15:00.5"}"#,
        )
        .unwrap();
        assert_eq!(event.id, 3);
        assert_eq!(event.severity, Severity::Warning);
        assert_eq!(event.category(), Some(EventCategory::WorkOrder));
    }

    #[test]
    fn test_unknown_severity_is_info() {
        let severity: Severity = serde_json::from_str(r#""critical""#).unwrap();
        assert_eq!(severity, Severity::Info);
    }

    #[test]
    fn test_category_matching() {
        assert_eq!(EventCategory::of("plan_published"), Some(EventCategory::Plan));
        assert_eq!(EventCategory::of("po_status"), Some(EventCategory::Purchase));
        assert_eq!(EventCategory::of("auth_login"), Some(EventCategory::Auth));
        assert_eq!(EventCategory::of("site_created"), None);
        assert_eq!(EventCategory::icon(None), "ℹ️");
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!("po_".parse::<EventCategory>(), Ok(EventCategory::Purchase));
        assert_eq!("danger".parse::<Severity>(), Ok(Severity::Danger));
        assert!("purchase".parse::<EventCategory>().is_err());
    }
}
