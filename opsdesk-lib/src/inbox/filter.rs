//! Client-side feed filtering

use crate::model::Event;
use crate::model::EventCategory;
use crate::model::Severity;

/// Type and severity facets applied to the last fetched batch.
///
/// `None` on a facet means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub severity: Option<Severity>,
}

impl EventFilter {
    pub fn new(category: Option<EventCategory>, severity: Option<Severity>) -> Self {
        Self { category, severity }
    }

    /// Whether the filter passes everything.
    pub fn is_all(&self) -> bool {
        self.category.is_none() && self.severity.is_none()
    }

    /// Type matches by substring; severity matches exactly.
    pub fn matches(&self, event: &Event) -> bool {
        let type_ok = self
            .category
            .is_none_or(|category| event.kind.contains(category.needle()));
        let severity_ok = self.severity.is_none_or(|severity| event.severity == severity);
        type_ok && severity_ok
    }

    /// Events passing the filter, in batch order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}
