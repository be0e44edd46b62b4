//! View models built from API replies. The frontend renders these as they
//! are, so all text formatting lives here.

use std::fmt;

use crate::model::{AttendancePercent, AvgFeedback, Event, EventPopularity, StudentParticipation};

pub const EVENTS_LOADING: &str = "Loading events…";

#[derive(Debug, Clone, PartialEq)]
pub struct EventOption {
    pub value: i64,
    pub text: String,
}

impl From<&Event> for EventOption {
    fn from(event: &Event) -> Self {
        Self {
            value: event.id,
            text: format!(
                "{} ({}) - {} [{}]",
                event.name, event.kind, event.date, event.status
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub event: Event,
    pub meta: String,
}

impl From<Event> for EventCard {
    fn from(event: Event) -> Self {
        // zero means the capacity was never set
        let capacity = event
            .capacity
            .filter(|&c| c != 0)
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let meta = format!(
            "{} • {} • Capacity: {} • Status: {}",
            event.kind, event.date, capacity, event.status
        );
        Self { event, meta }
    }
}

/// Two column table, rows kept in the order the server sent them.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub headers: [&'static str; 2],
    pub rows: Vec<[String; 2]>,
}

impl ReportTable {
    pub fn popularity(items: &[EventPopularity]) -> Self {
        Self {
            headers: ["Event", "Registrations"],
            rows: items
                .iter()
                .map(|r| [format!("{} ({})", r.name, r.kind), r.registrations.to_string()])
                .collect(),
        }
    }

    pub fn participation(items: &[StudentParticipation]) -> Self {
        Self {
            headers: ["Student", "Attended"],
            rows: items
                .iter()
                .map(|s| [format!("{} ({})", s.name, s.roll), s.attended.to_string()])
                .collect(),
        }
    }
}

/// A single emphasised figure with a detail line, e.g. `66.67% (2/3)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub headline: String,
    pub detail: String,
}

impl From<&AttendancePercent> for Figure {
    fn from(value: &AttendancePercent) -> Self {
        Self {
            headline: format!("{}%", value.attendance_percent),
            detail: format!("({}/{})", value.present, value.total_registered),
        }
    }
}

impl From<&AvgFeedback> for Figure {
    fn from(value: &AvgFeedback) -> Self {
        Self {
            headline: format!("Average: {}", value.avg_rating),
            detail: format!("({} responses)", value.responses),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.headline, self.detail)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Table(ReportTable),
    Figure(Figure),
    Error(String),
}
