use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    #[default]
    Active,
    Scheduled,
    Cancelled,
    Other(String),
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Scheduled => "scheduled",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Other(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, EventStatus::Cancelled)
    }
}

impl From<String> for EventStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => EventStatus::Active,
            "scheduled" => EventStatus::Scheduled,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Other(value),
        }
    }
}

impl From<EventStatus> for String {
    fn from(value: EventStatus) -> Self {
        match value {
            EventStatus::Other(s) => s,
            status => status.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(default)]
    pub college_id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub status: EventStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(default)]
    pub college_id: Option<i64>,
    pub roll: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl FromStr for AttendanceStatus {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(PortalError::validation(
                "Status must be 'present' or 'absent'",
            )),
        }
    }
}

/// Feedback rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for Rating {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Rating::new)
            .ok_or_else(|| PortalError::validation("Rating must be an integer 1..5"))
    }
}

// requests

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEventRequest {
    pub college_id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: String,
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub roll: String,
    pub event_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRequest {
    pub student_id: i64,
    pub event_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRequest {
    pub student_id: i64,
    pub event_id: i64,
    pub rating: Rating,
    pub comment: String,
}

// responses

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventResponse {
    pub event_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelEventResponse {
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub student_id: i64,
    #[serde(default)]
    pub registration_id: Option<i64>,
}

/// Body of the attendance and feedback replies, only `status` is sent back.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventPopularity {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: Option<String>,
    pub registrations: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentParticipation {
    pub student_id: i64,
    pub name: String,
    pub roll: String,
    pub attended: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttendancePercent {
    pub event_id: i64,
    pub total_registered: u64,
    pub present: u64,
    pub attendance_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvgFeedback {
    pub event_id: i64,
    pub avg_rating: f64,
    pub responses: u64,
}

/// Optional narrowing of the popularity and top-students reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub college_id: Option<i64>,
    pub event_type: Option<String>,
}

impl ReportFilter {
    pub fn popularity_query(&self) -> Vec<(&'static str, String)> {
        let mut query = self.college_query();
        if let Some(t) = &self.event_type {
            query.push(("type", t.clone()));
        }
        query
    }

    pub fn top_students_query(&self) -> Vec<(&'static str, String)> {
        self.college_query()
    }

    fn college_query(&self) -> Vec<(&'static str, String)> {
        self.college_id
            .map(|id| vec![("college_id", id.to_string())])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_defaults_missing_fields() {
        let event: Event = serde_json::from_value(json!({
            "id": 1, "name": "Fest", "type": "Cultural", "date": "2024-01-01", "status": "scheduled"
        }))
        .unwrap();
        assert_eq!(event.kind, "Cultural");
        assert_eq!(event.status, EventStatus::Scheduled);
        assert_eq!(event.capacity, None);
        assert_eq!(event.college_id, None);
    }

    #[test]
    fn odd_capacity_keeps_the_rest_of_the_list() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {"id": 1, "name": "Fest", "type": "Cultural", "date": "2024-01-01", "capacity": 100},
            {"id": 2, "name": "Hackathon", "type": "Tech", "date": "2024-03-03", "capacity": -1}
        ]))
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].capacity, Some(100));
        assert_eq!(events[1].capacity, Some(-1));
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let event: Event = serde_json::from_value(json!({
            "id": 2, "name": "Expo", "type": "Fair", "date": "2024-02-02", "status": "postponed"
        }))
        .unwrap();
        assert_eq!(event.status.to_string(), "postponed");
        assert!(!event.status.is_cancelled());
    }

    #[test]
    fn rating_bounds() {
        assert_eq!("3".parse::<Rating>().unwrap().get(), 3);
        assert!("0".parse::<Rating>().is_err());
        assert!("6".parse::<Rating>().is_err());
        assert!("four".parse::<Rating>().is_err());
    }

    #[test]
    fn attendance_status_parse() {
        assert_eq!(
            " Present ".parse::<AttendanceStatus>().unwrap(),
            AttendanceStatus::Present
        );
        assert!("late".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn register_request_omits_missing_email() {
        let body = serde_json::to_value(RegisterRequest {
            name: "Tanvi B".to_string(),
            roll: "ABC001".to_string(),
            event_id: 1,
            email: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({"name": "Tanvi B", "roll": "ABC001", "event_id": 1})
        );
    }

    #[test]
    fn report_filter_query() {
        let filter = ReportFilter {
            college_id: Some(2),
            event_type: Some("Workshop".to_string()),
        };
        assert_eq!(
            filter.popularity_query(),
            vec![
                ("college_id", "2".to_string()),
                ("type", "Workshop".to_string())
            ]
        );
        assert_eq!(
            filter.top_students_query(),
            vec![("college_id", "2".to_string())]
        );
        assert!(ReportFilter::default().popularity_query().is_empty());
    }
}
