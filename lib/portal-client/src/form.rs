//! Raw form contents as read from the page, and their validation into
//! typed requests. Nothing here touches the network.

use time::{macros::format_description, Date};

use crate::{
    error::{PortalError, Result},
    model::{AttendanceStatus, CreateEventRequest, Rating, RegisterRequest},
};

pub const FILL_ALL_FIELDS: &str = "Fill all fields";
pub const FILL_ROLL_AND_EVENT: &str = "Fill roll and event";
pub const FILL_REQUIRED_FIELDS: &str = "Fill required fields";
pub const PROVIDE_EVENT_ID: &str = "Provide event id";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub roll: String,
    pub email: String,
    pub event_id: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let name = self.name.trim();
        let roll = self.roll.trim();
        let event_id = self.event_id.trim();
        if name.is_empty() || roll.is_empty() || event_id.is_empty() {
            return Err(PortalError::validation(FILL_ALL_FIELDS));
        }
        let email = self.email.trim();
        Ok(RegisterRequest {
            name: name.to_string(),
            roll: roll.to_string(),
            event_id: parse_id(event_id, "event id")?,
            email: (!email.is_empty()).then(|| email.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDraft {
    pub roll: String,
    pub event_id: i64,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceForm {
    pub roll: String,
    pub event_id: String,
    pub status: String,
}

impl AttendanceForm {
    pub fn validate(&self) -> Result<AttendanceDraft> {
        let roll = self.roll.trim();
        let event_id = self.event_id.trim();
        if roll.is_empty() || event_id.is_empty() {
            return Err(PortalError::validation(FILL_ROLL_AND_EVENT));
        }
        Ok(AttendanceDraft {
            roll: roll.to_string(),
            event_id: parse_id(event_id, "event id")?,
            status: self.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackDraft {
    pub roll: String,
    pub event_id: i64,
    pub rating: Rating,
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackForm {
    pub roll: String,
    pub event_id: String,
    pub rating: String,
    pub comment: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<FeedbackDraft> {
        let roll = self.roll.trim();
        let event_id = self.event_id.trim();
        let rating = self.rating.trim();
        if roll.is_empty() || event_id.is_empty() || rating.is_empty() {
            return Err(PortalError::validation(FILL_REQUIRED_FIELDS));
        }
        Ok(FeedbackDraft {
            roll: roll.to_string(),
            event_id: parse_id(event_id, "event id")?,
            rating: rating.parse()?,
            comment: self.comment.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateEventForm {
    pub college_id: String,
    pub name: String,
    pub kind: String,
    pub date: String,
    pub capacity: String,
}

impl CreateEventForm {
    pub fn validate(&self) -> Result<CreateEventRequest> {
        let college_id = self.college_id.trim();
        let name = self.name.trim();
        let kind = self.kind.trim();
        let date = self.date.trim();
        if college_id.is_empty() || name.is_empty() || kind.is_empty() || date.is_empty() {
            return Err(PortalError::validation(FILL_REQUIRED_FIELDS));
        }
        Date::parse(date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| PortalError::validation("Date must be YYYY-MM-DD"))?;

        let capacity = match self.capacity.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().map_err(|_| {
                PortalError::validation("Capacity must be a non-negative number")
            })?),
        };

        Ok(CreateEventRequest {
            college_id: parse_id(college_id, "college id")?,
            name: name.to_string(),
            kind: kind.to_string(),
            date: date.to_string(),
            capacity,
        })
    }
}

/// Event id typed into a free text box (cancel, scalar reports).
pub fn parse_event_id(raw: &str) -> Result<i64> {
    match raw.trim() {
        "" => Err(PortalError::validation(PROVIDE_EVENT_ID)),
        id => parse_id(id, "event id"),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<i64> {
    raw.parse()
        .map_err(|_| PortalError::validation(format!("Invalid {what}: {raw}")))
}
