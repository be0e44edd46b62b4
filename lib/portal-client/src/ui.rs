use crate::view::{EventCard, EventOption, ReportView};

/// Inline status lines next to each form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageSlot {
    Register,
    Attendance,
    Feedback,
    AdminCreate,
    AdminCancel,
}

impl MessageSlot {
    pub fn element_id(self) -> &'static str {
        match self {
            MessageSlot::Register => "reg-msg",
            MessageSlot::Attendance => "att-msg",
            MessageSlot::Feedback => "fb-msg",
            MessageSlot::AdminCreate => "admin-create-msg",
            MessageSlot::AdminCancel => "admin-cancel-msg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportSlot {
    Popularity,
    Participation,
    TopStudents,
    AttendancePercent,
    AvgFeedback,
}

impl ReportSlot {
    pub fn element_id(self) -> &'static str {
        match self {
            ReportSlot::Popularity => "report-popularity",
            ReportSlot::Participation => "report-participation",
            ReportSlot::TopStudents => "report-top3",
            ReportSlot::AttendancePercent => "report-att-percent",
            ReportSlot::AvgFeedback => "report-fb-avg",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    EventOptions {
        select_id: String,
        options: Vec<EventOption>,
    },
    EventsLoading,
    EventList(Vec<EventCard>),
    Report {
        slot: ReportSlot,
        view: ReportView,
    },
}

/// Everything the client does to the user goes through here: `alert`,
/// `prompt` and writes into the page.
pub trait Ui {
    fn notify(&self, message: &str);

    /// `None` when the user dismissed the dialog.
    fn prompt(&self, label: &str, default: &str) -> Option<String>;

    fn set_message(&self, slot: MessageSlot, text: &str);

    fn update(&self, update: ViewUpdate);
}
