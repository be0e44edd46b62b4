use log::{debug, error, info};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{PortalError, Result, NETWORK_ERROR},
    form::{
        parse_event_id, AttendanceForm, CreateEventForm, FeedbackForm, RegistrationForm,
        FILL_ALL_FIELDS,
    },
    model::{
        AttendancePercent, AttendanceRequest, AttendanceStatus, AvgFeedback, CancelEventResponse,
        CreateEventResponse, Event, EventPopularity, FeedbackRequest, Rating, RegisterRequest,
        RegisterResponse, ReportFilter, StatusResponse, Student, StudentParticipation,
    },
    transport::{Request, Transport},
    ui::{MessageSlot, ReportSlot, Ui, ViewUpdate},
    view::{EventCard, EventOption, Figure, ReportTable, ReportView},
};

pub const REGISTRATION_SELECT: &str = "reg-event";

const NAME_PROMPT: &str = "Student Name (e.g. Tanvi B)";
const REGISTER_ROLL_PROMPT: &str = "Roll number (e.g. ABC001)";
const ROLL_PROMPT: &str = "Student roll (e.g. ABC001)";
const STATUS_PROMPT: &str = "Status: present or absent";
const RATING_PROMPT: &str = "Rating 1-5";
const COMMENT_PROMPT: &str = "Optional comment";

const REGISTRATION_CLOSED: &str = "This event is cancelled. Registration is closed.";
const EVENT_CANCELLED: &str = "This event is cancelled.";
const NAME_REQUIRED: &str = "Name required";
const ROLL_REQUIRED: &str = "Roll required";

const REGISTERED: &str = "Registered successfully";
const ATTENDANCE_MARKED: &str = "Attendance marked ✔";
const FEEDBACK_SUBMITTED: &str = "Feedback submitted ✔";
const CANCELLED: &str = "Cancelled";

/// Where a failed operation reports to the user.
#[derive(Debug, Clone, Copy)]
enum Channel {
    Alert,
    Inline(MessageSlot),
    AlertAndInline(MessageSlot),
    Report(ReportSlot),
}

/// The portal's user actions. Each call is one independent attempt: it reads
/// nothing but its arguments, reports its own outcome through the [`Ui`] and
/// returns the error only so the caller can log it.
pub struct EventPortalClient<T, U> {
    transport: T,
    ui: U,
    selectors: Vec<String>,
}

impl<T: Transport, U: Ui> EventPortalClient<T, U> {
    pub fn new(transport: T, ui: U) -> Self {
        Self {
            transport,
            ui,
            selectors: vec![REGISTRATION_SELECT.to_string()],
        }
    }

    /// Event selectors refilled after every admin change.
    pub fn with_selectors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selectors = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    // ---- events ----

    pub async fn load_event_options(&self, select_id: &str) -> Result<()> {
        match self.fill_options(select_id).await {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err, Channel::Alert),
        }
    }

    pub async fn load_event_list(&self) -> Result<()> {
        match self.fill_list().await {
            Ok(()) => Ok(()),
            Err(err) => self.fail(err, Channel::Alert),
        }
    }

    /// Refills every selector, then the list. Keeps going past failures,
    /// notifies the user at most once and returns the first failure.
    pub async fn refresh_events(&self) -> Result<()> {
        let mut outcome = Ok(());
        for select_id in &self.selectors {
            let result = self.fill_options(select_id).await;
            if let Err(err) = &result {
                error!("failed to load options for {select_id}: {err}");
            }
            outcome = outcome.and(result);
        }
        let result = self.fill_list().await;
        outcome = outcome.and(result);
        if let Err(err) = &outcome {
            self.report(err, Channel::Alert);
        }
        outcome
    }

    async fn fill_options(&self, select_id: &str) -> Result<()> {
        let events = self.fetch_events().await?;
        self.ui.update(ViewUpdate::EventOptions {
            select_id: select_id.to_string(),
            options: events.iter().map(EventOption::from).collect(),
        });
        Ok(())
    }

    async fn fill_list(&self) -> Result<()> {
        self.ui.update(ViewUpdate::EventsLoading);
        let events = self.fetch_events().await?;
        let cards = events.into_iter().map(EventCard::from).collect();
        self.ui.update(ViewUpdate::EventList(cards));
        Ok(())
    }

    // ---- registration ----

    pub async fn prompt_register(&self, event: &Event) -> Result<()> {
        self.ensure_open(event, REGISTRATION_CLOSED)?;
        let Some(name) = self.ask(NAME_PROMPT, "") else {
            return self.fail(PortalError::validation(NAME_REQUIRED), Channel::Alert);
        };
        let Some(roll) = self.ask(REGISTER_ROLL_PROMPT, "") else {
            return self.fail(PortalError::validation(ROLL_REQUIRED), Channel::Alert);
        };
        self.register_student(RegisterRequest {
            name,
            roll,
            event_id: event.id,
            email: None,
        })
        .await
    }

    pub async fn submit_registration(&self, form: RegistrationForm) -> Result<()> {
        match form.validate() {
            Ok(request) => self.register_student(request).await,
            Err(err) => self.fail(err, Channel::Inline(MessageSlot::Register)),
        }
    }

    pub async fn register_student(&self, request: RegisterRequest) -> Result<()> {
        if request.name.trim().is_empty() || request.roll.trim().is_empty() {
            return self.fail(
                PortalError::validation(FILL_ALL_FIELDS),
                Channel::AlertAndInline(MessageSlot::Register),
            );
        }
        match self
            .post_json::<_, RegisterResponse>("/register", &request)
            .await
        {
            Ok(resp) => {
                info!(
                    "registered roll {} for event {} as student {}",
                    request.roll, request.event_id, resp.student_id
                );
                self.ui.notify(&format!(
                    "{REGISTERED} (student id: {})",
                    resp.student_id
                ));
                self.load_event_list().await.ok();
                self.ui.set_message(MessageSlot::Register, REGISTERED);
                Ok(())
            }
            Err(err) => self.fail(err, Channel::AlertAndInline(MessageSlot::Register)),
        }
    }

    // ---- attendance ----

    pub async fn prompt_attendance(&self, event: &Event) -> Result<()> {
        self.ensure_open(event, EVENT_CANCELLED)?;
        let Some(roll) = self.ask(ROLL_PROMPT, "") else {
            return self.fail(PortalError::validation(ROLL_REQUIRED), Channel::Alert);
        };
        let Some(status) = self.ask(STATUS_PROMPT, "present") else {
            return Ok(());
        };
        let status = match status.parse() {
            Ok(status) => status,
            Err(err) => return self.fail(err, Channel::Alert),
        };
        self.mark_attendance(&roll, event.id, status).await
    }

    pub async fn submit_attendance(&self, form: AttendanceForm) -> Result<()> {
        match form.validate() {
            Ok(draft) => {
                self.mark_attendance(&draft.roll, draft.event_id, draft.status)
                    .await
            }
            Err(err) => self.fail(err, Channel::Inline(MessageSlot::Attendance)),
        }
    }

    pub async fn mark_attendance(
        &self,
        roll: &str,
        event_id: i64,
        status: AttendanceStatus,
    ) -> Result<()> {
        match self.record_attendance(roll, event_id, status).await {
            Ok(()) => {
                self.ui.notify(ATTENDANCE_MARKED);
                self.ui
                    .set_message(MessageSlot::Attendance, ATTENDANCE_MARKED);
                Ok(())
            }
            Err(err) => self.fail(err, Channel::AlertAndInline(MessageSlot::Attendance)),
        }
    }

    async fn record_attendance(
        &self,
        roll: &str,
        event_id: i64,
        status: AttendanceStatus,
    ) -> Result<()> {
        let student = self.find_student(roll).await?;
        let _: StatusResponse = self
            .post_json(
                "/attendance",
                &AttendanceRequest {
                    student_id: student.id,
                    event_id,
                    status,
                },
            )
            .await?;
        Ok(())
    }

    // ---- feedback ----

    pub async fn prompt_feedback(&self, event: &Event) -> Result<()> {
        self.ensure_open(event, EVENT_CANCELLED)?;
        let Some(roll) = self.ask(ROLL_PROMPT, "") else {
            return self.fail(PortalError::validation(ROLL_REQUIRED), Channel::Alert);
        };
        let Some(rating) = self.ask(RATING_PROMPT, "5") else {
            return Ok(());
        };
        let rating = match rating.parse() {
            Ok(rating) => rating,
            Err(err) => return self.fail(err, Channel::Alert),
        };
        let comment = self.ask(COMMENT_PROMPT, "").unwrap_or_default();
        self.submit_feedback_by_roll(&roll, event.id, rating, &comment)
            .await
    }

    pub async fn submit_feedback(&self, form: FeedbackForm) -> Result<()> {
        match form.validate() {
            Ok(draft) => {
                self.submit_feedback_by_roll(&draft.roll, draft.event_id, draft.rating, &draft.comment)
                    .await
            }
            Err(err) => self.fail(err, Channel::Inline(MessageSlot::Feedback)),
        }
    }

    pub async fn submit_feedback_by_roll(
        &self,
        roll: &str,
        event_id: i64,
        rating: Rating,
        comment: &str,
    ) -> Result<()> {
        match self.record_feedback(roll, event_id, rating, comment).await {
            Ok(()) => {
                self.ui.notify(FEEDBACK_SUBMITTED);
                self.ui
                    .set_message(MessageSlot::Feedback, FEEDBACK_SUBMITTED);
                Ok(())
            }
            Err(err) => self.fail(err, Channel::AlertAndInline(MessageSlot::Feedback)),
        }
    }

    async fn record_feedback(
        &self,
        roll: &str,
        event_id: i64,
        rating: Rating,
        comment: &str,
    ) -> Result<()> {
        let student = self.find_student(roll).await?;
        let _: StatusResponse = self
            .post_json(
                "/feedback",
                &FeedbackRequest {
                    student_id: student.id,
                    event_id,
                    rating,
                    comment: comment.to_string(),
                },
            )
            .await?;
        Ok(())
    }

    // ---- admin ----

    pub async fn admin_create_event(&self, form: CreateEventForm) -> Result<()> {
        let slot = MessageSlot::AdminCreate;
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => return self.fail(err, Channel::Inline(slot)),
        };
        match self
            .post_json::<_, CreateEventResponse>("/events", &request)
            .await
        {
            Ok(resp) => {
                info!("created event {} ({})", resp.event_id, request.name);
                self.ui
                    .set_message(slot, &format!("Event created (ID: {})", resp.event_id));
                self.refresh_events().await.ok();
                Ok(())
            }
            Err(err) => self.fail(err, Channel::Inline(slot)),
        }
    }

    pub async fn admin_cancel_event(&self, event_id: &str) -> Result<()> {
        let slot = MessageSlot::AdminCancel;
        let event_id = match parse_event_id(event_id) {
            Ok(id) => id,
            Err(err) => return self.fail(err, Channel::Inline(slot)),
        };
        let request = Request::post(format!("/events/{event_id}/cancel"));
        match self.fetch::<CancelEventResponse>(request).await {
            Ok(resp) => {
                info!("cancelled event {event_id}");
                self.ui
                    .set_message(slot, resp.msg.as_deref().unwrap_or(CANCELLED));
                self.refresh_events().await.ok();
                Ok(())
            }
            Err(err) => self.fail(err, Channel::Inline(slot)),
        }
    }

    // ---- reports ----

    /// Fetches the three tables independently; one failing does not stop the
    /// others.
    pub async fn load_reports(&self, filter: &ReportFilter) -> Result<()> {
        let popularity = self
            .fetch::<Vec<EventPopularity>>(
                Request::get("/reports/event-popularity").queries(filter.popularity_query()),
            )
            .await
            .map(|rows| ReportView::Table(ReportTable::popularity(&rows)));
        let popularity = self.show_report(ReportSlot::Popularity, popularity);

        let participation = self
            .fetch::<Vec<StudentParticipation>>(Request::get("/reports/student-participation"))
            .await
            .map(|rows| ReportView::Table(ReportTable::participation(&rows)));
        let participation = self.show_report(ReportSlot::Participation, participation);

        let top = self
            .fetch::<Vec<StudentParticipation>>(
                Request::get("/reports/top-students").queries(filter.top_students_query()),
            )
            .await
            .map(|rows| ReportView::Table(ReportTable::participation(&rows)));
        let top = self.show_report(ReportSlot::TopStudents, top);

        let results = [popularity, participation, top];
        if results
            .iter()
            .any(|r| matches!(r, Err(err) if err.is_network()))
        {
            self.ui.notify(NETWORK_ERROR);
        }
        results.into_iter().collect()
    }

    pub async fn load_attendance_percent(&self, event_id: &str) -> Result<()> {
        let event_id = match parse_event_id(event_id) {
            Ok(id) => id,
            Err(err) => return self.fail(err, Channel::Alert),
        };
        let result = self
            .fetch::<AttendancePercent>(
                Request::get("/reports/attendance-percent").query("event_id", event_id.to_string()),
            )
            .await
            .map(|r| ReportView::Figure(Figure::from(&r)));
        let outcome = self.show_report(ReportSlot::AttendancePercent, result);
        self.notify_network(&outcome);
        outcome
    }

    pub async fn load_avg_feedback(&self, event_id: &str) -> Result<()> {
        let event_id = match parse_event_id(event_id) {
            Ok(id) => id,
            Err(err) => return self.fail(err, Channel::Alert),
        };
        let result = self
            .fetch::<AvgFeedback>(
                Request::get("/reports/avg-feedback").query("event_id", event_id.to_string()),
            )
            .await
            .map(|r| ReportView::Figure(Figure::from(&r)));
        let outcome = self.show_report(ReportSlot::AvgFeedback, result);
        self.notify_network(&outcome);
        outcome
    }

    // ---- plumbing ----

    async fn fetch<R: DeserializeOwned>(&self, request: Request) -> Result<R> {
        debug!("{} {} {:?}", request.method, request.path, request.query);
        self.transport.send(request).await?.into_result()
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let request = Request::post(path).json(body)?;
        self.fetch(request).await
    }

    async fn fetch_events(&self) -> Result<Vec<Event>> {
        self.fetch(Request::get("/events")).await
    }

    async fn find_student(&self, roll: &str) -> Result<Student> {
        let students: Vec<Student> = self
            .fetch(Request::get("/students").query("roll", roll))
            .await?;
        students
            .into_iter()
            .next()
            .ok_or_else(|| PortalError::StudentNotFound(roll.to_string()))
    }

    fn ask(&self, label: &str, default: &str) -> Option<String> {
        self.ui
            .prompt(label, default)
            .map(|answer| answer.trim().to_string())
            .filter(|answer| !answer.is_empty())
    }

    fn ensure_open(&self, event: &Event, closed: &str) -> Result<()> {
        if event.status.is_cancelled() {
            return self.fail(PortalError::validation(closed), Channel::Alert);
        }
        Ok(())
    }

    fn show_report(&self, slot: ReportSlot, result: Result<ReportView>) -> Result<()> {
        match result {
            Ok(view) => {
                self.ui.update(ViewUpdate::Report { slot, view });
                Ok(())
            }
            Err(err) => self.fail(err, Channel::Report(slot)),
        }
    }

    fn notify_network(&self, outcome: &Result<()>) {
        if matches!(outcome, Err(err) if err.is_network()) {
            self.ui.notify(NETWORK_ERROR);
        }
    }

    fn fail<R>(&self, err: PortalError, channel: Channel) -> Result<R> {
        self.report(&err, channel);
        Err(err)
    }

    fn report(&self, err: &PortalError, channel: Channel) {
        match err {
            PortalError::Network(detail) => {
                error!("request failed: {detail}");
                match channel {
                    // report callers notify once for all slots
                    Channel::Report(slot) => self.ui.update(ViewUpdate::Report {
                        slot,
                        view: ReportView::Error(NETWORK_ERROR.to_string()),
                    }),
                    _ => self.ui.notify(NETWORK_ERROR),
                }
            }
            PortalError::StudentNotFound(roll) => {
                debug!("no student with roll {roll}");
                self.ui.notify(&err.to_string());
            }
            PortalError::Validation(msg) => match channel {
                Channel::Inline(slot) | Channel::AlertAndInline(slot) => {
                    self.ui.set_message(slot, msg)
                }
                Channel::Alert | Channel::Report(_) => self.ui.notify(msg),
            },
            PortalError::Server { status, message } => {
                debug!("server rejected request with {status}: {message}");
                match channel {
                    Channel::Alert => self.ui.notify(&format!("Error: {message}")),
                    Channel::Inline(slot) => self.ui.set_message(slot, message),
                    Channel::AlertAndInline(slot) => {
                        self.ui.notify(&format!("Error: {message}"));
                        self.ui.set_message(slot, message);
                    }
                    Channel::Report(slot) => self.ui.update(ViewUpdate::Report {
                        slot,
                        view: ReportView::Error(message.clone()),
                    }),
                }
            }
        }
    }
}
