use std::{collections::HashMap, future::Future, rc::Rc};

use portal_client::{
    form::{AttendanceForm, CreateEventForm, FeedbackForm, RegistrationForm},
    model::{Event, ReportFilter},
    view::{EventCard, EventOption, ReportView, EVENTS_LOADING},
    EventPortalClient, MessageSlot, PortalError, ReportSlot, ViewUpdate,
};
use web_sys::{Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    bridge::PageUi, component::*, config::portal::PortalConfig, net::GlooTransport,
    sys::bootstrap::modal::Modal,
};

type Client = EventPortalClient<GlooTransport, PageUi>;

const REG_EVENT: &str = "reg-event";
const ATT_EVENT: &str = "att-event";
const FB_EVENT: &str = "fb-event";

pub struct PortalPage {
    client: Rc<Client>,

    // node
    notice_modal: NodeRef,
    registration: RegistrationNodes,
    attendance: AttendanceNodes,
    feedback: FeedbackNodes,
    create_event: CreateEventNodes,
    cancel_event_id: NodeRef,
    report_college: NodeRef,
    report_type: NodeRef,
    attendance_report_event: NodeRef,
    feedback_report_event: NodeRef,

    // data
    event_list: EventList,
    event_options: HashMap<String, Vec<EventOption>>,
    messages: HashMap<MessageSlot, String>,
    reports: HashMap<ReportSlot, ReportView>,
    // shown together until dismissed
    notices: Vec<String>,
}

#[derive(Debug, Default)]
enum EventList {
    #[default]
    Idle,
    Loading,
    Ready(Vec<EventCard>),
}

pub enum PortalPageMsg {
    View(ViewUpdate),
    Message { slot: MessageSlot, text: String },
    Notify(String),
    DismissNotices,
}

#[derive(Debug, Clone, Copy)]
enum CardAction {
    Register,
    Attendance,
    Feedback,
}

#[derive(Clone, Default)]
struct RegistrationNodes {
    name: NodeRef,
    roll: NodeRef,
    email: NodeRef,
    event: NodeRef,
}

impl RegistrationNodes {
    fn read(&self) -> RegistrationForm {
        RegistrationForm {
            name: field_value(&self.name),
            roll: field_value(&self.roll),
            email: field_value(&self.email),
            event_id: field_value(&self.event),
        }
    }
}

#[derive(Clone, Default)]
struct AttendanceNodes {
    roll: NodeRef,
    event: NodeRef,
    status: NodeRef,
}

impl AttendanceNodes {
    fn read(&self) -> AttendanceForm {
        AttendanceForm {
            roll: field_value(&self.roll),
            event_id: field_value(&self.event),
            status: field_value(&self.status),
        }
    }
}

#[derive(Clone, Default)]
struct FeedbackNodes {
    roll: NodeRef,
    event: NodeRef,
    rating: NodeRef,
    comment: NodeRef,
}

impl FeedbackNodes {
    fn read(&self) -> FeedbackForm {
        FeedbackForm {
            roll: field_value(&self.roll),
            event_id: field_value(&self.event),
            rating: field_value(&self.rating),
            comment: field_value(&self.comment),
        }
    }
}

#[derive(Clone, Default)]
struct CreateEventNodes {
    college: NodeRef,
    name: NodeRef,
    kind: NodeRef,
    date: NodeRef,
    capacity: NodeRef,
}

impl CreateEventNodes {
    fn read(&self) -> CreateEventForm {
        CreateEventForm {
            college_id: field_value(&self.college),
            name: field_value(&self.name),
            kind: field_value(&self.kind),
            date: field_value(&self.date),
            capacity: field_value(&self.capacity),
        }
    }
}

fn field_value(node: &NodeRef) -> String {
    if let Some(input) = node.cast::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(select) = node.cast::<HtmlSelectElement>() {
        return select.value();
    }
    if let Some(area) = node.cast::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

/// Blank or unparsable college means "all colleges".
fn report_filter(college: &NodeRef, kind: &NodeRef) -> ReportFilter {
    let college = field_value(college);
    let college_id = match college.trim() {
        "" => None,
        raw => raw
            .parse()
            .map_err(|_| log::warn!("ignore invalid college filter: {raw}"))
            .ok(),
    };
    let event_type = field_value(kind).trim().to_string();
    ReportFilter {
        college_id,
        event_type: (!event_type.is_empty()).then_some(event_type),
    }
}

/// Runs one user action to completion. The client has already told the user
/// about any failure, so the error is only logged.
fn spawn_action<F>(action: &'static str, task: F)
where
    F: Future<Output = Result<(), PortalError>> + 'static,
{
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = task.await {
            log::debug!("{action} failed: {err}");
        }
    });
}

impl Component for PortalPage {
    type Message = PortalPageMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = PortalConfig::load_from_localstorage();
        let client = EventPortalClient::new(
            GlooTransport::from_config(&config),
            PageUi::new(ctx.link().clone()),
        )
        .with_selectors([REG_EVENT, ATT_EVENT, FB_EVENT]);

        Self {
            client: Rc::new(client),
            notice_modal: NodeRef::default(),
            registration: RegistrationNodes::default(),
            attendance: AttendanceNodes::default(),
            feedback: FeedbackNodes::default(),
            create_event: CreateEventNodes::default(),
            cancel_event_id: NodeRef::default(),
            report_college: NodeRef::default(),
            report_type: NodeRef::default(),
            attendance_report_event: NodeRef::default(),
            feedback_report_event: NodeRef::default(),
            event_list: EventList::default(),
            event_options: HashMap::new(),
            messages: HashMap::new(),
            reports: HashMap::new(),
            notices: Vec::new(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PortalPageMsg::View(update) => self.apply(update),
            PortalPageMsg::Message { slot, text } => {
                self.messages.insert(slot, text);
            }
            PortalPageMsg::Notify(text) => {
                self.notices.push(text);
                self.show_notice();
            }
            PortalPageMsg::DismissNotices => self.notices.clear(),
        }
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let client = self.client.clone();
        spawn_action("load events", async move { client.refresh_events().await });
        let client = self.client.clone();
        spawn_action("load reports", async move {
            client.load_reports(&ReportFilter::default()).await
        });
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <>
                <Title title="Events" />
                <NavBar active="portal" />

                <div class="container-sm" style="padding-bottom: 1em;">
                    {self.view_events()}
                    <div class="row">
                        <div class="col-lg-4">{self.view_registration()}</div>
                        <div class="col-lg-4">{self.view_attendance()}</div>
                        <div class="col-lg-4">{self.view_feedback()}</div>
                    </div>
                    {self.view_admin()}
                    {self.view_reports()}
                </div>

                {self.view_notice_modal(ctx)}
            </>
        }
    }
}

impl PortalPage {
    fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::EventOptions { select_id, options } => {
                self.event_options.insert(select_id, options);
            }
            ViewUpdate::EventsLoading => self.event_list = EventList::Loading,
            ViewUpdate::EventList(cards) => self.event_list = EventList::Ready(cards),
            ViewUpdate::Report { slot, view } => {
                self.reports.insert(slot, view);
            }
        }
    }

    fn show_notice(&self) {
        match self.notice_modal.cast::<Element>() {
            Some(element) => Modal::get_or_create_instance(&element).show(),
            None => log::warn!("notice modal is not mounted"),
        }
    }

    fn message(&self, slot: MessageSlot) -> Html {
        html! {
            <span id={slot.element_id()} class="ms-2 text-muted">
                {self.messages.get(&slot).cloned().unwrap_or_default()}
            </span>
        }
    }

    fn card_action(&self, event: &Event, action: CardAction) -> Callback<MouseEvent> {
        let client = self.client.clone();
        let event = event.clone();
        Callback::from(move |_| {
            let client = client.clone();
            let event = event.clone();
            spawn_action("card action", async move {
                match action {
                    CardAction::Register => client.prompt_register(&event).await,
                    CardAction::Attendance => client.prompt_attendance(&event).await,
                    CardAction::Feedback => client.prompt_feedback(&event).await,
                }
            });
        })
    }

    fn view_events(&self) -> Html {
        let body = match &self.event_list {
            EventList::Idle => html! {},
            EventList::Loading => html! { <h3>{EVENTS_LOADING}</h3> },
            EventList::Ready(cards) => cards
                .iter()
                .map(|card| {
                    html! {
                        <div class="card mb-2">
                            <div class="card-body d-flex justify-content-between align-items-center">
                                <div>
                                    <strong>{card.event.name.clone()}</strong>
                                    <br/>
                                    <small class="text-muted">{card.meta.clone()}</small>
                                </div>
                                <div>
                                    <button class="btn btn-primary btn-sm me-1"
                                        onclick={self.card_action(&card.event, CardAction::Register)}>
                                        {"Register"}
                                    </button>
                                    <button class="btn btn-primary btn-sm me-1"
                                        onclick={self.card_action(&card.event, CardAction::Attendance)}>
                                        {"Attendance"}
                                    </button>
                                    <button class="btn btn-warning btn-sm"
                                        onclick={self.card_action(&card.event, CardAction::Feedback)}>
                                        {"Feedback"}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
                .collect::<Html>(),
        };

        html! {
            <section class="mb-4">
                <h2>{"Events"}</h2>
                <div id="events-list">{body}</div>
            </section>
        }
    }

    fn view_event_select(&self, id: &'static str, node: &NodeRef) -> Html {
        let options = self
            .event_options
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        html! {
            <select class="form-select mb-2" id={id} ref={node.clone()}>
                {for options.iter().map(|option| html! {
                    <option value={option.value.to_string()}>{option.text.clone()}</option>
                })}
            </select>
        }
    }

    fn view_registration(&self) -> Html {
        let on_submit = {
            let client = self.client.clone();
            let nodes = self.registration.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let client = client.clone();
                let form = nodes.read();
                spawn_action("register", async move { client.submit_registration(form).await });
            })
        };

        html! {
            <form class="card card-body mb-3" onsubmit={on_submit}>
                <h4>{"Register"}</h4>
                <input class="form-control mb-2" id="reg-name" placeholder="Student name"
                    ref={self.registration.name.clone()} />
                <input class="form-control mb-2" id="reg-roll" placeholder="Roll number"
                    ref={self.registration.roll.clone()} />
                <input class="form-control mb-2" id="reg-email" type="email" placeholder="Email (optional)"
                    ref={self.registration.email.clone()} />
                {self.view_event_select(REG_EVENT, &self.registration.event)}
                <div>
                    <button type="submit" class="btn btn-primary">{"Register"}</button>
                    {self.message(MessageSlot::Register)}
                </div>
            </form>
        }
    }

    fn view_attendance(&self) -> Html {
        let on_submit = {
            let client = self.client.clone();
            let nodes = self.attendance.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let client = client.clone();
                let form = nodes.read();
                spawn_action("attendance", async move { client.submit_attendance(form).await });
            })
        };

        html! {
            <form class="card card-body mb-3" onsubmit={on_submit}>
                <h4>{"Attendance"}</h4>
                <input class="form-control mb-2" id="att-roll" placeholder="Roll number"
                    ref={self.attendance.roll.clone()} />
                {self.view_event_select(ATT_EVENT, &self.attendance.event)}
                <select class="form-select mb-2" id="att-status" ref={self.attendance.status.clone()}>
                    <option value="present">{"present"}</option>
                    <option value="absent">{"absent"}</option>
                </select>
                <div>
                    <button type="submit" class="btn btn-primary">{"Mark"}</button>
                    {self.message(MessageSlot::Attendance)}
                </div>
            </form>
        }
    }

    fn view_feedback(&self) -> Html {
        let on_submit = {
            let client = self.client.clone();
            let nodes = self.feedback.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let client = client.clone();
                let form = nodes.read();
                spawn_action("feedback", async move { client.submit_feedback(form).await });
            })
        };

        html! {
            <form class="card card-body mb-3" onsubmit={on_submit}>
                <h4>{"Feedback"}</h4>
                <input class="form-control mb-2" id="fb-roll" placeholder="Roll number"
                    ref={self.feedback.roll.clone()} />
                {self.view_event_select(FB_EVENT, &self.feedback.event)}
                <select class="form-select mb-2" id="fb-rating" ref={self.feedback.rating.clone()}>
                    {for (1..=5).rev().map(|r| html! {
                        <option value={r.to_string()}>{r.to_string()}</option>
                    })}
                </select>
                <textarea class="form-control mb-2" id="fb-comment" placeholder="Comment (optional)"
                    ref={self.feedback.comment.clone()} />
                <div>
                    <button type="submit" class="btn btn-warning">{"Submit"}</button>
                    {self.message(MessageSlot::Feedback)}
                </div>
            </form>
        }
    }

    fn view_admin(&self) -> Html {
        let on_create = {
            let client = self.client.clone();
            let nodes = self.create_event.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let client = client.clone();
                let form = nodes.read();
                spawn_action("create event", async move { client.admin_create_event(form).await });
            })
        };
        let on_cancel = {
            let client = self.client.clone();
            let node = self.cancel_event_id.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                let client = client.clone();
                let event_id = field_value(&node);
                spawn_action("cancel event", async move {
                    client.admin_cancel_event(&event_id).await
                });
            })
        };

        html! {
            <section class="mb-4">
                <h2>{"Admin"}</h2>
                <div class="row">
                    <div class="col-lg-8">
                        <form class="card card-body mb-3" onsubmit={on_create}>
                            <h4>{"Create event"}</h4>
                            <div class="row g-2 mb-2">
                                <div class="col-md-2">
                                    <input class="form-control" id="admin-college" type="number" value="1"
                                        placeholder="College" ref={self.create_event.college.clone()} />
                                </div>
                                <div class="col-md-4">
                                    <input class="form-control" id="admin-name" placeholder="Name"
                                        ref={self.create_event.name.clone()} />
                                </div>
                                <div class="col-md-2">
                                    <input class="form-control" id="admin-type" placeholder="Type"
                                        ref={self.create_event.kind.clone()} />
                                </div>
                                <div class="col-md-2">
                                    <input class="form-control" id="admin-date" type="date"
                                        ref={self.create_event.date.clone()} />
                                </div>
                                <div class="col-md-2">
                                    <input class="form-control" id="admin-capacity" type="number" placeholder="Capacity"
                                        ref={self.create_event.capacity.clone()} />
                                </div>
                            </div>
                            <div>
                                <button type="submit" class="btn btn-success">{"Create"}</button>
                                {self.message(MessageSlot::AdminCreate)}
                            </div>
                        </form>
                    </div>
                    <div class="col-lg-4">
                        <form class="card card-body mb-3" onsubmit={on_cancel}>
                            <h4>{"Cancel event"}</h4>
                            <input class="form-control mb-2" id="admin-cancel-id" placeholder="Event id"
                                ref={self.cancel_event_id.clone()} />
                            <div>
                                <button type="submit" class="btn btn-danger">{"Cancel"}</button>
                                {self.message(MessageSlot::AdminCancel)}
                            </div>
                        </form>
                    </div>
                </div>
            </section>
        }
    }

    fn view_report(&self, slot: ReportSlot) -> Html {
        let body = match self.reports.get(&slot) {
            None => html! {},
            Some(ReportView::Table(table)) => html! {
                <table class="table">
                    <thead>
                        <tr>{for table.headers.iter().map(|h| html! { <th>{*h}</th> })}</tr>
                    </thead>
                    <tbody>
                        {for table.rows.iter().map(|[label, value]| html! {
                            <tr><td>{label.clone()}</td><td>{value.clone()}</td></tr>
                        })}
                    </tbody>
                </table>
            },
            Some(ReportView::Figure(figure)) => html! {
                <><strong>{figure.headline.clone()}</strong>{" "}{figure.detail.clone()}</>
            },
            Some(ReportView::Error(err)) => html! {
                <span class="text-danger">{err.clone()}</span>
            },
        };
        html! { <div id={slot.element_id()}>{body}</div> }
    }

    fn view_reports(&self) -> Html {
        let on_refresh = {
            let client = self.client.clone();
            let college = self.report_college.clone();
            let kind = self.report_type.clone();
            Callback::from(move |_| {
                let client = client.clone();
                let filter = report_filter(&college, &kind);
                spawn_action("reports", async move { client.load_reports(&filter).await });
            })
        };
        let on_attendance_percent = {
            let client = self.client.clone();
            let node = self.attendance_report_event.clone();
            Callback::from(move |_| {
                let client = client.clone();
                let event_id = field_value(&node);
                spawn_action("attendance percent", async move {
                    client.load_attendance_percent(&event_id).await
                });
            })
        };
        let on_avg_feedback = {
            let client = self.client.clone();
            let node = self.feedback_report_event.clone();
            Callback::from(move |_| {
                let client = client.clone();
                let event_id = field_value(&node);
                spawn_action("average feedback", async move {
                    client.load_avg_feedback(&event_id).await
                });
            })
        };

        html! {
            <section class="mb-4">
                <h2>{"Reports"}</h2>
                <div class="row g-2 mb-3">
                    <div class="col-md-3">
                        <input class="form-control" id="report-college" type="number" placeholder="College (all)"
                            ref={self.report_college.clone()} />
                    </div>
                    <div class="col-md-3">
                        <input class="form-control" id="report-type" placeholder="Event type (all)"
                            ref={self.report_type.clone()} />
                    </div>
                    <div class="col-md-2">
                        <button class="btn btn-secondary" onclick={on_refresh}>{"Refresh"}</button>
                    </div>
                </div>
                <div class="row">
                    <div class="col-lg-4">
                        <h5>{"Event popularity"}</h5>
                        {self.view_report(ReportSlot::Popularity)}
                    </div>
                    <div class="col-lg-4">
                        <h5>{"Student participation"}</h5>
                        {self.view_report(ReportSlot::Participation)}
                    </div>
                    <div class="col-lg-4">
                        <h5>{"Top students"}</h5>
                        {self.view_report(ReportSlot::TopStudents)}
                    </div>
                </div>
                <div class="row">
                    <div class="col-lg-6 mb-2">
                        <h5>{"Attendance percentage"}</h5>
                        <div class="input-group mb-2">
                            <input class="form-control" id="att-report-event" placeholder="Event id"
                                ref={self.attendance_report_event.clone()} />
                            <button class="btn btn-secondary" onclick={on_attendance_percent}>{"Show"}</button>
                        </div>
                        {self.view_report(ReportSlot::AttendancePercent)}
                    </div>
                    <div class="col-lg-6 mb-2">
                        <h5>{"Average feedback"}</h5>
                        <div class="input-group mb-2">
                            <input class="form-control" id="fb-report-event" placeholder="Event id"
                                ref={self.feedback_report_event.clone()} />
                            <button class="btn btn-secondary" onclick={on_avg_feedback}>{"Show"}</button>
                        </div>
                        {self.view_report(ReportSlot::AvgFeedback)}
                    </div>
                </div>
            </section>
        }
    }

    fn view_notice_modal(&self, ctx: &Context<Self>) -> Html {
        let dismiss = ctx.link().callback(|_| PortalPageMsg::DismissNotices);
        html! {
            <div class="modal fade" tabindex="-1" data-bs-backdrop="static" data-bs-keyboard="false"
                ref={self.notice_modal.clone()}>
                <div class="modal-dialog">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{"Notice"}</h5>
                            <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"
                                onclick={dismiss.clone()}></button>
                        </div>
                        <div class="modal-body">
                            {for self.notices.iter().map(|n| html! { <p class="mb-1">{n.clone()}</p> })}
                        </div>
                        <div class="modal-footer">
                            <button type="button" data-bs-dismiss="modal" class="btn btn-primary"
                                onclick={dismiss}>{"OK"}</button>
                        </div>
                    </div>
                </div>
            </div>
        }
    }
}
