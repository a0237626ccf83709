use crate::domain::Recommendation;
use crate::error::CoreError;
use crate::form::Form;
use crate::request::ApiRequest;
use crate::table::ResultTable;

pub const SUCCESS_MESSAGE: &str = "Success";
pub const DELETED_MESSAGE: &str = "Recommendation has been deleted!";
pub const SERVER_ERROR_MESSAGE: &str = "Server error!";

/// User-triggered panel actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Retrieve,
    Delete,
    IncrementInterest,
    Clear,
    Search,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Create,
        Action::Update,
        Action::Retrieve,
        Action::Delete,
        Action::IncrementInterest,
        Action::Clear,
        Action::Search,
    ];

    /// Trigger name as exposed to the UI surface.
    pub fn name(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Retrieve => "retrieve",
            Action::Delete => "delete",
            Action::IncrementInterest => "interested",
            Action::Clear => "clear",
            Action::Search => "search",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Update => "Update",
            Action::Retrieve => "Retrieve",
            Action::Delete => "Delete",
            Action::IncrementInterest => "Interested",
            Action::Clear => "Clear",
            Action::Search => "Search",
        }
    }

    /// What a successful response body holds for this action.
    pub fn response_shape(self) -> ResponseShape {
        match self {
            Action::Create | Action::Update | Action::Retrieve | Action::IncrementInterest => {
                ResponseShape::Record
            }
            Action::Search => ResponseShape::Records,
            Action::Delete | Action::Clear => ResponseShape::Nothing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Record,
    Records,
    Nothing,
}

/// Identifies one issued request. Only the newest ticket may touch the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub ticket: Ticket,
    pub action: Action,
    pub request: ApiRequest,
}

impl PendingRequest {
    pub fn complete(&self, outcome: Outcome) -> Completion {
        Completion {
            ticket: self.ticket,
            action: self.action,
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Failure {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl Failure {
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            message,
        }
    }

    /// No HTTP response, or one whose body could not be read.
    pub fn transport() -> Self {
        Self::default()
    }

    pub fn display_message(&self) -> &str {
        self.message.as_deref().unwrap_or(SERVER_ERROR_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Record(Recommendation),
    Records(Vec<Recommendation>),
    Done,
    Failed(Failure),
}

impl Outcome {
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub action: Action,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Content of the status region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Result of starting an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Handled without a request (clear).
    Local,
    /// Refused before any request; the error is already in the status region.
    Rejected(CoreError),
    /// A request to issue, then hand back through [`Panel::complete`].
    Pending(PendingRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The completion belonged to a superseded request and was dropped.
    Stale,
}

/// State behind the panel: form, result table and status region.
///
/// Actions go through [`Panel::begin`], which yields the request to issue;
/// the transport's answer comes back through [`Panel::complete`]. Each
/// `begin` (and each clear) supersedes every earlier ticket.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    form: Form,
    results: Option<ResultTable>,
    notice: Option<Notice>,
    issued: u64,
    live: Option<Ticket>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn results(&self) -> Option<&ResultTable> {
        self.results.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_waiting(&self) -> bool {
        self.live.is_some()
    }

    pub fn begin(&mut self, action: Action) -> Dispatch {
        match self.build_request(action) {
            Ok(Some(request)) => {
                self.issued += 1;
                let ticket = Ticket(self.issued);
                self.live = Some(ticket);
                Dispatch::Pending(PendingRequest {
                    ticket,
                    action,
                    request,
                })
            }
            Ok(None) => {
                self.live = None;
                self.form.clear();
                Dispatch::Local
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
                Dispatch::Rejected(err)
            }
        }
    }

    pub fn complete(&mut self, completion: Completion) -> Applied {
        if self.live != Some(completion.ticket) {
            return Applied::Stale;
        }
        self.live = None;
        self.apply(completion.action, completion.outcome);
        Applied::Applied
    }

    /// The request behind `action`, or `None` for actions handled locally.
    fn build_request(&self, action: Action) -> Result<Option<ApiRequest>, CoreError> {
        let request = match action {
            Action::Create => ApiRequest::create(self.form.draft()?),
            Action::Update => {
                let id = self.form.target_id()?;
                ApiRequest::update(&id, self.form.draft()?)
            }
            Action::Retrieve => ApiRequest::retrieve(&self.form.target_id()?),
            Action::Delete => ApiRequest::delete(&self.form.target_id()?),
            Action::IncrementInterest => ApiRequest::increment_interest(&self.form.target_id()?),
            Action::Search => ApiRequest::search(&self.form.search_query()?),
            Action::Clear => return Ok(None),
        };
        Ok(Some(request))
    }

    fn apply(&mut self, action: Action, outcome: Outcome) {
        match (action, outcome) {
            (_, Outcome::Failed(failure)) => self.fail(action, &failure),
            (
                Action::Create | Action::Update | Action::Retrieve | Action::IncrementInterest,
                Outcome::Record(record),
            ) => {
                self.form.populate(record);
                self.notice = Some(Notice::success(SUCCESS_MESSAGE));
            }
            (Action::Delete, _) => {
                self.form.clear();
                self.notice = Some(Notice::success(DELETED_MESSAGE));
            }
            (Action::Search, Outcome::Records(records)) => {
                self.results = Some(ResultTable::render(&records));
                if let Some(first) = records.into_iter().next() {
                    self.form.populate(first);
                }
                self.notice = Some(Notice::success(SUCCESS_MESSAGE));
            }
            (action, _) => self.fail(action, &Failure::transport()),
        }
    }

    fn fail(&mut self, action: Action, failure: &Failure) {
        let text = match action {
            Action::Delete => SERVER_ERROR_MESSAGE,
            Action::Retrieve | Action::IncrementInterest => {
                self.form.clear();
                failure.display_message()
            }
            _ => failure.display_message(),
        };
        self.notice = Some(Notice::error(text));
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, Applied, Dispatch, Failure, Outcome, Panel, PendingRequest};
    use crate::domain::{ProductId, Recommendation, RecordId, TypeCode};
    use crate::error::CoreError;
    use crate::form::FormField;

    fn record(id: &str) -> Recommendation {
        Recommendation {
            id: RecordId::from(id),
            product_id: ProductId::from("1"),
            rec_product_id: ProductId::from("2"),
            rec_type: TypeCode(1),
            interested: 0,
        }
    }

    fn pending(dispatch: Dispatch) -> PendingRequest {
        match dispatch {
            Dispatch::Pending(pending) => pending,
            other => panic!("expected pending request, got {:?}", other),
        }
    }

    #[test]
    fn superseded_completion_is_dropped() {
        let mut panel = Panel::new();
        panel.form_mut().set(FormField::Id, "A");
        let first = pending(panel.begin(Action::Retrieve));
        panel.form_mut().set(FormField::Id, "B");
        let second = pending(panel.begin(Action::Retrieve));

        assert_eq!(
            panel.complete(second.complete(Outcome::Record(record("B")))),
            Applied::Applied
        );
        assert_eq!(
            panel.complete(first.complete(Outcome::Record(record("A")))),
            Applied::Stale
        );
        assert_eq!(panel.form().value(FormField::Id), "B");
        assert!(!panel.is_waiting());
    }

    #[test]
    fn clear_supersedes_in_flight_request() {
        let mut panel = Panel::new();
        panel.form_mut().set(FormField::Id, "7");
        let request = pending(panel.begin(Action::Retrieve));
        assert_eq!(panel.begin(Action::Clear), Dispatch::Local);
        assert_eq!(
            panel.complete(request.complete(Outcome::Record(record("7")))),
            Applied::Stale
        );
        assert!(panel.form().is_blank());
    }

    #[test]
    fn clear_ignores_invalid_form_text() {
        let mut panel = Panel::new();
        panel.form_mut().set(FormField::Type, "Sideways");
        assert_eq!(panel.begin(Action::Clear), Dispatch::Local);
        assert!(panel.form().is_blank());
        assert!(panel.notice().is_none());
    }

    #[test]
    fn rejected_action_keeps_live_ticket() {
        let mut panel = Panel::new();
        panel.form_mut().set(FormField::Id, "7");
        let request = pending(panel.begin(Action::Retrieve));
        panel.form_mut().set(FormField::Type, "Sideways");
        let rejected = panel.begin(Action::Search);
        assert_eq!(
            rejected.clone(),
            Dispatch::Rejected(CoreError::InvalidRecommendationType(
                "Sideways".to_string()
            ))
        );
        assert_eq!(
            panel.complete(request.complete(Outcome::Record(record("7")))),
            Applied::Applied
        );
    }

    #[test]
    fn mismatched_outcome_reports_generic_failure() {
        let mut panel = Panel::new();
        panel.form_mut().set(FormField::Id, "7");
        let request = pending(panel.begin(Action::Update));
        panel.complete(request.complete(Outcome::Records(Vec::new())));
        let notice = panel.notice().expect("notice");
        assert!(notice.is_error());
        assert_eq!(notice.text, "Server error!");
    }

    #[test]
    fn failure_message_falls_back_when_missing() {
        assert_eq!(Failure::transport().display_message(), "Server error!");
        assert_eq!(
            Failure::server(400, Some("bad type".to_string())).display_message(),
            "bad type"
        );
    }
}
