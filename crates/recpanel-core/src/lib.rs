pub mod domain;
pub mod error;
pub mod form;
pub mod panel;
pub mod query;
pub mod request;
pub mod table;

pub use domain::*;
pub use error::CoreError;
pub use form::{Form, FormField, FormFields};
pub use panel::{
    Action, Applied, Completion, Dispatch, Failure, Notice, NoticeKind, Outcome, Panel,
    PendingRequest, ResponseShape, Ticket,
};
pub use query::SearchQuery;
pub use request::{ApiRequest, HttpMethod};
pub use table::{ResultTable, RESULT_HEADER};
