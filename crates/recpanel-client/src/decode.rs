use recpanel_core::{Failure, Outcome, Recommendation, ResponseShape};
use serde::Deserialize;
use tracing::debug;

use crate::transport::RawResponse;
use crate::Result;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The `message` field of an error body, if the body is JSON and has one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
}

/// Turns a transport result into the outcome for a response of `shape`.
/// Anything unreadable becomes a failure without a message.
pub fn decode(shape: ResponseShape, response: Result<RawResponse>) -> Outcome {
    let response = match response {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "request failed below http");
            return Outcome::Failed(Failure::transport());
        }
    };

    if !response.is_success() {
        return Outcome::Failed(Failure::server(
            response.status,
            error_message(&response.body),
        ));
    }

    let decoded = match shape {
        ResponseShape::Record => {
            serde_json::from_str::<Recommendation>(&response.body).map(Outcome::Record)
        }
        ResponseShape::Records => {
            serde_json::from_str::<Vec<Recommendation>>(&response.body).map(Outcome::Records)
        }
        ResponseShape::Nothing => Ok(Outcome::Done),
    };
    decoded.unwrap_or_else(|err| {
        debug!(error = %err, status = response.status, "malformed response body");
        Outcome::Failed(Failure::transport())
    })
}
