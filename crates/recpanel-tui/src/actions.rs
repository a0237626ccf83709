use recpanel_client::BackgroundDispatcher;
use recpanel_core::{Action, Dispatch};

use crate::app::App;

/// Starts an action. Requests run in the background; clear and locally
/// rejected actions have already updated the panel when this returns.
pub fn execute_action(app: &mut App, dispatcher: &BackgroundDispatcher, action: Action) {
    match app.panel.begin(action) {
        Dispatch::Pending(pending) => dispatcher.submit(pending),
        Dispatch::Local | Dispatch::Rejected(_) => {}
    }
}

/// Applies responses that arrived since the last tick.
pub fn apply_completions(app: &mut App, dispatcher: &BackgroundDispatcher) {
    dispatcher.drain_into(&mut app.panel);
}
