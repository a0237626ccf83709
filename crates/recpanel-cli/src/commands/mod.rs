use anyhow::Result;
use recpanel_client::{execute, Transport};
use recpanel_core::{Action, Dispatch, FormField, Outcome, Panel};
use serde::Serialize;
use std::io::{self, Write};
use tracing::debug;

use crate::error::remote;

pub mod completions;
pub mod records;
pub mod search;
pub mod tui;

pub struct Context<'a> {
    pub transport: &'a dyn Transport,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

/// Runs one action through the panel and waits for its answer.
///
/// Local rejections surface as `CoreError`; a failed request surfaces with
/// the same text the panel put in its status region. On success the decoded
/// outcome is returned alongside the updated panel.
pub fn run_action(ctx: &Context<'_>, panel: &mut Panel, action: Action) -> Result<Outcome> {
    let pending = match panel.begin(action) {
        Dispatch::Pending(pending) => pending,
        Dispatch::Local => return Ok(Outcome::Done),
        Dispatch::Rejected(err) => return Err(err.into()),
    };

    let completion = execute(ctx.transport, &pending);
    let outcome = completion.outcome.clone();
    let applied = panel.complete(completion);
    debug!(action = action.name(), ?applied, "action finished");

    if let Some(failure) = outcome.failure() {
        let message = panel
            .notice()
            .map(|notice| notice.text.clone())
            .unwrap_or_else(|| failure.display_message().to_string());
        return Err(remote(failure.status, message));
    }
    Ok(outcome)
}

pub fn print_form(panel: &Panel) {
    let form = panel.form();
    for field in FormField::ALL {
        println!("{:<16} {}", format!("{}:", field.name()), form.value(field));
    }
}

pub fn print_notice(panel: &Panel) {
    if let Some(notice) = panel.notice() {
        println!("{}", notice.text);
    }
}
