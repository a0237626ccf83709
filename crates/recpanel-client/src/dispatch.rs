use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use recpanel_core::{Action, Applied, Completion, Dispatch, Panel, PendingRequest};
use tracing::{debug, warn};

use crate::decode::decode;
use crate::transport::Transport;

/// Sends a pending request and decodes the answer. Never fails: every error
/// becomes a failed outcome.
pub fn execute(transport: &dyn Transport, pending: &PendingRequest) -> Completion {
    let request = &pending.request;
    debug!(
        ticket = pending.ticket.value(),
        action = pending.action.name(),
        method = request.method.as_str(),
        target = %request.target(),
        "sending request"
    );
    let response = transport.send(request);
    match &response {
        Ok(raw) => debug!(ticket = pending.ticket.value(), status = raw.status, "response received"),
        Err(err) => warn!(ticket = pending.ticket.value(), error = %err, "request failed"),
    }
    pending.complete(decode(pending.action.response_shape(), response))
}

/// Runs one action to completion on the calling thread. Returns `None` when
/// no request was issued (clear, or a locally rejected action).
pub fn dispatch(panel: &mut Panel, transport: &dyn Transport, action: Action) -> Option<Applied> {
    match panel.begin(action) {
        Dispatch::Pending(pending) => {
            let completion = execute(transport, &pending);
            Some(panel.complete(completion))
        }
        Dispatch::Local => None,
        Dispatch::Rejected(err) => {
            debug!(action = action.name(), error = %err, "action rejected");
            None
        }
    }
}

/// Runs requests on worker threads and hands completions back to the thread
/// that owns the panel.
pub struct BackgroundDispatcher {
    transport: Arc<dyn Transport>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl BackgroundDispatcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            transport,
            sender,
            receiver,
        }
    }

    pub fn submit(&self, pending: PendingRequest) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let completion = execute(transport.as_ref(), &pending);
            // The receiver only goes away when the panel is shutting down.
            let _ = sender.send(completion);
        });
    }

    pub fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    pub fn wait_next(&self, timeout: Duration) -> Option<Completion> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Applies every completion that has arrived, dropping superseded ones.
    pub fn drain_into(&self, panel: &mut Panel) -> usize {
        let mut applied = 0;
        while let Some(completion) = self.try_next() {
            let ticket = completion.ticket.value();
            match panel.complete(completion) {
                Applied::Applied => applied += 1,
                Applied::Stale => debug!(ticket, "dropped superseded response"),
            }
        }
        applied
    }
}
