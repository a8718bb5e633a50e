use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::controller::ControllerInput;

struct PendingRelock {
    generation: u64,
    task: JoinHandle<()>,
}

/// Owns the single pending relock timer.
///
/// An expired timer does not relock directly; it enqueues
/// [`ControllerInput::RelockDue`] so the expiry is handled in turn with UI
/// events. Only the expiry whose generation is still pending may be claimed.
pub(crate) struct RelockScheduler {
    next_generation: u64,
    pending: Option<PendingRelock>,
    inputs: mpsc::UnboundedSender<ControllerInput>,
}

impl RelockScheduler {
    pub(crate) fn new(inputs: mpsc::UnboundedSender<ControllerInput>) -> Self {
        Self {
            next_generation: 0,
            pending: None,
            inputs,
        }
    }

    /// Cancels any pending timer, then arms a new one; returns its generation.
    pub(crate) fn schedule(&mut self, after: Duration) -> u64 {
        self.cancel();

        self.next_generation += 1;
        let generation = self.next_generation;
        let inputs = self.inputs.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = inputs.send(ControllerInput::RelockDue { generation });
        });

        self.pending = Some(PendingRelock { generation, task });
        generation
    }

    pub(crate) fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.task.abort();
                true
            }
            None => false,
        }
    }

    /// Consumes the pending timer if `generation` is the one still armed.
    pub(crate) fn claim(&mut self, generation: u64) -> bool {
        if self.pending_generation() != Some(generation) {
            return false;
        }
        self.pending = None;
        true
    }

    pub(crate) fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.generation)
    }
}

impl Drop for RelockScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
