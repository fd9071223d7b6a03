//! Confirmation intake plumbing
//!
//! Pairs the forwarding task that pumps the subscription stream into the
//! engine with the collaborator-side subscription handle, so both halves
//! are torn down together.

use quitline_core::effects::ConfirmationSubscription;
use tokio::task::JoinHandle;

/// A live confirmation intake: forwarding task plus subscription handle.
pub(crate) struct IntakeHandle {
    pub(crate) task: JoinHandle<()>,
    pub(crate) subscription: Box<dyn ConfirmationSubscription>,
}

impl IntakeHandle {
    /// Abort the forwarding task and release the collaborator-side
    /// registration. Called on normal teardown and on account change.
    pub(crate) fn shutdown(self) {
        self.task.abort();
        self.subscription.unsubscribe();
    }
}
