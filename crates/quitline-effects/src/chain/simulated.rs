//! Scriptable in-process chain collaborator for tests and simulation
//!
//! Implements both `ChainEffects` and `ConfirmationEffects` against shared
//! in-memory state. Tests script submission outcomes, set the canonical
//! counter set, and push confirmation or failure signals into whatever
//! subscriptions are live.

use async_trait::async_trait;
use futures::channel::mpsc;
use futures::StreamExt;
use parking_lot::Mutex;
use quitline_core::effects::{
    ChainEffects, ConfirmationEffects, ConfirmationStream, ConfirmationSubscription,
};
use quitline_core::{
    AccountAddress, ChainReadError, ConfirmationEvent, ConfirmationFilter, ConfirmationSignal,
    CorrelationToken, Counter, CounterId, CounterRecord, OperationRequest, SubmitError,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

struct SinkEntry {
    filter: ConfirmationFilter,
    sender: mpsc::UnboundedSender<ConfirmationEvent>,
}

#[derive(Default)]
struct SimState {
    counters: HashMap<AccountAddress, Vec<Counter>>,
    submitted: Vec<OperationRequest>,
    queued_submit_errors: VecDeque<SubmitError>,
    read_calls: u64,
    next_token: u64,
    sinks: HashMap<u64, SinkEntry>,
    next_sink_id: u64,
}

/// Scriptable chain handler.
///
/// Submissions succeed with sequential tokens unless an error has been
/// queued; reads return whatever counter set was last installed for the
/// owner. Clones share state.
#[derive(Clone, Default)]
pub struct SimulatedChainHandler {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedChainHandler {
    /// Create an empty simulated chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the canonical counter set returned for `owner`.
    pub fn set_counters(&self, owner: &AccountAddress, counters: Vec<Counter>) {
        self.state.lock().counters.insert(owner.clone(), counters);
    }

    /// Queue an error for the next submission.
    pub fn push_submit_error(&self, error: SubmitError) {
        self.state.lock().queued_submit_errors.push_back(error);
    }

    /// Every request submitted so far, in order.
    pub fn submitted(&self) -> Vec<OperationRequest> {
        self.state.lock().submitted.clone()
    }

    /// Number of bulk reads served so far.
    pub fn read_calls(&self) -> u64 {
        self.state.lock().read_calls
    }

    /// Number of live confirmation subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.state.lock().sinks.len()
    }

    /// Deliver a confirmation signal to every subscription for its owner.
    pub fn emit_confirmed(&self, signal: ConfirmationSignal) {
        let owner = signal.owner.clone();
        self.emit(&owner, ConfirmationEvent::Confirmed(signal));
    }

    /// Deliver a failure event to every subscription for `owner`.
    pub fn emit_failed(&self, owner: &AccountAddress, token: CorrelationToken, reason: &str) {
        self.emit(
            owner,
            ConfirmationEvent::Failed {
                token,
                reason: reason.to_string(),
            },
        );
    }

    fn emit(&self, owner: &AccountAddress, event: ConfirmationEvent) {
        let mut state = self.state.lock();
        state.sinks.retain(|_, sink| {
            if &sink.filter.owner != owner {
                return true;
            }
            // A closed receiver means the subscriber is gone; drop the sink.
            sink.sender.unbounded_send(event.clone()).is_ok()
        });
    }
}

fn record_of(counter: &Counter) -> CounterRecord {
    CounterRecord {
        started_at: counter.started_at,
        paused_at: counter.paused_at,
        total_paused_time: counter.total_paused_time,
        longest_streak: counter.longest_streak,
        total_resets: counter.total_resets,
        active: counter.active,
        category: counter.category.clone(),
        color: counter.color.clone(),
    }
}

#[async_trait]
impl ChainEffects for SimulatedChainHandler {
    async fn submit(&self, request: OperationRequest) -> Result<CorrelationToken, SubmitError> {
        let mut state = self.state.lock();
        if let Some(error) = state.queued_submit_errors.pop_front() {
            return Err(error);
        }
        state.next_token += 1;
        let token = CorrelationToken::new(format!("0x{:064x}", state.next_token));
        state.submitted.push(request);
        Ok(token)
    }

    async fn read_active_counters(
        &self,
        owner: &AccountAddress,
    ) -> Result<(Vec<CounterId>, Vec<CounterRecord>), ChainReadError> {
        let mut state = self.state.lock();
        state.read_calls += 1;
        let counters = state.counters.get(owner).cloned().unwrap_or_default();
        let ids = counters.iter().map(|c| c.id).collect();
        let records = counters.iter().map(record_of).collect();
        Ok((ids, records))
    }
}

struct SimulatedSubscription {
    id: u64,
    state: Arc<Mutex<SimState>>,
}

impl ConfirmationSubscription for SimulatedSubscription {
    fn unsubscribe(self: Box<Self>) {
        self.state.lock().sinks.remove(&self.id);
    }
}

#[async_trait]
impl ConfirmationEffects for SimulatedChainHandler {
    async fn subscribe(
        &self,
        filter: ConfirmationFilter,
    ) -> Result<
        (ConfirmationStream, Box<dyn ConfirmationSubscription>),
        quitline_core::SubscribeError,
    > {
        let (sender, receiver) = mpsc::unbounded();
        let mut state = self.state.lock();
        state.next_sink_id += 1;
        let id = state.next_sink_id;
        state.sinks.insert(id, SinkEntry { filter, sender });
        let subscription = SimulatedSubscription {
            id,
            state: Arc::clone(&self.state),
        };
        Ok((receiver.boxed(), Box::new(subscription)))
    }
}
