//! # Reconciliation Engine
//!
//! The pending-transaction reconciliation state machine. The engine
//! submits counter operations through the chain collaborator, tracks each
//! one optimistically until a confirmation, failure, or timeout resolves
//! it, and reconciles canonical state after every terminal signal.
//!
//! Per optimistic entry the lifecycle is:
//!
//! ```text
//! Submitting → Pending → {Confirmed, Failed, TimedOut}
//! ```
//!
//! `Submitting` lasts only for the synchronous submission call; a thrown
//! submission never creates an entry. All three terminal signals converge
//! on "remove the entry, cancel its timer, refresh canonical state". The
//! presence check in the tracker makes the terminal transition
//! exactly-once: whichever of the three fires first wins, and the others
//! find nothing to act on.

mod intake;
pub mod tracker;

use crate::config::{ConfigError, EngineConfig};
use crate::errors::{EngineError, EngineResult};
use crate::preferences::{PreferenceAdapter, Preferences};
use crate::store::CanonicalStore;
use crate::views::achievements::unlocked_days;
use crate::views::counters::{build_view, MergedEntry};
use crate::views::notifications::{Notice, NoticeReceiver, NoticeSender};
use crate::views::statistics::{build_statistics, Statistics};
use intake::IntakeHandle;
use tracker::{PendingOperation, PendingOperations};

use async_lock::RwLock;
use futures::StreamExt;
use quitline_core::effects::{
    ChainEffects, ConfirmationEffects, ConfirmationStream, PhysicalTimeEffects,
};
use quitline_core::{
    zip_counters, AccountAddress, ConfirmationEvent, ConfirmationFilter, ConfirmationMatch,
    CorrelationToken, Counter, CounterId, CreateSpec, OperationKind, OperationRequest, SubmitError,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Default)]
struct EngineState {
    owner: Option<AccountAddress>,
    canonical: CanonicalStore,
    pending: PendingOperations,
    timers: HashMap<CorrelationToken, JoinHandle<()>>,
    intake: Option<IntakeHandle>,
    preferences: Preferences,
    // Guards the window between Create validation and entry insertion, so
    // two overlapping submit calls cannot both pass the exclusivity check.
    create_reserved: bool,
}

struct EngineInner {
    chain: Arc<dyn ChainEffects>,
    confirmations: Arc<dyn ConfirmationEffects>,
    clock: Arc<dyn PhysicalTimeEffects>,
    config: EngineConfig,
    prefs_adapter: Option<PreferenceAdapter>,
    notices: NoticeSender,
    state: RwLock<EngineState>,
}

/// The reconciliation engine.
///
/// Cheap to clone; clones share state. Constructed with its collaborators
/// injected, never reaching for ambient globals. The paired
/// [`NoticeReceiver`] is the only path on which outcomes reach the
/// presentation layer.
#[derive(Clone)]
pub struct ReconciliationEngine {
    inner: Arc<EngineInner>,
}

fn success_notice(kind: OperationKind) -> Notice {
    match kind {
        OperationKind::Create => Notice::success("Counter created!"),
        OperationKind::Pause => Notice::success("Counter paused!"),
        OperationKind::Resume => Notice::success("Counter resumed!"),
        OperationKind::Reset => Notice::success("Counter reset!"),
        OperationKind::Delete => Notice::success("Counter deleted!"),
    }
}

impl ReconciliationEngine {
    /// Create an engine with its collaborators.
    ///
    /// Returns the engine and the receiving half of its notice stream.
    pub fn new(
        chain: Arc<dyn ChainEffects>,
        confirmations: Arc<dyn ConfirmationEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
        preferences: Option<PreferenceAdapter>,
        config: EngineConfig,
    ) -> Result<(Self, NoticeReceiver), ConfigError> {
        config.validate()?;
        let (notices, receiver) = NoticeSender::channel();
        let inner = Arc::new(EngineInner {
            chain,
            confirmations,
            clock,
            config,
            prefs_adapter: preferences,
            notices,
            state: RwLock::new(EngineState::default()),
        });
        Ok((Self { inner }, receiver))
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Connect an account: subscribe to its confirmations and load
    /// canonical state.
    ///
    /// Any previous session is torn down first, so an account switch can
    /// never resolve stale operations against the new account's view.
    pub async fn connect(&self, owner: AccountAddress) -> EngineResult<()> {
        self.teardown_session().await;

        let preferences = match &self.inner.prefs_adapter {
            Some(adapter) => match adapter.load().await {
                Ok(prefs) => prefs,
                Err(error) => {
                    warn!(%error, "failed to load preferences, using defaults");
                    Preferences::default()
                }
            },
            None => Preferences::default(),
        };

        let filter = ConfirmationFilter {
            owner: owner.clone(),
        };
        let (stream, subscription) = self.inner.confirmations.subscribe(filter).await?;
        let task = self.spawn_intake(stream);

        {
            let mut state = self.inner.state.write().await;
            state.owner = Some(owner.clone());
            state.preferences = preferences;
            state.intake = Some(IntakeHandle { task, subscription });
        }
        info!(%owner, "account connected");
        self.refresh().await
    }

    /// Disconnect: discard all optimistic entries, cancel timers,
    /// unsubscribe, and clear canonical state.
    pub async fn disconnect(&self) {
        self.teardown_session().await;
        info!("account disconnected");
    }

    async fn teardown_session(&self) {
        let (timers, intake) = {
            let mut state = self.inner.state.write().await;
            state.owner = None;
            state.canonical.clear();
            state.pending.clear();
            state.create_reserved = false;
            (std::mem::take(&mut state.timers), state.intake.take())
        };
        for (_, timer) in timers {
            timer.abort();
        }
        if let Some(intake) = intake {
            intake.shutdown();
        }
    }

    /// Re-fetch canonical state wholesale from the read interface.
    pub async fn refresh(&self) -> EngineResult<()> {
        let owner = {
            let state = self.inner.state.read().await;
            state.owner.clone()
        }
        .ok_or(EngineError::NotConnected)?;

        let (ids, records) = self.inner.chain.read_active_counters(&owner).await?;
        let counters = zip_counters(ids, records)?;

        let changed_prefs = {
            let mut state = self.inner.state.write().await;
            if state.owner.as_ref() != Some(&owner) {
                // Disconnected while the read was in flight; drop the result.
                return Ok(());
            }
            state.canonical.replace(counters);
            let EngineState {
                canonical,
                preferences,
                ..
            } = &mut *state;
            preferences
                .adopt_custom_starts(canonical.counters())
                .then(|| preferences.clone())
        };
        if let Some(prefs) = changed_prefs {
            self.persist_preferences(&prefs).await;
        }
        debug!("canonical state refreshed");
        Ok(())
    }

    // ========================================================================
    // Submission entry points
    // ========================================================================

    /// Submit a Create for a new counter.
    ///
    /// Local preconditions run before any external call: no Create may
    /// already be pending, the category must be non-empty after trimming,
    /// and no existing counter may share the category
    /// (case-insensitively).
    pub async fn submit_create(&self, spec: CreateSpec) -> EngineResult<CorrelationToken> {
        let category = spec.category.trim().to_string();
        {
            let mut state = self.inner.state.write().await;
            if state.owner.is_none() {
                return Err(EngineError::NotConnected);
            }
            if state.create_reserved || state.pending.pending_create().is_some() {
                self.inner
                    .notices
                    .emit(Notice::info("A counter creation is already pending"));
                return Err(EngineError::OperationAlreadyPending);
            }
            if category.is_empty() {
                self.inner
                    .notices
                    .emit(Notice::error("Please enter a habit name"));
                return Err(EngineError::InvalidCategory);
            }
            let normalized = category.to_lowercase();
            let duplicate = state
                .canonical
                .counters()
                .iter()
                .any(|c| c.category.trim().to_lowercase() == normalized);
            if duplicate {
                self.inner.notices.emit(Notice::error(format!(
                    "You already have a \"{category}\" counter"
                )));
                return Err(EngineError::DuplicateCategory(category));
            }
            state.create_reserved = true;
        }

        let request = OperationRequest::Create(CreateSpec {
            category,
            color: spec.color,
            custom_started_at: spec.custom_started_at,
        });
        let result = self.submit_tracked(request).await;
        self.inner.state.write().await.create_reserved = false;
        result
    }

    /// Submit a Pause for an existing counter.
    pub async fn submit_pause(&self, id: CounterId) -> EngineResult<CorrelationToken> {
        self.ensure_connected().await?;
        self.submit_tracked(OperationRequest::Pause(id)).await
    }

    /// Submit a Resume for a paused counter.
    pub async fn submit_resume(&self, id: CounterId) -> EngineResult<CorrelationToken> {
        self.ensure_connected().await?;
        self.submit_tracked(OperationRequest::Resume(id)).await
    }

    /// Submit a Reset; the contract records the streak if it is the
    /// longest.
    pub async fn submit_reset(&self, id: CounterId) -> EngineResult<CorrelationToken> {
        self.ensure_connected().await?;
        self.submit_tracked(OperationRequest::Reset(id)).await
    }

    /// Submit a Delete. The row disappears from the merged view
    /// immediately; a later failure rolls the hide back.
    pub async fn submit_delete(&self, id: CounterId) -> EngineResult<CorrelationToken> {
        self.ensure_connected().await?;
        self.submit_tracked(OperationRequest::Delete(id)).await
    }

    async fn ensure_connected(&self) -> EngineResult<()> {
        if self.inner.state.read().await.owner.is_some() {
            Ok(())
        } else {
            Err(EngineError::NotConnected)
        }
    }

    async fn submit_tracked(&self, request: OperationRequest) -> EngineResult<CorrelationToken> {
        let kind = request.kind();
        let target = request.target();
        let create = match &request {
            OperationRequest::Create(spec) => Some(spec.clone()),
            _ => None,
        };

        let token = match self.inner.chain.submit(request).await {
            Ok(token) => token,
            Err(error) => {
                debug!(op = kind.label(), %error, "submission failed");
                self.notify_submit_error(kind, &error);
                return Err(EngineError::Submission(error));
            }
        };

        let submitted_at = self.now().await;
        {
            let mut state = self.inner.state.write().await;
            let hidden = match (kind, target) {
                (OperationKind::Delete, Some(id)) => state.canonical.remove(id),
                _ => None,
            };
            state.pending.insert(PendingOperation {
                token: token.clone(),
                kind,
                target,
                create,
                submitted_at,
                hidden,
            });
            let timer = self.spawn_timeout(token.clone());
            state.timers.insert(token.clone(), timer);
        }
        debug!(op = kind.label(), %token, "operation submitted");
        Ok(token)
    }

    fn notify_submit_error(&self, kind: OperationKind, error: &SubmitError) {
        let notice = match error {
            SubmitError::UserRejected => match kind {
                OperationKind::Create => Notice::info("Transaction cancelled"),
                _ => Notice::info(format!("{} cancelled", kind.label())),
            },
            SubmitError::InsufficientFunds => Notice::error("Insufficient funds"),
            SubmitError::Failed(_) => match kind {
                OperationKind::Create => Notice::error("Transaction failed"),
                _ => Notice::error(format!("{} failed", kind.label())),
            },
        };
        self.inner.notices.emit(notice);
    }

    // ========================================================================
    // Terminal signals
    // ========================================================================

    /// Handle a chain-level confirmation.
    ///
    /// Unmatched and duplicate signals are ignored: they belong to another
    /// session or arrived after the entry already resolved.
    pub async fn on_confirmation_signal(&self, matched: ConfirmationMatch) {
        let confirmed = {
            let mut state = self.inner.state.write().await;
            let Some(owner) = state.owner.clone() else {
                return;
            };
            let Some(token) = state.pending.resolve(&matched, &owner) else {
                debug!("confirmation signal matched no tracked operation, ignoring");
                return;
            };
            let Some(operation) = state.pending.remove(&token) else {
                return;
            };
            if let Some(timer) = state.timers.remove(&token) {
                timer.abort();
            }
            if let Some(started_at) = operation
                .create
                .as_ref()
                .and_then(|spec| spec.custom_started_at)
            {
                // Id unknown until the refresh shows the new counter; the
                // started_at pairs them up.
                state.preferences.push_pending_custom_start(started_at);
            }
            operation
        };

        info!(op = confirmed.kind.label(), token = %confirmed.token, "operation confirmed");
        if confirmed
            .create
            .as_ref()
            .is_some_and(|spec| spec.custom_started_at.is_some())
        {
            let prefs = self.preferences().await;
            self.persist_preferences(&prefs).await;
        }
        if let Err(error) = self.refresh().await {
            warn!(%error, "canonical refresh after confirmation failed");
        }
        self.inner.notices.emit(success_notice(confirmed.kind));
    }

    /// Handle a terminal failure (revert or signer-reported).
    ///
    /// For a Delete, the optimistically hidden counter is restored before
    /// the forced refresh, so the row reappears even if the refresh is
    /// slow.
    pub async fn on_confirmation_failure(&self, token: &CorrelationToken, reason: &str) {
        let failed = {
            let mut state = self.inner.state.write().await;
            let Some(operation) = state.pending.remove(token) else {
                debug!(%token, "failure signal matched no tracked operation, ignoring");
                return;
            };
            if let Some(timer) = state.timers.remove(token) {
                timer.abort();
            }
            if let Some(hidden) = operation.hidden.clone() {
                state.canonical.restore(hidden);
            }
            operation
        };

        warn!(op = failed.kind.label(), %token, reason, "operation failed on chain");
        if let Err(error) = self.refresh().await {
            warn!(%error, "canonical refresh after failure failed");
        }
        self.inner.notices.emit(Notice::error("Transaction failed"));
    }

    /// Handle the wait bound elapsing with neither confirmation nor
    /// failure observed.
    ///
    /// A liveness guarantee, not a verdict: the entry is cleared so the UI
    /// never sticks, the refresh fetches whatever truth exists, and the
    /// notice is informational.
    pub async fn on_timeout(&self, token: &CorrelationToken) {
        let timed_out = {
            let mut state = self.inner.state.write().await;
            let Some(operation) = state.pending.remove(token) else {
                return;
            };
            state.timers.remove(token);
            operation
        };

        warn!(op = timed_out.kind.label(), %token, "no confirmation within the wait bound");
        if let Err(error) = self.refresh().await {
            warn!(%error, "canonical refresh after timeout failed");
        }
        self.inner
            .notices
            .emit(Notice::info("Transaction is taking longer than expected"));
    }

    // ========================================================================
    // Accessors for the presentation layer
    // ========================================================================

    /// The merged list the presentation layer renders.
    pub async fn merged_view(&self) -> Vec<MergedEntry> {
        let now = self.now().await;
        let state = self.inner.state.read().await;
        build_view(state.canonical.counters(), &state.pending.entries(), now)
    }

    /// Snapshot of canonical counters.
    pub async fn counters(&self) -> Vec<Counter> {
        self.inner.state.read().await.canonical.counters().to_vec()
    }

    /// Snapshot of in-flight operations.
    pub async fn pending_operations(&self) -> Vec<PendingOperation> {
        self.inner.state.read().await.pending.entries()
    }

    /// Aggregate statistics over canonical counters.
    pub async fn statistics(&self) -> Statistics {
        let now = self.now().await;
        let state = self.inner.state.read().await;
        build_statistics(state.canonical.counters(), now)
    }

    /// Unlocked achievement milestone days.
    pub async fn achievements(&self) -> BTreeSet<u64> {
        let now = self.now().await;
        let state = self.inner.state.read().await;
        unlocked_days(
            state.canonical.counters(),
            &state.preferences.custom_date_counter_ids,
            now,
        )
    }

    /// Snapshot of client preferences.
    pub async fn preferences(&self) -> Preferences {
        self.inner.state.read().await.preferences.clone()
    }

    /// Mutate preferences and persist them (a defined save point).
    pub async fn update_preferences<F>(&self, apply: F) -> Preferences
    where
        F: FnOnce(&mut Preferences),
    {
        let updated = {
            let mut state = self.inner.state.write().await;
            apply(&mut state.preferences);
            state.preferences.clone()
        };
        self.persist_preferences(&updated).await;
        updated
    }

    /// The connected account, if any.
    pub async fn owner(&self) -> Option<AccountAddress> {
        self.inner.state.read().await.owner.clone()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn now(&self) -> u64 {
        match self.inner.clock.unix_now().await {
            Ok(now) => now,
            Err(error) => {
                warn!(%error, "clock read failed");
                0
            }
        }
    }

    async fn persist_preferences(&self, preferences: &Preferences) {
        if let Some(adapter) = &self.inner.prefs_adapter {
            if let Err(error) = adapter.save(preferences).await {
                warn!(%error, "failed to persist preferences");
            }
        }
    }

    fn spawn_timeout(&self, token: CorrelationToken) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        let clock = Arc::clone(&self.inner.clock);
        let timeout_ms = self.inner.config.confirmation_timeout_ms;
        tokio::spawn(async move {
            clock.sleep_ms(timeout_ms).await;
            // A dropped engine means the session is gone; do nothing.
            if let Some(inner) = weak.upgrade() {
                ReconciliationEngine { inner }.on_timeout(&token).await;
            }
        })
    }

    fn spawn_intake(&self, mut stream: ConfirmationStream) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while let Some(event) = stream.next().await {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let engine = ReconciliationEngine { inner };
                match event {
                    ConfirmationEvent::Confirmed(signal) => {
                        engine.on_confirmation_signal(signal.into()).await;
                    }
                    ConfirmationEvent::Failed { token, reason } => {
                        engine.on_confirmation_failure(&token, &reason).await;
                    }
                }
            }
        })
    }
}
