//! Benefit Mutation Orchestrator (Use Case)
//!
//! Runs every mutating intent as: validate locally (transfer only), call
//! the store once, reload the full list on success, and report the outcome.
//! A failed call leaves the snapshot untouched and is never retried.

use std::future::Future;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::{mpsc, watch, RwLock};

use crate::domain::{
    check_destination, destination_candidates, validate_transfer, Benefit, BenefitId,
    DomainError, MutationAction, MutationPhase, MutationRequest, Notification, TransferRequest,
    TransferValidation,
};
use crate::ports::BenefitStore;

/// Affirmative answer to a "really deactivate?" prompt.
///
/// Obtained by the caller before deactivating; the orchestrator trusts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmed(());

impl Confirmed {
    pub fn by_user() -> Self {
        Confirmed(())
    }
}

/// Owns the current view's list of benefits and sequences mutations
/// against the store.
pub struct BenefitOrchestrator<S: BenefitStore> {
    store: Arc<S>,
    snapshot: RwLock<Vec<Benefit>>,
    phase: watch::Sender<MutationPhase>,
    notifications: mpsc::UnboundedSender<Notification>,
    #[cfg(test)]
    transitions: std::sync::Mutex<Vec<MutationPhase>>,
}

impl<S: BenefitStore> BenefitOrchestrator<S> {
    /// Create an orchestrator with an empty snapshot, plus the receiving
    /// end of its notification stream
    pub fn new(store: Arc<S>) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notifications, receiver) = mpsc::unbounded_channel();
        let (phase, _) = watch::channel(MutationPhase::Idle);
        let orchestrator = Self {
            store,
            snapshot: RwLock::new(Vec::new()),
            phase,
            notifications,
            #[cfg(test)]
            transitions: std::sync::Mutex::new(Vec::new()),
        };
        (orchestrator, receiver)
    }

    /// Current snapshot, in store order
    pub async fn snapshot(&self) -> Vec<Benefit> {
        self.snapshot.read().await.clone()
    }

    /// Snapshot entry for `id`, if loaded
    pub async fn cached(&self, id: BenefitId) -> Option<Benefit> {
        self.snapshot
            .read()
            .await
            .iter()
            .find(|b| b.has_id(id))
            .cloned()
    }

    /// Phase of the most recent mutating call
    pub fn phase(&self) -> MutationPhase {
        *self.phase.borrow()
    }

    pub fn watch_phase(&self) -> watch::Receiver<MutationPhase> {
        self.phase.subscribe()
    }

    /// Fetch every benefit and replace the snapshot.
    ///
    /// On failure the previous snapshot is kept and a failure is reported.
    pub async fn load_all(&self) -> Result<Vec<Benefit>, DomainError> {
        match self.store.list_all().await {
            Ok(benefits) => {
                *self.snapshot.write().await = benefits.clone();
                tracing::debug!("Loaded {} benefits", benefits.len());
                Ok(benefits)
            }
            Err(e) => {
                tracing::warn!("Failed to load benefits: {}", e);
                self.notify(Notification::failure(MutationAction::Load, e.to_string()));
                Err(e)
            }
        }
    }

    /// Read a single benefit straight from the store
    pub async fn get(&self, id: BenefitId) -> Result<Benefit, DomainError> {
        self.store.get_by_id(id).await
    }

    /// Active benefits straight from the store; the snapshot is left alone
    pub async fn list_active(&self) -> Result<Vec<Benefit>, DomainError> {
        self.store.list_active().await.map_err(|e| {
            tracing::warn!("Failed to load active benefits: {}", e);
            e
        })
    }

    /// Active benefits a transfer out of `source_id` may target
    pub async fn destinations(&self, source_id: BenefitId) -> Result<Vec<Benefit>, DomainError> {
        let active = self.list_active().await?;
        Ok(destination_candidates(source_id, &active))
    }

    /// Create a benefit. `request` must already satisfy the form rules.
    pub async fn create(&self, request: &MutationRequest) -> Result<Benefit, DomainError> {
        debug_assert!(request.is_well_formed(), "create with malformed request");
        let created = self
            .submit(MutationAction::Create, self.store.create(request))
            .await?;
        tracing::info!("Created benefit: {} ({:?})", created.name, created.id);
        Ok(created)
    }

    /// Replace the mutable fields of `id` with `request` as given
    pub async fn update(
        &self,
        id: BenefitId,
        request: &MutationRequest,
    ) -> Result<Benefit, DomainError> {
        debug_assert!(request.is_well_formed(), "update with malformed request");
        let updated = self
            .submit(MutationAction::Update, self.store.update(id, request))
            .await?;
        tracing::info!("Updated benefit: {}", id);
        Ok(updated)
    }

    /// Deactivate `id`. Already-inactive ids are passed through unchanged.
    pub async fn deactivate(
        &self,
        id: BenefitId,
        _confirmed: Confirmed,
    ) -> Result<(), DomainError> {
        self.submit(MutationAction::Deactivate, self.store.deactivate(id))
            .await?;
        tracing::info!("Deactivated benefit: {}", id);
        Ok(())
    }

    /// Validate against the snapshot, then submit the transfer once.
    ///
    /// Balances are never adjusted locally; the reload after a successful
    /// transfer is the only way new balances reach the snapshot.
    pub async fn transfer(
        &self,
        source_id: BenefitId,
        candidate_to_id: Option<BenefitId>,
        candidate_amount: Option<Decimal>,
    ) -> Result<TransferRequest, DomainError> {
        self.enter(MutationAction::Transfer, MutationPhase::Validating);
        let request = match self
            .prepare_transfer(source_id, candidate_to_id, candidate_amount)
            .await
        {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!("Transfer rejected locally: {}", e);
                self.enter(MutationAction::Transfer, MutationPhase::Idle);
                return Err(e);
            }
        };

        self.submit(MutationAction::Transfer, self.store.transfer(&request))
            .await?;
        tracing::info!(
            "Transferred {} from {} to {}",
            request.amount,
            request.from_id,
            request.to_id
        );
        Ok(request)
    }

    async fn prepare_transfer(
        &self,
        source_id: BenefitId,
        candidate_to_id: Option<BenefitId>,
        candidate_amount: Option<Decimal>,
    ) -> Result<TransferRequest, DomainError> {
        let snapshot = self.snapshot.read().await;
        let source = snapshot
            .iter()
            .find(|b| b.has_id(source_id))
            .ok_or_else(|| DomainError::not_found("Benefit", source_id))?;

        let inactive = candidate_to_id
            .filter(|to_id| *to_id != source_id)
            .and_then(|to_id| check_destination(to_id, &snapshot));

        match (validate_transfer(source, candidate_to_id, candidate_amount), inactive) {
            (TransferValidation::Valid(request), None) => Ok(request),
            (validation, inactive) => {
                let mut violations = validation.violations().to_vec();
                if let Some(violation) = inactive {
                    let at = violations
                        .iter()
                        .position(|v| v.field() == "amount")
                        .unwrap_or(violations.len());
                    violations.insert(at, violation);
                }
                Err(DomainError::InvalidTransfer(violations))
            }
        }
    }

    /// Await one store call, then refresh on success or report on failure
    async fn submit<T>(
        &self,
        action: MutationAction,
        call: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        self.enter(action, MutationPhase::Submitting);
        match call.await {
            Ok(value) => {
                // Only transfer exposes the post-submit phases.
                let staged = action == MutationAction::Transfer;
                if staged {
                    self.enter(action, MutationPhase::Succeeded);
                }
                self.notify(Notification::success(action));
                if staged {
                    self.enter(action, MutationPhase::Refreshing);
                }
                // A failed reload reports itself; the mutation still stands.
                let _ = self.load_all().await;
                self.enter(action, MutationPhase::Idle);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("Benefit {} failed: {}", action, e);
                self.enter(action, MutationPhase::Failed);
                self.notify(Notification::failure(action, e.to_string()));
                self.enter(action, MutationPhase::Idle);
                Err(e)
            }
        }
    }

    fn enter(&self, action: MutationAction, next: MutationPhase) {
        let previous = self.phase.send_replace(next);
        debug_assert!(
            previous.can_transition_to(next),
            "illegal phase transition {} -> {}",
            previous,
            next
        );
        tracing::debug!("{}: {} -> {}", action, previous, next);
        #[cfg(test)]
        self.transitions.lock().unwrap().push(next);
    }

    fn notify(&self, notification: Notification) {
        // Nobody listening is fine.
        let _ = self.notifications.send(notification);
    }
}
