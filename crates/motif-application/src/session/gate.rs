use super::store::SessionStore;
use motif_core::action::Action;
use motif_core::model::{InitializationPayload, SaveAttemptId};

/// What the gate did with a batch of fresh reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The session was re-seeded.
    Applied,
    /// Suppression was raised; the data was dropped (not deferred).
    Dropped,
}

/// Decides whether fresh environment data may re-seed the session.
///
/// A re-fetch that arrives while `ui.prevent_state_reset` is raised is
/// dropped so an in-flight save is not clobbered by stale data. The next
/// re-fetch after suppression lowers wins.
#[derive(Clone)]
pub struct InitializationGate {
    store: SessionStore,
    honor_acknowledgments: bool,
}

impl InitializationGate {
    /// Creates a gate over `store`.
    ///
    /// # Arguments
    ///
    /// * `store` - The session store to seed
    /// * `honor_acknowledgments` - Whether acknowledged re-fetches may lower suppression
    pub fn new(store: SessionStore, honor_acknowledgments: bool) -> Self {
        Self {
            store,
            honor_acknowledgments,
        }
    }

    /// Re-seeds the session unless suppression is raised.
    pub async fn receive(&self, payload: InitializationPayload) -> GateDecision {
        self.receive_inner(payload, None).await
    }

    /// Re-seeds with data the environment produced after persisting the save
    /// identified by `attempt_id`.
    ///
    /// A matching acknowledgment lowers suppression first, so the refresh is
    /// applied. A stale or unknown id leaves suppression as it is.
    pub async fn receive_acknowledged(
        &self,
        payload: InitializationPayload,
        attempt_id: SaveAttemptId,
    ) -> GateDecision {
        self.receive_inner(payload, Some(attempt_id)).await
    }

    async fn receive_inner(
        &self,
        payload: InitializationPayload,
        attempt_id: Option<SaveAttemptId>,
    ) -> GateDecision {
        let honor = self.honor_acknowledgments;
        let mut decision = GateDecision::Dropped;

        self.store
            .update(|session| {
                let mut actions = Vec::new();
                let mut suppressed = session.ui.prevent_state_reset;

                if let Some(attempt_id) = attempt_id.filter(|_| honor) {
                    if session.ui.pending_save_attempt == Some(attempt_id) {
                        suppressed = false;
                    }
                    actions.push(Action::AcknowledgeSave { attempt_id });
                }

                if suppressed {
                    tracing::info!(
                        "[InitializationGate] Dropping re-fetch while save {:?} is in flight",
                        session.ui.pending_save_attempt
                    );
                } else {
                    decision = GateDecision::Applied;
                    actions.push(Action::Initialize(payload));
                }
                actions
            })
            .await;

        decision
    }
}
