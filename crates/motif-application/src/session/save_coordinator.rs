//! Save orchestration.
//!
//! A save commits `current` into `original` optimistically, raises the
//! suppression flag for a fresh [`SaveAttemptId`], and hands the serialized
//! payload to the [`SubmitGateway`] on a background task. Suppression is
//! lowered by the first of:
//!
//! - an acknowledgment carrying the same attempt id (see [`super::InitializationGate`])
//! - a failed submit, since no refresh will follow it (only when
//!   [`SaveConfig::release_on_acknowledgment`] is set)
//! - the fallback window in [`SaveConfig::suppression_window`]
//!
//! Each release is an `ACKNOWLEDGE_SAVE` for the attempt that raised it, so a
//! late timer from an older save never releases a newer one.

use super::store::SessionStore;
use motif_core::action::Action;
use motif_core::config::SaveConfig;
use motif_core::error::Result;
use motif_core::gateway::SubmitGateway;
use motif_core::model::{ActionResult, SaveAttemptId, Snapshot};
use motif_core::payload::SubmitPayload;
use std::sync::Arc;

const DEFAULT_SUCCESS_MESSAGE: &str = "Settings saved";

/// Runs the save sequence for one session store.
#[derive(Clone)]
pub struct SaveCoordinator {
    store: SessionStore,
    gateway: Arc<dyn SubmitGateway>,
    config: SaveConfig,
}

impl SaveCoordinator {
    /// Creates a coordinator.
    ///
    /// # Arguments
    ///
    /// * `store` - The session to save
    /// * `gateway` - Collaborator that persists the payload
    /// * `config` - Suppression window and failure policy
    pub fn new(store: SessionStore, gateway: Arc<dyn SubmitGateway>, config: SaveConfig) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Starts a save and returns without waiting for the submit.
    ///
    /// Must be called from within a tokio runtime; the submit and the
    /// fallback timer run as spawned tasks.
    ///
    /// # Returns
    ///
    /// - `Ok(SaveAttemptId)`: The save was committed and submitted in the background
    /// - `Err(MotifError::Serialization)`: The payload could not be encoded; nothing was submitted
    pub async fn submit_form(&self) -> Result<SaveAttemptId> {
        let attempt_id = SaveAttemptId::new();
        let transition = self
            .store
            .apply(vec![
                Action::UpdateOriginalState,
                Action::SetPreventStateReset(true),
                Action::TrackSaveAttempt { attempt_id },
                Action::SetSaving(true),
            ])
            .await;
        let committed = transition.after.original.clone();
        let previous = transition.before.original;

        let payload = match SubmitPayload::save(&transition.after.current) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("[SaveCoordinator] Failed to encode payload: {}", e);
                self.store
                    .apply(Self::failure_actions(
                        attempt_id,
                        e.to_string(),
                        self.config.release_on_acknowledgment,
                    ))
                    .await;
                return Err(e);
            }
        };

        tracing::info!(
            "[SaveCoordinator] Save {} started ({} fields)",
            attempt_id,
            payload.fields.len()
        );

        self.spawn_submit(attempt_id, payload, previous, committed);
        self.spawn_fallback_release(attempt_id);

        Ok(attempt_id)
    }

    fn spawn_submit(
        &self,
        attempt_id: SaveAttemptId,
        payload: SubmitPayload,
        previous: Snapshot,
        committed: Snapshot,
    ) {
        let store = self.store.clone();
        let gateway = self.gateway.clone();
        let rollback = self.config.rollback_on_failure;
        let release = self.config.release_on_acknowledgment;

        tokio::spawn(async move {
            match gateway.submit(payload).await {
                Ok(receipt) => {
                    tracing::info!("[SaveCoordinator] Save {} submitted", attempt_id);
                    let message = receipt
                        .message
                        .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                    store
                        .apply(vec![
                            Action::SetSaving(false),
                            Action::SetActionResult(ActionResult::success(message)),
                        ])
                        .await;
                }
                Err(e) => {
                    tracing::warn!("[SaveCoordinator] Save {} failed: {}", attempt_id, e);
                    let mut actions = Self::failure_actions(attempt_id, e.to_string(), release);
                    store
                        .update(move |session| {
                            // a later save has already moved `original` on
                            if rollback && session.original == committed {
                                actions.push(Action::RollbackOriginal { original: previous });
                            }
                            actions
                        })
                        .await;
                }
            }
        });
    }

    fn spawn_fallback_release(&self, attempt_id: SaveAttemptId) {
        let store = self.store.clone();
        let window = self.config.suppression_window();

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let transition = store
                .apply(vec![Action::AcknowledgeSave { attempt_id }])
                .await;
            if transition.before.ui.pending_save_attempt == Some(attempt_id) {
                tracing::info!(
                    "[SaveCoordinator] Suppression window for save {} elapsed without acknowledgment",
                    attempt_id
                );
            }
        });
    }

    /// In fixed-window mode suppression stays raised until the timer fires.
    fn failure_actions(attempt_id: SaveAttemptId, error: String, release: bool) -> Vec<Action> {
        let mut actions = vec![
            Action::SetSaving(false),
            Action::SetActionResult(ActionResult::failure(error)),
        ];
        if release {
            actions.push(Action::AcknowledgeSave { attempt_id });
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use motif_core::error::MotifError;
    use motif_core::gateway::SubmitReceipt;
    use motif_core::model::{EditSession, InitializationPayload, VariantMapping};
    use motif_core::payload::SAVE_ACTION;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockGateway {
        submitted: Mutex<Vec<SubmitPayload>>,
        fail_with: Option<String>,
        delay: Duration,
    }

    impl MockGateway {
        fn ok() -> Self {
            Self {
                submitted: Mutex::new(Vec::new()),
                fail_with: None,
                delay: Duration::ZERO,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::ok()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::ok()
            }
        }

        fn count(&self) -> usize {
            self.submitted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SubmitGateway for MockGateway {
        async fn submit(&self, payload: SubmitPayload) -> Result<SubmitReceipt> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.submitted.lock().unwrap().push(payload);
            match &self.fail_with {
                Some(message) => Err(MotifError::submit(message.clone())),
                None => Ok(SubmitReceipt {
                    message: Some("Saved!".to_string()),
                }),
            }
        }
    }

    fn store() -> SessionStore {
        SessionStore::from_payload(InitializationPayload {
            snapshot: Snapshot {
                enabled: false,
                selected_styles: vec!["s1".to_string(), "s2".to_string()],
                selected_templates: vec!["mug".to_string()],
                variant_mappings: vec![VariantMapping::new(1, "A")],
            },
            ..Default::default()
        })
    }

    fn config(release_on_acknowledgment: bool, rollback_on_failure: bool) -> SaveConfig {
        SaveConfig {
            suppression_window_ms: 1000,
            release_on_acknowledgment,
            rollback_on_failure,
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_commits_optimistically() {
        let store = store();
        store.dispatch(Action::ToggleEnabled { enabled: true }).await;
        let gateway = Arc::new(MockGateway::slow(Duration::from_millis(500)));
        let coordinator = SaveCoordinator::new(store.clone(), gateway.clone(), config(true, false));

        let attempt = coordinator.submit_form().await.unwrap();

        let session = store.snapshot().await;
        assert!(session.original.enabled);
        assert!(!session.ui.is_dirty);
        assert!(session.ui.is_saving);
        assert!(session.ui.prevent_state_reset);
        assert_eq!(session.ui.pending_save_attempt, Some(attempt));
        assert_eq!(gateway.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_reports_result() {
        let store = store();
        store.dispatch(Action::ToggleEnabled { enabled: true }).await;
        let gateway = Arc::new(MockGateway::ok());
        let coordinator = SaveCoordinator::new(store.clone(), gateway.clone(), config(true, false));

        coordinator.submit_form().await.unwrap();
        settle().await;

        assert_eq!(gateway.count(), 1);
        let payload = gateway.submitted.lock().unwrap()[0].clone();
        assert_eq!(payload.action, SAVE_ACTION);
        assert_eq!(payload.field("enabled"), Some("true"));

        assert!(!store.is_saving().await);
        assert_eq!(store.success_message().await.as_deref(), Some("Saved!"));
        // still suppressed until acknowledged or the window elapses
        assert!(store.snapshot().await.ui.prevent_state_reset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_window_releases_suppression() {
        let store = store();
        let coordinator =
            SaveCoordinator::new(store.clone(), Arc::new(MockGateway::ok()), config(true, false));

        coordinator.submit_form().await.unwrap();
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(store.snapshot().await.ui.prevent_state_reset);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let session = store.snapshot().await;
        assert!(!session.ui.prevent_state_reset);
        assert_eq!(session.ui.pending_save_attempt, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_does_not_release_newer_save() {
        let store = store();
        let coordinator =
            SaveCoordinator::new(store.clone(), Arc::new(MockGateway::ok()), config(true, false));

        coordinator.submit_form().await.unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        let second = coordinator.submit_form().await.unwrap();

        // first window elapses at t=1000
        tokio::time::sleep(Duration::from_millis(500)).await;
        let session = store.snapshot().await;
        assert!(session.ui.prevent_state_reset);
        assert_eq!(session.ui.pending_save_attempt, Some(second));

        // second window elapses at t=1600
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!store.snapshot().await.ui.prevent_state_reset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_optimistic_original_by_default() {
        let store = store();
        store.dispatch(Action::ToggleEnabled { enabled: true }).await;
        let coordinator = SaveCoordinator::new(
            store.clone(),
            Arc::new(MockGateway::failing("network down")),
            config(true, false),
        );

        coordinator.submit_form().await.unwrap();
        settle().await;

        let session = store.snapshot().await;
        assert!(session.original.enabled);
        assert!(!session.ui.is_dirty);
        assert!(!session.ui.is_saving);
        assert!(!session.ui.prevent_state_reset);
        assert!(store.has_error().await);
        assert!(store
            .error_message()
            .await
            .is_some_and(|message| message.contains("network down")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_suppression_in_fixed_window_mode() {
        let store = store();
        let coordinator = SaveCoordinator::new(
            store.clone(),
            Arc::new(MockGateway::failing("network down")),
            config(false, false),
        );

        let attempt = coordinator.submit_form().await.unwrap();
        settle().await;

        let session = store.snapshot().await;
        assert!(!session.ui.is_saving);
        assert!(store.has_error().await);
        assert!(session.ui.prevent_state_reset);
        assert_eq!(session.ui.pending_save_attempt, Some(attempt));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        let session = store.snapshot().await;
        assert!(!session.ui.prevent_state_reset);
        assert_eq!(session.ui.pending_save_attempt, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_rolls_back_when_configured() {
        let store = store();
        store.dispatch(Action::ToggleEnabled { enabled: true }).await;
        let coordinator = SaveCoordinator::new(
            store.clone(),
            Arc::new(MockGateway::failing("rejected")),
            config(true, true),
        );

        coordinator.submit_form().await.unwrap();
        settle().await;

        let session = store.snapshot().await;
        assert!(!session.original.enabled);
        assert!(session.current.enabled);
        assert!(session.ui.is_dirty);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_from_default_session() {
        let store = SessionStore::new(EditSession::default());
        let gateway = Arc::new(MockGateway::ok());
        let coordinator = SaveCoordinator::new(store.clone(), gateway.clone(), SaveConfig::default());

        coordinator.submit_form().await.unwrap();
        settle().await;

        assert_eq!(gateway.count(), 1);
        assert_eq!(
            gateway.submitted.lock().unwrap()[0].field("selectedStyles"),
            Some("[]")
        );
    }
}
