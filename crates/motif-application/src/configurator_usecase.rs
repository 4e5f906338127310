//! Configurator use case implementation.
//!
//! `ConfiguratorUseCase` is the single entry point a front end talks to for
//! one edit target. It owns the session store and routes loads, edits and
//! saves through the gate and the coordinator.

use crate::session::{GateDecision, InitializationGate, SaveCoordinator, SessionStore};
use motif_core::action::Action;
use motif_core::config::SaveConfig;
use motif_core::error::Result;
use motif_core::gateway::{ReferenceDataProvider, SubmitGateway};
use motif_core::model::{ActionResult, EditSession, SaveAttemptId, TemplateId};
use std::sync::Arc;

/// Use case for editing the customization options of one item.
///
/// # Responsibilities
///
/// - Loading and re-loading reference data through the [`InitializationGate`]
/// - Applying user intents to the session
/// - Starting saves through the [`SaveCoordinator`]
/// - Exposing the read-only session and its computed flags
pub struct ConfiguratorUseCase {
    /// Identifier of the edited item, passed to the provider
    item_id: String,
    store: SessionStore,
    gate: InitializationGate,
    coordinator: SaveCoordinator,
    provider: Arc<dyn ReferenceDataProvider>,
}

impl ConfiguratorUseCase {
    /// Creates a use case with an empty session.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The edited item
    /// * `provider` - Source of initial and refreshed reference data
    /// * `gateway` - Collaborator that persists saves
    /// * `config` - Save behavior
    pub fn new(
        item_id: impl Into<String>,
        provider: Arc<dyn ReferenceDataProvider>,
        gateway: Arc<dyn SubmitGateway>,
        config: SaveConfig,
    ) -> Self {
        let store = SessionStore::default();
        let gate = InitializationGate::new(store.clone(), config.release_on_acknowledgment);
        let coordinator = SaveCoordinator::new(store.clone(), gateway, config);
        Self {
            item_id: item_id.into(),
            store,
            gate,
            coordinator,
            provider,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// The underlying store, for callers that subscribe or batch actions.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Loads reference data and seeds the session.
    ///
    /// A load failure is surfaced through the result slot as well as returned.
    pub async fn load(&self) -> Result<GateDecision> {
        self.store.dispatch(Action::SetLoading(true)).await;
        match self.provider.load(&self.item_id).await {
            Ok(payload) => {
                let decision = self.gate.receive(payload).await;
                if decision == GateDecision::Dropped {
                    self.store.dispatch(Action::SetLoading(false)).await;
                }
                tracing::debug!("[ConfiguratorUseCase] Loaded {}: {:?}", self.item_id, decision);
                Ok(decision)
            }
            Err(e) => {
                tracing::error!("[ConfiguratorUseCase] Failed to load {}: {}", self.item_id, e);
                self.store
                    .apply(vec![
                        Action::SetLoading(false),
                        Action::SetActionResult(ActionResult::failure(e.to_string())),
                    ])
                    .await;
                Err(e)
            }
        }
    }

    /// Re-loads reference data after the environment persisted `attempt_id`.
    pub async fn refresh_after_save(&self, attempt_id: SaveAttemptId) -> Result<GateDecision> {
        let payload = self.provider.load(&self.item_id).await?;
        Ok(self.gate.receive_acknowledged(payload, attempt_id).await)
    }

    pub async fn dispatch(&self, action: Action) -> EditSession {
        self.store.dispatch(action).await
    }

    /// Deselects a template and prunes the mappings it leaves orphaned.
    pub async fn deselect_template(&self, template_id: TemplateId) -> EditSession {
        self.store.deselect_template_and_prune(template_id).await
    }

    /// Starts a save. See [`SaveCoordinator::submit_form`].
    pub async fn submit_form(&self) -> Result<SaveAttemptId> {
        self.coordinator.submit_form().await
    }

    pub async fn reset_form(&self) -> EditSession {
        self.store.reset_form().await
    }

    pub async fn session(&self) -> EditSession {
        self.store.snapshot().await
    }

    pub async fn is_dirty(&self) -> bool {
        self.store.is_dirty().await
    }

    pub async fn is_loading(&self) -> bool {
        self.store.is_loading().await
    }

    pub async fn is_saving(&self) -> bool {
        self.store.is_saving().await
    }

    pub async fn has_error(&self) -> bool {
        self.store.has_error().await
    }

    pub async fn error_message(&self) -> Option<String> {
        self.store.error_message().await
    }

    pub async fn success_message(&self) -> Option<String> {
        self.store.success_message().await
    }
}
