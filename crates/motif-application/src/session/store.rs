use motif_core::action::Action;
use motif_core::model::{EditSession, InitializationPayload, TemplateId};
use motif_core::reconciler;
use motif_core::reducer::reduce;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of applying a batch of actions under one write lock.
#[derive(Debug, Clone)]
pub struct Transition {
    pub before: EditSession,
    pub after: EditSession,
}

/// Single-writer holder of one edit session.
///
/// Every mutation goes through [`reduce`]; the write lock is held for the
/// duration of a batch, so actions are applied in dispatch order and never
/// interleave. Clones share the same session.
#[derive(Clone, Default)]
pub struct SessionStore {
    session: Arc<RwLock<EditSession>>,
}

impl SessionStore {
    /// Creates a store around an existing session.
    pub fn new(session: EditSession) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Creates a clean store seeded from environment data.
    pub fn from_payload(payload: InitializationPayload) -> Self {
        Self::new(EditSession::from_payload(payload))
    }

    /// Applies one action and returns the resulting session.
    pub async fn dispatch(&self, action: Action) -> EditSession {
        self.apply(vec![action]).await.after
    }

    /// Applies `actions` in order under a single write lock.
    pub async fn apply(&self, actions: Vec<Action>) -> Transition {
        self.update(move |_| actions).await
    }

    /// Computes actions from the current session and applies them atomically.
    ///
    /// The closure sees the session as it is when the lock is taken, which
    /// lets callers make decisions (e.g. "only if not suppressed") without a
    /// window for another writer to slip in between.
    pub async fn update<F>(&self, plan: F) -> Transition
    where
        F: FnOnce(&EditSession) -> Vec<Action>,
    {
        let mut guard = self.session.write().await;
        let before = guard.clone();
        let actions = plan(&before);

        let mut next = std::mem::take(&mut *guard);
        for action in actions {
            let tag = action.tag();
            next = reduce(next, action);
            tracing::debug!(
                "[SessionStore] {} applied: dirty={}, saving={}, suppressed={}",
                tag,
                next.ui.is_dirty,
                next.ui.is_saving,
                next.ui.prevent_state_reset
            );
        }
        *guard = next.clone();

        Transition {
            before,
            after: next,
        }
    }

    /// Returns a read-only copy of the whole session.
    pub async fn snapshot(&self) -> EditSession {
        self.session.read().await.clone()
    }

    /// Discards the edit buffer.
    pub async fn reset_form(&self) -> EditSession {
        self.dispatch(Action::ResetForm).await
    }

    /// Deselects a template and immediately prunes mappings that pointed at
    /// its variants.
    pub async fn deselect_template_and_prune(&self, template_id: TemplateId) -> EditSession {
        self.update(move |session| {
            let mut remaining = session.current.selected_templates.clone();
            remaining.retain(|existing| *existing != template_id);
            let valid = reconciler::valid_template_variant_ids(&session.data, &remaining);
            vec![
                Action::ToggleProductBase {
                    product_base_id: template_id,
                    checked: false,
                },
                Action::ClearOrphanedMappings {
                    valid_template_variant_ids: valid,
                },
            ]
        })
        .await
        .after
    }

    pub async fn is_dirty(&self) -> bool {
        self.session.read().await.is_dirty()
    }

    pub async fn is_loading(&self) -> bool {
        self.session.read().await.is_loading()
    }

    pub async fn is_saving(&self) -> bool {
        self.session.read().await.is_saving()
    }

    pub async fn has_error(&self) -> bool {
        self.session.read().await.has_error()
    }

    pub async fn error_message(&self) -> Option<String> {
        self.session.read().await.error_message().map(str::to_string)
    }

    pub async fn success_message(&self) -> Option<String> {
        self.session.read().await.success_message().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::model::{ReferenceData, Snapshot, TemplateVariant, VariantMapping};

    fn variant(id: i64, template_id: &str) -> TemplateVariant {
        TemplateVariant {
            id,
            template_id: template_id.to_string(),
            name: format!("v{}", id),
            width_px: 10,
            height_px: 10,
            price: None,
        }
    }

    fn store() -> SessionStore {
        SessionStore::from_payload(InitializationPayload {
            snapshot: Snapshot {
                enabled: true,
                selected_styles: vec!["s1".to_string()],
                selected_templates: vec!["mug".to_string(), "poster".to_string()],
                variant_mappings: vec![VariantMapping::new(1, "A"), VariantMapping::new(2, "B")],
            },
            data: ReferenceData {
                template_variants: vec![variant(1, "mug"), variant(2, "poster")],
                ..Default::default()
            },
        })
    }

    #[tokio::test]
    async fn test_dispatch_updates_shared_state() {
        let store = store();
        let clone = store.clone();

        store
            .dispatch(Action::ToggleEnabled { enabled: false })
            .await;

        assert!(clone.is_dirty().await);
        assert!(!clone.snapshot().await.current.enabled);
    }

    #[tokio::test]
    async fn test_apply_reports_before_and_after() {
        let store = store();
        let transition = store
            .apply(vec![
                Action::ToggleEnabled { enabled: false },
                Action::UpdateOriginalState,
            ])
            .await;

        assert!(transition.before.original.enabled);
        assert!(!transition.after.original.enabled);
        assert!(!transition.after.ui.is_dirty);
    }

    #[tokio::test]
    async fn test_deselect_template_and_prune() {
        let store = store();
        let session = store.deselect_template_and_prune("poster".to_string()).await;

        assert_eq!(session.current.selected_templates, vec!["mug".to_string()]);
        let pairs: Vec<_> = session
            .current
            .variant_mappings
            .iter()
            .map(VariantMapping::pair)
            .collect();
        assert_eq!(pairs, vec![(1, "A")]);
        assert!(store.is_dirty().await);
    }

    #[tokio::test]
    async fn test_reset_form() {
        let store = store();
        store
            .dispatch(Action::ToggleStyle {
                style_id: "s2".to_string(),
                checked: true,
            })
            .await;
        assert!(store.is_dirty().await);

        let session = store.reset_form().await;
        assert_eq!(session.current, session.original);
        assert!(!store.is_dirty().await);
    }
}
