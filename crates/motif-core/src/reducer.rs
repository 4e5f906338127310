//! State transition function.
//!
//! [`reduce`] maps `(session, action)` to the next session. It is total:
//! malformed intents (unknown ids, out-of-range indices) are absorbed as
//! no-ops and nothing here returns an error or panics.
//!
//! Every transition that edits `current` recomputes `ui.is_dirty` from the
//! structural comparison of `current` against `original`, with two
//! exceptions that mark the session dirty unconditionally: a successful
//! `REORDER_STYLES` (selection lists compare as multisets, so a pure
//! reorder would otherwise look clean) and `SET_SELECTED_PRODUCT_BASES`.
//! UI-only transitions never touch the dirty flag.

use crate::action::Action;
use crate::model::EditSession;
use crate::reconciler;

/// Applies one action and returns the resulting session.
///
/// # Examples
///
/// ```
/// use motif_core::action::Action;
/// use motif_core::model::EditSession;
/// use motif_core::reducer::reduce;
///
/// let session = reduce(
///     EditSession::default(),
///     Action::ToggleStyle { style_id: "s1".to_string(), checked: true },
/// );
/// assert_eq!(session.current.selected_styles, vec!["s1".to_string()]);
/// assert!(session.ui.is_dirty);
/// ```
pub fn reduce(mut session: EditSession, action: Action) -> EditSession {
    match action {
        Action::ToggleEnabled { enabled } => {
            session.current.enabled = enabled;
            recompute_dirty(&mut session);
        }
        Action::ToggleStyle { style_id, checked } => {
            toggle_membership(&mut session.current.selected_styles, style_id, checked);
            recompute_dirty(&mut session);
        }
        Action::SetSelectedStyles { style_ids } => {
            session.current.selected_styles = style_ids;
            recompute_dirty(&mut session);
        }
        Action::ReorderStyles {
            style_uuid,
            new_index,
        } => {
            if move_to_index(&mut session.current.selected_styles, &style_uuid, new_index) {
                session.ui.is_dirty = true;
            } else {
                tracing::trace!(
                    "REORDER_STYLES ignored: style={} new_index={}",
                    style_uuid,
                    new_index
                );
            }
        }
        Action::ToggleProductBase {
            product_base_id,
            checked,
        } => {
            toggle_membership(
                &mut session.current.selected_templates,
                product_base_id,
                checked,
            );
            recompute_dirty(&mut session);
        }
        Action::SetSelectedProductBases { product_base_ids } => {
            session.current.selected_templates = product_base_ids;
            session.ui.is_dirty = true;
        }
        Action::UpdateVariantMapping {
            template_variant_id,
            shopify_variant_id,
        } => {
            session.current.variant_mappings = reconciler::set_mapping(
                &session.current.variant_mappings,
                template_variant_id,
                shopify_variant_id.as_deref(),
            );
            recompute_dirty(&mut session);
        }
        Action::ClearOrphanedMappings {
            valid_template_variant_ids,
        } => {
            session.current.variant_mappings = reconciler::prune_orphans(
                &session.current.variant_mappings,
                &valid_template_variant_ids,
            );
            recompute_dirty(&mut session);
        }
        Action::RemovePlatformVariant { shopify_variant_id } => {
            session.current.variant_mappings = reconciler::remove_platform_variant(
                &session.current.variant_mappings,
                &shopify_variant_id,
            );
            session.ui.editing_variant_prices.remove(&shopify_variant_id);
            recompute_dirty(&mut session);
        }
        Action::UpdateOriginalState => {
            session.original = session.current.clone();
            recompute_dirty(&mut session);
        }
        Action::RollbackOriginal { original } => {
            session.original = original;
            recompute_dirty(&mut session);
        }
        Action::ResetForm => {
            session.current = session.original.clone();
            session.ui.editing_variant_prices.clear();
            recompute_dirty(&mut session);
        }
        Action::Initialize(payload) => {
            session = EditSession::from_payload(payload);
        }
        Action::SetEditingVariantPrice {
            shopify_variant_id,
            price,
        } => match price {
            Some(price) => {
                session
                    .ui
                    .editing_variant_prices
                    .insert(shopify_variant_id, price);
            }
            None => {
                session.ui.editing_variant_prices.remove(&shopify_variant_id);
            }
        },
        Action::SetSaving(saving) => session.ui.is_saving = saving,
        Action::SetLoading(loading) => session.ui.is_loading = loading,
        Action::SetPreventStateReset(prevent) => session.ui.prevent_state_reset = prevent,
        Action::SetActionResult(result) => session.ui.action_result = Some(result),
        Action::ClearActionResult => session.ui.action_result = None,
        Action::TrackSaveAttempt { attempt_id } => {
            session.ui.pending_save_attempt = Some(attempt_id);
        }
        Action::AcknowledgeSave { attempt_id } => {
            if session.ui.pending_save_attempt == Some(attempt_id) {
                session.ui.pending_save_attempt = None;
                session.ui.prevent_state_reset = false;
            } else {
                tracing::trace!("ACKNOWLEDGE_SAVE ignored for stale attempt {}", attempt_id);
            }
        }
    }
    session
}

/// Applies a sequence of actions in order.
pub fn reduce_all<I>(session: EditSession, actions: I) -> EditSession
where
    I: IntoIterator<Item = Action>,
{
    actions.into_iter().fold(session, reduce)
}

fn recompute_dirty(session: &mut EditSession) {
    session.ui.is_dirty = session.compute_dirty();
}

fn toggle_membership(list: &mut Vec<String>, id: String, checked: bool) {
    if checked {
        if !list.contains(&id) {
            list.push(id);
        }
    } else {
        list.retain(|existing| *existing != id);
    }
}

/// Moves `id` to `new_index`. Returns `false` (and leaves the list alone)
/// when `id` is absent or `new_index` is outside the list.
fn move_to_index(list: &mut Vec<String>, id: &str, new_index: usize) -> bool {
    let Some(from) = list.iter().position(|existing| existing == id) else {
        return false;
    };
    if new_index >= list.len() {
        return false;
    }
    let item = list.remove(from);
    list.insert(new_index, item);
    true
}
