//! Serializable intent actions.
//!
//! Actions are the only way to change an [`EditSession`](crate::model::EditSession).
//! They serialize as `{"type": "TOGGLE_STYLE", "payload": {...}}`, so a
//! recorded script of user intents is a plain JSON array.

use crate::model::{
    ActionResult, InitializationPayload, PlatformVariantId, SaveAttemptId, Snapshot, StyleId,
    TemplateId, TemplateVariantId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    // ------------------------------------------------------------------
    // Edits to `current`
    // ------------------------------------------------------------------
    ToggleEnabled {
        enabled: bool,
    },
    ToggleStyle {
        style_id: StyleId,
        checked: bool,
    },
    SetSelectedStyles {
        style_ids: Vec<StyleId>,
    },
    ReorderStyles {
        style_uuid: StyleId,
        new_index: usize,
    },
    ToggleProductBase {
        product_base_id: TemplateId,
        checked: bool,
    },
    SetSelectedProductBases {
        product_base_ids: Vec<TemplateId>,
    },
    UpdateVariantMapping {
        template_variant_id: TemplateVariantId,
        #[serde(default)]
        shopify_variant_id: Option<PlatformVariantId>,
    },
    ClearOrphanedMappings {
        valid_template_variant_ids: BTreeSet<TemplateVariantId>,
    },
    RemovePlatformVariant {
        shopify_variant_id: PlatformVariantId,
    },

    // ------------------------------------------------------------------
    // Commit / discard / seed
    // ------------------------------------------------------------------
    UpdateOriginalState,
    RollbackOriginal {
        original: Snapshot,
    },
    ResetForm,
    Initialize(InitializationPayload),

    // ------------------------------------------------------------------
    // Transient UI
    // ------------------------------------------------------------------
    SetEditingVariantPrice {
        shopify_variant_id: PlatformVariantId,
        #[serde(default)]
        price: Option<String>,
    },
    SetSaving(bool),
    SetLoading(bool),
    SetPreventStateReset(bool),
    SetActionResult(ActionResult),
    ClearActionResult,
    TrackSaveAttempt {
        attempt_id: SaveAttemptId,
    },
    AcknowledgeSave {
        attempt_id: SaveAttemptId,
    },
}

impl Action {
    /// The wire tag of this action, used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::ToggleEnabled { .. } => "TOGGLE_ENABLED",
            Self::ToggleStyle { .. } => "TOGGLE_STYLE",
            Self::SetSelectedStyles { .. } => "SET_SELECTED_STYLES",
            Self::ReorderStyles { .. } => "REORDER_STYLES",
            Self::ToggleProductBase { .. } => "TOGGLE_PRODUCT_BASE",
            Self::SetSelectedProductBases { .. } => "SET_SELECTED_PRODUCT_BASES",
            Self::UpdateVariantMapping { .. } => "UPDATE_VARIANT_MAPPING",
            Self::ClearOrphanedMappings { .. } => "CLEAR_ORPHANED_MAPPINGS",
            Self::RemovePlatformVariant { .. } => "REMOVE_PLATFORM_VARIANT",
            Self::UpdateOriginalState => "UPDATE_ORIGINAL_STATE",
            Self::RollbackOriginal { .. } => "ROLLBACK_ORIGINAL",
            Self::ResetForm => "RESET_FORM",
            Self::Initialize(_) => "INITIALIZE",
            Self::SetEditingVariantPrice { .. } => "SET_EDITING_VARIANT_PRICE",
            Self::SetSaving(_) => "SET_SAVING",
            Self::SetLoading(_) => "SET_LOADING",
            Self::SetPreventStateReset(_) => "SET_PREVENT_STATE_RESET",
            Self::SetActionResult(_) => "SET_ACTION_RESULT",
            Self::ClearActionResult => "CLEAR_ACTION_RESULT",
            Self::TrackSaveAttempt { .. } => "TRACK_SAVE_ATTEMPT",
            Self::AcknowledgeSave { .. } => "ACKNOWLEDGE_SAVE",
        }
    }

    /// Whether the action only touches the `ui` partition.
    pub fn is_ui_only(&self) -> bool {
        matches!(
            self,
            Self::SetEditingVariantPrice { .. }
                | Self::SetSaving(_)
                | Self::SetLoading(_)
                | Self::SetPreventStateReset(_)
                | Self::SetActionResult(_)
                | Self::ClearActionResult
                | Self::TrackSaveAttempt { .. }
                | Self::AcknowledgeSave { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_toggle_style() {
        let action: Action = serde_json::from_value(json!({
            "type": "TOGGLE_STYLE",
            "payload": { "styleId": "s3", "checked": true }
        }))
        .unwrap();
        assert_eq!(
            action,
            Action::ToggleStyle {
                style_id: "s3".to_string(),
                checked: true
            }
        );
        assert_eq!(action.tag(), "TOGGLE_STYLE");
    }

    #[test]
    fn test_deserialize_unit_and_newtype() {
        let actions: Vec<Action> = serde_json::from_value(json!([
            { "type": "RESET_FORM" },
            { "type": "SET_SAVING", "payload": true },
            { "type": "UPDATE_VARIANT_MAPPING", "payload": { "templateVariantId": 10 } }
        ]))
        .unwrap();
        assert_eq!(actions[0], Action::ResetForm);
        assert_eq!(actions[1], Action::SetSaving(true));
        assert_eq!(
            actions[2],
            Action::UpdateVariantMapping {
                template_variant_id: 10,
                shopify_variant_id: None
            }
        );
    }

    #[test]
    fn test_serialized_tag_matches_tag() {
        let action = Action::ReorderStyles {
            style_uuid: "s1".to_string(),
            new_index: 1,
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], json!(action.tag()));
        assert_eq!(value["payload"]["newIndex"], json!(1));
    }

    #[test]
    fn test_ui_only_classification() {
        assert!(Action::SetLoading(true).is_ui_only());
        assert!(!Action::ResetForm.is_ui_only());
        assert!(!Action::ToggleEnabled { enabled: true }.is_ui_only());
    }
}
