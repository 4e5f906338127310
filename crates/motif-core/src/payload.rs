//! Submit payload serialization.
//!
//! The submit collaborator receives an action tag plus a flat map of
//! fields, each holding a JSON-encoded string. This mirrors a form post
//! where structured values travel as JSON text.

use crate::error::Result;
use crate::model::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Action tag sent with a save.
pub const SAVE_ACTION: &str = "save";

/// One selected style in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOrder {
    pub id: String,
    pub sort_order: usize,
}

/// A mapping reduced to its two ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingPair {
    pub template_variant_id: i64,
    pub platform_variant_id: String,
}

/// Serialized form of a save handed to the submit collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub action: String,
    pub fields: BTreeMap<String, String>,
}

impl SubmitPayload {
    /// Serializes the dirty-relevant part of `snapshot` for a save.
    ///
    /// # Fields
    ///
    /// * `enabled` - `true` / `false`
    /// * `selectedStyles` - `[{"id", "sortOrder"}]`, sortOrder is the list position
    /// * `selectedTemplates` - ordered list of template ids
    /// * `variantMappings` - `[{"templateVariantId", "platformVariantId"}]`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if any field fails to encode.
    pub fn save(snapshot: &Snapshot) -> Result<Self> {
        let styles: Vec<StyleOrder> = snapshot
            .selected_styles
            .iter()
            .enumerate()
            .map(|(sort_order, id)| StyleOrder {
                id: id.clone(),
                sort_order,
            })
            .collect();
        let mappings: Vec<MappingPair> = snapshot
            .variant_mappings
            .iter()
            .map(|mapping| MappingPair {
                template_variant_id: mapping.template_variant_id,
                platform_variant_id: mapping.platform_variant_id.clone(),
            })
            .collect();

        let mut fields = BTreeMap::new();
        fields.insert("enabled".to_string(), serde_json::to_string(&snapshot.enabled)?);
        fields.insert("selectedStyles".to_string(), serde_json::to_string(&styles)?);
        fields.insert(
            "selectedTemplates".to_string(),
            serde_json::to_string(&snapshot.selected_templates)?,
        );
        fields.insert("variantMappings".to_string(), serde_json::to_string(&mappings)?);

        Ok(Self {
            action: SAVE_ACTION.to_string(),
            fields,
        })
    }

    /// Returns a raw field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VariantMapping;

    #[test]
    fn test_save_payload_fields() {
        let snapshot = Snapshot {
            enabled: true,
            selected_styles: vec!["s2".to_string(), "s1".to_string()],
            selected_templates: vec!["mug".to_string()],
            variant_mappings: vec![VariantMapping {
                id: Some(3),
                ..VariantMapping::new(10, "V1")
            }],
        };

        let payload = SubmitPayload::save(&snapshot).unwrap();
        assert_eq!(payload.action, "save");
        assert_eq!(payload.field("enabled"), Some("true"));
        assert_eq!(
            payload.field("selectedStyles"),
            Some(r#"[{"id":"s2","sortOrder":0},{"id":"s1","sortOrder":1}]"#)
        );
        assert_eq!(payload.field("selectedTemplates"), Some(r#"["mug"]"#));
        // persisted id and activity flag are not part of the payload
        assert_eq!(
            payload.field("variantMappings"),
            Some(r#"[{"templateVariantId":10,"platformVariantId":"V1"}]"#)
        );
    }

    #[test]
    fn test_empty_snapshot_fields_decode() {
        let payload = SubmitPayload::save(&Snapshot::default()).unwrap();
        let mappings: Vec<MappingPair> =
            serde_json::from_str(payload.field("variantMappings").unwrap()).unwrap();
        assert!(mappings.is_empty());
        assert_eq!(payload.field("missing"), None);
    }
}
