//! The dirty-relevant slice of an edit session.

use super::catalog::{StyleId, TemplateId};
use super::mapping::VariantMapping;
use crate::equality::structural_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Enablement, selections and mappings: the four fields that decide whether
/// an edit session has unsaved changes.
///
/// Both `original` and `current` are `Snapshot`s. Order of the selection
/// lists controls end-user display order and is preserved through every
/// transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub selected_styles: Vec<StyleId>,
    #[serde(default, alias = "selectedProductBases")]
    pub selected_templates: Vec<TemplateId>,
    #[serde(default)]
    pub variant_mappings: Vec<VariantMapping>,
}

impl Snapshot {
    /// Lowers the snapshot into the value shape the comparator works on.
    pub fn to_structural(&self) -> Value {
        let mappings = self
            .variant_mappings
            .iter()
            .map(|mapping| {
                let mut entry = Map::new();
                entry.insert(
                    "id".to_string(),
                    mapping.id.map(Value::from).unwrap_or(Value::Null),
                );
                entry.insert(
                    "templateVariantId".to_string(),
                    Value::from(mapping.template_variant_id),
                );
                entry.insert(
                    "platformVariantId".to_string(),
                    Value::from(mapping.platform_variant_id.clone()),
                );
                entry.insert("isActive".to_string(), Value::from(mapping.is_active));
                Value::Object(entry)
            })
            .collect::<Vec<_>>();

        let mut root = Map::new();
        root.insert("enabled".to_string(), Value::from(self.enabled));
        root.insert(
            "selectedStyles".to_string(),
            Value::from(self.selected_styles.clone()),
        );
        root.insert(
            "selectedTemplates".to_string(),
            Value::from(self.selected_templates.clone()),
        );
        root.insert("variantMappings".to_string(), Value::Array(mappings));
        Value::Object(root)
    }

    /// Structural comparison used for dirty tracking.
    ///
    /// Selection lists compare as multisets; mappings compare as sequences.
    pub fn structurally_equals(&self, other: &Snapshot) -> bool {
        structural_eq(&self.to_structural(), &other.to_structural())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(styles: &[&str]) -> Snapshot {
        Snapshot {
            enabled: true,
            selected_styles: styles.iter().map(|s| s.to_string()).collect(),
            selected_templates: vec!["mug".to_string()],
            variant_mappings: vec![VariantMapping::new(1, "V1")],
        }
    }

    #[test]
    fn test_style_order_is_not_structural() {
        let a = snapshot(&["s1", "s2"]);
        let b = snapshot(&["s2", "s1"]);
        assert_ne!(a, b);
        assert!(a.structurally_equals(&b));
    }

    #[test]
    fn test_mapping_order_is_structural() {
        let mut a = snapshot(&["s1"]);
        a.variant_mappings.push(VariantMapping::new(2, "V2"));
        let mut b = a.clone();
        b.variant_mappings.reverse();
        assert!(!a.structurally_equals(&b));
    }

    #[test]
    fn test_persisted_id_is_structural() {
        let a = snapshot(&["s1"]);
        let mut b = a.clone();
        b.variant_mappings[0].id = Some(42);
        assert!(!a.structurally_equals(&b));
    }

    #[test]
    fn test_accepts_product_base_alias() {
        let json = r#"{ "enabled": true, "selectedProductBases": ["mug"] }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.selected_templates, vec!["mug".to_string()]);
        assert!(snapshot.selected_styles.is_empty());
    }
}
