//! Reference catalog supplied by the environment.
//!
//! These types form the read-only `data` partition of an edit session. The
//! store never mutates them; they are replaced wholesale on `INITIALIZE`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque identifier of a visual style (a UUID in practice).
pub type StyleId = String;
/// Opaque identifier of a template ("product base").
pub type TemplateId = String;
/// Server-assigned integer id of a template variant.
pub type TemplateVariantId = i64;
/// Identifier of a variant in the commerce platform's catalog.
pub type PlatformVariantId = String;

/// A visual style that can be applied to generated artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: StyleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// A reusable physical product definition (e.g. a mug or a poster).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A concrete size/material configuration of a template.
///
/// Pixel dimensions are consumed downstream by image generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariant {
    pub id: TemplateVariantId,
    pub template_id: TemplateId,
    pub name: String,
    pub width_px: u32,
    pub height_px: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// An option axis of a template (e.g. "Size").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOption {
    pub id: i64,
    pub template_id: TemplateId,
    pub name: String,
}

/// A value on an option axis, bound to the template variant it selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOptionValue {
    pub id: i64,
    pub option_id: i64,
    pub template_variant_id: TemplateVariantId,
    pub value: String,
}

/// A variant as it exists in the commerce platform's own catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformVariant {
    pub id: PlatformVariantId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// The complete read-only reference catalog for one edit target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub template_variants: Vec<TemplateVariant>,
    #[serde(default)]
    pub template_options: Vec<TemplateOption>,
    #[serde(default)]
    pub template_option_values: Vec<TemplateOptionValue>,
    #[serde(default)]
    pub platform_variants: Vec<PlatformVariant>,
}

impl ReferenceData {
    /// Returns the variants that belong to the given template, in catalog order.
    pub fn variants_of<'a>(
        &'a self,
        template_id: &'a str,
    ) -> impl Iterator<Item = &'a TemplateVariant> + 'a {
        self.template_variants
            .iter()
            .filter(move |variant| variant.template_id == template_id)
    }

    /// Returns the ids of every template variant owned by any of `templates`.
    pub fn variant_ids_for_templates(&self, templates: &[TemplateId]) -> BTreeSet<TemplateVariantId> {
        self.template_variants
            .iter()
            .filter(|variant| templates.iter().any(|t| *t == variant.template_id))
            .map(|variant| variant.id)
            .collect()
    }

    pub fn find_style(&self, style_id: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.id == style_id)
    }

    pub fn find_template(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|template| template.id == template_id)
    }

    pub fn find_platform_variant(&self, platform_variant_id: &str) -> Option<&PlatformVariant> {
        self.platform_variants
            .iter()
            .find(|variant| variant.id == platform_variant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(id: i64, template_id: &str) -> TemplateVariant {
        TemplateVariant {
            id,
            template_id: template_id.to_string(),
            name: format!("v{}", id),
            width_px: 100,
            height_px: 100,
            price: None,
        }
    }

    #[test]
    fn test_variant_ids_for_templates() {
        let data = ReferenceData {
            template_variants: vec![variant(1, "mug"), variant(2, "mug"), variant(3, "poster")],
            ..Default::default()
        };

        let ids = data.variant_ids_for_templates(&["mug".to_string()]);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(data.variants_of("poster").count(), 1);
        assert!(data.variant_ids_for_templates(&[]).is_empty());
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let json = r#"{
            "styles": [{ "id": "s1", "name": "Watercolor" }],
            "templateVariants": [
                { "id": 7, "templateId": "mug", "name": "11oz", "widthPx": 2700, "heightPx": 1100 }
            ]
        }"#;
        let data: ReferenceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.styles.len(), 1);
        assert_eq!(data.template_variants[0].width_px, 2700);
        assert!(data.templates.is_empty());
        assert!(data.platform_variants.is_empty());
    }
}
