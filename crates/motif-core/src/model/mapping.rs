//! Template-variant to platform-variant mapping entries.

use super::catalog::{PlatformVariantId, TemplateVariantId};
use serde::{Deserialize, Serialize};

/// One binding between a template variant and a commerce-platform variant.
///
/// Within a session's `current.variant_mappings` each `template_variant_id`
/// and each `platform_variant_id` appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantMapping {
    /// Server-assigned row id; `None` until the mapping has been persisted.
    #[serde(default)]
    pub id: Option<i64>,
    pub template_variant_id: TemplateVariantId,
    #[serde(rename = "shopifyVariantId", alias = "platformVariantId")]
    pub platform_variant_id: PlatformVariantId,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

impl VariantMapping {
    /// Creates a fresh, active, not-yet-persisted mapping.
    pub fn new(
        template_variant_id: TemplateVariantId,
        platform_variant_id: impl Into<PlatformVariantId>,
    ) -> Self {
        Self {
            id: None,
            template_variant_id,
            platform_variant_id: platform_variant_id.into(),
            is_active: true,
        }
    }

    /// Returns the `(template_variant_id, platform_variant_id)` pair.
    pub fn pair(&self) -> (TemplateVariantId, &str) {
        (self.template_variant_id, self.platform_variant_id.as_str())
    }
}
