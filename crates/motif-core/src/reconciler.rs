//! Mapping reconciler.
//!
//! Pure functions over a list of [`VariantMapping`]s that keep the list a
//! bijection between template variants and platform variants:
//!
//! - no two entries share a `template_variant_id`
//! - no two entries share a `platform_variant_id`
//!
//! Every function takes the current list by reference and returns a new list.

use crate::model::{ReferenceData, TemplateId, TemplateVariantId, VariantMapping};
use std::collections::{BTreeSet, HashSet};

/// Binds `template_variant_id` to `platform_variant_id`, or unbinds it when
/// `platform_variant_id` is `None`.
///
/// Binding removes the entry currently holding the template variant *and*
/// the entry currently holding the platform variant (which may belong to a
/// different template variant) before appending the new, active,
/// not-yet-persisted entry. Re-binding both ends at once therefore never
/// leaves a stale half behind.
///
/// # Examples
///
/// ```
/// use motif_core::reconciler::set_mapping;
///
/// let mappings = set_mapping(&[], 10, Some("V1"));
/// let mappings = set_mapping(&mappings, 11, Some("V1"));
/// assert_eq!(mappings.len(), 1);
/// assert_eq!(mappings[0].template_variant_id, 11);
/// ```
pub fn set_mapping(
    mappings: &[VariantMapping],
    template_variant_id: TemplateVariantId,
    platform_variant_id: Option<&str>,
) -> Vec<VariantMapping> {
    let Some(platform_variant_id) = platform_variant_id else {
        return mappings
            .iter()
            .filter(|mapping| mapping.template_variant_id != template_variant_id)
            .cloned()
            .collect();
    };

    let mut next: Vec<VariantMapping> = mappings
        .iter()
        .filter(|mapping| {
            mapping.template_variant_id != template_variant_id
                && mapping.platform_variant_id != platform_variant_id
        })
        .cloned()
        .collect();
    next.push(VariantMapping::new(template_variant_id, platform_variant_id));
    next
}

/// Keeps only entries whose template variant is still in `valid_ids`.
///
/// Call after a template is deselected, passing the variant ids of the
/// templates that remain selected (see [`valid_template_variant_ids`]).
pub fn prune_orphans(
    mappings: &[VariantMapping],
    valid_ids: &BTreeSet<TemplateVariantId>,
) -> Vec<VariantMapping> {
    mappings
        .iter()
        .filter(|mapping| valid_ids.contains(&mapping.template_variant_id))
        .cloned()
        .collect()
}

/// Drops the entry bound to a platform variant that no longer exists.
pub fn remove_platform_variant(
    mappings: &[VariantMapping],
    platform_variant_id: &str,
) -> Vec<VariantMapping> {
    mappings
        .iter()
        .filter(|mapping| mapping.platform_variant_id != platform_variant_id)
        .cloned()
        .collect()
}

/// Template-variant ids owned by the templates in `selected_templates`.
pub fn valid_template_variant_ids(
    data: &ReferenceData,
    selected_templates: &[TemplateId],
) -> BTreeSet<TemplateVariantId> {
    data.variant_ids_for_templates(selected_templates)
}

/// Checks that no template-variant id and no platform-variant id repeats.
pub fn is_bijective(mappings: &[VariantMapping]) -> bool {
    let mut template_ids = HashSet::with_capacity(mappings.len());
    let mut platform_ids = HashSet::with_capacity(mappings.len());
    mappings.iter().all(|mapping| {
        template_ids.insert(mapping.template_variant_id)
            && platform_ids.insert(mapping.platform_variant_id.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplateVariant;

    fn pairs(mappings: &[VariantMapping]) -> Vec<(i64, &str)> {
        mappings.iter().map(VariantMapping::pair).collect()
    }

    fn persisted(id: i64, template_variant_id: i64, platform_variant_id: &str) -> VariantMapping {
        VariantMapping {
            id: Some(id),
            ..VariantMapping::new(template_variant_id, platform_variant_id)
        }
    }

    #[test]
    fn test_set_mapping_appends() {
        let mappings = set_mapping(&[], 1, Some("A"));
        assert_eq!(pairs(&mappings), vec![(1, "A")]);
        assert!(mappings[0].is_active);
        assert_eq!(mappings[0].id, None);
    }

    #[test]
    fn test_set_mapping_replaces_same_template_variant() {
        let mappings = vec![persisted(7, 1, "A"), persisted(8, 2, "B")];
        let next = set_mapping(&mappings, 1, Some("C"));
        assert_eq!(pairs(&next), vec![(2, "B"), (1, "C")]);
    }

    #[test]
    fn test_set_mapping_steals_platform_variant() {
        let next = set_mapping(&set_mapping(&[], 10, Some("V1")), 11, Some("V1"));
        assert_eq!(pairs(&next), vec![(11, "V1")]);
    }

    #[test]
    fn test_set_mapping_removes_both_stale_halves() {
        // 1 -> A and 2 -> B; rebinding 1 to B must drop both old entries
        let mappings = vec![persisted(7, 1, "A"), persisted(8, 2, "B"), persisted(9, 3, "C")];
        let next = set_mapping(&mappings, 1, Some("B"));
        assert_eq!(pairs(&next), vec![(3, "C"), (1, "B")]);
        assert!(is_bijective(&next));
    }

    #[test]
    fn test_set_mapping_none_unbinds() {
        let mappings = vec![persisted(7, 1, "A"), persisted(8, 2, "B")];
        let next = set_mapping(&mappings, 1, None);
        assert_eq!(pairs(&next), vec![(2, "B")]);
        // unknown id is a no-op
        assert_eq!(set_mapping(&mappings, 99, None), mappings);
    }

    #[test]
    fn test_prune_orphans() {
        let mappings = vec![
            VariantMapping::new(1, "A"),
            VariantMapping::new(2, "B"),
            VariantMapping::new(3, "C"),
        ];
        let valid: BTreeSet<i64> = [1, 3].into_iter().collect();
        assert_eq!(pairs(&prune_orphans(&mappings, &valid)), vec![(1, "A"), (3, "C")]);
        assert!(prune_orphans(&mappings, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_remove_platform_variant() {
        let mappings = vec![VariantMapping::new(1, "A"), VariantMapping::new(2, "B")];
        assert_eq!(pairs(&remove_platform_variant(&mappings, "A")), vec![(2, "B")]);
        assert_eq!(remove_platform_variant(&mappings, "Z"), mappings);
    }

    #[test]
    fn test_valid_template_variant_ids() {
        let variant = |id: i64, template_id: &str| TemplateVariant {
            id,
            template_id: template_id.to_string(),
            name: String::new(),
            width_px: 1,
            height_px: 1,
            price: None,
        };
        let data = ReferenceData {
            template_variants: vec![variant(1, "mug"), variant(2, "tee"), variant(3, "mug")],
            ..Default::default()
        };
        let ids = valid_template_variant_ids(&data, &["mug".to_string()]);
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_is_bijective_detects_duplicates() {
        assert!(is_bijective(&[]));
        assert!(!is_bijective(&[VariantMapping::new(1, "A"), VariantMapping::new(1, "B")]));
        assert!(!is_bijective(&[VariantMapping::new(1, "A"), VariantMapping::new(2, "A")]));
    }
}
