//! Attribute merge engine
//!
//! Builds the ordered attribute list for the attribute view: everything the
//! active grade touches first, then the remaining base attributes.

use serde::{Deserialize, Serialize};

use crate::data::{AttributeTable, CatalogLookup, DeltaTable};
use super::error::{EngineeringError, EngineeringResult};

/// Where a displayed attribute comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeSource {
    /// Named by the active grade's delta table (highlighted)
    Template,
    /// Only present on the base item
    Base,
}

/// One row of the attribute view. Recomputed on every mutation, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    pub key: String,
    pub source: AttributeSource,
}

impl AttributeEntry {
    pub fn is_highlighted(&self) -> bool {
        self.source == AttributeSource::Template
    }
}

/// Merge a grade's delta table with the base attributes.
///
/// Template entries come first in delta-table order. Base entries follow in
/// base order, skipping any name the delta table already listed. Names are
/// compared exactly.
pub fn compute_display_list(deltas: Option<&DeltaTable>, base: &AttributeTable) -> Vec<AttributeEntry> {
    let Some(deltas) = deltas else {
        return base.keys()
            .map(|key| AttributeEntry { key: key.to_string(), source: AttributeSource::Base })
            .collect();
    };

    let template = deltas.keys()
        .map(|key| AttributeEntry { key: key.to_string(), source: AttributeSource::Template });
    let remaining = base.keys()
        .filter(|key| !deltas.contains_key(key))
        .map(|key| AttributeEntry { key: key.to_string(), source: AttributeSource::Base });

    template.chain(remaining).collect()
}

/// Resolve the catalog records for an item and merge them.
///
/// `engineering` is the active (template, grade) pair, if any.
pub fn display_list(
    catalog: &impl CatalogLookup,
    item: &str,
    engineering: Option<(&str, u8)>,
) -> EngineeringResult<Vec<AttributeEntry>> {
    let base = &catalog.item_info(item)?.base_attributes;

    let deltas = match engineering {
        Some((template, grade)) => {
            let result = catalog.template_info(template)?.deltas(grade);
            debug_assert!(
                !matches!(result, Err(EngineeringError::InvalidGrade { .. })),
                "grade {} offered for template '{}' but not defined",
                grade,
                template
            );
            Some(result?)
        }
        None => None,
    };

    Ok(compute_display_list(deltas, base))
}
