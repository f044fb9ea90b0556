//! Display overrides for attributes
//!
//! Some attributes read better in another form (a resistance instead of a
//! raw damage effectiveness). Substitution happens after the merge, so it
//! never changes ordering or source tags.

use std::collections::BTreeSet;
use serde::Serialize;

use crate::engineering::{AttributeEntry, AttributeSource, ItemFacade, MenuEvent};

/// Replacement key and value mapping for one canonical attribute
#[derive(Debug, Clone, Copy)]
pub struct DisplayOverride {
    pub canonical: &'static str,
    pub display_key: &'static str,
    /// canonical value -> displayed value
    pub to_display: fn(f64) -> f64,
    /// displayed value -> canonical value
    pub from_display: fn(f64) -> f64,
}

fn complement(value: f64) -> f64 {
    1.0 - value
}

/// Effectiveness is shown as resistance
pub const SHOW: &[DisplayOverride] = &[
    DisplayOverride {
        canonical: "kinetic_effectiveness",
        display_key: "kinetic_resistance",
        to_display: complement,
        from_display: complement,
    },
    DisplayOverride {
        canonical: "thermal_effectiveness",
        display_key: "thermal_resistance",
        to_display: complement,
        from_display: complement,
    },
    DisplayOverride {
        canonical: "explosive_effectiveness",
        display_key: "explosive_resistance",
        to_display: complement,
        from_display: complement,
    },
];

pub fn override_for(canonical: &str) -> Option<&'static DisplayOverride> {
    SHOW.iter().find(|o| o.canonical == canonical)
}

fn override_for_display(display_key: &str) -> Option<&'static DisplayOverride> {
    SHOW.iter().find(|o| o.display_key == display_key)
}

/// Attributes the operator asked to keep visible elsewhere, by display key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinnedAttributes {
    keys: BTreeSet<String>,
}

impl PinnedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip a key; returns whether it is now pinned
    pub fn toggle(&mut self, display_key: &str) -> bool {
        if self.keys.remove(display_key) {
            false
        } else {
            self.keys.insert(display_key.to_string());
            true
        }
    }

    pub fn contains(&self, display_key: &str) -> bool {
        self.keys.contains(display_key)
    }
}

/// Attribute row ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentedAttribute {
    /// Canonical attribute key
    pub key: String,
    /// Key to translate and show
    pub display_key: String,
    pub source: AttributeSource,
    pub value: Option<f64>,
    pub pinned: bool,
}

impl PresentedAttribute {
    pub fn is_highlighted(&self) -> bool {
        self.source == AttributeSource::Template
    }
}

/// Apply display overrides and read current values
pub fn present(
    entries: &[AttributeEntry],
    item: &impl ItemFacade,
    pinned: &PinnedAttributes,
) -> Vec<PresentedAttribute> {
    entries.iter()
        .map(|entry| {
            let value = item.attribute(&entry.key);
            let (display_key, value) = match override_for(&entry.key) {
                Some(o) => (o.display_key.to_string(), value.map(o.to_display)),
                None => (entry.key.clone(), value),
            };
            PresentedAttribute {
                key: entry.key.clone(),
                pinned: pinned.contains(&display_key),
                display_key,
                source: entry.source,
                value,
            }
        })
        .collect()
}

/// Event for a value typed against a displayed attribute
pub fn set_displayed(display_key: &str, displayed: f64) -> MenuEvent {
    match override_for_display(display_key) {
        Some(o) => MenuEvent::SetAttribute {
            key: o.canonical.to_string(),
            value: (o.from_display)(displayed),
        },
        None => MenuEvent::SetAttribute { key: display_key.to_string(), value: displayed },
    }
}
