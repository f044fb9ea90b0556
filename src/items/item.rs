//! Engineered item record
//!
//! The caller owns the record for the whole editing session and may persist
//! it; engineering state changes only through [`super::ItemHandle`].

use serde::{Deserialize, Serialize};

use crate::data::{AttributeTable, EffectId, ItemId, TemplateId};

/// One equipment item and its engineering state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog id of the unmodified item
    pub base: ItemId,
    #[serde(default)]
    pub(super) template: Option<TemplateId>,
    /// Set iff `template` is set
    #[serde(default)]
    pub(super) grade: Option<u8>,
    #[serde(default)]
    pub(super) effect: Option<EffectId>,
    /// Set iff `template` is set
    #[serde(default)]
    pub(super) roll_quality: Option<f64>,
    /// Hand-entered attribute values, cleared whenever the template changes
    #[serde(default)]
    pub(super) overrides: AttributeTable,
}

impl Item {
    pub fn new(base: impl Into<ItemId>) -> Self {
        Self {
            base: base.into(),
            template: None,
            grade: None,
            effect: None,
            roll_quality: None,
            overrides: AttributeTable::new(),
        }
    }

    pub fn is_engineered(&self) -> bool {
        self.template.is_some()
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn grade(&self) -> Option<u8> {
        self.grade
    }

    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    pub fn roll_quality(&self) -> Option<f64> {
        self.roll_quality
    }

    pub fn overrides(&self) -> &AttributeTable {
        &self.overrides
    }

    /// Check the template/grade/roll pairing after deserializing
    pub fn is_consistent(&self) -> bool {
        self.template.is_some() == self.grade.is_some()
            && self.template.is_some() == self.roll_quality.is_some()
            && self.roll_quality.map_or(true, |q| (0.0..=1.0).contains(&q))
    }

    pub(super) fn clear_engineering(&mut self) {
        self.template = None;
        self.grade = None;
        self.effect = None;
        self.roll_quality = None;
        self.overrides.clear();
    }
}
