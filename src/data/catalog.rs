//! Engineering catalog
//!
//! Templates, special effects, item classes and base items. The core only
//! reads the catalog through [`CatalogLookup`]; [`Catalog`] is the bundled
//! implementation backed by RON data.

use std::collections::BTreeMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::engineering::{EngineeringError, EngineeringResult, LookupKind};

/// Base item identifier (e.g. "pulse_laser")
pub type ItemId = String;
/// Upgrade template identifier (e.g. "overcharged")
pub type TemplateId = String;
/// Special effect identifier (e.g. "thermal_vent")
pub type EffectId = String;
/// Item class identifier (e.g. "weapon")
pub type ClassId = String;

/// Insertion-ordered attribute-name keyed table.
/// Catalog order is display order, so a hash map won't do.
/// Keys are unique; deserializing a repeated key is an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Table<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(String, V)>::deserialize(deserializer)?;
        let mut table = Table::new();
        for (key, value) in entries {
            if table.contains_key(&key) {
                return Err(de::Error::custom(format!("duplicate attribute '{}'", key)));
            }
            table.entries.push((key, value));
        }
        Ok(table)
    }
}

impl<V> Table<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Insert or replace, keeping the original position on replace
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Table<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// Attribute name -> numeric value
pub type AttributeTable = Table<f64>;
/// Attribute name -> delta description
pub type DeltaTable = Table<AttributeDelta>;

/// How a rolled delta combines with the base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaMethod {
    /// base * (1 + delta)
    #[default]
    Multiplicative,
    /// base + delta
    Additive,
    /// delta replaces the base value
    Overwrite,
}

/// Transform description for one attribute at one grade.
/// `min` is the worst roll, `max` the best.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeDelta {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub method: DeltaMethod,
}

impl AttributeDelta {
    pub fn new(min: f64, max: f64, method: DeltaMethod) -> Self {
        Self { min, max, method }
    }

    /// Rolled delta at the given quality
    pub fn at(&self, quality: f64) -> f64 {
        self.min + (self.max - self.min) * quality
    }

    /// Modified attribute value for `base` at the given quality
    pub fn apply(&self, base: f64, quality: f64) -> f64 {
        let delta = self.at(quality);
        match self.method {
            DeltaMethod::Multiplicative => base * (1.0 + delta),
            DeltaMethod::Additive => base + delta,
            DeltaMethod::Overwrite => delta,
        }
    }
}

/// An upgrade path with one delta table per grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub grades: BTreeMap<u8, DeltaTable>,
}

impl TemplateInfo {
    /// Defined grades, ascending
    pub fn grades(&self) -> impl Iterator<Item = u8> + '_ {
        self.grades.keys().copied()
    }

    pub fn has_grade(&self, grade: u8) -> bool {
        self.grades.contains_key(&grade)
    }

    /// Delta table for a grade
    pub fn deltas(&self, grade: u8) -> EngineeringResult<&DeltaTable> {
        self.grades.get(&grade).ok_or_else(|| EngineeringError::InvalidGrade {
            template: self.id.clone(),
            grade,
        })
    }
}

/// A special effect layered on top of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectInfo {
    pub id: EffectId,
    #[serde(default)]
    pub description: String,
}

/// Which templates and effects apply to a class of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub id: ClassId,
    pub templates: Vec<TemplateId>,
    #[serde(default)]
    pub effects: Vec<EffectId>,
}

/// A base item and its unmodified attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: ItemId,
    pub class: ClassId,
    pub base_attributes: AttributeTable,
}

/// Read-only catalog access used by the engineering core
pub trait CatalogLookup {
    fn template_info(&self, id: &str) -> EngineeringResult<&TemplateInfo>;
    fn item_info(&self, id: &str) -> EngineeringResult<&ItemInfo>;
    fn effect_info(&self, id: &str) -> EngineeringResult<&EffectInfo>;
    fn class_info(&self, id: &str) -> EngineeringResult<&ClassInfo>;

    /// Class record for a base item
    fn class_of(&self, item: &str) -> EngineeringResult<&ClassInfo> {
        let info = self.item_info(item)?;
        self.class_info(&info.class)
    }
}

/// Bundled catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<TemplateInfo>,
    pub effects: Vec<EffectInfo>,
    pub classes: Vec<ClassInfo>,
    pub items: Vec<ItemInfo>,
}

impl Catalog {
    /// Check cross references. Returns one message per problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        for class in &self.classes {
            for template in &class.templates {
                if self.template_info(template).is_err() {
                    problems.push(format!("class '{}' lists unknown template '{}'", class.id, template));
                }
            }
            for effect in &class.effects {
                if self.effect_info(effect).is_err() {
                    problems.push(format!("class '{}' lists unknown effect '{}'", class.id, effect));
                }
            }
        }

        for item in &self.items {
            if self.class_info(&item.class).is_err() {
                problems.push(format!("item '{}' has unknown class '{}'", item.id, item.class));
            }
        }

        for template in &self.templates {
            if template.grades.is_empty() {
                problems.push(format!("template '{}' defines no grades", template.id));
            }
            // grades run 1, 2, .. n with no gaps
            if template.grades().zip(1u8..).any(|(grade, expected)| grade != expected) {
                let grades: Vec<String> = template.grades().map(|g| g.to_string()).collect();
                problems.push(format!(
                    "template '{}' grades must run from 1 without gaps, found [{}]",
                    template.id,
                    grades.join(", ")
                ));
            }
        }

        problems
    }
}

impl CatalogLookup for Catalog {
    fn template_info(&self, id: &str) -> EngineeringResult<&TemplateInfo> {
        self.templates.iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineeringError::lookup(LookupKind::Template, id))
    }

    fn item_info(&self, id: &str) -> EngineeringResult<&ItemInfo> {
        self.items.iter()
            .find(|i| i.id == id)
            .ok_or_else(|| EngineeringError::lookup(LookupKind::Item, id))
    }

    fn effect_info(&self, id: &str) -> EngineeringResult<&EffectInfo> {
        self.effects.iter()
            .find(|e| e.id == id)
            .ok_or_else(|| EngineeringError::lookup(LookupKind::Effect, id))
    }

    fn class_info(&self, id: &str) -> EngineeringResult<&ClassInfo> {
        self.classes.iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineeringError::lookup(LookupKind::Class, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_catalog;

    #[test]
    fn test_table_keeps_insertion_order() {
        let mut table: AttributeTable = [("range", 500.0), ("damage", 10.0)].into_iter().collect();
        table.insert("range", 600.0);
        table.insert("mass", 2.0);

        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["range", "damage", "mass"]);
        assert_eq!(table.get("range"), Some(&600.0));
        assert_eq!(table.remove("damage"), Some(10.0));
        assert!(!table.contains_key("damage"));
    }

    #[test]
    fn test_delta_methods() {
        let mult = AttributeDelta::new(0.1, 0.3, DeltaMethod::Multiplicative);
        assert!((mult.at(0.5) - 0.2).abs() < 1e-9);
        assert!((mult.apply(10.0, 1.0) - 13.0).abs() < 1e-9);

        let add = AttributeDelta::new(-5.0, 5.0, DeltaMethod::Additive);
        assert!((add.apply(10.0, 0.0) - 5.0).abs() < 1e-9);

        let over = AttributeDelta::new(2.0, 4.0, DeltaMethod::Overwrite);
        assert!((over.apply(10.0, 0.5) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_failures() {
        let catalog = default_catalog();
        assert_eq!(
            catalog.template_info("missing").unwrap_err(),
            EngineeringError::lookup(LookupKind::Template, "missing")
        );
        assert!(catalog.item_info("missing").is_err());
        assert!(catalog.effect_info("missing").is_err());
    }

    #[test]
    fn test_invalid_grade() {
        let catalog = default_catalog();
        let template = catalog.template_info("overcharged").unwrap();
        assert!(template.deltas(1).is_ok());
        assert!(matches!(
            template.deltas(42),
            Err(EngineeringError::InvalidGrade { grade: 42, .. })
        ));
    }

    #[test]
    fn test_default_catalog_is_consistent() {
        let catalog = default_catalog();
        assert!(catalog.validate().is_empty(), "{:?}", catalog.validate());
    }

    #[test]
    fn test_duplicate_keys_rejected_when_loading() {
        let table: Result<AttributeTable, _> = ron::from_str(r#"[("damage", 10.0), ("range", 500.0)]"#);
        assert_eq!(table.unwrap().len(), 2);

        let table: Result<AttributeTable, _> =
            ron::from_str(r#"[("damage", 10.0), ("range", 500.0), ("damage", 12.0)]"#);
        let err = table.unwrap_err().to_string();
        assert!(err.contains("duplicate attribute 'damage'"), "{}", err);

        let deltas: Result<DeltaTable, _> = ron::from_str(
            r#"[("damage", (min: 0.0, max: 0.1)), ("damage", (min: 0.1, max: 0.2))]"#,
        );
        assert!(deltas.is_err());
    }

    #[test]
    fn test_table_ron_round_trip() {
        let table: AttributeTable = [("range", 500.0), ("damage", 10.0)].into_iter().collect();
        let text = ron::to_string(&table).unwrap();
        let back: AttributeTable = ron::from_str(&text).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["range", "damage"]);
    }

    #[test]
    fn test_grade_gaps_reported() {
        let mut catalog = default_catalog();
        let template = catalog.templates.iter_mut().find(|t| t.id == "overcharged").unwrap();
        template.grades.remove(&3);
        let problems = catalog.validate();
        assert_eq!(problems.len(), 1, "{:?}", problems);
        assert!(problems[0].contains("'overcharged'"));

        let mut catalog = default_catalog();
        let template = catalog.templates.iter_mut().find(|t| t.id == "long_range").unwrap();
        let first = template.grades.remove(&1).unwrap();
        template.grades.insert(0, first);
        assert_eq!(catalog.validate().len(), 1);
    }
}
