//! Catalog-backed item facade
//!
//! Binds a caller-owned [`Item`] to the catalog and implements every
//! engineering command against it.

use crate::data::{Catalog, CatalogLookup, EffectId, TemplateId};
use crate::engineering::{
    validate_roll_quality, EngineeringError, EngineeringResult, ItemFacade, LookupKind,
};
use super::item::Item;

/// Mutable view of one item for the duration of an edit
pub struct ItemHandle<'a, C: CatalogLookup = Catalog> {
    item: &'a mut Item,
    catalog: &'a C,
}

impl<'a, C: CatalogLookup> ItemHandle<'a, C> {
    pub fn new(item: &'a mut Item, catalog: &'a C) -> Self {
        Self { item, catalog }
    }

    pub fn item(&self) -> &Item {
        &*self.item
    }

    pub fn catalog(&self) -> &C {
        self.catalog
    }

    /// Base value of an attribute, if the base item has it
    pub fn base_attribute(&self, key: &str) -> Option<f64> {
        self.catalog.item_info(&self.item.base).ok()?
            .base_attributes.get(key).copied()
    }

    fn delta_for(&self, key: &str) -> Option<crate::data::AttributeDelta> {
        let (template, grade) = self.engineering()?;
        self.catalog.template_info(template).ok()?
            .deltas(grade).ok()?
            .get(key).copied()
    }
}

impl<C: CatalogLookup> ItemFacade for ItemHandle<'_, C> {
    fn base_item(&self) -> &str {
        &self.item.base
    }

    fn applicable_templates(&self) -> EngineeringResult<Vec<TemplateId>> {
        Ok(self.catalog.class_of(&self.item.base)?.templates.clone())
    }

    fn applicable_effects(&self) -> EngineeringResult<Vec<EffectId>> {
        Ok(self.catalog.class_of(&self.item.base)?.effects.clone())
    }

    fn template(&self) -> Option<&str> {
        self.item.template()
    }

    fn grade(&self) -> Option<u8> {
        self.item.grade()
    }

    fn effect(&self) -> Option<&str> {
        self.item.effect()
    }

    fn roll_quality(&self) -> Option<f64> {
        self.item.roll_quality()
    }

    fn attribute(&self, key: &str) -> Option<f64> {
        if let Some(value) = self.item.overrides.get(key) {
            return Some(*value);
        }

        let base = self.base_attribute(key);
        match (self.delta_for(key), self.item.roll_quality) {
            (Some(delta), Some(quality)) => Some(delta.apply(base.unwrap_or(0.0), quality)),
            _ => base,
        }
    }

    fn set_template(&mut self, template: &str, grade: u8, seed: f64) -> EngineeringResult<()> {
        let class = self.catalog.class_of(&self.item.base)?;
        if !class.templates.iter().any(|t| t == template) {
            return Err(EngineeringError::lookup(LookupKind::Template, template));
        }
        self.catalog.template_info(template)?.deltas(grade)?;
        let seed = validate_roll_quality(seed)?;

        if self.item.template() != Some(template) || self.item.grade != Some(grade) {
            self.item.overrides.clear();
        }
        self.item.template = Some(template.to_string());
        self.item.grade = Some(grade);
        self.item.roll_quality = Some(seed);

        log::debug!("{}: applied {} grade {} at roll {}", self.item.base, template, grade, seed);
        Ok(())
    }

    fn set_effect(&mut self, effect: Option<&str>) -> EngineeringResult<()> {
        match effect {
            Some(effect) => {
                let class = self.catalog.class_of(&self.item.base)?;
                if !class.effects.iter().any(|e| e == effect) {
                    return Err(EngineeringError::lookup(LookupKind::Effect, effect));
                }
                self.item.effect = Some(effect.to_string());
                log::debug!("{}: special effect {}", self.item.base, effect);
            }
            None => {
                self.item.effect = None;
                log::debug!("{}: special effect cleared", self.item.base);
            }
        }
        Ok(())
    }

    fn set_roll_quality(&mut self, value: f64) -> EngineeringResult<()> {
        let value = validate_roll_quality(value)?;
        if !self.item.is_engineered() {
            log::debug!("{}: roll quality ignored, no template applied", self.item.base);
            return Ok(());
        }
        // A new roll replaces any hand-tuned values
        self.item.overrides.clear();
        self.item.roll_quality = Some(value);
        Ok(())
    }

    fn set_attribute(&mut self, key: &str, value: f64) -> EngineeringResult<()> {
        if self.base_attribute(key).is_none() && self.delta_for(key).is_none() {
            return Err(EngineeringError::lookup(LookupKind::Attribute, key));
        }
        self.item.overrides.insert(key, value);
        log::debug!("{}: {} set to {}", self.item.base, key, value);
        Ok(())
    }

    fn reset_all(&mut self) {
        self.item.clear_engineering();
        log::debug!("{}: engineering reset", self.item.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_catalog;
    use crate::engineering::{bucket_of, RollBucket};

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map_or(false, |a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_set_template_seeds_roll() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);

        handle.set_template("overcharged", 3, 1.0).unwrap();
        assert_eq!(handle.engineering(), Some(("overcharged", 3)));
        assert_eq!(handle.roll_quality(), Some(1.0));
        assert!(item.is_consistent());
    }

    #[test]
    fn test_template_must_apply_to_class() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);

        let err = handle.set_template("reinforced", 1, 1.0).unwrap_err();
        assert_eq!(err, EngineeringError::lookup(LookupKind::Template, "reinforced"));
        assert_eq!(handle.template(), None);
    }

    #[test]
    fn test_grade_out_of_range() {
        let catalog = default_catalog();
        let mut item = Item::new("surface_scanner");
        let mut handle = ItemHandle::new(&mut item, &catalog);

        assert!(matches!(
            handle.set_template("expanded_probe_radius", 4, 1.0),
            Err(EngineeringError::InvalidGrade { grade: 4, .. })
        ));
        assert_eq!(handle.grade(), None);
    }

    #[test]
    fn test_roll_quality_rejected_outside_range() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);
        handle.set_template("overcharged", 3, 1.0).unwrap();

        handle.set_roll_quality(0.73).unwrap();
        assert_eq!(bucket_of(handle.roll_quality().unwrap()), RollBucket::Other);
        assert_eq!(handle.set_roll_quality(1.2), Err(EngineeringError::OutOfRange(1.2)));
        assert_eq!(handle.roll_quality(), Some(0.73));
    }

    #[test]
    fn test_roll_quality_needs_template() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);

        handle.set_roll_quality(0.5).unwrap();
        assert_eq!(handle.roll_quality(), None);
    }

    #[test]
    fn test_attribute_follows_roll() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);
        assert!(approx(handle.attribute("damage"), 10.0));

        // grade 3 damage rolls between +20% and +30%
        handle.set_template("overcharged", 3, 0.0).unwrap();
        assert!(approx(handle.attribute("damage"), 12.0));
        handle.set_roll_quality(1.0).unwrap();
        assert!(approx(handle.attribute("damage"), 13.0));
        // untouched by the template
        assert!(approx(handle.attribute("range"), 500.0));
        assert_eq!(handle.attribute("shield_strength"), None);
    }

    #[test]
    fn test_effects() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);
        handle.set_template("overcharged", 1, 1.0).unwrap();

        handle.set_effect(Some("thermal_vent")).unwrap();
        assert_eq!(handle.effect(), Some("thermal_vent"));
        assert!(handle.set_effect(Some("hi_cap")).is_err());
        assert_eq!(handle.effect(), Some("thermal_vent"));

        handle.set_effect(None).unwrap();
        assert_eq!(handle.effect(), None);
    }

    #[test]
    fn test_overrides() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);
        handle.set_template("overcharged", 3, 1.0).unwrap();

        handle.set_attribute("damage", 12.5).unwrap();
        assert!(approx(handle.attribute("damage"), 12.5));
        assert!(handle.set_attribute("probe_radius", 2.0).is_err());

        handle.set_roll_quality(0.0).unwrap();
        assert!(approx(handle.attribute("damage"), 12.0));
    }

    #[test]
    fn test_reset_all() {
        let catalog = default_catalog();
        let mut item = Item::new("pulse_laser");
        let mut handle = ItemHandle::new(&mut item, &catalog);
        handle.set_template("long_range", 2, 1.0).unwrap();
        handle.set_effect(Some("oversized")).unwrap();
        handle.set_attribute("range", 900.0).unwrap();

        handle.reset_all();
        assert_eq!(
            (handle.template(), handle.grade(), handle.effect(), handle.roll_quality()),
            (None, None, None, None)
        );
        assert!(approx(handle.attribute("range"), 500.0));
    }
}
