//! Item mutation facade
//!
//! The only way the modifications menu touches an item. The menu issues a
//! command and re-reads state afterwards; it never writes item fields.

use crate::data::{EffectId, TemplateId};
use super::error::EngineeringResult;

pub trait ItemFacade {
    /// Catalog id of the unmodified item
    fn base_item(&self) -> &str;

    /// Templates the catalog offers for this item, in catalog order
    fn applicable_templates(&self) -> EngineeringResult<Vec<TemplateId>>;
    /// Special effects for this item's class; may be empty
    fn applicable_effects(&self) -> EngineeringResult<Vec<EffectId>>;

    fn template(&self) -> Option<&str>;
    fn grade(&self) -> Option<u8>;
    fn effect(&self) -> Option<&str>;
    /// `None` whenever no template is active
    fn roll_quality(&self) -> Option<f64>;

    /// Current value of an attribute after engineering
    fn attribute(&self, key: &str) -> Option<f64>;

    /// Apply a template at a grade, starting the roll at `seed`
    fn set_template(&mut self, template: &str, grade: u8, seed: f64) -> EngineeringResult<()>;
    /// Set or clear (`None`) the special effect
    fn set_effect(&mut self, effect: Option<&str>) -> EngineeringResult<()>;
    fn set_roll_quality(&mut self, value: f64) -> EngineeringResult<()>;
    /// Pin one attribute to a hand-entered value
    fn set_attribute(&mut self, key: &str, value: f64) -> EngineeringResult<()>;
    /// Clear template, grade, effect, roll quality and hand-set values together
    fn reset_all(&mut self);

    /// Active (template, grade) pair
    fn engineering(&self) -> Option<(&str, u8)> {
        Some((self.template()?, self.grade()?))
    }
}
