//! Display string translation
//!
//! The core never formats human-readable text. Renderers receive a
//! [`Translate`] capability and resolve keys through it.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Resolves a display key to text
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F: Fn(&str) -> String> Translate for F {
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Key -> text table. Unknown keys translate to themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub strings: HashMap<String, String>,
}

impl Language {
    pub fn english() -> Self {
        let pairs = [
            ("grade", "grade"),
            ("reset", "Reset"),
            ("mroll", "Roll"),
            ("0%", "0%"),
            ("50%", "50%"),
            ("100%", "100%"),
            ("random", "Random"),
            ("PHRASE_NO_SPECIAL", "No special"),
            ("PHRASE_SELECT_SPECIAL", "Select a special"),
            ("PHRASE_BLUEPRINT_RESET", "Remove all modifications"),
            ("PHRASE_BLUEPRINT_WORST", "Worst primary values for this template"),
            ("PHRASE_BLUEPRINT_FIFTY", "50% primary values for this template"),
            ("PHRASE_BLUEPRINT_BEST", "Best primary values for this template"),
            ("PHRASE_BLUEPRINT_RANDOM", "Random selection between best and worst values"),
            ("overcharged", "Overcharged"),
            ("long_range", "Long Range"),
            ("efficient", "Efficient"),
            ("reinforced", "Reinforced"),
            ("kinetic_resistant", "Kinetic Resistant"),
            ("dirty_drive", "Dirty Drive Tuning"),
            ("expanded_probe_radius", "Expanded Probe Scanning Radius"),
            ("concordant_sequence", "Concordant Sequence"),
            ("thermal_vent", "Thermal Vent"),
            ("oversized", "Oversized"),
            ("double_braced", "Double Braced"),
            ("hi_cap", "Hi-Cap"),
            ("fast_charge", "Fast Charge"),
            ("drag_drives", "Drag Drives"),
            ("damage", "Damage"),
            ("range", "Range"),
            ("thermal_load", "Thermal Load"),
            ("power_draw", "Power Draw"),
            ("mass", "Mass"),
            ("ammo_clip", "Ammo Clip"),
            ("shield_strength", "Shield Strength"),
            ("regen_rate", "Regeneration Rate"),
            ("kinetic_resistance", "Kinetic Resistance"),
            ("thermal_resistance", "Thermal Resistance"),
            ("explosive_resistance", "Explosive Resistance"),
            ("max_speed", "Max Speed"),
            ("optimal_mass", "Optimal Mass"),
            ("integrity", "Integrity"),
            ("probe_radius", "Probe Radius"),
        ];

        Self {
            code: "en".to_string(),
            strings: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }
}

impl Translate for Language {
    fn translate(&self, key: &str) -> String {
        self.strings.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_is_identity() {
        let en = Language::english();
        assert_eq!(en.translate("overcharged"), "Overcharged");
        assert_eq!(en.translate("not_a_key"), "not_a_key");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.translate("grade"), "GRADE");
    }
}
