//! Built-in catalog
//!
//! Used when no catalog file is present, and as the export source for
//! `catalog.ron`.

use std::collections::BTreeMap;

use super::catalog::{
    AttributeDelta, AttributeTable, Catalog, ClassInfo, DeltaMethod, DeltaTable, EffectInfo,
    ItemInfo, TemplateInfo,
};

/// One attribute of a template, described at its top grade
enum Feature {
    /// Improves with grade; each grade's roll range starts where the
    /// previous grade's best roll ended
    Ramp(&'static str, f64, DeltaMethod),
    /// Trade-off that grows with grade but does not depend on the roll
    Penalty(&'static str, f64, DeltaMethod),
}

fn template(id: &str, top_grade: u8, features: &[Feature]) -> TemplateInfo {
    let top = f64::from(top_grade);
    let grades = (1..=top_grade)
        .map(|grade| {
            let g = f64::from(grade);
            let table: DeltaTable = features.iter()
                .map(|feature| match *feature {
                    Feature::Ramp(key, at_top, method) => {
                        (key, AttributeDelta::new(at_top * (g - 1.0) / top, at_top * g / top, method))
                    }
                    Feature::Penalty(key, at_top, method) => {
                        let value = at_top * g / top;
                        (key, AttributeDelta::new(value, value, method))
                    }
                })
                .collect();
            (grade, table)
        })
        .collect::<BTreeMap<_, _>>();

    TemplateInfo { id: id.to_string(), grades }
}

fn effect(id: &str, description: &str) -> EffectInfo {
    EffectInfo { id: id.to_string(), description: description.to_string() }
}

fn class(id: &str, templates: &[&str], effects: &[&str]) -> ClassInfo {
    ClassInfo {
        id: id.to_string(),
        templates: templates.iter().map(|t| t.to_string()).collect(),
        effects: effects.iter().map(|e| e.to_string()).collect(),
    }
}

fn item(id: &str, class: &str, attributes: &[(&str, f64)]) -> ItemInfo {
    ItemInfo {
        id: id.to_string(),
        class: class.to_string(),
        base_attributes: attributes.iter().copied().collect::<AttributeTable>(),
    }
}

/// Default templates, effects, classes and items
pub fn default_catalog() -> Catalog {
    use DeltaMethod::*;
    use Feature::*;

    Catalog {
        templates: vec![
            template("overcharged", 5, &[
                Ramp("damage", 0.5, Multiplicative),
                Penalty("thermal_load", 0.5, Multiplicative),
                Penalty("power_draw", 0.2, Multiplicative),
            ]),
            template("long_range", 5, &[
                Ramp("range", 1.0, Multiplicative),
                Penalty("mass", 0.3, Multiplicative),
            ]),
            template("efficient", 5, &[
                Ramp("thermal_load", -0.6, Multiplicative),
                Ramp("power_draw", -0.2, Multiplicative),
                Ramp("damage", 0.08, Multiplicative),
            ]),
            template("reinforced", 5, &[
                Ramp("kinetic_effectiveness", -0.3, Multiplicative),
                Ramp("thermal_effectiveness", -0.3, Multiplicative),
                Penalty("shield_strength", -0.03, Multiplicative),
            ]),
            template("kinetic_resistant", 5, &[
                Ramp("kinetic_effectiveness", -0.6, Multiplicative),
                Penalty("thermal_effectiveness", 0.2, Multiplicative),
            ]),
            template("dirty_drive", 5, &[
                Ramp("max_speed", 0.4, Multiplicative),
                Penalty("thermal_load", 0.8, Multiplicative),
                Penalty("integrity", -0.2, Multiplicative),
            ]),
            template("expanded_probe_radius", 3, &[
                Ramp("probe_radius", 0.3, Multiplicative),
                Penalty("power_draw", 0.1, Additive),
            ]),
        ],
        effects: vec![
            effect("concordant_sequence", "Hits briefly boost allied shield regeneration"),
            effect("thermal_vent", "Hits on a hot target vent heat from the firing ship"),
            effect("oversized", "Increased damage at the cost of mass"),
            effect("double_braced", "Improved integrity"),
            effect("hi_cap", "Increased shield strength, slower regeneration"),
            effect("fast_charge", "Faster regeneration, weaker shields"),
            effect("drag_drives", "Improved top speed"),
        ],
        classes: vec![
            class("weapon", &["overcharged", "long_range", "efficient"],
                &["concordant_sequence", "thermal_vent", "oversized", "double_braced"]),
            class("shield", &["reinforced", "kinetic_resistant"],
                &["hi_cap", "fast_charge", "double_braced"]),
            class("thrusters", &["dirty_drive"], &["drag_drives", "double_braced"]),
            class("scanner", &["expanded_probe_radius"], &[]),
        ],
        items: vec![
            item("pulse_laser", "weapon", &[
                ("damage", 10.0),
                ("range", 500.0),
                ("thermal_load", 0.6),
                ("power_draw", 0.39),
                ("mass", 2.0),
            ]),
            item("multi_cannon", "weapon", &[
                ("damage", 2.2),
                ("range", 4000.0),
                ("ammo_clip", 90.0),
                ("power_draw", 0.28),
                ("mass", 2.0),
            ]),
            item("shield_generator", "shield", &[
                ("shield_strength", 100.0),
                ("regen_rate", 1.0),
                ("kinetic_effectiveness", 0.6),
                ("thermal_effectiveness", 1.2),
                ("power_draw", 1.0),
            ]),
            item("thrusters", "thrusters", &[
                ("max_speed", 1.0),
                ("optimal_mass", 48.0),
                ("thermal_load", 1.3),
                ("integrity", 55.0),
            ]),
            item("surface_scanner", "scanner", &[
                ("probe_radius", 1.0),
                ("power_draw", 0.0),
            ]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CatalogLookup;

    #[test]
    fn test_ramp_ranges_chain_between_grades() {
        let catalog = default_catalog();
        let overcharged = catalog.template_info("overcharged").unwrap();
        let g1 = overcharged.deltas(1).unwrap().get("damage").copied().unwrap();
        let g2 = overcharged.deltas(2).unwrap().get("damage").copied().unwrap();
        assert_eq!(g1.min, 0.0);
        assert!((g1.max - g2.min).abs() < 1e-9);
        assert!((overcharged.deltas(5).unwrap().get("damage").unwrap().max - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_ignores_roll() {
        let catalog = default_catalog();
        let delta = catalog.template_info("overcharged").unwrap()
            .deltas(3).unwrap()
            .get("thermal_load").copied().unwrap();
        assert_eq!(delta.at(0.0), delta.at(1.0));
    }

    #[test]
    fn test_grades_are_contiguous() {
        let catalog = default_catalog();
        for template in &catalog.templates {
            let grades: Vec<u8> = template.grades().collect();
            let expected: Vec<u8> = (1..=grades.len() as u8).collect();
            assert_eq!(grades, expected, "template {}", template.id);
        }
    }

    #[test]
    fn test_scanner_class_has_no_effects() {
        let catalog = default_catalog();
        assert!(catalog.class_of("surface_scanner").unwrap().effects.is_empty());
    }
}
