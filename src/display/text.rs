//! Plain-text menu snapshots
//!
//! Used by the command-line driver. Highlighted rows and active buttons are
//! marked with `*`, focused entries with `>`.

use crate::engineering::{MenuMode, MenuView};
use super::show::PresentedAttribute;
use super::translate::Translate;

fn marker(active: bool, focus: bool) -> &'static str {
    match (focus, active) {
        (true, _) => ">",
        (false, true) => "*",
        (false, false) => " ",
    }
}

/// Format an attribute value compactly
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e9 => format!("{}", v as i64),
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    }
}

/// Render a menu view. `attributes` are the presented rows for the
/// attribute view and are ignored in the pickers.
pub fn render_lines(view: &MenuView, attributes: &[PresentedAttribute], tr: &impl Translate) -> Vec<String> {
    let mut lines = Vec::new();

    match view.mode {
        MenuMode::TemplatePick => {
            for group in &view.templates {
                lines.push(tr.translate(&group.template));
                let grades: Vec<String> = group.grades.iter()
                    .map(|g| format!("{}{}", marker(g.active, g.focus), g.grade))
                    .collect();
                lines.push(format!("  {}", grades.join(" ")));
            }
        }
        MenuMode::SpecialPick => {
            for entry in &view.specials {
                let label = match &entry.effect {
                    Some(effect) => tr.translate(effect),
                    None => tr.translate("PHRASE_NO_SPECIAL"),
                };
                lines.push(format!("{} {}", marker(entry.active, entry.focus), label));
            }
        }
        MenuMode::AttributeView => {
            if let Some((template, grade)) = &view.header {
                lines.push(format!("[{} {} {}]", tr.translate(template), tr.translate("grade"), grade));
            }
            if let Some(effect) = &view.special_toggle {
                let label = match effect {
                    Some(effect) => tr.translate(effect),
                    None => tr.translate("PHRASE_SELECT_SPECIAL"),
                };
                lines.push(format!("[{}]", label));
            }
            lines.push(format!("[{}]", tr.translate("reset")));

            let roll: Vec<String> = view.roll.iter()
                .map(|c| format!("{}{}", marker(c.active, false), tr.translate(c.input.label_key())))
                .collect();
            lines.push(format!("{}: {}", tr.translate("mroll"), roll.join(" ")));

            for row in attributes {
                lines.push(format!(
                    "{}{} {:<24} {}",
                    marker(row.is_highlighted(), false),
                    if row.pinned { "+" } else { " " },
                    tr.translate(&row.display_key),
                    format_value(row.value)
                ));
            }
        }
    }

    lines
}
