//! Modifications menu state machine
//!
//! Decides which of the three menus is showing (template picker, special
//! effect picker, attribute view) and turns user choices into facade
//! commands. The menu keeps only transient UI intent; everything about the
//! item itself is re-read through [`ItemFacade`] after every command.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{CatalogLookup, EffectId, TemplateId};
use super::error::{EngineeringError, EngineeringResult};
use super::facade::ItemFacade;
use super::merge::{display_list, AttributeEntry};
use super::quality::{bucket_of, RollBucket, RollInput, SEED_QUALITY};

/// Which menu is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuMode {
    TemplatePick,
    SpecialPick,
    AttributeView,
}

/// User intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MenuEvent {
    ChooseTemplate { template: TemplateId, grade: u8 },
    /// `None` is the "no special effect" entry
    ChooseEffect(Option<EffectId>),
    ToggleTemplateMenu,
    ToggleSpecialMenu,
    Reset,
    Roll(RollInput),
    /// Hand-tune one attribute (canonical key and value)
    SetAttribute { key: String, value: f64 },
}

/// Mutation issued to the facade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SetTemplate { template: TemplateId, grade: u8, seed: f64 },
    SetEffect(Option<EffectId>),
    SetRollQuality(f64),
    SetAttribute { key: String, value: f64 },
    ResetAll,
}

impl Command {
    pub fn execute(&self, item: &mut impl ItemFacade) -> EngineeringResult<()> {
        match self {
            Command::SetTemplate { template, grade, seed } => item.set_template(template, *grade, *seed),
            Command::SetEffect(effect) => item.set_effect(effect.as_deref()),
            Command::SetRollQuality(value) => item.set_roll_quality(*value),
            Command::SetAttribute { key, value } => item.set_attribute(key, *value),
            Command::ResetAll => {
                item.reset_all();
                Ok(())
            }
        }
    }
}

/// Transient menu flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    pub template_menu_open: bool,
    pub special_menu_open: bool,
}

/// Result of planning an event: the flags to commit and the commands that
/// must all succeed first
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: MenuState,
    pub commands: Vec<Command>,
}

/// Picker entry that should receive focus after the next render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusTarget {
    Grade { template: TemplateId, grade: u8 },
    /// `None` is the "no special effect" entry
    Effect(Option<EffectId>),
}

/// Focus only moves when a transition opened a picker, and only onto that
/// picker's current selection.
pub fn focus_request(
    previous: MenuMode,
    current: MenuMode,
    selection: Option<(&str, u8)>,
    effect: Option<&str>,
) -> Option<FocusTarget> {
    if previous == current {
        return None;
    }
    match current {
        MenuMode::TemplatePick => selection.map(|(template, grade)| FocusTarget::Grade {
            template: template.to_string(),
            grade,
        }),
        MenuMode::SpecialPick => Some(FocusTarget::Effect(effect.map(str::to_string))),
        MenuMode::AttributeView => None,
    }
}

/// One grade button in the template picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeEntry {
    pub grade: u8,
    pub active: bool,
    pub focus: bool,
}

/// A template and its grade buttons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateGroup {
    pub template: TemplateId,
    pub grades: Vec<GradeEntry>,
}

/// One entry in the special effect picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialEntry {
    /// `None` is the "no special effect" entry
    pub effect: Option<EffectId>,
    pub active: bool,
    pub focus: bool,
}

/// One button of the roll control
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollControl {
    pub input: RollInput,
    pub active: bool,
}

/// Render-ready snapshot of the menu
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub mode: MenuMode,
    pub templates: Vec<TemplateGroup>,
    pub specials: Vec<SpecialEntry>,
    /// Active (template, grade), shown as the template menu toggle
    pub header: Option<(TemplateId, u8)>,
    /// Special menu toggle; only offered when effects apply.
    /// Inner `None` means no effect is selected yet.
    pub special_toggle: Option<Option<EffectId>>,
    pub roll: Vec<RollControl>,
    pub bucket: Option<RollBucket>,
    pub attributes: Vec<AttributeEntry>,
}

/// Selection state machine for one item's modifications menu
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationsMenu {
    state: MenuState,
    bucket: Option<RollBucket>,
    focus: Option<FocusTarget>,
}

impl ModificationsMenu {
    /// Template picker for a plain item, attribute view otherwise
    pub fn new(item: &impl ItemFacade) -> Self {
        Self {
            state: MenuState {
                template_menu_open: item.template().is_none(),
                special_menu_open: false,
            },
            bucket: item.roll_quality().map(bucket_of),
            focus: None,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Bucket shown on the roll control; `None` while no template is applied
    pub fn bucket(&self) -> Option<RollBucket> {
        self.bucket
    }

    /// One-shot focus request from the last transition
    pub fn focus(&self) -> Option<&FocusTarget> {
        self.focus.as_ref()
    }

    /// Called by the renderer once focus has been applied
    pub fn take_focus(&mut self) -> Option<FocusTarget> {
        self.focus.take()
    }

    pub fn mode(&self, item: &impl ItemFacade) -> MenuMode {
        self.resolve_mode(item.template().is_some(), has_effects(item))
    }

    fn resolve_mode(&self, has_template: bool, has_effects: bool) -> MenuMode {
        if !has_template || self.state.template_menu_open {
            MenuMode::TemplatePick
        } else if self.state.special_menu_open && has_effects {
            MenuMode::SpecialPick
        } else {
            MenuMode::AttributeView
        }
    }

    /// Work out the flags and commands for an event without touching
    /// anything. Only `Roll(Random)` consumes randomness.
    ///
    /// Choices are only accepted from the menu that offers them: templates
    /// from the template picker, effects from the special picker, and reset,
    /// roll and hand-tuned values from the attribute view.
    pub fn plan(&self, event: &MenuEvent, item: &impl ItemFacade, rng: &mut impl Rng) -> EngineeringResult<Transition> {
        let current = self.state;
        let has_effects = !item.applicable_effects()?.is_empty();
        let mode = self.resolve_mode(item.template().is_some(), has_effects);

        let require = |expected: MenuMode, reason: &'static str| {
            if mode == expected {
                Ok(())
            } else {
                Err(EngineeringError::InvalidTransition(reason))
            }
        };

        let transition = match event {
            MenuEvent::ChooseTemplate { template, grade } => {
                require(MenuMode::TemplatePick, "templates are chosen from the template picker")?;
                Transition {
                    // the special picker opens whether or not any effects apply
                    next: MenuState { template_menu_open: false, special_menu_open: true },
                    commands: vec![Command::SetTemplate {
                        template: template.clone(),
                        grade: *grade,
                        seed: SEED_QUALITY,
                    }],
                }
            }
            MenuEvent::ChooseEffect(effect) => {
                require(MenuMode::SpecialPick, "special effects are chosen from the special picker")?;
                Transition {
                    next: MenuState { special_menu_open: false, ..current },
                    commands: vec![Command::SetEffect(effect.clone())],
                }
            }
            MenuEvent::ToggleTemplateMenu => Transition {
                next: MenuState { template_menu_open: !current.template_menu_open, ..current },
                commands: Vec::new(),
            },
            MenuEvent::ToggleSpecialMenu => {
                if !has_effects {
                    return Err(EngineeringError::InvalidTransition("no special effects apply to this item"));
                }
                Transition {
                    next: MenuState { special_menu_open: !current.special_menu_open, ..current },
                    commands: Vec::new(),
                }
            }
            MenuEvent::Reset => {
                require(MenuMode::AttributeView, "reset is only offered in the attribute view")?;
                Transition {
                    next: MenuState { template_menu_open: true, special_menu_open: false },
                    commands: vec![Command::ResetAll],
                }
            }
            MenuEvent::Roll(input) => {
                require(MenuMode::AttributeView, "roll quality is only set from the attribute view")?;
                Transition {
                    next: current,
                    commands: vec![Command::SetRollQuality(input.value(rng))],
                }
            }
            MenuEvent::SetAttribute { key, value } => {
                require(MenuMode::AttributeView, "attributes are only tuned from the attribute view")?;
                Transition {
                    next: current,
                    commands: vec![Command::SetAttribute { key: key.clone(), value: *value }],
                }
            }
        };
        Ok(transition)
    }

    /// Plan and run an event. On error the menu flags are left as they were;
    /// commands already executed are not rolled back.
    pub fn handle(&mut self, event: MenuEvent, item: &mut impl ItemFacade, rng: &mut impl Rng) -> EngineeringResult<MenuMode> {
        self.focus = None;
        let previous = self.mode(&*item);

        let transition = self.plan(&event, &*item, rng)?;
        for command in &transition.commands {
            if let Err(e) = command.execute(item) {
                log::warn!("{:?} failed on {}: {}", command, item.base_item(), e);
                return Err(e);
            }
        }

        self.state = transition.next;
        self.bucket = item.roll_quality().map(bucket_of);

        let current = self.mode(&*item);
        self.focus = focus_request(previous, current, item.engineering(), item.effect());
        log::debug!("{:?}: {:?} -> {:?}", event, previous, current);
        Ok(current)
    }

    /// Build the render snapshot for the current mode.
    ///
    /// If the active template can't be resolved, the attribute list falls
    /// back to the base attributes and the error is logged.
    pub fn view(&self, item: &impl ItemFacade, catalog: &impl CatalogLookup) -> EngineeringResult<MenuView> {
        let mode = self.mode(item);
        let mut view = MenuView {
            mode,
            templates: Vec::new(),
            specials: Vec::new(),
            header: None,
            special_toggle: None,
            roll: Vec::new(),
            bucket: self.bucket,
            attributes: Vec::new(),
        };

        match mode {
            MenuMode::TemplatePick => {
                let active = item.engineering();
                for template in item.applicable_templates()? {
                    let info = catalog.template_info(&template)?;
                    let grades = info.grades()
                        .map(|grade| GradeEntry {
                            grade,
                            active: active == Some((template.as_str(), grade)),
                            focus: self.focus == Some(FocusTarget::Grade { template: template.clone(), grade }),
                        })
                        .collect();
                    view.templates.push(TemplateGroup { template, grades });
                }
            }
            MenuMode::SpecialPick => {
                let applied = item.effect();
                let effects = item.applicable_effects()?;
                let entries = std::iter::once(None).chain(effects.into_iter().map(Some));
                for effect in entries {
                    let active = effect.as_deref() == applied;
                    let focus = self.focus == Some(FocusTarget::Effect(effect.clone()));
                    view.specials.push(SpecialEntry { effect, active, focus });
                }
            }
            MenuMode::AttributeView => {
                view.header = item.engineering().map(|(t, g)| (t.to_string(), g));
                if !item.applicable_effects()?.is_empty() {
                    view.special_toggle = Some(item.effect().map(str::to_string));
                }
                view.roll = RollInput::ALL.iter()
                    .map(|&input| RollControl { input, active: input.is_active(self.bucket) })
                    .collect();
                view.attributes = match display_list(catalog, item.base_item(), item.engineering()) {
                    Ok(list) => list,
                    Err(e @ EngineeringError::CatalogLookup { .. }) => {
                        log::warn!("Showing base attributes for {}: {}", item.base_item(), e);
                        display_list(catalog, item.base_item(), None)?
                    }
                    Err(e) => return Err(e),
                };
            }
        }

        Ok(view)
    }
}

fn has_effects(item: &impl ItemFacade) -> bool {
    match item.applicable_effects() {
        Ok(effects) => !effects.is_empty(),
        Err(e) => {
            log::warn!("Could not list special effects for {}: {}", item.base_item(), e);
            false
        }
    }
}
