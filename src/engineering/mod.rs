//! Engineering core
//!
//! Template/grade/special selection, roll quality, and the merged attribute
//! list shown for an engineered item.

pub mod error;
pub mod facade;
pub mod merge;
pub mod menu;
pub mod quality;

pub use error::{EngineeringError, EngineeringResult, LookupKind};
pub use facade::ItemFacade;
pub use merge::{compute_display_list, display_list, AttributeEntry, AttributeSource};
pub use menu::{
    focus_request, Command, FocusTarget, GradeEntry, MenuEvent, MenuMode, MenuState, MenuView,
    ModificationsMenu, RollControl, SpecialEntry, TemplateGroup, Transition,
};
pub use quality::{bucket_of, validate_roll_quality, RollBucket, RollInput, SEED_QUALITY};
