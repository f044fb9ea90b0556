//! Presentation boundary
//!
//! Display overrides, translation and text snapshots. Nothing here feeds
//! back into the merge or the menu state.

pub mod show;
pub mod text;
pub mod translate;

pub use show::{present, set_displayed, DisplayOverride, PinnedAttributes, PresentedAttribute, SHOW};
pub use text::{format_value, render_lines};
pub use translate::{Language, Translate};
