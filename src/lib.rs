//! Workbench - engineering upgrades for equipment items
//!
//! Pick an upgrade template and grade, optionally a special effect, tune the
//! roll quality, and read back the merged attribute list.

pub mod config;
pub mod data;
pub mod display;
pub mod engineering;
pub mod items;

// Re-export commonly used types
pub use config::WorkbenchConfig;
pub use data::{Catalog, CatalogLookup};
pub use engineering::{EngineeringError, ItemFacade, MenuEvent, MenuMode, ModificationsMenu};
pub use items::{Item, ItemHandle};
