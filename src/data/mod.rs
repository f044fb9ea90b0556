//! Engineering catalog data
//!
//! Templates, special effects and base items, loaded from an external RON
//! file so the catalog can be edited without rebuilding.

pub mod catalog;
pub mod defaults;
pub mod loader;

pub use catalog::{
    AttributeDelta, AttributeTable, Catalog, CatalogLookup, ClassId, ClassInfo, DeltaMethod,
    DeltaTable, EffectId, EffectInfo, ItemId, ItemInfo, Table, TemplateId, TemplateInfo,
};
pub use defaults::default_catalog;
pub use loader::{export_default_catalog, CATALOG_FILE};
