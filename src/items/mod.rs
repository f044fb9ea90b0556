//! Engineered items

pub mod item;
pub mod handle;

pub use item::Item;
pub use handle::ItemHandle;
