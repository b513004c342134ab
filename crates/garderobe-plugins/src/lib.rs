//! Built-in Garderobe plugins providing essential processing blocks.

pub mod json;
pub mod sort;

pub use json::JsonSerializePlugin;
pub use sort::SortByName;
