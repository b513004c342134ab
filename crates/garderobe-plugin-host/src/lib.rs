//! Dynamic plugin loading for Garderobe Studio.
//!
//! This crate owns the disk side of the plugin system: it enumerates
//! candidate libraries in the three well-known plugin directories, loads
//! them through `libloading`, resolves the SDK entry symbol, and hands the
//! registered capability instances to the engine. A library that fails to
//! load is skipped (plugin absence and plugin breakage are both normal)
//! and every skip is reported through `tracing` as well as the scan
//! report's error list. The loaded `Library` handles stay alive for as
//! long as any instance from them does.

mod config;
mod discover;
mod error;
mod hosted;

pub use config::PluginDirs;
pub use discover::{discover, scan_directory, Capability, DiscoveredPlugins};
pub use error::HostError;
pub use hosted::HostedPlugin;
