//! Functional plugin ordering exported snapshots by record name.

use std::path::Path;

use garderobe_core::Record;
use garderobe_plugin_sdk::{FunctionalPlugin, PluginDescriptor};

/// Sorts the outgoing snapshot by name; incoming records pass through in
/// the order the codec produced them.
#[derive(Debug, Default)]
pub struct SortByName;

impl FunctionalPlugin for SortByName {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("garderobe.functional.sort", "Sort by name", "Garderobe", "1.0.0")
    }

    fn process_outgoing(&self, mut records: Vec<Record>, _destination: &Path) -> Vec<Record> {
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }
}
