//! Functional plugin dropping duplicate-name records from imports.
//!
//! Useful in front of codecs that cannot guarantee name uniqueness; the
//! first occurrence of each name wins.

use std::collections::HashSet;
use std::path::Path;

use garderobe_plugin_sdk::prelude::*;

struct DedupPlugin;

impl FunctionalPlugin for DedupPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(
            "garderobe.functional.dedup",
            "Drop duplicate names",
            "Garderobe",
            "1.0.0",
        )
    }

    fn process_incoming(&self, records: Vec<Record>, _source: &Path) -> Vec<Record> {
        let mut seen = HashSet::new();
        records
            .into_iter()
            .filter(|record| seen.insert(record.name.clone()))
            .collect()
    }
}

declare_garderobe_plugins!({
    let mut module = PluginModule::new();
    module.register_functional(Box::new(DedupPlugin));
    module
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_of_a_name_wins() {
        let records = vec![
            Record::new("Shirt", "Oxford").with_field("collar", FieldValue::Integer(41)),
            Record::new("Belt", "Oxford"),
            Record::new("Socks", "Hiking"),
        ];
        let kept = DedupPlugin.process_incoming(records, Path::new("in.tsv"));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].tag, RecordTag::new("Shirt"));
        assert_eq!(kept[1].name, "Hiking");
    }

    #[test]
    fn outgoing_records_pass_through() {
        let records = vec![Record::new("Shirt", "A"), Record::new("Shirt", "A")];
        let out = DedupPlugin.process_outgoing(records.clone(), Path::new("out.tsv"));
        assert_eq!(out, records);
    }
}
