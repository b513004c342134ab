//! Reference catalog codec backed by pretty-printed JSON.

use garderobe_core::Record;
use garderobe_plugin_sdk::{FormatError, PluginDescriptor, SerializePlugin};

/// Serializes the catalog snapshot as a JSON array of records.
#[derive(Debug, Default)]
pub struct JsonSerializePlugin;

impl SerializePlugin for JsonSerializePlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("garderobe.serialize.json", "JSON", "Garderobe", "1.0.0")
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, FormatError> {
        serde_json::to_vec_pretty(records).map_err(|err| FormatError::malformed(err.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, FormatError> {
        serde_json::from_slice(bytes).map_err(|err| FormatError::malformed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use garderobe_core::FieldValue;

    use super::*;

    fn snapshot() -> Vec<Record> {
        vec![
            Record::new("Shirt", "Oxford")
                .with_field("collar", FieldValue::Integer(41))
                .with_field("fabric", FieldValue::Text("cotton".into())),
            Record::new("Socks", "Hiking")
                .with_field("size", FieldValue::Integer(43))
                .with_field("wool", FieldValue::Flag(true)),
        ]
    }

    #[test]
    fn decode_reverses_encode() {
        let codec = JsonSerializePlugin;
        let bytes = codec.encode(&snapshot()).unwrap();
        let decoded = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, snapshot());
    }

    #[test]
    fn malformed_payload_is_a_format_error() {
        let codec = JsonSerializePlugin;
        let err = codec.decode(b"{ not json").unwrap_err();
        assert!(err.to_string().contains("malformed catalog payload"));
    }
}
