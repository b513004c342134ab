use std::path::Path;

use thiserror::Error;

use garderobe_core::{Record, TypeRegistry};

use crate::descriptor::PluginDescriptor;

/// Decode (or encode) failure reported by a serialize plugin.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed catalog payload: {detail}")]
    Malformed { detail: String },
}

impl FormatError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        FormatError::Malformed {
            detail: detail.into(),
        }
    }
}

/// Registers new record types and their editor constructors.
///
/// Activation is side-effect only and runs once, right after the plugin
/// directories are scanned at startup.
pub trait DataPlugin: Send {
    fn descriptor(&self) -> PluginDescriptor;

    fn activate(&self, registry: &mut TypeRegistry);
}

/// Transforms the record snapshot travelling through the export/import
/// pipeline.
///
/// Both hooks default to passthrough so an implementation overrides only
/// the direction it cares about. The path hints at the destination or
/// source file; the transform itself stays byte-format-agnostic.
pub trait FunctionalPlugin: Send {
    fn descriptor(&self) -> PluginDescriptor;

    /// Runs over the snapshot before it is encoded.
    fn process_outgoing(&self, records: Vec<Record>, _destination: &Path) -> Vec<Record> {
        records
    }

    /// Runs over the decoded records before they are installed.
    fn process_incoming(&self, records: Vec<Record>, _source: &Path) -> Vec<Record> {
        records
    }
}

/// Encodes and decodes a catalog snapshot to and from bytes.
///
/// Implementations own the byte format entirely; the application only
/// shuttles the bytes between a file and these two operations. Every codec
/// must satisfy `decode(encode(s)) == s`.
pub trait SerializePlugin: Send {
    fn descriptor(&self) -> PluginDescriptor;

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, FormatError>;

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, FormatError>;
}
