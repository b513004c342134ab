use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primitive value shapes a record field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Flag,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Decimal => "decimal",
            FieldKind::Flag => "flag",
        }
    }
}

/// A single typed field value stored on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Flag(_) => FieldKind::Flag,
        }
    }

    /// Parses user-entered text into a value of the requested kind.
    pub fn parse_as(kind: FieldKind, raw: &str) -> Result<Self, FieldParseError> {
        let raw = raw.trim();
        let parse_error = || FieldParseError {
            kind,
            raw: raw.to_string(),
        };
        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => raw
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| parse_error()),
            FieldKind::Decimal => raw
                .parse::<f64>()
                .map(FieldValue::Decimal)
                .map_err(|_| parse_error()),
            FieldKind::Flag => match raw {
                "true" | "yes" | "on" => Ok(FieldValue::Flag(true)),
                "false" | "no" | "off" => Ok(FieldValue::Flag(false)),
                _ => Err(parse_error()),
            },
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => write!(f, "{value}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Decimal(value) => write!(f, "{value}"),
            FieldValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("cannot read {raw:?} as a {} value", .kind.label())]
pub struct FieldParseError {
    pub kind: FieldKind,
    pub raw: String,
}

/// Explicit type tag carried by every record.
///
/// Tags key both dispatch tables and stay meaningful across serialization,
/// so plugin-defined record types survive a round trip through any codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTag(String);

impl RecordTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for RecordTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// A single clothing-catalog entry.
///
/// The `name` is the identity key within a catalog; everything else is
/// opaque to the dispatch core and interpreted only by editor surfaces and
/// serialize plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub tag: RecordTag,
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(tag: impl Into<RecordTag>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    pub fn field(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }
}

/// One field of a record schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Declarative schema for one record type; the default editor surface is
/// derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTemplate {
    pub tag: RecordTag,
    pub fields: Vec<FieldSpec>,
}

impl RecordTemplate {
    pub fn new(tag: impl Into<RecordTag>) -> Self {
        Self {
            tag: tag.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn spec(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == field)
    }

    /// Produces an empty record of this type; fields are filled in through
    /// an editor surface.
    pub fn instantiate(&self, name: impl Into<String>) -> Record {
        Record::new(self.tag.clone(), name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn record_roundtrip() {
        let record = Record::new("Shirt", "Oxford")
            .with_field("collar", FieldValue::Integer(41))
            .with_field("fabric", FieldValue::Text("cotton".into()));
        let json = serde_json::to_string(&record).unwrap();
        let roundtrip: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, record);
    }

    #[test]
    fn parse_respects_field_kind() {
        assert_eq!(
            FieldValue::parse_as(FieldKind::Integer, " 42 "),
            Ok(FieldValue::Integer(42))
        );
        assert_eq!(
            FieldValue::parse_as(FieldKind::Flag, "yes"),
            Ok(FieldValue::Flag(true))
        );
        assert_eq!(
            FieldValue::parse_as(FieldKind::Decimal, "1.5"),
            Ok(FieldValue::Decimal(1.5))
        );
        let err = FieldValue::parse_as(FieldKind::Integer, "four").unwrap_err();
        assert_eq!(err.kind, FieldKind::Integer);
    }

    #[test]
    fn template_lookup_finds_specs() {
        let template = RecordTemplate::new("Belt")
            .with_field(FieldSpec::required("material", FieldKind::Text))
            .with_field(FieldSpec::optional("buckle", FieldKind::Text));
        assert_eq!(template.spec("material").unwrap().kind, FieldKind::Text);
        assert!(template.spec("missing").is_none());
        assert_eq!(template.instantiate("Everyday").tag, RecordTag::new("Belt"));
    }
}
