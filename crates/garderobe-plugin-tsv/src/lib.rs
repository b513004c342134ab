//! Serialize plugin encoding the catalog as tab-separated text.
//!
//! One record per line: the type tag, the record name, then one
//! `field=kind:value` cell per field. Text values containing tabs or
//! newlines cannot be represented and fail the encode.

use garderobe_plugin_sdk::prelude::*;

struct TsvPlugin;

impl SerializePlugin for TsvPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new("garderobe.serialize.tsv", "TSV", "Garderobe", "1.0.0")
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>, FormatError> {
        let mut lines = Vec::with_capacity(records.len());
        for record in records {
            lines.push(encode_record(record)?);
        }
        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text.into_bytes())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Record>, FormatError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| FormatError::malformed("payload is not UTF-8"))?;
        text.lines()
            .filter(|line| !line.is_empty())
            .map(decode_record)
            .collect()
    }
}

fn encode_record(record: &Record) -> Result<String, FormatError> {
    let mut cells = vec![record.tag.as_str().to_string(), record.name.clone()];
    check_plain(record.tag.as_str())?;
    check_plain(&record.name)?;
    for (field, value) in &record.fields {
        let cell = match value {
            FieldValue::Text(text) => {
                check_plain(text)?;
                format!("{field}=t:{text}")
            }
            FieldValue::Integer(n) => format!("{field}=i:{n}"),
            FieldValue::Decimal(x) => format!("{field}=d:{x}"),
            FieldValue::Flag(b) => format!("{field}=f:{b}"),
        };
        cells.push(cell);
    }
    Ok(cells.join("\t"))
}

fn check_plain(text: &str) -> Result<(), FormatError> {
    if text.contains('\t') || text.contains('\n') {
        return Err(FormatError::malformed(format!(
            "value {text:?} contains a tab or newline"
        )));
    }
    Ok(())
}

fn decode_record(line: &str) -> Result<Record, FormatError> {
    let mut cells = line.split('\t');
    let tag = cells
        .next()
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| FormatError::malformed("line is missing a type tag"))?;
    let name = cells
        .next()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FormatError::malformed("line is missing a record name"))?;
    let mut record = Record::new(tag, name);
    for cell in cells {
        let (field, encoded) = cell
            .split_once('=')
            .ok_or_else(|| FormatError::malformed(format!("cell {cell:?} is not FIELD=VALUE")))?;
        let (kind, raw) = encoded
            .split_once(':')
            .ok_or_else(|| FormatError::malformed(format!("cell {cell:?} has no kind prefix")))?;
        let value = match kind {
            "t" => FieldValue::Text(raw.to_string()),
            "i" => FieldValue::Integer(raw.parse().map_err(|_| bad_number(field, raw))?),
            "d" => FieldValue::Decimal(raw.parse().map_err(|_| bad_number(field, raw))?),
            "f" => FieldValue::Flag(raw.parse().map_err(|_| bad_number(field, raw))?),
            other => {
                return Err(FormatError::malformed(format!(
                    "unknown field kind {other:?} in cell {cell:?}"
                )))
            }
        };
        record.fields.insert(field.to_string(), value);
    }
    Ok(record)
}

fn bad_number(field: &str, raw: &str) -> FormatError {
    FormatError::malformed(format!("field {field:?} has unreadable value {raw:?}"))
}

declare_garderobe_plugins!({
    let mut module = PluginModule::new();
    module.register_serialize(Box::new(TsvPlugin));
    module
});
