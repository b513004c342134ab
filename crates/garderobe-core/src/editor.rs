//! Editor surfaces backing the add and edit flows.
//!
//! The presentation layer renders an editor's field specs, pushes values
//! into the draft, and calls [`RecordEditor::finish`] to obtain the record
//! to commit. Data plugins may ship their own implementations; built-in
//! types use the template-driven [`TemplateEditor`].

use thiserror::Error;

use crate::record::{FieldKind, FieldSpec, FieldValue, Record, RecordTemplate};

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("no field named {0:?} on this record type")]
    UnknownField(String),
    #[error("field {field:?} expects a {} value, got {}", .expected.label(), .got.label())]
    KindMismatch {
        field: String,
        expected: FieldKind,
        got: FieldKind,
    },
    #[error("required field {0:?} was not set")]
    MissingField(String),
    #[error("record name must not be empty")]
    EmptyName,
}

/// An in-progress create or edit of a single record.
pub trait RecordEditor {
    /// Schema the surface should render, in display order.
    fn specs(&self) -> &[FieldSpec];

    /// Current draft state.
    fn draft(&self) -> &Record;

    fn set_name(&mut self, name: &str);

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError>;

    /// Validates presence requirements and yields the record to commit.
    fn finish(self: Box<Self>) -> Result<Record, EditError>;
}

/// Default editor driven by a [`RecordTemplate`].
pub struct TemplateEditor {
    template: RecordTemplate,
    draft: Record,
}

impl TemplateEditor {
    /// Editor for a brand-new record of the template's type.
    pub fn create(template: RecordTemplate) -> Self {
        let draft = template.instantiate("");
        Self { template, draft }
    }

    /// Editor seeded from an existing record.
    pub fn edit(template: RecordTemplate, existing: Record) -> Self {
        Self {
            template,
            draft: existing,
        }
    }
}

impl RecordEditor for TemplateEditor {
    fn specs(&self) -> &[FieldSpec] {
        &self.template.fields
    }

    fn draft(&self) -> &Record {
        &self.draft
    }

    fn set_name(&mut self, name: &str) {
        self.draft.name = name.trim().to_string();
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> Result<(), EditError> {
        let spec = self
            .template
            .spec(field)
            .ok_or_else(|| EditError::UnknownField(field.to_string()))?;
        if spec.kind != value.kind() {
            return Err(EditError::KindMismatch {
                field: field.to_string(),
                expected: spec.kind,
                got: value.kind(),
            });
        }
        self.draft.fields.insert(field.to_string(), value);
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<Record, EditError> {
        if self.draft.name.is_empty() {
            return Err(EditError::EmptyName);
        }
        for spec in &self.template.fields {
            if spec.required && !self.draft.fields.contains_key(&spec.name) {
                return Err(EditError::MissingField(spec.name.clone()));
            }
        }
        Ok(self.draft)
    }
}
