//! Tag-keyed dispatch tables for the add and edit flows.

use std::collections::HashMap;

use thiserror::Error;

use crate::editor::{RecordEditor, TemplateEditor};
use crate::garments::builtin_templates;
use crate::record::{Record, RecordTag, RecordTemplate};

pub type CreateEditorFn = Box<dyn Fn() -> Box<dyn RecordEditor> + Send>;
pub type EditEditorFn = Box<dyn Fn(Record) -> Box<dyn RecordEditor> + Send>;

#[derive(Debug, Error, PartialEq)]
pub enum DispatchError {
    #[error("no editor is registered for record type {0}")]
    UnsupportedType(RecordTag),
}

/// The two dispatch tables plus the selectable-type list.
///
/// Write-once-then-append: built-ins are registered first, data plugins
/// append in activation order, and nothing is ever removed.
pub struct TypeRegistry {
    create: HashMap<RecordTag, CreateEditorFn>,
    edit: HashMap<RecordTag, EditEditorFn>,
    order: Vec<RecordTag>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            create: HashMap::new(),
            edit: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Registry pre-seeded with the built-in garment types.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for template in builtin_templates() {
            registry.register_template(template);
        }
        registry
    }

    /// Registers both constructors for a record type.
    ///
    /// Re-registering an existing tag replaces the constructors in place;
    /// the tag keeps its position in the selectable list.
    pub fn register(&mut self, tag: RecordTag, create: CreateEditorFn, edit: EditEditorFn) {
        if self.create.insert(tag.clone(), create).is_some() {
            tracing::warn!(%tag, "record type re-registered; previous constructors replaced");
        } else {
            self.order.push(tag.clone());
        }
        self.edit.insert(tag, edit);
    }

    /// Registers a template-driven record type with the default editor.
    pub fn register_template(&mut self, template: RecordTemplate) {
        let tag = template.tag.clone();
        let create_template = template.clone();
        self.register(
            tag,
            Box::new(move || Box::new(TemplateEditor::create(create_template.clone()))),
            Box::new(move |record| Box::new(TemplateEditor::edit(template.clone(), record))),
        );
    }

    /// Tags offered to the user, in registration order.
    pub fn selectable(&self) -> &[RecordTag] {
        &self.order
    }

    pub fn contains(&self, tag: &RecordTag) -> bool {
        self.create.contains_key(tag)
    }

    /// Add-flow entry point.
    ///
    /// Panics when the tag is missing: the selector list and the
    /// constructor table are built together, so a miss is a programming
    /// error rather than user input to recover from.
    pub fn create(&self, tag: &RecordTag) -> Box<dyn RecordEditor> {
        let constructor = self
            .create
            .get(tag)
            .unwrap_or_else(|| panic!("record type {tag} offered for selection but not registered"));
        constructor()
    }

    /// Edit-flow entry point, keyed by the record's own tag.
    pub fn edit(&self, record: Record) -> Result<Box<dyn RecordEditor>, DispatchError> {
        let constructor = self
            .edit
            .get(&record.tag)
            .ok_or_else(|| DispatchError::UnsupportedType(record.tag.clone()))?;
        Ok(constructor(record))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
