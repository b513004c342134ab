//! In-memory catalog storage service.

use std::fmt;

use parking_lot::Mutex;
use thiserror::Error;

use crate::record::Record;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("a record named {0:?} already exists")]
    DuplicateName(String),
    #[error("no record named {0:?}")]
    NotFound(String),
}

/// Mutation notice delivered to the registered update handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogChange {
    Added(String),
    Replaced(String),
    Removed(String),
    Cleared,
    /// The whole collection was swapped by an import.
    Restored,
}

pub type UpdateHandler = Box<dyn FnMut(&CatalogChange) + Send>;

/// Ordered collection of records keyed by name.
///
/// Constructed by the application root and shared by reference; interior
/// locking keeps the service usable behind `&self`. The update handler runs
/// after the record lock is released, so it may read the catalog freely.
pub struct Catalog {
    records: Mutex<Vec<Record>>,
    observer: Mutex<Option<UpdateHandler>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            observer: Mutex::new(None),
        }
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Appends a record; names are unique within the catalog.
    pub fn add(&self, record: Record) -> Result<(), CatalogError> {
        let name = record.name.clone();
        {
            let mut records = self.records.lock();
            if records.iter().any(|existing| existing.name == record.name) {
                return Err(CatalogError::DuplicateName(name));
            }
            records.push(record);
        }
        self.notify(CatalogChange::Added(name));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Record, CatalogError> {
        self.records
            .lock()
            .iter()
            .find(|record| record.name == name)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(name.to_string()))
    }

    /// Overwrites the record with the same name, keeping its position.
    pub fn replace(&self, record: Record) -> Result<(), CatalogError> {
        let name = record.name.clone();
        {
            let mut records = self.records.lock();
            let slot = records
                .iter_mut()
                .find(|existing| existing.name == record.name)
                .ok_or_else(|| CatalogError::NotFound(record.name.clone()))?;
            *slot = record;
        }
        self.notify(CatalogChange::Replaced(name));
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Result<Record, CatalogError> {
        let removed = {
            let mut records = self.records.lock();
            let index = records
                .iter()
                .position(|record| record.name == name)
                .ok_or_else(|| CatalogError::NotFound(name.to_string()))?;
            records.remove(index)
        };
        self.notify(CatalogChange::Removed(name.to_string()));
        Ok(removed)
    }

    pub fn clear(&self) {
        self.records.lock().clear();
        self.notify(CatalogChange::Cleared);
    }

    /// Swaps in a whole new collection, or leaves the catalog untouched if
    /// the incoming records violate name uniqueness. Used by import.
    pub fn replace_all(&self, records: Vec<Record>) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for record in &records {
            if !seen.insert(record.name.as_str()) {
                return Err(CatalogError::DuplicateName(record.name.clone()));
            }
        }
        *self.records.lock() = records;
        self.notify(CatalogChange::Restored);
        Ok(())
    }

    /// Registers the single observer slot; a later registration replaces
    /// the previous handler.
    pub fn set_update_handler(&self, handler: impl FnMut(&CatalogChange) + Send + 'static) {
        *self.observer.lock() = Some(Box::new(handler));
    }

    fn notify(&self, change: CatalogChange) {
        if let Some(handler) = self.observer.lock().as_mut() {
            handler(&change);
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("records", &self.records.lock().len())
            .field("observer", &self.observer.lock().is_some())
            .finish()
    }
}
