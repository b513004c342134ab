use thiserror::Error;

use garderobe_core::{CatalogError, DispatchError, EditError};
use garderobe_plugin_sdk::FormatError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("plugin selection {index} is out of range ({available} available)")]
    InvalidSelection { index: usize, available: usize },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Format(#[from] FormatError),
}
