//! Garderobe Plugin SDK
//! ====================
//!
//! Contracts and conveniences for extending Garderobe Studio from dynamic
//! libraries. A plugin library registers implementations of one or more
//! capability traits ([`DataPlugin`], [`FunctionalPlugin`],
//! [`SerializePlugin`]) into a [`PluginModule`] and exports it through the
//! well-known entry point declared with [`declare_garderobe_plugins!`].

mod capability;
mod descriptor;
mod module;

pub use capability::{DataPlugin, FormatError, FunctionalPlugin, SerializePlugin};
pub use descriptor::PluginDescriptor;
pub use module::{PluginExport, PluginModule};

/// Common imports for plugin authors.
pub mod prelude {
    pub use crate::{
        declare_garderobe_plugins, DataPlugin, FormatError, FunctionalPlugin, PluginDescriptor,
        PluginExport, PluginModule, SerializePlugin,
    };
    pub use garderobe_core::{
        FieldKind, FieldSpec, FieldValue, Record, RecordTag, RecordTemplate, TypeRegistry,
    };
}

/// Name of the entry function every plugin library must export.
pub const ENTRY_SYMBOL: &str = "garderobe_plugin_entrypoint";

/// Signature of the exported entry function.
pub type PluginEntry = unsafe extern "C" fn() -> *mut PluginExport;

/// Reclaims the boxed export handed over by a plugin's entry function.
///
/// # Safety
///
/// `entry` must be the entry function of a still-loaded plugin library
/// built against this SDK, and must be called at most once per library.
pub unsafe fn take_export(entry: PluginEntry) -> PluginExport {
    *Box::from_raw(entry())
}

/// Declare the entry point for a dynamic Garderobe plugin library.
///
/// The macro expects an expression evaluating to a [`PluginModule`] with
/// every capability implementation already registered.
///
/// # Example
///
/// ```ignore
/// use garderobe_plugin_sdk::prelude::*;
///
/// struct HatPlugin;
///
/// impl DataPlugin for HatPlugin { /* ... */ }
///
/// declare_garderobe_plugins!({
///     let mut module = PluginModule::new();
///     module.register_data(Box::new(HatPlugin));
///     module
/// });
/// ```
#[macro_export]
macro_rules! declare_garderobe_plugins {
    ($module:expr) => {
        #[no_mangle]
        pub extern "C" fn garderobe_plugin_entrypoint() -> *mut $crate::PluginExport {
            let module: $crate::PluginModule = $module;
            ::std::boxed::Box::into_raw(::std::boxed::Box::new($crate::PluginExport::new(module)))
        }
    };
}
