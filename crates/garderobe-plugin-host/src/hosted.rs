use std::ops::Deref;
use std::sync::Arc;

use libloading::Library;

/// A capability instance paired with the library that must outlive it.
///
/// Instances from dynamic libraries execute code mapped by their
/// `Library`, so the handle is kept alive alongside them; compiled-in
/// built-ins carry no handle. Field order matters: the plugin must drop
/// before the library it came from.
pub struct HostedPlugin<P: ?Sized> {
    plugin: Box<P>,
    _library: Option<Arc<Library>>,
}

impl<P: ?Sized> HostedPlugin<P> {
    /// Wraps a compiled-in plugin.
    pub fn builtin(plugin: Box<P>) -> Self {
        Self {
            plugin,
            _library: None,
        }
    }

    /// Wraps an instance loaded from a dynamic library.
    pub fn dynamic(library: Arc<Library>, plugin: Box<P>) -> Self {
        Self {
            plugin,
            _library: Some(library),
        }
    }

    pub fn is_builtin(&self) -> bool {
        self._library.is_none()
    }
}

impl<P: ?Sized> Deref for HostedPlugin<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.plugin
    }
}
