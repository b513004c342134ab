use crate::capability::{DataPlugin, FunctionalPlugin, SerializePlugin};

/// Per-library registration collector.
///
/// A plugin library registers every capability implementation it ships into
/// one module; the host splits the module by capability after loading.
#[derive(Default)]
pub struct PluginModule {
    data: Vec<Box<dyn DataPlugin>>,
    functional: Vec<Box<dyn FunctionalPlugin>>,
    serialize: Vec<Box<dyn SerializePlugin>>,
}

impl PluginModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_data(&mut self, plugin: Box<dyn DataPlugin>) -> &mut Self {
        self.data.push(plugin);
        self
    }

    pub fn register_functional(&mut self, plugin: Box<dyn FunctionalPlugin>) -> &mut Self {
        self.functional.push(plugin);
        self
    }

    pub fn register_serialize(&mut self, plugin: Box<dyn SerializePlugin>) -> &mut Self {
        self.serialize.push(plugin);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.functional.is_empty() && self.serialize.is_empty()
    }

    /// Splits the module into its capability lists, registration order
    /// preserved.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Vec<Box<dyn DataPlugin>>,
        Vec<Box<dyn FunctionalPlugin>>,
        Vec<Box<dyn SerializePlugin>>,
    ) {
        (self.data, self.functional, self.serialize)
    }
}

/// The value a plugin library hands across the loading boundary.
pub struct PluginExport {
    module: PluginModule,
}

impl PluginExport {
    pub fn new(module: PluginModule) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &PluginModule {
        &self.module
    }

    pub fn into_module(self) -> PluginModule {
        self.module
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use garderobe_core::{Record, TypeRegistry};

    use super::*;
    use crate::capability::FormatError;
    use crate::descriptor::PluginDescriptor;

    struct Passthrough;

    impl super::FunctionalPlugin for Passthrough {
        fn descriptor(&self) -> PluginDescriptor {
            PluginDescriptor::new("test.passthrough", "Passthrough", "Tests", "0.1.0")
        }
    }

    struct NullCodec;

    impl super::SerializePlugin for NullCodec {
        fn descriptor(&self) -> PluginDescriptor {
            PluginDescriptor::new("test.null", "Null", "Tests", "0.1.0")
        }

        fn encode(&self, _records: &[Record]) -> Result<Vec<u8>, FormatError> {
            Ok(Vec::new())
        }

        fn decode(&self, _bytes: &[u8]) -> Result<Vec<Record>, FormatError> {
            Ok(Vec::new())
        }
    }

    struct NoTypes;

    impl super::DataPlugin for NoTypes {
        fn descriptor(&self) -> PluginDescriptor {
            PluginDescriptor::new("test.notypes", "NoTypes", "Tests", "0.1.0")
        }

        fn activate(&self, _registry: &mut TypeRegistry) {}
    }

    #[test]
    fn module_splits_by_capability() {
        let mut module = PluginModule::new();
        module
            .register_data(Box::new(NoTypes))
            .register_functional(Box::new(Passthrough))
            .register_serialize(Box::new(NullCodec));
        assert!(!module.is_empty());
        let (data, functional, serialize) = module.into_parts();
        assert_eq!(data.len(), 1);
        assert_eq!(functional.len(), 1);
        assert_eq!(serialize.len(), 1);
    }

    #[test]
    fn functional_hooks_default_to_passthrough() {
        let plugin = Passthrough;
        let records = vec![Record::new("Shirt", "Oxford")];
        let out = plugin.process_outgoing(records.clone(), Path::new("out.bin"));
        assert_eq!(out, records);
        let back = plugin.process_incoming(records.clone(), Path::new("in.bin"));
        assert_eq!(back, records);
    }
}
