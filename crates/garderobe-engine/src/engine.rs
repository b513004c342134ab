use std::path::Path;

use garderobe_core::{Catalog, CatalogError, Record, RecordEditor, RecordTag, TypeRegistry};
use garderobe_plugin_host::{discover, DiscoveredPlugins, HostError, HostedPlugin, PluginDirs};
use garderobe_plugin_sdk::{DataPlugin, FunctionalPlugin, PluginDescriptor, SerializePlugin};
use garderobe_plugins::{JsonSerializePlugin, SortByName};

use crate::bank::PluginBank;
use crate::error::EngineError;

/// The application root.
///
/// Owns the catalog, the dispatch tables, and the plugin banks. Data
/// plugin instances are retained for the life of the engine even though
/// they act only during activation: the editor constructors they register
/// execute code from their libraries.
pub struct GarderobeEngine {
    catalog: Catalog,
    types: TypeRegistry,
    data_plugins: Vec<HostedPlugin<dyn DataPlugin>>,
    functional: PluginBank<dyn FunctionalPlugin>,
    serializers: PluginBank<dyn SerializePlugin>,
    scan_errors: Vec<HostError>,
}

impl GarderobeEngine {
    /// Engine with the built-in garment types and processing blocks, and
    /// no external plugins.
    pub fn new() -> Self {
        let mut functional = PluginBank::new();
        functional.push(HostedPlugin::builtin(
            Box::new(SortByName) as Box<dyn FunctionalPlugin>
        ));
        let mut serializers = PluginBank::new();
        serializers.push(HostedPlugin::builtin(
            Box::new(JsonSerializePlugin) as Box<dyn SerializePlugin>
        ));
        Self {
            catalog: Catalog::new(),
            types: TypeRegistry::with_builtins(),
            data_plugins: Vec::new(),
            functional,
            serializers,
            scan_errors: Vec::new(),
        }
    }

    /// Engine plus a one-time scan of the plugin directories.
    pub fn bootstrap(dirs: &PluginDirs) -> Self {
        let mut engine = Self::new();
        engine.install(discover(dirs));
        engine
    }

    /// Activates discovered data plugins and appends the other
    /// capabilities to their banks, in discovery order.
    pub fn install(&mut self, discovered: DiscoveredPlugins) {
        for plugin in &discovered.data {
            let descriptor = plugin.descriptor();
            plugin.activate(&mut self.types);
            tracing::debug!(plugin = %descriptor.id, "data plugin activated");
        }
        self.data_plugins.extend(discovered.data);
        for plugin in discovered.functional {
            self.functional.push(plugin);
        }
        for plugin in discovered.serialize {
            self.serializers.push(plugin);
        }
        self.scan_errors.extend(discovered.errors);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Record types offered to the user, built-ins first.
    pub fn selectable_types(&self) -> &[RecordTag] {
        self.types.selectable()
    }

    pub fn scan_errors(&self) -> &[HostError] {
        &self.scan_errors
    }

    pub fn data_descriptors(&self) -> Vec<PluginDescriptor> {
        self.data_plugins
            .iter()
            .map(|plugin| plugin.descriptor())
            .collect()
    }

    pub fn functional_descriptors(&self) -> Vec<PluginDescriptor> {
        self.functional.iter().map(|p| p.descriptor()).collect()
    }

    pub fn serializer_descriptors(&self) -> Vec<PluginDescriptor> {
        self.serializers.iter().map(|p| p.descriptor()).collect()
    }

    pub fn select_functional(&mut self, selection: Option<usize>) -> Result<(), EngineError> {
        self.functional.select(selection)
    }

    pub fn select_serializer(&mut self, selection: Option<usize>) -> Result<(), EngineError> {
        self.serializers.select(selection)
    }

    pub fn active_functional(&self) -> Option<usize> {
        self.functional.active_index()
    }

    pub fn active_serializer(&self) -> Option<usize> {
        self.serializers.active_index()
    }

    /// Add-flow entry point: an editor for a brand-new record.
    pub fn create_editor(&self, tag: &RecordTag) -> Box<dyn RecordEditor> {
        self.types.create(tag)
    }

    /// Edit-flow entry point: fetches the record and dispatches on its
    /// tag.
    pub fn edit_editor(&self, name: &str) -> Result<Box<dyn RecordEditor>, EngineError> {
        let record = self.catalog.get(name)?;
        Ok(self.types.edit(record)?)
    }

    /// Finishes a create editor and appends the result to the catalog.
    pub fn commit_new(&self, editor: Box<dyn RecordEditor>) -> Result<String, EngineError> {
        let record = editor.finish()?;
        let name = record.name.clone();
        self.catalog.add(record)?;
        Ok(name)
    }

    /// Finishes an edit editor and stores the result under its (possibly
    /// new) name.
    pub fn commit_edit(
        &self,
        original_name: &str,
        editor: Box<dyn RecordEditor>,
    ) -> Result<String, EngineError> {
        let record = editor.finish()?;
        let name = record.name.clone();
        if name == original_name {
            self.catalog.replace(record)?;
        } else {
            if self.catalog.get(&name).is_ok() {
                return Err(CatalogError::DuplicateName(name).into());
            }
            self.catalog.remove(original_name)?;
            self.catalog.add(record)?;
        }
        Ok(name)
    }

    /// Export pipeline: snapshot, functional transform, encode.
    ///
    /// `None` when no serialize plugin is active; the operation cannot
    /// produce output without one. Encode failures propagate.
    pub fn process_output(&self, destination: &Path) -> Result<Option<Vec<u8>>, EngineError> {
        let Some(serializer) = self.serializers.active() else {
            return Ok(None);
        };
        let mut snapshot = self.catalog.records();
        if let Some(functional) = self.functional.active() {
            snapshot = functional.process_outgoing(snapshot, destination);
        }
        Ok(Some(serializer.encode(&snapshot)?))
    }

    /// Import pipeline: decode, functional transform.
    ///
    /// `None` when no serialize plugin is active. Decode failures
    /// propagate; the catalog is not touched either way.
    pub fn process_input(
        &self,
        bytes: &[u8],
        source: &Path,
    ) -> Result<Option<Vec<Record>>, EngineError> {
        let Some(serializer) = self.serializers.active() else {
            return Ok(None);
        };
        let mut records = serializer.decode(bytes)?;
        if let Some(functional) = self.functional.active() {
            records = functional.process_incoming(records, source);
        }
        Ok(Some(records))
    }

    /// Runs the import pipeline and, when it produced records, swaps them
    /// into the catalog atomically. Returns whether an install happened.
    pub fn import_into_catalog(&self, bytes: &[u8], source: &Path) -> Result<bool, EngineError> {
        match self.process_input(bytes, source)? {
            Some(records) => {
                self.catalog.replace_all(records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for GarderobeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use garderobe_core::{FieldKind, FieldSpec, FieldValue, RecordTemplate};
    use garderobe_plugin_sdk::{FormatError, PluginDescriptor};

    use super::*;

    fn engine_with_serializer() -> GarderobeEngine {
        let mut engine = GarderobeEngine::new();
        engine.select_serializer(Some(0)).unwrap();
        engine
    }

    fn add_shirt(engine: &GarderobeEngine, name: &str) {
        let mut editor = engine.create_editor(&RecordTag::new("Shirt"));
        editor.set_name(name);
        editor.set_field("collar", FieldValue::Integer(40)).unwrap();
        editor
            .set_field("fabric", FieldValue::Text("cotton".into()))
            .unwrap();
        engine.commit_new(editor).unwrap();
    }

    #[test]
    fn no_serializer_selected_yields_no_output() {
        let engine = GarderobeEngine::new();
        assert!(engine.process_output(Path::new("out.json")).unwrap().is_none());
        assert!(engine
            .process_input(b"[]", Path::new("in.json"))
            .unwrap()
            .is_none());
        assert!(!engine.import_into_catalog(b"[]", Path::new("in.json")).unwrap());
    }

    #[test]
    fn export_import_round_trip() {
        let engine = engine_with_serializer();
        add_shirt(&engine, "Oxford");
        add_shirt(&engine, "Flannel");
        let bytes = engine.process_output(Path::new("out.json")).unwrap().unwrap();

        let restored = engine_with_serializer();
        assert!(restored
            .import_into_catalog(&bytes, Path::new("out.json"))
            .unwrap());
        assert_eq!(restored.catalog().records(), engine.catalog().records());
    }

    #[test]
    fn functional_transform_runs_before_encoding() {
        let mut engine = engine_with_serializer();
        engine.select_functional(Some(0)).unwrap();
        add_shirt(&engine, "Zip");
        add_shirt(&engine, "Anchor");
        let bytes = engine.process_output(Path::new("out.json")).unwrap().unwrap();

        let reader = engine_with_serializer();
        let records = reader
            .process_input(&bytes, Path::new("out.json"))
            .unwrap()
            .unwrap();
        let names: Vec<_> = records.into_iter().map(|record| record.name).collect();
        assert_eq!(names, vec!["Anchor", "Zip"]);
    }

    #[test]
    fn failed_decode_leaves_catalog_unchanged() {
        let engine = engine_with_serializer();
        add_shirt(&engine, "Keep");
        let err = engine
            .import_into_catalog(b"{ not json", Path::new("bad.json"))
            .unwrap_err();
        assert!(matches!(err, EngineError::Format(_)));
        assert_eq!(engine.catalog().len(), 1);
    }

    #[test]
    fn edit_flow_renames_without_duplicating() {
        let engine = engine_with_serializer();
        add_shirt(&engine, "Oxford");
        let mut editor = engine.edit_editor("Oxford").unwrap();
        editor.set_name("Oxford Slim");
        let name = engine.commit_edit("Oxford", editor).unwrap();
        assert_eq!(name, "Oxford Slim");
        assert_eq!(engine.catalog().len(), 1);
        assert!(engine.catalog().get("Oxford").is_err());
    }

    #[test]
    fn rename_onto_an_existing_record_is_rejected() {
        let engine = engine_with_serializer();
        add_shirt(&engine, "Oxford");
        add_shirt(&engine, "Flannel");
        let mut editor = engine.edit_editor("Oxford").unwrap();
        editor.set_name("Flannel");
        let err = engine.commit_edit("Oxford", editor).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Catalog(CatalogError::DuplicateName(_))
        ));
        assert_eq!(engine.catalog().len(), 2);
    }

    struct HatPlugin;

    impl DataPlugin for HatPlugin {
        fn descriptor(&self) -> PluginDescriptor {
            PluginDescriptor::new("test.hat", "Hat types", "Tests", "0.1.0")
        }

        fn activate(&self, registry: &mut TypeRegistry) {
            registry.register_template(
                RecordTemplate::new("Hat").with_field(FieldSpec::required("brim", FieldKind::Flag)),
            );
        }
    }

    #[test]
    fn data_plugin_extends_the_selectable_types() {
        let mut engine = GarderobeEngine::new();
        let mut discovered = DiscoveredPlugins::empty();
        discovered
            .data
            .push(HostedPlugin::builtin(Box::new(HatPlugin) as Box<dyn DataPlugin>));
        engine.install(discovered);

        let tag = RecordTag::new("Hat");
        assert!(engine.selectable_types().contains(&tag));
        let mut editor = engine.create_editor(&tag);
        editor.set_name("Fedora");
        editor.set_field("brim", FieldValue::Flag(true)).unwrap();
        engine.commit_new(editor).unwrap();
        assert_eq!(engine.catalog().get("Fedora").unwrap().tag, tag);
    }

    struct FailingCodec;

    impl SerializePlugin for FailingCodec {
        fn descriptor(&self) -> PluginDescriptor {
            PluginDescriptor::new("test.failing", "Failing", "Tests", "0.1.0")
        }

        fn encode(&self, _records: &[Record]) -> Result<Vec<u8>, FormatError> {
            Err(FormatError::malformed("refused"))
        }

        fn decode(&self, _bytes: &[u8]) -> Result<Vec<Record>, FormatError> {
            Err(FormatError::malformed("refused"))
        }
    }

    #[test]
    fn encode_failure_propagates() {
        let mut engine = GarderobeEngine::new();
        let mut discovered = DiscoveredPlugins::empty();
        discovered.serialize.push(HostedPlugin::builtin(
            Box::new(FailingCodec) as Box<dyn SerializePlugin>
        ));
        engine.install(discovered);
        engine.select_serializer(Some(1)).unwrap();
        let err = engine.process_output(Path::new("out.bin")).unwrap_err();
        assert!(matches!(err, EngineError::Format(_)));
    }
}
