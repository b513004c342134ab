//! Data plugin adding headwear record types to the catalog.

use garderobe_plugin_sdk::prelude::*;

struct HeadwearPlugin;

impl DataPlugin for HeadwearPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(
            "garderobe.data.headwear",
            "Headwear types",
            "Garderobe",
            "1.0.0",
        )
    }

    fn activate(&self, registry: &mut TypeRegistry) {
        registry.register_template(
            RecordTemplate::new("Hat")
                .with_field(FieldSpec::required("material", FieldKind::Text))
                .with_field(FieldSpec::required("size", FieldKind::Integer))
                .with_field(FieldSpec::optional("brim", FieldKind::Flag)),
        );
        registry.register_template(
            RecordTemplate::new("Scarf")
                .with_field(FieldSpec::required("length_cm", FieldKind::Integer))
                .with_field(FieldSpec::optional("wool", FieldKind::Flag)),
        );
    }
}

declare_garderobe_plugins!({
    let mut module = PluginModule::new();
    module.register_data(Box::new(HeadwearPlugin));
    module
});
