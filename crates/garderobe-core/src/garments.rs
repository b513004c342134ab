//! Built-in garment record types.

use crate::record::{FieldKind, FieldSpec, RecordTemplate};

/// Templates for the six record types shipped with the application, in the
/// order they appear in the type selector. Data plugins append to this set
/// at activation time.
pub fn builtin_templates() -> Vec<RecordTemplate> {
    vec![
        RecordTemplate::new("Dress")
            .with_field(FieldSpec::required("fabric", FieldKind::Text))
            .with_field(FieldSpec::required("size", FieldKind::Integer))
            .with_field(FieldSpec::optional("length_cm", FieldKind::Decimal))
            .with_field(FieldSpec::optional("evening", FieldKind::Flag)),
        RecordTemplate::new("Belt")
            .with_field(FieldSpec::required("material", FieldKind::Text))
            .with_field(FieldSpec::required("length_cm", FieldKind::Integer))
            .with_field(FieldSpec::optional("buckle", FieldKind::Text)),
        RecordTemplate::new("Trousers")
            .with_field(FieldSpec::required("waist", FieldKind::Integer))
            .with_field(FieldSpec::required("inseam", FieldKind::Integer))
            .with_field(FieldSpec::required("fabric", FieldKind::Text))
            .with_field(FieldSpec::optional("pleated", FieldKind::Flag)),
        RecordTemplate::new("Shirt")
            .with_field(FieldSpec::required("collar", FieldKind::Integer))
            .with_field(FieldSpec::required("fabric", FieldKind::Text))
            .with_field(FieldSpec::optional("long_sleeve", FieldKind::Flag)),
        RecordTemplate::new("Socks")
            .with_field(FieldSpec::required("size", FieldKind::Integer))
            .with_field(FieldSpec::optional("wool", FieldKind::Flag))
            .with_field(FieldSpec::optional("pattern", FieldKind::Text)),
        RecordTemplate::new("Outwear")
            .with_field(FieldSpec::required("insulation", FieldKind::Text))
            .with_field(FieldSpec::required("waterproof", FieldKind::Flag))
            .with_field(FieldSpec::optional("weight_kg", FieldKind::Decimal)),
    ]
}
