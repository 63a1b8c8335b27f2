//! Maps a field's declared type and cardinality to the Rust member type and
//! the decode primitive its dispatch arm calls. Both maps are exhaustive
//! matches over the closed unions in `pblite-schema`; anything the loader
//! could not classify never reaches this module.

use pblite_schema::{Cardinality, Field, FieldType};

/// Strip any package qualification from a descriptor type name:
/// `.hangouts.ConversationId` → `ConversationId`.
pub fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

/// Call shape of the decode primitive for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadShape {
    /// `pblite::read_optional` — singular fields; null means absent.
    Optional,
    /// `pblite::read_array` — repeated fields; null is distinct from `[]`.
    Array,
}

pub fn read_shape(cardinality: Cardinality) -> ReadShape {
    match cardinality {
        Cardinality::Required | Cardinality::Optional => ReadShape::Optional,
        Cardinality::Repeated => ReadShape::Array,
    }
}

fn base_type(ty: &FieldType) -> String {
    match ty {
        FieldType::String => "String".to_owned(),
        FieldType::Bytes => "Vec<u8>".to_owned(),
        FieldType::Bool => "bool".to_owned(),
        FieldType::Uint32 => "u32".to_owned(),
        FieldType::Uint64 => "u64".to_owned(),
        FieldType::Double => "f64".to_owned(),
        FieldType::Message(type_name) | FieldType::Enum(type_name) => {
            simple_name(type_name).to_owned()
        }
    }
}

/// Rust type of the generated struct member.
///
/// `required` keeps the bare type, `optional` wraps it in `Option`, and
/// `repeated` wraps a `Vec` in `Option` so that an absent field stays
/// distinguishable from a present-but-empty one. `boxed` requests heap
/// indirection for message fields on a reference cycle.
pub fn rust_type(field: &Field, boxed: bool) -> String {
    let mut ty = base_type(&field.ty);
    if boxed {
        ty = format!("Box<{}>", ty);
    }
    match field.cardinality {
        Cardinality::Required => ty,
        Cardinality::Optional => format!("Option<{}>", ty),
        Cardinality::Repeated => format!("Option<Vec<{}>>", ty),
    }
}

/// The decode-primitive expression handed to the optional/array reader.
pub fn read_method(field: &Field, boxed: bool) -> String {
    let method = match &field.ty {
        FieldType::String => "pblite::read_string",
        FieldType::Bytes => "pblite::read_bytes",
        FieldType::Bool => "pblite::read_bool",
        FieldType::Uint32 => "pblite::read_uint32",
        FieldType::Uint64 => "pblite::read_uint64",
        FieldType::Double => "pblite::read_double",
        FieldType::Message(_) => "pblite::read_message",
        FieldType::Enum(_) => "pblite::read_enum",
    };
    if boxed {
        format!("|value| {}(value).map(Box::new)", method)
    } else {
        method.to_owned()
    }
}
