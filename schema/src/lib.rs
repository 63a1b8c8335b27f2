//! pblite-schema
//!
//! In-memory descriptor model for a single `.proto` file, as consumed by the
//! pblite code generator. `pblite-compiler` builds it from the binary
//! descriptor set that `protoc` emits; it is loaded once per run and held
//! immutable until the process exits.

use serde::Serialize;

/// The closed set of field types with a pblite wire representation.
///
/// Message and enum references carry the descriptor's qualified type name
/// (e.g. `.hangouts.ConversationId`); consumers strip the package prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FieldType {
    String,
    Bytes,
    Bool,
    Uint32,
    Uint64,
    Double,
    Message(String),
    Enum(String),
}

impl FieldType {
    /// The qualified type name for message/enum references, `None` for
    /// scalars.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            FieldType::Message(name) | FieldType::Enum(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Cardinality {
    Required,
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:        String,
    /// 1-based field number, unique within the owning message. The wire
    /// position of the field in a pblite array is always `number - 1`.
    pub number:      u32,
    pub ty:          FieldType,
    pub cardinality: Cardinality,
}

/// Field order is declaration order and carries through to the emitted
/// struct members.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDef {
    pub name:   String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name:   String,
    pub number: u32,
}

/// Value order is declaration order. The first declared value doubles as the
/// fallback for any wire number without a declared match, whatever its own
/// number is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name:   String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub messages: Vec<MessageDef>,
    pub enums:    Vec<EnumDef>,
}
