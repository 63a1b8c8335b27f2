//! Obtains the descriptor tree for a `.proto` file by shelling out to
//! `protoc` and lifts it into the `pblite-schema` model.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;
use prost::Message as _;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet,
};

use pblite_schema::{Cardinality, EnumDef, EnumValue, Field, FieldType, MessageDef, Schema};

use crate::error::CodegenError;

/// Compile `path` with `protoc` and lift the first file entry of the
/// resulting descriptor set into the schema model.
///
/// The descriptor set is captured through a named temp file that is removed
/// when this function returns, on success and on failure alike.
pub fn load_schema(path: &Path) -> Result<Schema, CodegenError> {
    let descriptor_file = tempfile::NamedTempFile::new()?;

    debug!("invoking protoc for {}", path.display());
    let output = Command::new("protoc")
        .arg("--include_source_info")
        .arg(format!(
            "--descriptor_set_out={}",
            descriptor_file.path().display()
        ))
        .arg(path)
        .output()?;
    if !output.status.success() {
        return Err(CodegenError::Protoc {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let bytes = fs::read(descriptor_file.path())?;
    let descriptor_set = FileDescriptorSet::decode(bytes.as_slice())?;
    let file = descriptor_set
        .file
        .into_iter()
        .next()
        .ok_or(CodegenError::EmptyDescriptorSet)?;

    convert_file(&file)
}

fn convert_file(file: &FileDescriptorProto) -> Result<Schema, CodegenError> {
    let mut messages = Vec::with_capacity(file.message_type.len());
    for descriptor in &file.message_type {
        messages.push(convert_message(descriptor)?);
    }
    let mut enums = Vec::with_capacity(file.enum_type.len());
    for descriptor in &file.enum_type {
        enums.push(convert_enum(descriptor)?);
    }
    debug!(
        "loaded {} message(s) and {} enum(s) from {}",
        messages.len(),
        enums.len(),
        file.name()
    );
    Ok(Schema { messages, enums })
}

fn convert_message(descriptor: &DescriptorProto) -> Result<MessageDef, CodegenError> {
    if !descriptor.oneof_decl.is_empty() {
        return Err(CodegenError::UnsupportedConstruct(format!(
            "message \"{}\" declares a oneof",
            descriptor.name()
        )));
    }
    let mut fields = Vec::with_capacity(descriptor.field.len());
    for field in &descriptor.field {
        fields.push(convert_field(field)?);
    }
    Ok(MessageDef {
        name: descriptor.name().to_owned(),
        fields,
    })
}

/// The closed-set gate: every (type, label) pair outside the supported
/// taxonomy is rejected here, before any code is emitted.
fn convert_field(field: &FieldDescriptorProto) -> Result<Field, CodegenError> {
    let ty = match field.r#type() {
        Type::String => FieldType::String,
        Type::Bytes => FieldType::Bytes,
        Type::Bool => FieldType::Bool,
        Type::Uint32 => FieldType::Uint32,
        Type::Uint64 => FieldType::Uint64,
        Type::Double => FieldType::Double,
        Type::Message => FieldType::Message(field.type_name().to_owned()),
        Type::Enum => FieldType::Enum(field.type_name().to_owned()),
        other => {
            return Err(CodegenError::UnsupportedType {
                field: field.name().to_owned(),
                kind:  format!("{:?}", other),
            })
        }
    };
    let cardinality = match field.label() {
        Label::Required => Cardinality::Required,
        Label::Optional => Cardinality::Optional,
        Label::Repeated => Cardinality::Repeated,
    };
    let number = u32::try_from(field.number())
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| CodegenError::FieldNumberOutOfRange {
            field:  field.name().to_owned(),
            number: field.number(),
        })?;
    Ok(Field {
        name: field.name().to_owned(),
        number,
        ty,
        cardinality,
    })
}

fn convert_enum(descriptor: &EnumDescriptorProto) -> Result<EnumDef, CodegenError> {
    let mut values = Vec::with_capacity(descriptor.value.len());
    for value in &descriptor.value {
        let number =
            u32::try_from(value.number()).map_err(|_| CodegenError::EnumValueOutOfRange {
                value:  value.name().to_owned(),
                number: value.number(),
            })?;
        values.push(EnumValue {
            name: value.name().to_owned(),
            number,
        });
    }
    Ok(EnumDef {
        name: descriptor.name().to_owned(),
        values,
    })
}
