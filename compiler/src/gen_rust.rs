//! Renders the schema model as Rust source: one struct plus `Message` impl
//! per message, one enum plus `Enum` impl per enum, in declaration order.

use std::collections::HashSet;

use pblite_schema::{Cardinality, EnumDef, Field, MessageDef, Schema};

use crate::sanitize::{enum_variant_name, sanitize_name};
use crate::typemap::{read_method, read_shape, rust_type, ReadShape};
use crate::verifier::boxed_fields;

/// Render `schema` as a self-contained Rust module decoding through the
/// `pblite` runtime crate. `source_path` only appears in the header comment.
pub fn generate(schema: &Schema, source_path: &str) -> String {
    let boxed = boxed_fields(schema);
    let mut out: Vec<String> = Vec::new();

    out.push(format!("// @generated by pblitec from {}", source_path));
    out.push(String::new());
    out.push("#![allow(unused_variables)]".to_owned());

    match (schema.messages.is_empty(), schema.enums.is_empty()) {
        (false, false) => {
            out.push(String::new());
            out.push("use pblite::{Enum, Message};".to_owned());
        }
        (false, true) => {
            out.push(String::new());
            out.push("use pblite::Message;".to_owned());
        }
        (true, false) => {
            out.push(String::new());
            out.push("use pblite::Enum;".to_owned());
        }
        (true, true) => {}
    }
    if !(schema.messages.is_empty() && schema.enums.is_empty()) {
        out.push("use serde::Serialize;".to_owned());
    }

    for message in &schema.messages {
        out.push(String::new());
        out.push(generate_message(message, &boxed));
    }
    for def in &schema.enums {
        out.push(String::new());
        out.push(generate_enum(def));
    }

    out.join("\n")
}

fn generate_message(message: &MessageDef, boxed: &HashSet<(String, String)>) -> String {
    let mut lines = Vec::new();

    lines.push("#[derive(Debug, Default, PartialEq, Clone, Serialize)]".to_owned());
    lines.push(format!("pub struct {} {{", message.name));
    for field in &message.fields {
        let is_boxed = boxed.contains(&(message.name.clone(), field.name.clone()));
        lines.push(generate_member(field, is_boxed));
    }
    lines.push("}".to_owned());

    lines.push(format!("impl Message for {} {{", message.name));
    lines.push("    fn get_name(&self) -> &str {".to_owned());
    lines.push(format!("        \"{}\"", message.name));
    lines.push("    }".to_owned());
    lines.push(
        "    fn set_field(&mut self, number: usize, field_value: &serde_json::Value) -> pblite::Result<()> {"
            .to_owned(),
    );
    lines.push("        match number {".to_owned());
    for field in &message.fields {
        let is_boxed = boxed.contains(&(message.name.clone(), field.name.clone()));
        lines.push(generate_arm(field, is_boxed));
    }
    lines.push("            _ => {}".to_owned());
    lines.push("        };".to_owned());
    lines.push("        Ok(())".to_owned());
    lines.push("    }".to_owned());
    lines.push("}".to_owned());

    lines.join("\n")
}

/// One struct member. The serde rename preserves the schema's own field
/// name; only `Option` members get `skip_serializing_if`.
fn generate_member(field: &Field, is_boxed: bool) -> String {
    let mut lines = Vec::new();
    if field.cardinality != Cardinality::Required {
        lines.push("    #[serde(skip_serializing_if = \"Option::is_none\")]".to_owned());
    }
    lines.push(format!("    #[serde(rename = \"{}\")]", field.name));
    lines.push(format!(
        "    pub {}: {},",
        sanitize_name(&field.name),
        rust_type(field, is_boxed)
    ));
    lines.join("\n")
}

/// One dispatch arm, keyed by the zero-based wire position `number - 1`.
/// A `required` field decodes through the optional reader and falls back to
/// its default when the wire value is null.
fn generate_arm(field: &Field, is_boxed: bool) -> String {
    let index = field.number - 1;
    let name = sanitize_name(&field.name);
    let method = read_method(field, is_boxed);
    match read_shape(field.cardinality) {
        ReadShape::Array => format!(
            "            {} => self.{} = pblite::read_array(field_value, &{})?,",
            index, name, method
        ),
        ReadShape::Optional if field.cardinality == Cardinality::Required => format!(
            "            {} => self.{} = pblite::read_optional(field_value, &{})?.unwrap_or_default(),",
            index, name, method
        ),
        ReadShape::Optional => format!(
            "            {} => self.{} = pblite::read_optional(field_value, &{})?,",
            index, name, method
        ),
    }
}

fn generate_enum(def: &EnumDef) -> String {
    let mut lines = Vec::new();

    lines.push("#[derive(Debug, Default, PartialEq, Clone, Serialize)]".to_owned());
    lines.push(format!("pub enum {} {{", def.name));
    for (i, value) in def.values.iter().enumerate() {
        if i == 0 {
            lines.push("    #[default]".to_owned());
        }
        lines.push(format!("    {},", variant(&value.name)));
    }
    lines.push("}".to_owned());

    lines.push(format!("impl Enum for {} {{", def.name));
    lines.push("    fn from_u32(value: u32) -> Self {".to_owned());
    lines.push("        match value {".to_owned());
    for value in &def.values {
        lines.push(format!(
            "            {} => {}::{},",
            value.number,
            def.name,
            variant(&value.name)
        ));
    }
    // wire numbers without a declared match decode to the first declared
    // value, whatever its own number is
    lines.push(format!("            _ => {}::{},", def.name, variant(&def.values[0].name)));
    lines.push("        }".to_owned());
    lines.push("    }".to_owned());
    lines.push("}".to_owned());

    lines.join("\n")
}

fn variant(value_name: &str) -> String {
    sanitize_name(&enum_variant_name(value_name))
}
