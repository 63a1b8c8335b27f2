use std::collections::{HashMap, HashSet};

use pblite_schema::{Cardinality, Field, FieldType, MessageDef, Schema};

use crate::error::CodegenError;
use crate::typemap::simple_name;

/// Check that every message/enum reference resolves to a declaration in the
/// same file, and that the kinds line up. protoc has already enforced schema
/// well-formedness; this only guards constructs the generator cannot express
/// (imports, nested types, map entries).
pub fn verify_schema(schema: &Schema) -> Result<(), CodegenError> {
    let messages: HashSet<&str> = schema.messages.iter().map(|m| m.name.as_str()).collect();
    let enums: HashSet<&str> = schema.enums.iter().map(|e| e.name.as_str()).collect();

    for message in &schema.messages {
        for field in &message.fields {
            match &field.ty {
                FieldType::Message(type_name) => {
                    if !messages.contains(simple_name(type_name)) {
                        return Err(unresolved(message, field, type_name));
                    }
                }
                FieldType::Enum(type_name) => {
                    if !enums.contains(simple_name(type_name)) {
                        return Err(unresolved(message, field, type_name));
                    }
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn unresolved(message: &MessageDef, field: &Field, type_name: &str) -> CodegenError {
    CodegenError::Unresolved {
        field:     format!("{}.{}", message.name, field.name),
        type_name: type_name.to_owned(),
    }
}

/// Singular message-typed fields are the edges through which a generated
/// struct could contain itself; repeated fields already indirect through
/// `Vec`. A field's edge lies on a cycle exactly when its target can reach
/// its owner. Returns the `(message, field)` pairs needing `Box`
/// indirection.
pub fn boxed_fields(schema: &Schema) -> HashSet<(String, String)> {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for message in &schema.messages {
        for field in &message.fields {
            if let Some(target) = singular_message_target(field) {
                edges.entry(message.name.as_str()).or_default().push(target);
            }
        }
    }

    let mut boxed = HashSet::new();
    for message in &schema.messages {
        for field in &message.fields {
            if let Some(target) = singular_message_target(field) {
                if reaches(&edges, target, &message.name, &mut HashSet::new()) {
                    boxed.insert((message.name.clone(), field.name.clone()));
                }
            }
        }
    }
    boxed
}

fn singular_message_target(field: &Field) -> Option<&str> {
    match (&field.ty, field.cardinality) {
        (FieldType::Message(type_name), Cardinality::Required | Cardinality::Optional) => {
            Some(simple_name(type_name))
        }
        _ => None,
    }
}

fn reaches<'a>(
    edges: &HashMap<&'a str, Vec<&'a str>>,
    from: &'a str,
    to: &str,
    visited: &mut HashSet<&'a str>,
) -> bool {
    if from == to {
        return true;
    }
    if !visited.insert(from) {
        return false;
    }
    edges
        .get(from)
        .map(|targets| targets.iter().any(|&next| reaches(edges, next, to, visited)))
        .unwrap_or(false)
}
