//! JSON serializer for emitted type definitions.
//!
//! Produces a single neutral JSON document from an ordered sequence of
//! [`TypeDefinition`]s. This is the interchange form handed to the
//! downstream grammar serializer; rendering into a concrete grammar/schema
//! language happens outside this crate.

use serde_json::{json, Map, Value};

use crate::model::{ResolvedField, SemanticType, TypeDefinition};

/// Serializes the emitted definitions to a JSON `Value`.
///
/// The returned value can be pretty-printed with
/// [`serde_json::to_string_pretty`]. Definition order is preserved, so a
/// byte-identical input graph yields a byte-identical document.
#[must_use]
pub fn to_json(definitions: &[TypeDefinition]) -> Value {
    let types: Vec<Value> = definitions.iter().map(definition_to_json).collect();
    json!({ "types": types })
}

fn definition_to_json(def: &TypeDefinition) -> Value {
    let fields: Vec<Value> = def.fields.iter().map(field_to_json).collect();
    json!({
        "name": def.name,
        "parents": def.parents,
        "fields": fields,
    })
}

fn field_to_json(field: &ResolvedField) -> Value {
    let mut canonical = Map::new();
    for (role, templates) in field.canonical.iter() {
        if !templates.is_empty() {
            canonical.insert(role.as_str().to_owned(), json!(templates));
        }
    }
    json!({
        "name": field.name,
        "type": semantic_to_json(&field.semantic_type),
        "canonical": Value::Object(canonical),
        "filterable": field.filterable,
        "source": field.source_type,
    })
}

fn semantic_to_json(t: &SemanticType) -> Value {
    match t {
        SemanticType::String => json!({ "kind": "string" }),
        SemanticType::Number => json!({ "kind": "number" }),
        SemanticType::Currency => json!({ "kind": "currency" }),
        SemanticType::Measure(unit) => json!({ "kind": "measure", "unit": unit }),
        SemanticType::Date => json!({ "kind": "date" }),
        SemanticType::Time => json!({ "kind": "time" }),
        SemanticType::Boolean => json!({ "kind": "boolean" }),
        SemanticType::Enumerated(class) => json!({ "kind": "enum", "class": class }),
        SemanticType::Compound { class, fields } => {
            let fields: Vec<Value> = fields.iter().map(field_to_json).collect();
            json!({ "kind": "compound", "class": class, "fields": fields })
        }
        SemanticType::Entity(class) => json!({ "kind": "entity", "class": class }),
        SemanticType::Array(inner) => json!({ "kind": "array", "of": semantic_to_json(inner) }),
    }
}
