use super::SchemaShape;
use crate::error::MergeError;
use serde_json::{Map, Value};

/// Reconciles an inherited schema with a locally declared one.
///
/// Implementations must let `local` win on every property key both schemas
/// declare and keep properties only `base` declares. The composition engine
/// treats any error as fatal.
pub trait SchemaMerger: Send + Sync {
    fn merge(&self, base: &SchemaShape, local: &SchemaShape) -> Result<SchemaShape, MergeError>;
}

impl<F> SchemaMerger for F
where
    F: Fn(&SchemaShape, &SchemaShape) -> Result<SchemaShape, MergeError> + Send + Sync,
{
    fn merge(&self, base: &SchemaShape, local: &SchemaShape) -> Result<SchemaShape, MergeError> {
        self(base, local)
    }
}

/// Merger for JSON Schema objects
///
/// - Properties: union, local definition wins on collision
/// - `required`: inherited names whose property was not redefined locally, then
///   the local `required` list
/// - Other keywords (`additionalProperties`, `description`, ...): local wins
///
/// Anything other than two object schemas is rejected with
/// [`MergeError::UnsupportedSchemaFamily`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSchemaMerger;

impl SchemaMerger for ObjectSchemaMerger {
    fn merge(&self, base: &SchemaShape, local: &SchemaShape) -> Result<SchemaShape, MergeError> {
        let (Value::Object(base_obj), Value::Object(local_obj)) = (base.as_value(), local.as_value())
        else {
            return Err(unsupported(base, local));
        };
        if !base.is_object() || !local.is_object() {
            return Err(unsupported(base, local));
        }

        let mut merged = base_obj.clone();
        for (key, value) in local_obj {
            if key != "properties" && key != "required" {
                merged.insert(key.clone(), value.clone());
            }
        }
        merged.insert("type".to_string(), Value::String("object".to_string()));

        let empty = Map::new();
        let local_props = local.properties().unwrap_or(&empty);
        let mut properties = base.properties().cloned().unwrap_or_default();
        for (name, schema) in local_props {
            properties.insert(name.clone(), schema.clone());
        }
        merged.insert("properties".to_string(), Value::Object(properties));

        let mut required: Vec<Value> = Vec::new();
        for name in base.required() {
            if !local_props.contains_key(name) {
                push_unique(&mut required, name);
            }
        }
        for name in local.required() {
            push_unique(&mut required, name);
        }
        if !required.is_empty() {
            merged.insert("required".to_string(), Value::Array(required));
        } else {
            merged.remove("required");
        }

        Ok(SchemaShape::new(Value::Object(merged)))
    }
}

fn push_unique(list: &mut Vec<Value>, name: &str) {
    if !list.iter().any(|v| v.as_str() == Some(name)) {
        list.push(Value::String(name.to_string()));
    }
}

fn unsupported(base: &SchemaShape, local: &SchemaShape) -> MergeError {
    MergeError::UnsupportedSchemaFamily {
        base: base.family(),
        override_: local.family(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_property_wins() {
        let shared = SchemaShape::object([
            ("x-tenant-id", json!({"type": "string"})),
            ("x-api-version", json!({"type": "string", "enum": ["1"]})),
        ]);
        let local = SchemaShape::object([("x-api-version", json!({"type": "string", "enum": ["2"]}))]);

        let merged = ObjectSchemaMerger.merge(&shared, &local).unwrap();
        assert_eq!(merged.property("x-api-version"), Some(&json!({"type": "string", "enum": ["2"]})));
        assert_eq!(merged.property("x-tenant-id"), Some(&json!({"type": "string"})));
    }

    #[test]
    fn test_required_follows_winning_definition() {
        let shared = SchemaShape::object([
            ("a", json!({"type": "string"})),
            ("b", json!({"type": "string"})),
        ])
        .with_required(["a", "b"]);
        let local = SchemaShape::object([("b", json!({"type": "integer"}))]);

        let merged = ObjectSchemaMerger.merge(&shared, &local).unwrap();
        assert_eq!(merged.required(), vec!["a"]);
    }

    #[test]
    fn test_rejects_non_object_schemas() {
        let shared = SchemaShape::object([("a", json!({"type": "string"}))]);
        let local = SchemaShape::new(json!({"type": "string"}));
        let err = ObjectSchemaMerger.merge(&shared, &local).unwrap_err();
        assert_eq!(
            err,
            MergeError::UnsupportedSchemaFamily {
                base: "object".into(),
                override_: "string".into()
            }
        );
    }

    #[test]
    fn test_closures_are_mergers() {
        let always_local =
            |_: &SchemaShape, local: &SchemaShape| -> Result<SchemaShape, MergeError> { Ok(local.clone()) };
        let a = SchemaShape::object([("a", json!({}))]);
        let b = SchemaShape::object([("b", json!({}))]);
        assert_eq!(always_local.merge(&a, &b).unwrap(), b);
    }
}
