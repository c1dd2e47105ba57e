use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Minimal schema interface: two compile-time projections and nothing else.
///
/// Any schema representation can plug into the contract layer by implementing
/// this trait. `Input` is what a caller must provide, `Output` is what a
/// consumer receives after parsing.
pub trait StandardSchema {
    /// Type accepted on the way in
    type Input: Serialize + DeserializeOwned;
    /// Type produced on the way out
    type Output: Serialize + DeserializeOwned;
}

/// Input projection of a schema type
pub type InferInput<S> = <S as StandardSchema>::Input;

/// Output projection of a schema type
pub type InferOutput<S> = <S as StandardSchema>::Output;

/// Absent schema. Both projections are `()`.
impl StandardSchema for () {
    type Input = ();
    type Output = ();
}

impl StandardSchema for SchemaShape {
    type Input = Value;
    type Output = Value;
}

/// Schema whose projections are plain serde types.
///
/// `Json<CreatePost>` has the same input and output type; `Json<Raw, Parsed>`
/// models a schema that transforms while parsing.
pub struct Json<I, O = I>(PhantomData<fn() -> (I, O)>);

impl<I, O> StandardSchema for Json<I, O>
where
    I: Serialize + DeserializeOwned,
    O: Serialize + DeserializeOwned,
{
    type Input = I;
    type Output = O;
}

/// Runtime schema: a JSON Schema document
///
/// This is the value the composition engine moves around and merges. It is
/// intentionally opaque beyond the few structural queries the engine and the
/// bundled merger need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaShape(Value);

/// Request-side and response-side projections of a [`SchemaShape`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaPair {
    /// Schema a caller must satisfy (no `readOnly` properties)
    pub input: SchemaShape,
    /// Schema a consumer receives (no `writeOnly` properties)
    pub output: SchemaShape,
}

impl SchemaShape {
    pub fn new(schema: Value) -> Self {
        SchemaShape(schema)
    }

    /// Build an object schema from `(name, property schema)` pairs.
    ///
    /// ```
    /// use brrtcontract::schema::SchemaShape;
    /// use serde_json::json;
    ///
    /// let headers = SchemaShape::object([("x-tenant-id", json!({"type": "string"}))])
    ///     .with_required(["x-tenant-id"]);
    /// assert!(headers.is_object());
    /// assert_eq!(headers.required(), vec!["x-tenant-id"]);
    /// ```
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let properties: Map<String, Value> = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::String("object".to_string()));
        obj.insert("properties".to_string(), Value::Object(properties));
        SchemaShape(Value::Object(obj))
    }

    /// Mark properties as required. Non-object schemas are returned unchanged.
    #[must_use]
    pub fn with_required<I, K>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        if let Value::Object(obj) = &mut self.0 {
            let mut required: Vec<Value> = obj
                .get("required")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            for name in names {
                let name = Value::String(name.into());
                if !required.contains(&name) {
                    required.push(name);
                }
            }
            obj.insert("required".to_string(), Value::Array(required));
        }
        self
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// True for `{"type": "object", ...}` and for untyped schemas that declare `properties`
    pub fn is_object(&self) -> bool {
        match &self.0 {
            Value::Object(obj) => match obj.get("type") {
                Some(Value::String(t)) => t == "object",
                None => obj.contains_key("properties"),
                _ => false,
            },
            _ => false,
        }
    }

    /// Short human label for the schema's family, used in merge errors
    pub fn family(&self) -> String {
        match &self.0 {
            Value::Bool(_) => "boolean schema".to_string(),
            Value::Object(obj) => match obj.get("type") {
                Some(Value::String(t)) => t.clone(),
                Some(Value::Array(_)) => "multi-type".to_string(),
                _ if obj.contains_key("properties") => "object".to_string(),
                _ => "untyped".to_string(),
            },
            other => format!("non-schema {}", json_kind(other)),
        }
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.0.get("properties").and_then(Value::as_object)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties().and_then(|p| p.get(name))
    }

    pub fn required(&self) -> Vec<&str> {
        self.0
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Request-side projection: drops `readOnly` properties, recursively
    #[must_use]
    pub fn input(&self) -> SchemaShape {
        SchemaShape(project(&self.0, "readOnly"))
    }

    /// Response-side projection: drops `writeOnly` properties, recursively
    #[must_use]
    pub fn output(&self) -> SchemaShape {
        SchemaShape(project(&self.0, "writeOnly"))
    }

    pub fn pair(&self) -> SchemaPair {
        SchemaPair {
            input: self.input(),
            output: self.output(),
        }
    }

    /// Validate `instance` against this schema, collecting every violation
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<String>> {
        let validator = jsonschema::validator_for(&self.0)
            .map_err(|e| vec![format!("invalid schema: {e}")])?;
        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| e.to_string())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl From<Value> for SchemaShape {
    fn from(value: Value) -> Self {
        SchemaShape(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_flagged(schema: &Value, flag: &str) -> bool {
    schema.get(flag).and_then(Value::as_bool).unwrap_or(false)
}

fn project(schema: &Value, drop_flag: &str) -> Value {
    let Value::Object(obj) = schema else {
        return schema.clone();
    };
    let mut out = obj.clone();

    let mut dropped: Vec<String> = Vec::new();
    if let Some(Value::Object(props)) = obj.get("properties") {
        let mut kept = Map::new();
        for (name, prop) in props {
            if is_flagged(prop, drop_flag) {
                dropped.push(name.clone());
            } else {
                kept.insert(name.clone(), project(prop, drop_flag));
            }
        }
        out.insert("properties".to_string(), Value::Object(kept));
    }

    if !dropped.is_empty() {
        if let Some(Value::Array(required)) = out.get_mut("required") {
            required.retain(|r| r.as_str().map_or(true, |n| !dropped.iter().any(|d| d == n)));
        }
    }

    if let Some(items) = obj.get("items") {
        out.insert("items".to_string(), project(items, drop_flag));
    }

    Value::Object(out)
}
