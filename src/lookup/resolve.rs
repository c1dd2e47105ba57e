use crate::contract::ContractNode;
use crate::error::ContractError;
use crate::schema::{SchemaPair, SchemaShape};
use crate::tree::DotPath;
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::collections::HashMap;

// `{id}` (OpenAPI style) or `:id` (express style)
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}|:([A-Za-z_][A-Za-z0-9_]*)")
        .expect("placeholder regex should be valid")
});

/// One member of a [`ResponseUnion`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseVariant {
    pub status: u16,
    pub schema: SchemaPair,
}

/// The per-status response map collapsed into a union discriminated by status
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponseUnion {
    variants: Vec<ResponseVariant>,
}

impl ResponseUnion {
    pub fn variants(&self) -> &[ResponseVariant] {
        &self.variants
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn statuses(&self) -> Vec<u16> {
        self.variants.iter().map(|v| v.status).collect()
    }

    pub fn for_status(&self, status: u16) -> Option<&ResponseVariant> {
        self.variants.iter().find(|v| v.status == status)
    }

    /// Lowest declared 2xx variant
    pub fn success(&self) -> Option<&ResponseVariant> {
        self.variants.iter().find(|v| (200..300).contains(&v.status))
    }

    /// The union as one JSON Schema over `{status, body}` envelopes
    ///
    /// ```json
    /// { "oneOf": [ { "type": "object",
    ///                "properties": { "status": { "const": 200 }, "body": { ... } },
    ///                "required": ["status", "body"] } ] }
    /// ```
    ///
    /// An empty union admits nothing and renders as `false`.
    pub fn as_schema(&self) -> SchemaShape {
        if self.variants.is_empty() {
            return SchemaShape::new(Value::Bool(false));
        }
        let members: Vec<Value> = self
            .variants
            .iter()
            .map(|v| {
                json!({
                    "type": "object",
                    "properties": {
                        "status": { "const": v.status },
                        "body": v.schema.output.as_value()
                    },
                    "required": ["status", "body"]
                })
            })
            .collect();
        SchemaShape::new(json!({ "oneOf": members }))
    }
}

/// Read-only projection of a composed endpoint
///
/// Every schema is resolved into its input/output pair; `path_chain` repeats the
/// dot path the route is registered under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub declared_path: String,
    pub path_params: Option<SchemaPair>,
    pub query_params: Option<SchemaPair>,
    pub request_body: Option<SchemaPair>,
    pub headers: Option<SchemaPair>,
    pub response: ResponseUnion,
    pub path_chain: DotPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub meta: Value,
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}

#[derive(Clone, Copy)]
enum Side {
    Input,
    Output,
}

impl ResolvedRoute {
    pub fn from_node(path_chain: DotPath, node: &ContractNode) -> Self {
        ResolvedRoute {
            method: node.method.clone(),
            path: node.path.clone(),
            declared_path: node.declared_path().to_string(),
            path_params: node.path_params.as_ref().map(SchemaShape::pair),
            query_params: node.query_params.as_ref().map(SchemaShape::pair),
            request_body: node.request_body.as_ref().map(SchemaShape::pair),
            headers: node.headers.as_ref().map(SchemaShape::pair),
            response: ResponseUnion {
                variants: node
                    .responses
                    .iter()
                    .map(|(status, schema)| ResponseVariant {
                        status: *status,
                        schema: schema.pair(),
                    })
                    .collect(),
            },
            path_chain,
            summary: node.summary.clone(),
            description: node.description.clone(),
            deprecated: node.deprecated,
            meta: node.meta.clone(),
        }
    }

    /// Placeholder names in path order
    pub fn path_param_names(&self) -> Vec<String> {
        placeholder_names(&self.path)
    }

    /// Substitute placeholders with percent-encoded values
    pub fn render_path(&self, params: &HashMap<String, String>) -> Result<String, ContractError> {
        let mut rendered = String::with_capacity(self.path.len());
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&self.path) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2))) else {
                continue;
            };
            let value = params.get(name.as_str()).ok_or_else(|| ContractError::MissingPathParam {
                route: self.path_chain.to_string(),
                name: name.as_str().to_string(),
            })?;
            rendered.push_str(&self.path[last..whole.start()]);
            rendered.push_str(&urlencoding::encode(value));
            last = whole.end();
        }
        rendered.push_str(&self.path[last..]);
        Ok(rendered)
    }

    pub fn validate_headers(&self, value: &Value) -> Result<(), ContractError> {
        self.check("headers", self.headers.as_ref(), Side::Input, value)
    }

    pub fn validate_path_params(&self, value: &Value) -> Result<(), ContractError> {
        self.check("path params", self.path_params.as_ref(), Side::Input, value)
    }

    pub fn validate_query(&self, value: &Value) -> Result<(), ContractError> {
        self.check("query params", self.query_params.as_ref(), Side::Input, value)
    }

    pub fn validate_body(&self, value: &Value) -> Result<(), ContractError> {
        self.check("request body", self.request_body.as_ref(), Side::Input, value)
    }

    /// Validate a response body against the output schema declared for `status`
    pub fn validate_response(&self, status: u16, value: &Value) -> Result<(), ContractError> {
        let target = format!("response {status}");
        match self.response.for_status(status) {
            Some(variant) => self.check(&target, Some(&variant.schema), Side::Output, value),
            None => Err(ContractError::Validation {
                route: self.path_chain.to_string(),
                target,
                errors: vec![format!(
                    "status {status} is not declared (declared: {:?})",
                    self.response.statuses()
                )],
            }),
        }
    }

    fn check(
        &self,
        target: &str,
        pair: Option<&SchemaPair>,
        side: Side,
        value: &Value,
    ) -> Result<(), ContractError> {
        let Some(pair) = pair else {
            return Ok(());
        };
        let schema = match side {
            Side::Input => &pair.input,
            Side::Output => &pair.output,
        };
        schema.validate(value).map_err(|errors| ContractError::Validation {
            route: self.path_chain.to_string(),
            target: target.to_string(),
            errors,
        })
    }
}

/// Path template with every placeholder replaced by `{}`
///
/// `/posts/{id}` and `/posts/:postId` both become `/posts/{}`.
pub fn normalize_template(path: &str) -> String {
    PLACEHOLDER.replace_all(path, "{}").into_owned()
}

/// Placeholder names of a path template, in order
pub fn placeholder_names(path: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(path)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}
