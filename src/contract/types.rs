use crate::schema::SchemaShape;
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response schemas keyed by HTTP status code
pub type ResponseMap = BTreeMap<u16, SchemaShape>;

/// One API endpoint
///
/// A node is always a leaf of the route tree. Nested routes live in
/// [`RouteGroup`](crate::tree::RouteGroup)s, never inside a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractNode {
    #[serde(with = "method_serde")]
    pub method: Method,
    /// Path template, placeholders written as `{name}` or `:name`
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_params: Option<SchemaShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<SchemaShape>,
    #[serde(default, alias = "body", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<SchemaShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<SchemaShape>,
    #[serde(default, deserialize_with = "status_keys::deserialize")]
    pub responses: ResponseMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Free-form metadata, carried through untouched
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub meta: Value,
    // Path as declared, before any prefix was applied. Bookkeeping for the
    // composition engine; never serialized.
    #[serde(skip)]
    declared_path: Option<String>,
}

impl ContractNode {
    /// Create a node with no schemas and no responses
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ContractNode {
            method,
            path: path.into(),
            path_params: None,
            query_params: None,
            request_body: None,
            headers: None,
            responses: ResponseMap::new(),
            summary: None,
            description: None,
            deprecated: false,
            meta: Value::Null,
            declared_path: None,
        }
    }

    /// The path before composition prefixed it
    pub fn declared_path(&self) -> &str {
        self.declared_path.as_deref().unwrap_or(&self.path)
    }

    pub(crate) fn apply_prefix(&mut self, prefix: &str) {
        if prefix.is_empty() {
            return;
        }
        if self.declared_path.is_none() {
            self.declared_path = Some(self.path.clone());
        }
        self.path = format!("{prefix}{}", self.path);
    }
}

mod method_serde {
    use http::Method;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Method, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
            .map_err(|_| de::Error::custom(format!("invalid HTTP method '{raw}'")))
    }
}

// Status codes arrive as string keys (JSON) or integer keys (YAML), also
// inside `kind`-tagged trees where serde buffers the input.
mod status_keys {
    use super::ResponseMap;
    use crate::schema::SchemaShape;
    use serde::de::{self, Deserializer, Visitor};
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fmt;

    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct StatusKey(u16);

    impl<'de> Deserialize<'de> for StatusKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct KeyVisitor;

            impl Visitor<'_> for KeyVisitor {
                type Value = StatusKey;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("an HTTP status code")
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<StatusKey, E> {
                    u16::try_from(v)
                        .map(StatusKey)
                        .map_err(|_| E::custom(format!("status code {v} out of range")))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<StatusKey, E> {
                    u16::try_from(v)
                        .map(StatusKey)
                        .map_err(|_| E::custom(format!("status code {v} out of range")))
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<StatusKey, E> {
                    v.trim()
                        .parse::<u16>()
                        .map(StatusKey)
                        .map_err(|_| E::custom(format!("invalid status code '{v}'")))
                }
            }

            deserializer.deserialize_any(KeyVisitor)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ResponseMap, D::Error> {
        let raw = BTreeMap::<StatusKey, SchemaShape>::deserialize(deserializer)?;
        Ok(raw.into_iter().map(|(k, v)| (k.0, v)).collect())
    }
}
