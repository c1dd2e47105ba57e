use super::ContractNode;
use crate::schema::SchemaShape;
use crate::tree::RouteTree;
use serde_json::Value;

/// Fluent setters. None of them validate; conformance is checked when the
/// tree is composed or linted.
///
/// ```
/// use brrtcontract::contract::ContractNode;
/// use brrtcontract::schema::SchemaShape;
/// use http::Method;
/// use serde_json::json;
///
/// let node = ContractNode::new(Method::POST, "/posts")
///     .body(SchemaShape::object([("title", json!({"type": "string"}))]))
///     .response(201, SchemaShape::new(json!({"type": "object"})))
///     .summary("Create a post");
/// assert_eq!(node.responses.len(), 1);
/// ```
impl ContractNode {
    #[must_use]
    pub fn path_params(mut self, schema: SchemaShape) -> Self {
        self.path_params = Some(schema);
        self
    }

    #[must_use]
    pub fn query_params(mut self, schema: SchemaShape) -> Self {
        self.query_params = Some(schema);
        self
    }

    #[must_use]
    pub fn body(mut self, schema: SchemaShape) -> Self {
        self.request_body = Some(schema);
        self
    }

    #[must_use]
    pub fn headers(mut self, schema: SchemaShape) -> Self {
        self.headers = Some(schema);
        self
    }

    /// Add or replace the schema for one status code
    #[must_use]
    pub fn response(mut self, status: u16, schema: SchemaShape) -> Self {
        self.responses.insert(status, schema);
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    #[must_use]
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }
}

/// Tag a node as a tree leaf. The node itself is returned unchanged.
pub fn endpoint(node: ContractNode) -> RouteTree {
    RouteTree::Endpoint(node)
}
