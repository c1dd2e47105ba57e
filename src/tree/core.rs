use super::path::{validate_route_key, DotPath};
use crate::contract::ContractNode;
use crate::error::ContractError;
use crate::schema::SchemaShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A node of the route tree: an endpoint leaf or a group of further routes
///
/// The variant is explicit. Serialized trees carry a `kind: endpoint | group`
/// tag instead of relying on which keys happen to be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteTree {
    Endpoint(ContractNode),
    Group(RouteGroup),
}

/// Interior node of the route tree
///
/// A group may carry its own `path_prefix` and `shared_headers`. Both apply to
/// every endpoint below it and are folded into those endpoints when the tree is
/// composed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_headers: Option<SchemaShape>,
    #[serde(default)]
    pub routes: BTreeMap<String, RouteTree>,
    #[serde(skip)]
    composed: bool,
}

impl RouteTree {
    pub fn as_endpoint(&self) -> Option<&ContractNode> {
        match self {
            RouteTree::Endpoint(node) => Some(node),
            RouteTree::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&RouteGroup> {
        match self {
            RouteTree::Group(group) => Some(group),
            RouteTree::Endpoint(_) => None,
        }
    }

    pub fn is_endpoint(&self) -> bool {
        matches!(self, RouteTree::Endpoint(_))
    }
}

impl From<ContractNode> for RouteTree {
    fn from(node: ContractNode) -> Self {
        RouteTree::Endpoint(node)
    }
}

impl From<RouteGroup> for RouteTree {
    fn from(group: RouteGroup) -> Self {
        RouteTree::Group(group)
    }
}

impl RouteGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route under `key`, replacing any previous route with that key
    #[must_use]
    pub fn route(mut self, key: impl Into<String>, tree: impl Into<RouteTree>) -> Self {
        self.routes.insert(key.into(), tree.into());
        self
    }

    #[must_use]
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_shared_headers(mut self, headers: SchemaShape) -> Self {
        self.shared_headers = Some(headers);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, tree: impl Into<RouteTree>) {
        self.routes.insert(key.into(), tree.into());
    }

    pub fn get(&self, key: &str) -> Option<&RouteTree> {
        self.routes.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// True once the composition engine has run over this group as its root
    pub fn is_composed(&self) -> bool {
        self.composed
    }

    pub(crate) fn mark_composed(&mut self) {
        self.composed = true;
    }

    /// Check every key below this group
    pub fn validate_keys(&self) -> Result<(), ContractError> {
        for (key, tree) in &self.routes {
            validate_route_key(key)?;
            if let RouteTree::Group(group) = tree {
                group.validate_keys()?;
            }
        }
        Ok(())
    }

    /// Every dot path that names an endpoint, in key order
    ///
    /// Recursion stops at endpoints, so nothing inside a node's own schemas is
    /// ever mistaken for a route. Groups never appear as paths of their own.
    pub fn all_dot_paths(&self) -> Vec<DotPath> {
        self.endpoints().into_iter().map(|(path, _)| path).collect()
    }

    /// Every endpoint with its dot path, depth first in key order
    pub fn endpoints(&self) -> Vec<(DotPath, &ContractNode)> {
        let mut out = Vec::new();
        for (key, tree) in &self.routes {
            collect_endpoints(DotPath::root(key), tree, &mut out);
        }
        out
    }

    pub fn endpoint_count(&self) -> usize {
        self.routes
            .values()
            .map(|tree| match tree {
                RouteTree::Endpoint(_) => 1,
                RouteTree::Group(group) => group.endpoint_count(),
            })
            .sum()
    }

    /// Endpoint at `path`
    ///
    /// Splits on the first `.`, descends into that key and repeats until the
    /// rest is a direct key. `None` when a segment is missing, when a segment
    /// other than the last names an endpoint, or when the path ends on a group.
    pub fn node_at_path(&self, path: &str) -> Option<&ContractNode> {
        match path.split_once('.') {
            Some((head, rest)) => match self.routes.get(head)? {
                RouteTree::Group(group) => group.node_at_path(rest),
                RouteTree::Endpoint(_) => None,
            },
            None => self.routes.get(path)?.as_endpoint(),
        }
    }

    pub fn node_at_path_mut(&mut self, path: &str) -> Option<&mut ContractNode> {
        match path.split_once('.') {
            Some((head, rest)) => match self.routes.get_mut(head)? {
                RouteTree::Group(group) => group.node_at_path_mut(rest),
                RouteTree::Endpoint(_) => None,
            },
            None => match self.routes.get_mut(path)? {
                RouteTree::Endpoint(node) => Some(node),
                RouteTree::Group(_) => None,
            },
        }
    }

    /// Sub-tree (endpoint or group) at `path`
    pub fn subtree_at(&self, path: &str) -> Option<&RouteTree> {
        match path.split_once('.') {
            Some((head, rest)) => self.routes.get(head)?.as_group()?.subtree_at(rest),
            None => self.routes.get(path),
        }
    }
}

fn collect_endpoints<'a>(
    path: DotPath,
    tree: &'a RouteTree,
    out: &mut Vec<(DotPath, &'a ContractNode)>,
) {
    match tree {
        RouteTree::Endpoint(node) => out.push((path, node)),
        RouteTree::Group(group) => {
            for (key, child) in &group.routes {
                collect_endpoints(path.child(key), child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaShape;
    use http::Method;
    use serde_json::json;

    fn blog() -> RouteGroup {
        RouteGroup::new()
            .route(
                "posts",
                RouteGroup::new()
                    .route("list", ContractNode::new(Method::GET, "/posts"))
                    .route(
                        "comments",
                        RouteGroup::new().route(
                            "createOne",
                            ContractNode::new(Method::POST, "/comments").body(SchemaShape::object([(
                                "responses",
                                json!({"type": "string"}),
                            )])),
                        ),
                    ),
            )
            .route("health", ContractNode::new(Method::GET, "/health"))
    }

    #[test]
    fn test_all_dot_paths_lists_only_leaves() {
        let paths: Vec<String> = blog().all_dot_paths().iter().map(|p| p.to_string()).collect();
        assert_eq!(paths, vec!["health", "posts.comments.createOne", "posts.list"]);
    }

    #[test]
    fn test_node_at_path() {
        let tree = blog();
        assert_eq!(
            tree.node_at_path("posts.comments.createOne").map(|n| n.method.clone()),
            Some(Method::POST)
        );
        assert!(tree.node_at_path("posts.comments").is_none());
        assert!(tree.node_at_path("posts.missing").is_none());
        assert!(tree.node_at_path("health.extra").is_none());
        assert!(tree.subtree_at("posts.comments").is_some_and(|t| !t.is_endpoint()));
    }

    #[test]
    fn test_endpoint_count_and_mut_access() {
        let mut tree = blog();
        assert_eq!(tree.endpoint_count(), 3);
        if let Some(node) = tree.node_at_path_mut("posts.list") {
            node.path = "/all-posts".to_string();
        }
        assert_eq!(tree.node_at_path("posts.list").map(|n| n.path.as_str()), Some("/all-posts"));
    }

    #[test]
    fn test_validate_keys_finds_nested_dot() {
        let tree = RouteGroup::new().route(
            "posts",
            RouteGroup::new().route("by.id", ContractNode::new(Method::GET, "/x")),
        );
        assert!(matches!(
            tree.validate_keys(),
            Err(ContractError::InvalidRouteKey { key, .. }) if key == "by.id"
        ));
    }

    #[test]
    fn test_kind_tagged_roundtrip_from_yaml() {
        let yaml = r#"
path_prefix: /api
routes:
  posts:
    kind: group
    routes:
      getOne:
        kind: endpoint
        method: GET
        path: /posts/{id}
        responses:
          200: { type: object }
          404: { type: object }
"#;
        let group: RouteGroup = serde_yaml::from_str(yaml).unwrap();
        let node = group.node_at_path("posts.getOne").unwrap();
        assert_eq!(node.responses.keys().copied().collect::<Vec<_>>(), vec![200, 404]);
        assert_eq!(group.path_prefix.as_deref(), Some("/api"));
    }
}
