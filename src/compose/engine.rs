use super::ComposeOptions;
use crate::contract::ContractNode;
use crate::error::ContractError;
use crate::lookup::RouteLookup;
use crate::schema::{SchemaMerger, SchemaShape};
use crate::tree::{DotPath, RouteGroup, RouteTree};
use tracing::{debug, error, info, warn};

const ROOT_SCOPE: &str = "<root>";

/// A route tree after composition
///
/// Owns the very group that was passed to [`define_router_contract`], now with
/// prefixed paths and merged headers. Read-only from here on; to nest it in a
/// bigger contract, convert it into a [`RouteTree`] and mount it in a new group.
#[derive(Debug, Clone)]
pub struct RouterContract {
    root: RouteGroup,
}

impl RouterContract {
    pub fn routes(&self) -> &RouteGroup {
        &self.root
    }

    pub fn into_inner(self) -> RouteGroup {
        self.root
    }

    pub fn node(&self, path: &str) -> Option<&ContractNode> {
        self.root.node_at_path(path)
    }

    pub fn dot_paths(&self) -> Vec<DotPath> {
        self.root.all_dot_paths()
    }

    /// Flattened dot-path lookup of fully resolved routes
    pub fn lookup(&self) -> RouteLookup {
        RouteLookup::from_group(&self.root)
    }
}

impl From<RouterContract> for RouteTree {
    fn from(contract: RouterContract) -> Self {
        RouteTree::Group(contract.root)
    }
}

#[derive(Debug, Default)]
struct ComposeStats {
    endpoints: usize,
    merged: usize,
    inherited: usize,
}

/// What an endpoint inherits from everything above it
#[derive(Debug, Clone, Default)]
struct Inherited {
    prefix: String,
    headers: Option<SchemaShape>,
}

/// Compose a route tree in a single depth-first pass
///
/// The options form the outermost level; below them every group adds its own
/// `path_prefix` and merges its own `shared_headers` over the accumulated
/// ones. At each endpoint:
///
/// - `path` becomes the accumulated prefix followed by the declared path
/// - `headers` becomes `merger(accumulated, local)` when both exist, the
///   accumulated schema when the endpoint declares none, and is left alone when
///   nothing was inherited
///
/// Group-level settings are consumed while folding them in, and the root is
/// stamped as composed; composing it again fails with
/// [`ContractError::AlreadyComposed`].
///
/// # Errors
///
/// Nothing is returned on failure; the tree is dropped.
///
/// - [`ContractError::AlreadyComposed`] - `root` came out of an earlier composition
/// - [`ContractError::InvalidRouteKey`] - a key is empty or contains `.`
/// - [`ContractError::MissingSchemaMerger`] - a merge is needed and no merger is
///   set; detected before any node is touched
/// - [`ContractError::HeaderMerge`] - the merger failed
///
/// # Example
///
/// ```rust
/// use brrtcontract::compose::{define_router_contract, ComposeOptions};
/// use brrtcontract::contract::ContractNode;
/// use brrtcontract::tree::RouteGroup;
/// use http::Method;
///
/// let tree = RouteGroup::new().route("posts", RouteGroup::new()
///     .route("list", ContractNode::new(Method::GET, "/posts")));
///
/// let contract = define_router_contract(tree, ComposeOptions::new().path_prefix("/api")).unwrap();
/// assert_eq!(contract.node("posts.list").unwrap().path, "/api/posts");
/// ```
pub fn define_router_contract(
    mut root: RouteGroup,
    options: ComposeOptions,
) -> Result<RouterContract, ContractError> {
    if root.is_composed() {
        warn!("Refusing to compose an already composed route tree");
        return Err(ContractError::AlreadyComposed);
    }
    root.validate_keys()?;

    let merger = options.merger_ref();
    if merger.is_none() {
        if let Some(route) = first_merge_site(&root, None, options.shared_headers.is_some()) {
            error!(route = %route, "Header merge required but no schema merger configured");
            return Err(ContractError::MissingSchemaMerger { route });
        }
    }

    let base = Inherited {
        prefix: options.path_prefix.clone().unwrap_or_default(),
        headers: options.shared_headers.clone(),
    };
    let mut stats = ComposeStats::default();
    compose_group(&mut root, None, &base, merger, &mut stats)?;
    root.mark_composed();

    info!(
        endpoints = stats.endpoints,
        merged_headers = stats.merged,
        inherited_headers = stats.inherited,
        path_prefix = %base.prefix,
        "Route contract composed"
    );
    Ok(RouterContract { root })
}

// Finds the first place a merge would be needed, walking the same way the
// composition pass does.
fn first_merge_site(group: &RouteGroup, path: Option<&DotPath>, inherited: bool) -> Option<String> {
    if inherited && group.shared_headers.is_some() {
        return Some(scope_name(path));
    }
    let inherited = inherited || group.shared_headers.is_some();
    for (key, tree) in &group.routes {
        let child = child_path(path, key);
        let site = match tree {
            RouteTree::Group(sub) => first_merge_site(sub, Some(&child), inherited),
            RouteTree::Endpoint(node) if inherited && node.headers.is_some() => {
                Some(child.to_string())
            }
            RouteTree::Endpoint(_) => None,
        };
        if site.is_some() {
            return site;
        }
    }
    None
}

fn compose_group(
    group: &mut RouteGroup,
    path: Option<&DotPath>,
    inherited: &Inherited,
    merger: Option<&dyn SchemaMerger>,
    stats: &mut ComposeStats,
) -> Result<(), ContractError> {
    let mut here = inherited.clone();
    if let Some(prefix) = group.path_prefix.take() {
        here.prefix.push_str(&prefix);
    }
    if let Some(shared) = group.shared_headers.take() {
        here.headers = Some(match here.headers.take() {
            Some(outer) => merge(merger, &outer, &shared, &scope_name(path))?,
            None => shared,
        });
    }

    for (key, tree) in group.routes.iter_mut() {
        let child = child_path(path, key);
        match tree {
            RouteTree::Group(sub) => compose_group(sub, Some(&child), &here, merger, stats)?,
            RouteTree::Endpoint(node) => compose_endpoint(node, &child, &here, merger, stats)?,
        }
    }
    Ok(())
}

fn compose_endpoint(
    node: &mut ContractNode,
    path: &DotPath,
    inherited: &Inherited,
    merger: Option<&dyn SchemaMerger>,
    stats: &mut ComposeStats,
) -> Result<(), ContractError> {
    node.apply_prefix(&inherited.prefix);
    node.headers = match (inherited.headers.as_ref(), node.headers.take()) {
        (Some(shared), Some(local)) => {
            stats.merged += 1;
            Some(merge(merger, shared, &local, path.as_str())?)
        }
        (Some(shared), None) => {
            stats.inherited += 1;
            Some(shared.clone())
        }
        (None, local) => local,
    };
    stats.endpoints += 1;

    debug!(
        route = %path,
        method = %node.method,
        path = %node.path,
        has_headers = node.headers.is_some(),
        "Composed endpoint"
    );
    Ok(())
}

fn merge(
    merger: Option<&dyn SchemaMerger>,
    base: &SchemaShape,
    local: &SchemaShape,
    route: &str,
) -> Result<SchemaShape, ContractError> {
    let merger = merger.ok_or_else(|| ContractError::MissingSchemaMerger {
        route: route.to_string(),
    })?;
    merger.merge(base, local).map_err(|source| {
        error!(route = %route, error = %source, "Header schema merge failed");
        ContractError::HeaderMerge {
            route: route.to_string(),
            source,
        }
    })
}

fn child_path(parent: Option<&DotPath>, key: &str) -> DotPath {
    match parent {
        Some(p) => p.child(key),
        None => DotPath::root(key),
    }
}

fn scope_name(path: Option<&DotPath>) -> String {
    path.map_or_else(|| ROOT_SCOPE.to_string(), DotPath::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MergeError;
    use crate::schema::ObjectSchemaMerger;
    use http::Method;
    use serde_json::json;

    fn tenant_headers() -> SchemaShape {
        SchemaShape::object([("x-tenant-id", json!({"type": "string"}))]).with_required(["x-tenant-id"])
    }

    #[test]
    fn test_empty_tree_composes() {
        let contract = define_router_contract(RouteGroup::new(), ComposeOptions::new()).unwrap();
        assert!(contract.dot_paths().is_empty());
        assert!(contract.routes().is_composed());
    }

    #[test]
    fn test_group_shared_headers_need_merger_when_stacked() {
        let tree = RouteGroup::new().route(
            "admin",
            RouteGroup::new()
                .with_shared_headers(SchemaShape::object([("x-admin", json!({"type": "string"}))]))
                .route("stats", ContractNode::new(Method::GET, "/stats")),
        );
        let err = define_router_contract(tree, ComposeOptions::new().shared_headers(tenant_headers()))
            .unwrap_err();
        assert_eq!(err, ContractError::MissingSchemaMerger { route: "admin".into() });
    }

    #[test]
    fn test_inherited_only_needs_no_merger() {
        let tree = RouteGroup::new().route("list", ContractNode::new(Method::GET, "/posts"));
        let contract =
            define_router_contract(tree, ComposeOptions::new().shared_headers(tenant_headers())).unwrap();
        assert_eq!(contract.node("list").and_then(|n| n.headers.clone()), Some(tenant_headers()));
    }

    #[test]
    fn test_merger_error_is_fatal() {
        let tree = RouteGroup::new().route(
            "list",
            ContractNode::new(Method::GET, "/posts").headers(SchemaShape::new(json!({"type": "string"}))),
        );
        let err = define_router_contract(
            tree,
            ComposeOptions::new().shared_headers(tenant_headers()).merger(ObjectSchemaMerger),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ContractError::HeaderMerge { ref route, source: MergeError::UnsupportedSchemaFamily { .. } }
                if route == "list"
        ));
    }

    #[test]
    fn test_group_settings_are_consumed() {
        let tree = RouteGroup::new()
            .with_path_prefix("/v1")
            .route("list", ContractNode::new(Method::GET, "/posts"));
        let contract = define_router_contract(tree, ComposeOptions::new()).unwrap();
        assert!(contract.routes().path_prefix.is_none());
        assert_eq!(contract.node("list").map(|n| n.path.as_str()), Some("/v1/posts"));
    }
}
