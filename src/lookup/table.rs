use super::ResolvedRoute;
use crate::error::ContractError;
use crate::tree::{DotPath, RouteGroup};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Dot path → resolved route, for every endpoint of a contract
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RouteLookup {
    routes: BTreeMap<DotPath, ResolvedRoute>,
}

impl RouteLookup {
    pub fn from_group(group: &RouteGroup) -> Self {
        let routes: BTreeMap<DotPath, ResolvedRoute> = group
            .endpoints()
            .into_iter()
            .map(|(path, node)| (path.clone(), ResolvedRoute::from_node(path, node)))
            .collect();
        debug!(routes = routes.len(), "Built route lookup");
        RouteLookup { routes }
    }

    /// Route at `path`, or [`ContractError::UnknownRoute`]
    pub fn get(&self, path: &str) -> Result<&ResolvedRoute, ContractError> {
        self.routes
            .get(path)
            .ok_or_else(|| ContractError::UnknownRoute {
                path: path.to_string(),
            })
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn dot_paths(&self) -> impl Iterator<Item = &DotPath> {
        self.routes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DotPath, &ResolvedRoute)> {
        self.routes.iter()
    }
}

impl<'a> IntoIterator for &'a RouteLookup {
    type Item = (&'a DotPath, &'a ResolvedRoute);
    type IntoIter = std::collections::btree_map::Iter<'a, DotPath, ResolvedRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
