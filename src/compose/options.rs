use crate::schema::{SchemaMerger, SchemaShape};
use std::fmt;
use std::sync::Arc;

/// Settings applied by [`define_router_contract`](super::define_router_contract)
/// on top of whatever the tree's own groups declare
///
/// # Example
///
/// ```rust
/// use brrtcontract::compose::ComposeOptions;
/// use brrtcontract::schema::{ObjectSchemaMerger, SchemaShape};
/// use serde_json::json;
///
/// let options = ComposeOptions::new()
///     .path_prefix("/api/v1")
///     .shared_headers(SchemaShape::object([("x-tenant-id", json!({"type": "string"}))]))
///     .merger(ObjectSchemaMerger);
/// assert!(options.has_merger());
/// ```
#[derive(Clone, Default)]
pub struct ComposeOptions {
    /// Prepended to every endpoint path, outside any group prefix
    pub path_prefix: Option<String>,
    /// Outermost shared header schema
    pub shared_headers: Option<SchemaShape>,
    merger: Option<Arc<dyn SchemaMerger>>,
}

impl ComposeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn shared_headers(mut self, headers: SchemaShape) -> Self {
        self.shared_headers = Some(headers);
        self
    }

    /// Set the function that reconciles shared and local header schemas
    #[must_use]
    pub fn merger(mut self, merger: impl SchemaMerger + 'static) -> Self {
        self.merger = Some(Arc::new(merger));
        self
    }

    pub fn has_merger(&self) -> bool {
        self.merger.is_some()
    }

    pub(crate) fn merger_ref(&self) -> Option<&dyn SchemaMerger> {
        self.merger.as_deref()
    }
}

impl fmt::Debug for ComposeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComposeOptions")
            .field("path_prefix", &self.path_prefix)
            .field("shared_headers", &self.shared_headers)
            .field("merger", &self.merger.as_ref().map(|_| "<merger>"))
            .finish()
    }
}
