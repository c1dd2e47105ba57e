//! # brrtcontract
//!
//! **brrtcontract** composes nested, type-annotated HTTP route declarations into a
//! single router contract with accumulated path prefixes and merged shared headers,
//! addressable by dot path.
//!
//! ## Overview
//!
//! Route contracts describe endpoints as data: method, path, and schemas for path
//! params, query, body, headers and responses. Large APIs are declared as a tree of
//! groups, each group optionally contributing a path prefix and headers every
//! endpoint below it shares. Composition folds the tree once:
//!
//! - every endpoint path becomes `outer prefix + ... + inner prefix + declared path`
//! - shared headers accumulate down the whole chain and merge with local headers
//!   (local fields win) through a pluggable [`SchemaMerger`](schema::SchemaMerger)
//! - the result is flattened into a [`RouteLookup`](lookup::RouteLookup) keyed by
//!   dot path (`posts.comments.createOne`)
//!
//! ## Architecture
//!
//! - **[`schema`]** - schema adapter ([`StandardSchema`](schema::StandardSchema),
//!   [`SchemaShape`](schema::SchemaShape)) and header mergers
//! - **[`contract`]** - the endpoint leaf, [`ContractNode`](contract::ContractNode)
//! - **[`tree`]** - route tree, groups and dot paths
//! - **[`compose`]** - [`define_router_contract`](compose::define_router_contract)
//! - **[`lookup`]** - dot-path projection with `{input, output}` schema pairs
//! - **[`typed`]** - compile-time endpoint declarations checked against the contract
//! - **[`load`]** - YAML/JSON contract documents
//! - **[`linter`]** - structural checks over a composed contract
//! - **[`config`]** / **[`logging`]** - ambient setup for the CLI and services
//! - **[`cli`]** - the `brrtcontract` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtcontract::compose::{define_router_contract, ComposeOptions};
//! use brrtcontract::contract::ContractNode;
//! use brrtcontract::schema::{ObjectSchemaMerger, SchemaShape};
//! use brrtcontract::tree::RouteGroup;
//! use http::Method;
//! use serde_json::json;
//!
//! let tenant = SchemaShape::object([("x-tenant-id", json!({"type": "string"}))]);
//!
//! let tree = RouteGroup::new().route(
//!     "posts",
//!     RouteGroup::new()
//!         .with_path_prefix("/posts")
//!         .route("getOne", ContractNode::new(Method::GET, "/{id}")
//!             .response(200, SchemaShape::object([("id", json!({"type": "string"}))]))),
//! );
//!
//! let contract = define_router_contract(
//!     tree,
//!     ComposeOptions::new()
//!         .path_prefix("/api")
//!         .shared_headers(tenant)
//!         .merger(ObjectSchemaMerger),
//! )?;
//!
//! let lookup = contract.lookup();
//! let route = lookup.get("posts.getOne")?;
//! assert_eq!(route.path, "/api/posts/{id}");
//! assert!(route.headers.is_some());
//! # Ok::<(), brrtcontract::ContractError>(())
//! ```

pub mod cli;
pub mod compose;
pub mod config;
pub mod contract;
mod error;
pub mod linter;
pub mod load;
pub mod logging;
pub mod lookup;
pub mod schema;
pub mod tree;
pub mod typed;

pub use compose::{define_router_contract, ComposeOptions, RouterContract};
pub use error::{ContractError, MergeError};
pub use load::{load_contract, ContractDocument};
pub use lookup::{ResolvedRoute, RouteLookup};
