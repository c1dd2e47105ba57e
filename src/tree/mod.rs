//! # Tree Module
//!
//! The route tree and its structural queries.
//!
//! A [`RouteTree`] is either an endpoint ([`ContractNode`](crate::contract::ContractNode))
//! or a [`RouteGroup`] mapping string keys to further trees. Endpoints are addressed
//! from the root by a [`DotPath`] such as `posts.comments.replies.createOne`.
//!
//! ## Queries
//!
//! - [`RouteGroup::all_dot_paths`] - every endpoint path, no group paths
//! - [`RouteGroup::node_at_path`] - endpoint lookup by dot path
//! - [`RouteGroup::endpoints`] - `(DotPath, &ContractNode)` pairs, depth first
//!
//! Keys must be non-empty and must not contain `.`; [`RouteGroup::validate_keys`]
//! checks this and the composition engine runs it before touching the tree.

mod core;
mod path;

pub use core::*;
pub use path::*;
