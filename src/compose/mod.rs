//! # Compose Module
//!
//! The tree composition engine: one pass over a route tree that applies path
//! prefixes and shared header schemas to every endpoint.
//!
//! ## Overview
//!
//! [`define_router_contract`] takes ownership of a [`RouteGroup`](crate::tree::RouteGroup)
//! and a set of [`ComposeOptions`], walks the tree depth first and mutates each
//! endpoint in place. Settings accumulate from the outside in:
//!
//! ```text
//! options            path_prefix "/api"     shared_headers {x-tenant-id}
//!   └─ group posts   path_prefix "/posts"   shared_headers {x-locale}
//!        └─ create   path "/"               headers {x-idempotency-key}
//!
//! create.path    = "/api/posts/"
//! create.headers = merge(merge({x-tenant-id}, {x-locale}), {x-idempotency-key})
//! ```
//!
//! Every level merges against everything accumulated above it, so a middle level's
//! headers are never lost. Locally declared fields always win.
//!
//! Independently composed sub-trees can be mounted into a new group and composed
//! again as part of the bigger tree: their group settings were consumed the first
//! time, so only the new outer levels are applied.

mod engine;
mod options;

pub use engine::*;
pub use options::*;
