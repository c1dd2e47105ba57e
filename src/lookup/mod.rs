//! # Lookup Module
//!
//! Flattened, dot-path addressable view of a composed contract.
//!
//! [`RouteLookup`] maps every endpoint's [`DotPath`](crate::tree::DotPath) to a
//! [`ResolvedRoute`]: method, final path, `{input, output}` schema pairs for path
//! params, query params, body and headers, and the response map collapsed into a
//! [`ResponseUnion`]. Each entry repeats its own dot path as `path_chain`.
//!
//! ```rust
//! use brrtcontract::compose::{define_router_contract, ComposeOptions};
//! use brrtcontract::contract::ContractNode;
//! use brrtcontract::tree::RouteGroup;
//! use http::Method;
//!
//! let tree = RouteGroup::new().route("posts", RouteGroup::new()
//!     .route("getOne", ContractNode::new(Method::GET, "/posts/{id}")));
//! let lookup = define_router_contract(tree, ComposeOptions::new().path_prefix("/api"))
//!     .unwrap()
//!     .lookup();
//!
//! let route = lookup.get("posts.getOne").unwrap();
//! assert_eq!(route.path, "/api/posts/{id}");
//! assert_eq!(route.path_chain.as_str(), "posts.getOne");
//! assert!(lookup.get("posts.missing").is_err());
//! ```

mod resolve;
mod table;

pub use resolve::*;
pub use table::*;
