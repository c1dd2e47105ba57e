//! # Typed Module
//!
//! Compile-time route contracts.
//!
//! ## Overview
//!
//! The runtime tree ([`tree`](crate::tree)) is checked when it is composed. This
//! module adds the type-level view of the same contract so that callers get exact
//! input and output types for a named endpoint:
//!
//! - **[`Endpoint`]** - method, dot path and the schema types of one endpoint
//! - **[`Group`]** - a group key plus the header slot it shares with its children
//! - **[`Nested`]** - an endpoint mounted in a group; dot paths are prefixed and
//!   header slots merged through [`MergeHeaders`]
//! - **[`Scoped`]** - the key-less outermost level carrying the shared headers
//!   given to [`ComposeOptions`](crate::compose::ComposeOptions)
//! - **[`TypedRoute`]** - a resolved runtime route checked against an [`Endpoint`]
//!
//! ## Header slots
//!
//! Header optionality is three-way: declared locally, inherited from a group, or
//! both. [`NoHeaders`] and [`Headers<S>`] encode this in the type system and
//! [`MergeHeaders`] combines them the same way the composition engine does at
//! runtime: a slot that only inherits still resolves to the inherited schema, and
//! local fields win over inherited ones.
//!
//! ## Usage
//!
//! ```rust
//! use brrtcontract::schema::Json;
//! use brrtcontract::typed::{Endpoint, Group, Headers, Nested, NoHeaders};
//! use http::Method;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Tenant {
//!     #[serde(rename = "x-tenant-id")]
//!     tenant: String,
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Post {
//!     id: String,
//!     title: String,
//! }
//!
//! struct Posts;
//! impl Group for Posts {
//!     const KEY: &'static str = "posts";
//!     type SharedHeaders = Headers<Json<Tenant>>;
//! }
//!
//! struct GetOne;
//! impl Endpoint for GetOne {
//!     type PathParams = ();
//!     type Query = ();
//!     type Body = ();
//!     type Headers = NoHeaders;
//!     type Response = Json<Post>;
//!     fn method() -> Method { Method::GET }
//!     fn dot_path() -> String { "getOne".into() }
//! }
//!
//! type GetPost = Nested<Posts, GetOne>;
//! assert_eq!(GetPost::dot_path(), "posts.getOne");
//! ```

mod algebra;
mod core;

pub use algebra::*;
pub use core::*;
