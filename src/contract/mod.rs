//! # Contract Module
//!
//! The declarative shape of a single endpoint.
//!
//! A [`ContractNode`] holds the method, path template, optional path/query/body/
//! header schemas, the per-status response schemas and free-form metadata. Building
//! one has no side effects and performs no validation; [`endpoint`] wraps a node so
//! it can be placed in a [`RouteGroup`](crate::tree::RouteGroup).
//!
//! Bookkeeping the composition engine needs (the path as originally declared) is
//! kept in a private field that is skipped by serde, so it can never collide with
//! user data or leak into serialized contracts. Resolved data lives in a separate
//! projection, [`ResolvedRoute`](crate::lookup::ResolvedRoute).

mod builder;
mod types;

pub use builder::*;
pub use types::*;
