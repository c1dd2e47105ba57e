//! # Schema Module
//!
//! Validation-library-agnostic schema handling for route contracts.
//!
//! ## Overview
//!
//! The rest of the crate never depends on a concrete schema library. It sees two
//! things:
//!
//! - **[`StandardSchema`]** - a compile-time interface exposing only an input and
//!   an output type ([`InferInput`] / [`InferOutput`]). `()` stands for "no schema".
//! - **[`SchemaShape`]** - the runtime value carried by contract nodes: a JSON
//!   Schema document with request-side ([`SchemaShape::input`]) and response-side
//!   ([`SchemaShape::output`]) projections and `jsonschema`-backed validation.
//!
//! Shared and local header schemas are reconciled by a [`SchemaMerger`]. The
//! engine does not know how to merge schemas itself; [`ObjectSchemaMerger`] covers
//! the JSON Schema object family and any closure with the right signature works too.

mod core;
mod merge;

pub use core::*;
pub use merge::*;
