//! # CLI Module
//!
//! Command-line access to contract documents: list the composed routes, inspect
//! one route, lint the whole contract.
//!
//! ## Commands
//!
//! ### `paths`
//!
//! List every endpoint of the composed contract:
//!
//! ```bash
//! brrtcontract paths --contract blog.yaml --config compose.toml
//! ```
//!
//! ### `show`
//!
//! Print the resolved route for one dot path as JSON:
//!
//! ```bash
//! brrtcontract show --contract blog.yaml --route posts.comments.createOne
//! ```
//!
//! ### `lint`
//!
//! Run the contract linter. Exits with status 1 when an error-level issue is found:
//!
//! ```bash
//! brrtcontract lint --contract blog.yaml --errors-only
//! ```
//!
//! `--config` is accepted by every command; `BRRTC_PATH_PREFIX` and `BRRTC_MERGE`
//! override what it sets.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, run_cli, Cli, Commands, ContractArgs};
