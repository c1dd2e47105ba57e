//! # Contract Linter Module
//!
//! Structural checks over a composed route contract. Composition itself only
//! rejects what would make the contract unusable (bad keys, missing merger,
//! unmergeable headers); the linter reports the rest.
//!
//! ## Checks Performed
//!
//! 1. **duplicate_route** - two endpoints share method and final path, whatever
//!    their placeholders are called
//! 2. **undeclared_path_param** - a path placeholder has no `path_params` property
//! 3. **unused_path_param** - a `path_params` property does not appear in the path
//! 4. **missing_responses** - an endpoint declares no response
//! 5. **relative_path** - a final path does not start with `/`
//! 6. **body_on_safe_method** - `GET`/`HEAD` endpoint with a request body
//! 7. **invalid_schema** - a schema that does not compile as JSON Schema
//!
//! ## Usage
//!
//! ```rust
//! use brrtcontract::compose::{define_router_contract, ComposeOptions};
//! use brrtcontract::contract::ContractNode;
//! use brrtcontract::linter::{lint_contract, LintSeverity};
//! use brrtcontract::tree::RouteGroup;
//! use http::Method;
//!
//! let tree = RouteGroup::new().route("getOne", ContractNode::new(Method::GET, "/posts/{id}"));
//! let contract = define_router_contract(tree, ComposeOptions::new()).unwrap();
//!
//! let issues = lint_contract(&contract);
//! assert!(issues.iter().any(|i| i.kind == "undeclared_path_param"
//!     && i.severity == LintSeverity::Error));
//! ```

use crate::compose::RouterContract;
use crate::lookup::{normalize_template, ResolvedRoute};
use crate::schema::SchemaPair;
use http::Method;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use tracing::debug;


/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LintSeverity {
    /// The contract describes routes that cannot be served as declared
    Error,
    /// Probably a mistake
    Warning,
    /// Style suggestion
    Info,
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Error => write!(f, "error"),
            LintSeverity::Warning => write!(f, "warning"),
            LintSeverity::Info => write!(f, "info"),
        }
    }
}

/// A lint issue found in a composed contract
#[derive(Debug, Clone, PartialEq)]
pub struct LintIssue {
    /// Dot path of the offending endpoint
    pub location: String,
    pub severity: LintSeverity,
    /// Machine-readable check name, e.g. `duplicate_route`
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint every endpoint of a composed contract
///
/// Issues are ordered by dot path, then by the order of the checks above.
pub fn lint_contract(contract: &RouterContract) -> Vec<LintIssue> {
    let lookup = contract.lookup();
    let mut issues = Vec::new();
    let mut seen: HashMap<(Method, String), String> = HashMap::new();

    for (dot_path, route) in &lookup {
        let location = dot_path.as_str();

        let key = (route.method.clone(), normalize_template(&route.path));
        if let Some(first) = seen.get(&key) {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Error,
                    "duplicate_route",
                    format!("{} {} is already declared by {first}", route.method, route.path),
                )
                .with_suggestion("Change the path or method of one of the endpoints"),
            );
        } else {
            seen.insert(key, location.to_string());
        }

        lint_path_params(&mut issues, location, route);

        if route.response.is_empty() {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Warning,
                    "missing_responses",
                    "Endpoint declares no response schema",
                )
                .with_suggestion("Declare at least the success response, e.g. 200"),
            );
        }

        if !route.path.starts_with('/') {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Warning,
                "relative_path",
                format!("Path '{}' does not start with '/'", route.path),
            ));
        }

        if route.request_body.is_some() && (route.method == Method::GET || route.method == Method::HEAD) {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Warning,
                "body_on_safe_method",
                format!("{} endpoint declares a request body", route.method),
            ));
        }

        lint_schemas(&mut issues, location, route);
    }

    debug!(
        endpoints = lookup.len(),
        issues = issues.len(),
        "Linted route contract"
    );
    issues
}

fn lint_path_params(issues: &mut Vec<LintIssue>, location: &str, route: &ResolvedRoute) {
    let names = route.path_param_names();
    let declared = route
        .path_params
        .as_ref()
        .and_then(|pair| pair.input.properties().cloned())
        .unwrap_or_default();

    for name in &names {
        if !declared.contains_key(name) {
            issues.push(
                LintIssue::new(
                    location,
                    LintSeverity::Error,
                    "undeclared_path_param",
                    format!("Placeholder '{name}' in '{}' has no path_params property", route.path),
                )
                .with_suggestion(format!("Add '{name}' to path_params")),
            );
        }
    }

    for name in declared.keys() {
        if !names.contains(name) {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Warning,
                "unused_path_param",
                format!("path_params property '{name}' does not appear in '{}'", route.path),
            ));
        }
    }
}

fn lint_schemas(issues: &mut Vec<LintIssue>, location: &str, route: &ResolvedRoute) {
    let slots: [(&str, Option<&SchemaPair>); 4] = [
        ("path_params", route.path_params.as_ref()),
        ("query_params", route.query_params.as_ref()),
        ("request_body", route.request_body.as_ref()),
        ("headers", route.headers.as_ref()),
    ];
    let responses = route
        .response
        .variants()
        .iter()
        .map(|variant| (format!("response {}", variant.status), &variant.schema));

    let all = slots
        .into_iter()
        .filter_map(|(name, pair)| pair.map(|p| (name.to_string(), p)))
        .chain(responses);

    for (slot, pair) in all {
        if let Err(e) = jsonschema::validator_for(pair.input.as_value()) {
            issues.push(LintIssue::new(
                location,
                LintSeverity::Error,
                "invalid_schema",
                format!("{slot} schema does not compile: {e}"),
            ));
        }
    }
}

/// True when any issue has [`LintSeverity::Error`]
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

/// Write lint issues grouped by severity
pub fn write_lint_issues(out: &mut impl Write, issues: &[LintIssue]) -> io::Result<()> {
    if issues.is_empty() {
        return writeln!(out, "No lint issues found");
    }

    let count = |severity| issues.iter().filter(|i| i.severity == severity).count();
    writeln!(
        out,
        "{} error(s), {} warning(s), {} info(s)\n",
        count(LintSeverity::Error),
        count(LintSeverity::Warning),
        count(LintSeverity::Info)
    )?;

    let mut sorted: Vec<&LintIssue> = issues.iter().collect();
    sorted.sort_by_key(|i| i.severity);
    for issue in sorted {
        writeln!(out, "[{}] {} ({})", issue.severity, issue.location, issue.kind)?;
        writeln!(out, "    {}", issue.message)?;
        if let Some(suggestion) = &issue.suggestion {
            writeln!(out, "    suggestion: {suggestion}")?;
        }
    }
    Ok(())
}
