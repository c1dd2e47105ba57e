use crate::error::ContractError;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Stable external identifier of a route: tree keys joined with `.`
///
/// `posts.comments.replies.createOne` names the `createOne` endpoint inside the
/// `replies` group inside `comments` inside `posts`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DotPath(String);

impl DotPath {
    /// Parse a dot path, rejecting empty input and empty segments
    pub fn parse(raw: &str) -> Result<Self, ContractError> {
        if raw.is_empty() || raw.split('.').any(str::is_empty) {
            return Err(ContractError::InvalidDotPath {
                path: raw.to_string(),
            });
        }
        Ok(DotPath(raw.to_string()))
    }

    // Keys are validated by the tree before they get here.
    pub(crate) fn root(key: &str) -> Self {
        DotPath(key.to_string())
    }

    pub(crate) fn child(&self, key: &str) -> Self {
        DotPath(format!("{}.{key}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Name of the endpoint itself (last segment)
    pub fn leaf(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

/// Check that `key` can be used as a single dot-path segment
pub fn validate_route_key(key: &str) -> Result<(), ContractError> {
    if key.is_empty() {
        return Err(ContractError::InvalidRouteKey {
            key: key.to_string(),
            reason: "route keys must not be empty",
        });
    }
    if key.contains('.') {
        return Err(ContractError::InvalidRouteKey {
            key: key.to_string(),
            reason: "route keys must not contain '.'",
        });
    }
    Ok(())
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DotPath {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotPath::parse(s)
    }
}

impl AsRef<str> for DotPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DotPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for DotPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DotPath::parse(&raw).map_err(serde::de::Error::custom)
    }
}
