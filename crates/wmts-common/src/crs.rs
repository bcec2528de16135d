//! Coordinate reference system identifiers and reference-system aliases.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Prefix used to qualify a bare EPSG code.
pub const DEFAULT_EPSG_PREFIX: &str = "epsg:";

/// Default target CRS: WGS84 longitude/latitude.
pub const DEFAULT_OUTPUT_EPSG: &str = "epsg:4326";

/// A fully-qualified CRS identifier such as `"epsg:21781"`.
///
/// Equality is plain string equality: `"epsg:4326"` and `"EPSG:4326"` are
/// different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CrsId(String);

impl CrsId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Qualify a code with a prefix, e.g. `("epsg:", "21781")`.
    pub fn with_prefix(prefix: &str, code: &str) -> Self {
        Self(format!("{}{}", prefix, code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric EPSG code, if this identifier has the form `epsg:<code>`
    /// (authority matched case-insensitively).
    pub fn epsg_code(&self) -> Option<u32> {
        let (authority, code) = self.0.split_once(':')?;
        if !authority.trim().eq_ignore_ascii_case("epsg") {
            return None;
        }
        code.trim().parse().ok()
    }
}

impl fmt::Display for CrsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CrsId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CrsId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CrsId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A reference-system token after alias lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefSystem<'a> {
    /// The token was a configured alias for this EPSG code.
    Alias { alias: &'a str, code: u32 },
    /// No alias matched; the token is used as-is.
    Verbatim(&'a str),
}

impl RefSystem<'_> {
    /// The code to qualify into a CRS identifier.
    pub fn code(&self) -> Cow<'_, str> {
        match self {
            RefSystem::Alias { code, .. } => Cow::Owned(code.to_string()),
            RefSystem::Verbatim(token) => Cow::Borrowed(*token),
        }
    }
}

/// Alias table mapping grid nicknames (`"swissgrid"`) to EPSG codes.
///
/// Codes deserialize from numbers or numeric strings (`swissgrid: "21781"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EpsgMapping(HashMap<String, u32>);

#[derive(Deserialize)]
#[serde(untagged)]
enum EpsgCode {
    Number(u32),
    Text(String),
}

impl EpsgCode {
    fn into_code(self) -> Result<u32, String> {
        match self {
            EpsgCode::Number(code) => Ok(code),
            EpsgCode::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| format!("invalid EPSG code '{}'", text)),
        }
    }
}

impl<'de> Deserialize<'de> for EpsgMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::<String, EpsgCode>::deserialize(deserializer)?
            .into_iter()
            .map(|(alias, code)| Ok((alias, code.into_code().map_err(de::Error::custom)?)))
            .collect()
    }
}

impl EpsgMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_alias(mut self, alias: impl Into<String>, code: u32) -> Self {
        self.0.insert(alias.into(), code);
        self
    }

    pub fn get(&self, alias: &str) -> Option<u32> {
        self.0.get(alias).copied()
    }

    /// Alias lookup first, verbatim token otherwise.
    pub fn lookup<'a>(&self, token: &'a str) -> RefSystem<'a> {
        match self.get(token) {
            Some(code) => RefSystem::Alias { alias: token, code },
            None => RefSystem::Verbatim(token),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for EpsgMapping {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
