//! Field references into JSON records.
//!
//! Uses the bracket syntax of log pipelines: `[wmts][zoomlevel]` addresses
//! `record["wmts"]["zoomlevel"]`, while a bare `zoomlevel` addresses a
//! top-level field.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldRefError {
    #[error("field reference is empty")]
    Empty,

    #[error("malformed field reference {0:?}")]
    Malformed(String),
}

/// Path to a (possibly nested) field of a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    path: Vec<String>,
}

impl FieldRef {
    /// Parse `[a][b]` or a bare `name`.
    pub fn parse(s: &str) -> Result<Self, FieldRefError> {
        if s.is_empty() {
            return Err(FieldRefError::Empty);
        }
        let malformed = || FieldRefError::Malformed(s.to_string());

        if !s.starts_with('[') {
            if s.contains('[') || s.contains(']') {
                return Err(malformed());
            }
            return Ok(Self {
                path: vec![s.to_string()],
            });
        }

        let mut path = Vec::new();
        let mut rest = s;
        while !rest.is_empty() {
            let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
            let end = inner.find(']').ok_or_else(malformed)?;
            let segment = &inner[..end];
            if segment.is_empty() || segment.contains('[') {
                return Err(malformed());
            }
            path.push(segment.to_string());
            rest = &inner[end + 1..];
        }

        Ok(Self { path })
    }

    /// Build a reference from already split segments.
    ///
    /// # Panics
    /// If `segments` is empty.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path: Vec<String> = segments.into_iter().map(Into::into).collect();
        assert!(!path.is_empty(), "field reference needs at least one segment");
        Self { path }
    }

    pub fn segments(&self) -> &[String] {
        &self.path
    }

    /// Look the field up; `None` when any step is missing or not an object.
    pub fn get<'v>(&self, record: &'v Value) -> Option<&'v Value> {
        self.path
            .iter()
            .try_fold(record, |value, segment| value.as_object()?.get(segment))
    }

    /// The object at this path, creating it (and any intermediate object)
    /// when missing. Non-object values along the way are replaced.
    ///
    /// Returns `None` only when `record` itself is not an object.
    pub fn object_mut<'v>(&self, record: &'v mut Value) -> Option<&'v mut Map<String, Value>> {
        let mut current = record.as_object_mut()?;
        for segment in &self.path {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = entry.as_object_mut()?;
        }
        Some(current)
    }
}

impl FromStr for FieldRef {
    type Err = FieldRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.path {
            write!(f, "[{}]", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bracketed() {
        let field = FieldRef::parse("[wmts][reference-system]").unwrap();
        assert_eq!(field.segments(), ["wmts", "reference-system"]);
        assert_eq!(field.to_string(), "[wmts][reference-system]");
    }

    #[test]
    fn test_parse_bare() {
        let field: FieldRef = "wmts".parse().unwrap();
        assert_eq!(field, FieldRef::from_segments(["wmts"]));
        assert_eq!(field.to_string(), "[wmts]");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(FieldRef::parse(""), Err(FieldRefError::Empty));
        for bad in ["[a", "[]", "[a]b", "[a][", "a]", "a[b]", "[a[b]]"] {
            assert!(
                matches!(FieldRef::parse(bad), Err(FieldRefError::Malformed(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_get_nested() {
        let record = json!({"wmts": {"zoomlevel": "23"}, "message": "GET /"});
        let zoom = FieldRef::parse("[wmts][zoomlevel]").unwrap();
        assert_eq!(zoom.get(&record), Some(&json!("23")));

        let missing = FieldRef::parse("[wmts][row]").unwrap();
        assert_eq!(missing.get(&record), None);

        let through_scalar = FieldRef::parse("[message][x]").unwrap();
        assert_eq!(through_scalar.get(&record), None);
    }

    #[test]
    fn test_object_mut_creates_path() {
        let mut record = json!({"message": "GET /"});
        let target = FieldRef::parse("[geo][wmts]").unwrap();
        target
            .object_mut(&mut record)
            .unwrap()
            .insert("service".into(), json!("wmts"));
        assert_eq!(record["geo"]["wmts"]["service"], "wmts");
        assert_eq!(record["message"], "GET /");
    }

    #[test]
    fn test_object_mut_replaces_scalar() {
        let mut record = json!({"wmts": "oops"});
        let target = FieldRef::parse("wmts").unwrap();
        assert!(target.object_mut(&mut record).unwrap().is_empty());
        assert!(record["wmts"].is_object());
    }

    #[test]
    fn test_object_mut_needs_object_record() {
        let mut record = json!([1, 2, 3]);
        assert!(FieldRef::parse("wmts").unwrap().object_mut(&mut record).is_none());
    }
}
