//! Payload filters
//!
//! A filter is a set of per-key clauses that must all hold. Clauses are
//! written as JSON the same way they are stored:
//!
//! ```json
//! {
//!   "type": "http://example.org/Company",
//!   "projection_id": ["general", "name"],
//!   "founded": {"gte": 1970, "lt": 2000},
//!   "graph": {"in": ["urn:g:a", "urn:g:b"]}
//! }
//! ```
//!
//! A scalar is an exact match, an array matches any of its members, an
//! object with `gt`/`gte`/`lt`/`lte` is a numeric range and an object with
//! `in` matches any member of that list. When the stored payload value is
//! itself an array, a clause holds if any element satisfies it.

use std::collections::BTreeMap;

use kgraph_core::Payload;
use serde_json::Value;

use crate::error::{VectorError, VectorResult};

/// Numeric bounds; absent bounds are open
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Range {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

impl Range {
    fn contains(&self, x: f64) -> bool {
        self.gt.map_or(true, |b| x > b)
            && self.gte.map_or(true, |b| x >= b)
            && self.lt.map_or(true, |b| x < b)
            && self.lte.map_or(true, |b| x <= b)
    }
}

/// Condition on one payload key
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    Exact(Value),
    AnyOf(Vec<Value>),
    Range(Range),
}

impl FilterCondition {
    fn matches_scalar(&self, value: &Value) -> bool {
        match self {
            Self::Exact(expected) => values_equal(expected, value),
            Self::AnyOf(options) => options.iter().any(|o| values_equal(o, value)),
            Self::Range(range) => value.as_f64().is_some_and(|x| range.contains(x)),
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Array(items) => {
                self.matches_scalar(value) || items.iter().any(|item| self.matches_scalar(item))
            }
            scalar => self.matches_scalar(scalar),
        }
    }
}

/// JSON equality with numbers compared by value (`1 == 1.0`)
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Conjunction of per-key conditions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorFilter {
    clauses: BTreeMap<String, FilterCondition>,
}

impl VectorFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON filter document
    pub fn from_json(doc: &Value) -> VectorResult<Self> {
        let map = doc
            .as_object()
            .ok_or_else(|| VectorError::InvalidFilter(format!("expected an object, got {}", doc)))?;

        let mut filter = Self::new();
        for (key, value) in map {
            let condition = match value {
                Value::Array(options) => FilterCondition::AnyOf(options.clone()),
                Value::Object(spec) => parse_object_clause(key, spec)?,
                scalar => FilterCondition::Exact(scalar.clone()),
            };
            filter.clauses.insert(key.clone(), condition);
        }
        Ok(filter)
    }

    /// Builder: add or replace a clause
    pub fn with(mut self, key: impl Into<String>, condition: FilterCondition) -> Self {
        self.clauses.insert(key.into(), condition);
        self
    }

    /// Builder: exact match
    pub fn eq(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with(key, FilterCondition::Exact(value.into()))
    }

    pub fn any_of<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.with(
            key,
            FilterCondition::AnyOf(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn range(self, key: impl Into<String>, range: Range) -> Self {
        self.with(key, FilterCondition::Range(range))
    }

    pub fn get(&self, key: &str) -> Option<&FilterCondition> {
        self.clauses.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether every clause holds for the payload; missing keys never match
    pub fn matches(&self, payload: &Payload) -> bool {
        self.clauses.iter().all(|(key, condition)| {
            payload
                .get(key)
                .is_some_and(|value| condition.matches(value))
        })
    }
}

fn parse_object_clause(key: &str, spec: &serde_json::Map<String, Value>) -> VectorResult<FilterCondition> {
    if let Some(options) = spec.get("in") {
        return options
            .as_array()
            .map(|o| FilterCondition::AnyOf(o.clone()))
            .ok_or_else(|| VectorError::InvalidFilter(format!("{}: \"in\" must be a list", key)));
    }

    let bound = |name: &str| -> VectorResult<Option<f64>> {
        match spec.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| {
                VectorError::InvalidFilter(format!("{}: bound {} must be a number", key, name))
            }),
        }
    };
    let range = Range {
        gt: bound("gt")?,
        gte: bound("gte")?,
        lt: bound("lt")?,
        lte: bound("lte")?,
    };
    if range == Range::default() {
        return Err(VectorError::InvalidFilter(format!(
            "{}: expected \"in\" or a range bound",
            key
        )));
    }
    Ok(FilterCondition::Range(range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(v: Value) -> Payload {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_exact_and_any() {
        let filter = VectorFilter::from_json(&json!({
            "type": "http://c/T",
            "projection_id": ["general", "name"],
        }))
        .unwrap();
        assert!(filter.matches(&payload(json!({"type": "http://c/T", "projection_id": "name"}))));
        assert!(!filter.matches(&payload(json!({"type": "http://c/T", "projection_id": "other"}))));
        assert!(!filter.matches(&payload(json!({"projection_id": "name"}))));
    }

    #[test]
    fn test_range() {
        let filter = VectorFilter::from_json(&json!({"year": {"gte": 1970, "lt": 2000}})).unwrap();
        assert!(filter.matches(&payload(json!({"year": 1976}))));
        assert!(filter.matches(&payload(json!({"year": 1970.0}))));
        assert!(!filter.matches(&payload(json!({"year": 2000}))));
        assert!(!filter.matches(&payload(json!({"year": "1976"}))));
    }

    #[test]
    fn test_in_clause() {
        let filter = VectorFilter::from_json(&json!({"graph": {"in": ["a", "b"]}})).unwrap();
        assert_eq!(
            filter.get("graph"),
            Some(&FilterCondition::AnyOf(vec![json!("a"), json!("b")]))
        );
        assert!(filter.matches(&payload(json!({"graph": "b"}))));
    }

    #[test]
    fn test_array_payload_matches_any_element() {
        let filter = VectorFilter::new().eq("tags", "rust");
        assert!(filter.matches(&payload(json!({"tags": ["go", "rust"]}))));
        assert!(!filter.matches(&payload(json!({"tags": ["go"]}))));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        let filter = VectorFilter::new().eq("n", 1);
        assert!(filter.matches(&payload(json!({"n": 1.0}))));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(VectorFilter::from_json(&json!(["a"])).is_err());
        assert!(VectorFilter::from_json(&json!({"k": {"in": "a"}})).is_err());
        assert!(VectorFilter::from_json(&json!({"k": {"gte": "x"}})).is_err());
        assert!(VectorFilter::from_json(&json!({"k": {"unknown": 1}})).is_err());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(VectorFilter::new().matches(&Payload::new()));
    }
}
