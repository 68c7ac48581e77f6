//! Graph objects and the adapter seam
//!
//! Application objects reach the storage layer through [`GraphObject`], which
//! exposes a URI, a primary class and a bag of hinted property values. Going
//! the other way, an [`ObjectFactory`] rebuilds an object from the triples
//! stored for its subject.
//!
//! [`GenericObject`] is a schema-less implementation used when callers have
//! no domain types of their own, and by the test suites.

use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::term::{RdfTerm, Triple};
use crate::vocab::{xsd, IDENTITY_PREDICATE, PRIMARY_TYPE_PREDICATE, RDF_TYPE};

/// A property value as seen by the storage layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Null,
    Text(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Uri(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn uri(s: impl Into<String>) -> Self {
        Self::Uri(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lexical form used when writing a literal
    pub fn lexical(&self) -> Option<String> {
        match self {
            Self::Null | Self::List(_) => None,
            Self::Text(s) | Self::Uri(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Double(d) => Some(format_double(*d)),
            Self::Boolean(b) => Some(b.to_string()),
            Self::DateTime(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// XSD datatype implied by the value's own kind
    pub fn natural_datatype(&self) -> Option<&'static str> {
        match self {
            Self::Null | Self::List(_) | Self::Uri(_) => None,
            Self::Text(_) => Some(xsd::STRING),
            Self::Integer(_) => Some(xsd::LONG),
            Self::Double(_) => Some(xsd::DOUBLE),
            Self::Boolean(_) => Some(xsd::BOOLEAN),
            Self::DateTime(_) => Some(xsd::DATE_TIME),
            Self::Date(_) => Some(xsd::DATE),
        }
    }

    /// JSON rendering for vector payloads
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) | Self::Uri(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Boolean(b) => Value::Bool(*b),
            Self::DateTime(_) | Self::Date(_) => {
                self.lexical().map(Value::String).unwrap_or(Value::Null)
            }
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

/// XSD-compatible rendering of a double
pub fn format_double(d: f64) -> String {
    if d.is_nan() {
        "NaN".to_string()
    } else if d == f64::INFINITY {
        "INF".to_string()
    } else if d == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        d.to_string()
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

/// Declared datatype of a property, as reported by the adapter
///
/// Either a full XSD IRI, the literal hint `list`, or a descriptive type
/// name (`"DateTimeProperty"`, `"LongProperty"`) the triple store inspects by
/// substring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatatypeHint(pub String);

impl DatatypeHint {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_list(&self) -> bool {
        self.0.eq_ignore_ascii_case("list")
    }

    pub fn is_xsd(&self) -> bool {
        self.0.starts_with(xsd::NAMESPACE)
    }
}

impl From<&str> for DatatypeHint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A property value with its optional datatype hint
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    pub value: PropertyValue,
    pub hint: Option<DatatypeHint>,
}

impl PropertyEntry {
    pub fn new(value: impl Into<PropertyValue>) -> Self {
        Self {
            value: value.into(),
            hint: None,
        }
    }

    pub fn hinted(value: impl Into<PropertyValue>, hint: impl Into<DatatypeHint>) -> Self {
        Self {
            value: value.into(),
            hint: Some(hint.into()),
        }
    }
}

/// An application object the storage layer can persist
pub trait GraphObject: Send + Sync + Debug {
    /// Identity; empty means the object cannot be stored
    fn uri(&self) -> &str;

    /// Primary class URI, used to pick projections
    fn class_uri(&self) -> &str;

    /// All type URIs written as `rdf:type` quads
    fn type_uris(&self) -> Vec<String> {
        vec![self.class_uri().to_string()]
    }

    /// Property URI to hinted value; `Null` entries are skipped on write
    fn property_entries(&self) -> BTreeMap<String, PropertyEntry>;

    /// Text-valued property, if present
    fn text_property(&self, property_uri: &str) -> Option<String> {
        self.property_entries()
            .remove(property_uri)
            .and_then(|entry| match entry.value {
                PropertyValue::Text(s) => Some(s),
                _ => None,
            })
    }
}

/// Rebuilds objects from stored triples
pub trait ObjectFactory: Send + Sync {
    /// Reconstruct one object from all triples of a single subject
    ///
    /// Returns `None` if the triples do not describe a known type.
    fn reconstruct(&self, triples: &[Triple]) -> Option<Box<dyn GraphObject>>;
}

/// Schema-less object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenericObject {
    pub uri: String,
    pub class_uri: String,
    pub extra_types: Vec<String>,
    pub properties: BTreeMap<String, PropertyEntry>,
}

impl GenericObject {
    pub fn new(uri: impl Into<String>, class_uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            class_uri: class_uri.into(),
            ..Default::default()
        }
    }

    /// Builder: set an unhinted property
    pub fn with(mut self, property_uri: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties
            .insert(property_uri.into(), PropertyEntry::new(value));
        self
    }

    /// Builder: set a property with a datatype hint
    pub fn with_hinted(
        mut self,
        property_uri: impl Into<String>,
        value: impl Into<PropertyValue>,
        hint: impl Into<DatatypeHint>,
    ) -> Self {
        self.properties
            .insert(property_uri.into(), PropertyEntry::hinted(value, hint));
        self
    }

    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.extra_types.push(type_uri.into());
        self
    }

    pub fn set(&mut self, property_uri: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties
            .insert(property_uri.into(), PropertyEntry::new(value));
    }

    pub fn get(&self, property_uri: &str) -> Option<&PropertyValue> {
        self.properties.get(property_uri).map(|e| &e.value)
    }
}

impl GraphObject for GenericObject {
    fn uri(&self) -> &str {
        &self.uri
    }

    fn class_uri(&self) -> &str {
        &self.class_uri
    }

    fn type_uris(&self) -> Vec<String> {
        let mut types = vec![self.class_uri.clone()];
        for t in &self.extra_types {
            if !types.contains(t) {
                types.push(t.clone());
            }
        }
        types
    }

    fn property_entries(&self) -> BTreeMap<String, PropertyEntry> {
        self.properties.clone()
    }
}

/// Factory for [`GenericObject`]
///
/// With an empty allow-list every typed subject is reconstructed; otherwise
/// only subjects whose types intersect `known_types`. Literal values arrive
/// through a caller-supplied decoder so typed literals come back as their
/// native kinds.
///
/// The class is chosen independently of quad order: the recorded primary
/// type ([`PRIMARY_TYPE_PREDICATE`]) when it is one of the subject's types,
/// else the first entry of `known_types` present, else the smallest type IRI.
pub struct GenericObjectFactory {
    known_types: Vec<String>,
    decode: fn(&RdfTerm) -> PropertyValue,
}

impl GenericObjectFactory {
    pub fn new(decode: fn(&RdfTerm) -> PropertyValue) -> Self {
        Self {
            known_types: Vec::new(),
            decode,
        }
    }

    /// Restrict reconstruction to the given classes
    pub fn with_known_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_types = types.into_iter().map(Into::into).collect();
        self
    }
}

impl ObjectFactory for GenericObjectFactory {
    fn reconstruct(&self, triples: &[Triple]) -> Option<Box<dyn GraphObject>> {
        let first = triples.first()?;
        let uri = first.subject.as_iri()?.to_string();

        let mut types: Vec<String> = triples
            .iter()
            .filter(|t| t.predicate == RDF_TYPE)
            .filter_map(|t| t.object.as_iri().map(str::to_string))
            .collect();
        types.sort();
        types.dedup();

        let primary = triples
            .iter()
            .filter(|t| t.predicate == PRIMARY_TYPE_PREDICATE)
            .filter_map(|t| t.object.as_iri())
            .find(|p| types.iter().any(|t| t == p))
            .filter(|p| self.known_types.is_empty() || self.known_types.iter().any(|k| k == p));

        let class_uri = match primary {
            Some(primary) => primary.to_string(),
            None if self.known_types.is_empty() => types.first()?.clone(),
            None => self
                .known_types
                .iter()
                .find(|known| types.contains(known))?
                .clone(),
        };

        let mut object = GenericObject::new(uri, class_uri.clone());
        object.extra_types = types.into_iter().filter(|t| *t != class_uri).collect();

        let mut grouped: BTreeMap<String, Vec<PropertyValue>> = BTreeMap::new();
        for triple in triples {
            if triple.predicate == RDF_TYPE
                || triple.predicate == IDENTITY_PREDICATE
                || triple.predicate == PRIMARY_TYPE_PREDICATE
            {
                continue;
            }
            grouped
                .entry(triple.predicate.clone())
                .or_default()
                .push((self.decode)(&triple.object));
        }

        for (predicate, mut values) in grouped {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                PropertyValue::List(values)
            };
            object.set(predicate, value);
        }

        Some(Box::new(object))
    }
}
