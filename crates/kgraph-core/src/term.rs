//! RDF terms, triples and quads
//!
//! These are the backend-neutral shapes exchanged between the triple store,
//! the object adapter and callers. The triple store converts them to and
//! from its engine's native terms.
//!
//! # Compact form
//!
//! SELECT rows and string-level term exchange use a compact textual form:
//!
//! | term | compact form |
//! |---|---|
//! | named node | `http://example.org/a` (bare IRI) |
//! | blank node | `_:b0` |
//! | plain / `xsd:string` literal | `hello` |
//! | typed literal | `"42"^^<http://www.w3.org/2001/XMLSchema#long>` |
//! | language literal | `"bonjour"@fr` |
//!
//! [`RdfTerm::parse`] inverts it: a string beginning with a URI scheme is a
//! reference, one beginning with `_:` is a blank node, anything else is a
//! literal, with an explicit `^^<datatype>` suffix parsed back into a typed
//! literal.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::vocab::{xsd, RDF_LANG_STRING};

static URI_SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z][A-Za-z0-9+.\-]*://|urn:|mailto:|tag:)[^\s<>]*$").unwrap()
});

static TYPED_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)^"(.*)"\^\^<([^<>\s]+)>$"#).unwrap());

static LANG_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)^"(.*)"@([A-Za-z]+(?:-[A-Za-z0-9]+)*)$"#).unwrap());

/// Check whether a string begins with a URI scheme
///
/// Recognizes hierarchical schemes (`scheme://…`) plus `urn:`, `mailto:` and
/// `tag:`. Strings containing whitespace are never references.
pub fn looks_like_uri(s: &str) -> bool {
    URI_SCHEME_RE.is_match(s)
}

/// An RDF term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum RdfTerm {
    NamedNode(String),
    BlankNode(String),
    Literal(Literal),
}

/// A literal: lexical value plus either a datatype or a language tag
///
/// `datatype: None` with `language: None` is a simple (`xsd:string`) literal.
/// Constructors normalize an explicit `xsd:string` datatype to `None` so
/// structurally equal literals compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl RdfTerm {
    pub fn named(iri: impl Into<String>) -> Self {
        Self::NamedNode(iri.into())
    }

    /// Blank node; a leading `_:` is stripped
    pub fn blank(id: impl Into<String>) -> Self {
        let id = id.into();
        match id.strip_prefix("_:") {
            Some(rest) => Self::BlankNode(rest.to_string()),
            None => Self::BlankNode(id),
        }
    }

    /// Simple (`xsd:string`) literal
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: None,
        })
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        Self::Literal(Literal {
            value: value.into(),
            datatype: (datatype != xsd::STRING).then_some(datatype),
            language: None,
        })
    }

    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self::Literal(Literal {
            value: value.into(),
            datatype: None,
            language: Some(language.into()),
        })
    }

    pub fn is_named_node(&self) -> bool {
        matches!(self, Self::NamedNode(_))
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Self::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// The IRI if this is a named node
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::NamedNode(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// IRI, blank node id, or literal lexical value
    pub fn lexical(&self) -> &str {
        match self {
            Self::NamedNode(iri) => iri,
            Self::BlankNode(id) => id,
            Self::Literal(lit) => &lit.value,
        }
    }

    /// Render in compact form (see module docs)
    pub fn to_compact(&self) -> String {
        match self {
            Self::NamedNode(iri) => iri.clone(),
            Self::BlankNode(id) => format!("_:{}", id),
            Self::Literal(lit) => match (&lit.datatype, &lit.language) {
                (_, Some(lang)) => format!("\"{}\"@{}", escape(&lit.value), lang),
                (Some(dt), None) => format!("\"{}\"^^<{}>", escape(&lit.value), dt),
                (None, None) => lit.value.clone(),
            },
        }
    }

    /// Parse the compact form back into a term
    ///
    /// Never fails: anything that is not a reference, blank node or
    /// decorated literal is a simple literal. `<iri>` brackets are accepted.
    pub fn parse(s: &str) -> Self {
        if let Some(inner) = s.strip_prefix('<').and_then(|r| r.strip_suffix('>')) {
            if !inner.chars().any(char::is_whitespace) {
                return Self::NamedNode(inner.to_string());
            }
        }
        if let Some(id) = s.strip_prefix("_:") {
            if !id.is_empty() && !id.chars().any(char::is_whitespace) {
                return Self::BlankNode(id.to_string());
            }
        }
        if looks_like_uri(s) {
            return Self::NamedNode(s.to_string());
        }
        if let Some(caps) = TYPED_LITERAL_RE.captures(s) {
            return Self::typed_literal(unescape(&caps[1]), &caps[2]);
        }
        if let Some(caps) = LANG_LITERAL_RE.captures(s) {
            return Self::lang_literal(unescape(&caps[1]), &caps[2]);
        }
        Self::literal(s)
    }

    /// Render in N-Triples syntax
    pub fn to_ntriples(&self) -> String {
        match self {
            Self::NamedNode(iri) => format!("<{}>", iri),
            Self::BlankNode(id) => format!("_:{}", id),
            Self::Literal(lit) => match (&lit.datatype, &lit.language) {
                (_, Some(lang)) => format!("\"{}\"@{}", escape(&lit.value), lang),
                (Some(dt), None) => format!("\"{}\"^^<{}>", escape(&lit.value), dt),
                (None, None) => format!("\"{}\"", escape(&lit.value)),
            },
        }
    }
}

impl Literal {
    /// Effective datatype IRI (`xsd:string` or `rdf:langString` when implicit)
    pub fn datatype(&self) -> &str {
        match (&self.datatype, &self.language) {
            (_, Some(_)) => RDF_LANG_STRING,
            (Some(dt), None) => dt,
            (None, None) => xsd::STRING,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.datatype.is_none() && self.language.is_none()
    }
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compact())
    }
}

impl From<&str> for RdfTerm {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// A subject–predicate–object assertion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: RdfTerm,
    pub predicate: String,
    pub object: RdfTerm,
}

impl Triple {
    pub fn new(subject: RdfTerm, predicate: impl Into<String>, object: RdfTerm) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// A triple scoped to a graph; `graph: None` is the default graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub subject: RdfTerm,
    pub predicate: String,
    pub object: RdfTerm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
}

impl Quad {
    pub fn new(
        subject: RdfTerm,
        predicate: impl Into<String>,
        object: RdfTerm,
        graph: Option<String>,
    ) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
            graph,
        }
    }

    /// Drop the graph component
    pub fn into_triple(self) -> Triple {
        Triple {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {}",
            self.subject.to_ntriples(),
            self.predicate,
            self.object.to_ntriples()
        )?;
        if let Some(graph) = &self.graph {
            write!(f, " <{}>", graph)?;
        }
        f.write_str(" .")
    }
}
