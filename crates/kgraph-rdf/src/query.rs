//! SPARQL query and update dispatch

use std::collections::BTreeMap;

use oxigraph::sparql::QueryResults;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::{from_subject, from_term};
use crate::error::{RdfError, RdfResult};
use crate::store::TripleStore;

/// One SELECT solution: variable name to compact term; unbound variables are absent
pub type SelectRow = BTreeMap<String, String>;

/// One CONSTRUCT / DESCRIBE triple in compact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructedTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Result of a SPARQL query, shaped by the query form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", content = "result", rename_all = "snake_case")]
pub enum QueryOutcome {
    Select(Vec<SelectRow>),
    Construct(Vec<ConstructedTriple>),
    Ask(bool),
}

impl QueryOutcome {
    /// SELECT rows, or empty for any other form
    pub fn into_rows(self) -> Vec<SelectRow> {
        match self {
            Self::Select(rows) => rows,
            _ => Vec::new(),
        }
    }

    pub fn into_triples(self) -> Vec<ConstructedTriple> {
        match self {
            Self::Construct(triples) => triples,
            _ => Vec::new(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Ask(b) => Some(*b),
            _ => None,
        }
    }
}

impl TripleStore {
    /// Evaluate a SELECT, CONSTRUCT, DESCRIBE or ASK query
    pub fn query(&self, sparql: &str) -> RdfResult<QueryOutcome> {
        debug!(store_id = %self.store_id(), "Evaluating SPARQL query");
        match self.store.query(sparql)? {
            QueryResults::Solutions(solutions) => {
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution?;
                    let mut row = SelectRow::new();
                    for (variable, term) in solution.iter() {
                        row.insert(variable.as_str().to_string(), from_term(term)?.to_compact());
                    }
                    rows.push(row);
                }
                Ok(QueryOutcome::Select(rows))
            }
            QueryResults::Graph(triples) => {
                let mut out = Vec::new();
                for triple in triples {
                    let triple = triple?;
                    out.push(ConstructedTriple {
                        subject: from_subject(&triple.subject)?.to_compact(),
                        predicate: triple.predicate.as_str().to_string(),
                        object: from_term(&triple.object)?.to_compact(),
                    });
                }
                Ok(QueryOutcome::Construct(out))
            }
            QueryResults::Boolean(b) => Ok(QueryOutcome::Ask(b)),
        }
    }

    /// Evaluate an ASK query
    pub fn ask(&self, sparql: &str) -> RdfResult<bool> {
        self.query(sparql)?
            .as_bool()
            .ok_or_else(|| RdfError::Query("expected an ASK query".to_string()))
    }

    /// Apply a SPARQL UPDATE
    pub fn update(&self, sparql: &str) -> RdfResult<()> {
        debug!(store_id = %self.store_id(), "Applying SPARQL update");
        self.store.update(sparql)?;
        Ok(())
    }
}
