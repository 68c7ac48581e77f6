//! In-memory quad store
//!
//! [`TripleStore`] wraps an `oxigraph` store and speaks kgraph terms. Writes
//! have set semantics: inserting a quad that is already present is a no-op
//! reported as `false`.

use kgraph_core::vocab::RDF_TYPE;
use kgraph_core::{Quad, RdfTerm};
use oxigraph::model::{GraphName, NamedNode, Quad as OxQuad, Subject, Term};
use oxigraph::store::{QuadIter, Store};
use tracing::{debug, info};

use crate::convert::{from_ox_quad, named_node, to_graph_name, to_ox_quad, to_subject, to_term};
use crate::error::RdfResult;

/// Wildcard pattern over quads; `None` matches anything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuadPattern {
    pub subject: Option<RdfTerm>,
    pub predicate: Option<String>,
    pub object: Option<RdfTerm>,
    /// `Some(None)` restricts to the default graph
    pub graph: Option<Option<String>>,
}

impl QuadPattern {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: RdfTerm) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn object(mut self, object: RdfTerm) -> Self {
        self.object = Some(object);
        self
    }

    /// Restrict to one named graph
    pub fn graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = Some(Some(graph.into()));
        self
    }

    /// Restrict to a named graph, or to the default graph when `None`
    pub fn in_graph(mut self, graph: Option<&str>) -> Self {
        self.graph = Some(graph.map(str::to_string));
        self
    }
}

struct EnginePattern {
    subject: Option<Subject>,
    predicate: Option<NamedNode>,
    object: Option<Term>,
    graph: Option<GraphName>,
}

impl EnginePattern {
    fn from_pattern(pattern: &QuadPattern) -> RdfResult<Self> {
        Ok(Self {
            subject: pattern.subject.as_ref().map(to_subject).transpose()?,
            predicate: pattern.predicate.as_deref().map(named_node).transpose()?,
            object: pattern.object.as_ref().map(to_term).transpose()?,
            graph: pattern
                .graph
                .as_ref()
                .map(|g| to_graph_name(g.as_deref()))
                .transpose()?,
        })
    }

    fn iter(&self, store: &Store) -> QuadIter {
        store.quads_for_pattern(
            self.subject.as_ref().map(|s| s.as_ref()),
            self.predicate.as_ref().map(|p| p.as_ref()),
            self.object.as_ref().map(|o| o.as_ref()),
            self.graph.as_ref().map(|g| g.as_ref()),
        )
    }

    fn matching(&self, store: &Store) -> RdfResult<Vec<OxQuad>> {
        Ok(self.iter(store).collect::<Result<Vec<_>, _>>()?)
    }
}

/// Typed quad store over an in-memory SPARQL engine
pub struct TripleStore {
    store_id: String,
    pub(crate) store: Store,
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("store_id", &self.store_id)
            .finish_non_exhaustive()
    }
}

impl TripleStore {
    /// Create an empty in-memory store
    pub fn new(store_id: impl Into<String>) -> RdfResult<Self> {
        let store_id = store_id.into();
        let store = Store::new()?;
        info!(store_id = %store_id, "Created triple store");
        Ok(Self { store_id, store })
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    /// Insert one quad; `false` if it was already present
    pub fn add_quad(
        &self,
        subject: &RdfTerm,
        predicate: &str,
        object: &RdfTerm,
        graph: Option<&str>,
    ) -> RdfResult<bool> {
        let quad = OxQuad::new(
            to_subject(subject)?,
            named_node(predicate)?,
            to_term(object)?,
            to_graph_name(graph)?,
        );
        Ok(self.store.insert(&quad)?)
    }

    /// Insert several quads; returns how many were new
    ///
    /// Not transactional: a failure leaves earlier quads in place.
    pub fn add_quads<'a, I>(&self, quads: I) -> RdfResult<usize>
    where
        I: IntoIterator<Item = &'a Quad>,
    {
        let mut added = 0;
        for quad in quads {
            if self.store.insert(&to_ox_quad(quad)?)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Delete every quad matching the pattern; returns how many were removed
    pub fn remove_quads(&self, pattern: &QuadPattern) -> RdfResult<usize> {
        let matching = EnginePattern::from_pattern(pattern)?.matching(&self.store)?;
        let mut removed = 0;
        for quad in &matching {
            if self.store.remove(quad)? {
                removed += 1;
            }
        }
        debug!(store_id = %self.store_id, removed, "Removed quads");
        Ok(removed)
    }

    /// All quads matching the pattern, in no particular order
    pub fn get_quads(&self, pattern: &QuadPattern) -> RdfResult<Vec<Quad>> {
        EnginePattern::from_pattern(pattern)?
            .matching(&self.store)?
            .iter()
            .map(from_ox_quad)
            .collect()
    }

    pub fn contains(&self, pattern: &QuadPattern) -> RdfResult<bool> {
        let mut quads = EnginePattern::from_pattern(pattern)?.iter(&self.store);
        Ok(quads.next().transpose()?.is_some())
    }

    /// `rdf:type` values of a subject
    pub fn types_of(&self, uri: &str, graph: Option<&str>) -> RdfResult<Vec<String>> {
        let pattern = QuadPattern::any()
            .subject(RdfTerm::named(uri))
            .predicate(RDF_TYPE)
            .in_graph(graph);
        let mut types: Vec<String> = self
            .get_quads(&pattern)?
            .into_iter()
            .filter_map(|q| q.object.as_iri().map(str::to_string))
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }

    /// Number of quads across all graphs
    pub fn count(&self) -> RdfResult<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> RdfResult<bool> {
        Ok(self.store.is_empty()?)
    }

    pub fn clear(&self) -> RdfResult<()> {
        self.store.clear()?;
        info!(store_id = %self.store_id, "Cleared triple store");
        Ok(())
    }
}
