//! Bulk import and export of serialized RDF

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use oxigraph::io::{RdfParser, RdfSerializer};
use oxigraph::model::{GraphNameRef, Quad as OxQuad};
use tracing::info;

use crate::convert::to_graph_name;
use crate::error::{RdfError, RdfResult};
use crate::format::RdfSerialization;
use crate::store::TripleStore;

/// Where a document to load comes from
#[derive(Debug, Clone)]
pub enum LoadSource {
    Path(PathBuf),
    Text(String),
}

impl LoadSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    fn reader(&self) -> RdfResult<Box<dyn Read + '_>> {
        Ok(match self {
            Self::Path(path) => Box::new(BufReader::new(File::open(path)?)),
            Self::Text(text) => Box::new(text.as_bytes()),
        })
    }
}

impl TripleStore {
    /// Load a serialized document in one pass; returns how many quads were new
    ///
    /// With `graph`, every parsed statement is placed into that graph,
    /// including quads a dataset format assigns to other graphs. Without it,
    /// triple formats load into the default graph and dataset formats keep
    /// their own graph names.
    ///
    /// A parse error aborts the load. Quads are committed together at the
    /// end, so a failed load adds nothing.
    pub fn bulk_load(
        &self,
        source: &LoadSource,
        format: RdfSerialization,
        graph: Option<&str>,
    ) -> RdfResult<usize> {
        let engine_format = format.engine_format()?;
        let target = graph.map(|g| to_graph_name(Some(g))).transpose()?;
        let before = self.count()?;

        let parser = RdfParser::from_format(engine_format);
        let mut quads = Vec::new();
        for quad in parser.for_reader(source.reader()?) {
            let quad = quad.map_err(|e| RdfError::Parse(e.to_string()))?;
            quads.push(match &target {
                Some(target) => OxQuad::new(quad.subject, quad.predicate, quad.object, target.clone()),
                None => quad,
            });
        }

        let parsed = quads.len();
        self.store.extend(quads)?;
        let added = self.count()?.saturating_sub(before);
        info!(
            store_id = %self.store_id(),
            format = %format,
            parsed,
            added,
            "Bulk loaded RDF document"
        );
        Ok(added)
    }

    /// Serialize the store, or one graph of it
    ///
    /// Triple formats without a graph argument serialize the default graph;
    /// dataset formats serialize every graph.
    pub fn dump(&self, format: RdfSerialization, graph: Option<&str>) -> RdfResult<String> {
        let engine_format = format.engine_format()?;
        let serializer = RdfSerializer::from_format(engine_format);

        let bytes = match graph {
            Some(g) => {
                let name = to_graph_name(Some(g))?;
                self.store
                    .dump_graph_to_writer(name.as_ref(), serializer, Vec::new())
                    .map_err(|e| RdfError::Serialize(e.to_string()))?
            }
            None if format.supports_datasets() => self
                .store
                .dump_to_writer(serializer, Vec::new())
                .map_err(|e| RdfError::Serialize(e.to_string()))?,
            None => self
                .store
                .dump_graph_to_writer(GraphNameRef::DefaultGraph, serializer, Vec::new())
                .map_err(|e| RdfError::Serialize(e.to_string()))?,
        };

        String::from_utf8(bytes).map_err(|e| RdfError::Serialize(e.to_string()))
    }
}
