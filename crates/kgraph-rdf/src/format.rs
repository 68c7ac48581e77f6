//! Serialization formats for bulk load and dump

use std::fmt;
use std::str::FromStr;

use oxigraph::io::RdfFormat;
use serde::{Deserialize, Serialize};

use crate::error::RdfError;

/// RDF document format, selected explicitly (no content sniffing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfSerialization {
    #[default]
    NTriples,
    Turtle,
    RdfXml,
    NQuads,
    TriG,
    /// Recognized by name only. The oxigraph 0.4 parsers and serializers have
    /// no JSON-LD support, so loading or dumping it fails with
    /// [`RdfError::UnsupportedFormat`].
    JsonLd,
}

impl RdfSerialization {
    pub fn media_type(&self) -> &'static str {
        match self {
            Self::NTriples => "application/n-triples",
            Self::Turtle => "text/turtle",
            Self::RdfXml => "application/rdf+xml",
            Self::NQuads => "application/n-quads",
            Self::TriG => "application/trig",
            Self::JsonLd => "application/ld+json",
        }
    }

    /// Whether documents in this format carry graph names
    pub fn supports_datasets(&self) -> bool {
        matches!(self, Self::NQuads | Self::TriG | Self::JsonLd)
    }

    /// The engine's format, if the linked engine can handle it
    pub(crate) fn engine_format(&self) -> Result<RdfFormat, RdfError> {
        RdfFormat::from_media_type(self.media_type())
            .ok_or_else(|| RdfError::UnsupportedFormat(self.to_string()))
    }
}

impl fmt::Display for RdfSerialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NTriples => "n-triples",
            Self::Turtle => "turtle",
            Self::RdfXml => "rdf-xml",
            Self::NQuads => "n-quads",
            Self::TriG => "trig",
            Self::JsonLd => "json-ld",
        };
        f.write_str(name)
    }
}

impl FromStr for RdfSerialization {
    type Err = RdfError;

    /// Accepts common names and file extensions, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            "turtle" | "ttl" => Ok(Self::Turtle),
            "rdfxml" | "rdf-xml" | "rdf/xml" | "xml" | "rdf" => Ok(Self::RdfXml),
            "nquads" | "n-quads" | "nq" => Ok(Self::NQuads),
            "trig" => Ok(Self::TriG),
            "jsonld" | "json-ld" => Ok(Self::JsonLd),
            other => Err(RdfError::UnsupportedFormat(other.to_string())),
        }
    }
}
