//! Conversion between kgraph terms and oxigraph's model

use kgraph_core::{Quad, RdfTerm};
use oxigraph::model::{
    BlankNode, GraphName, Literal as OxLiteral, NamedNode, Quad as OxQuad, Subject, Term,
};

use crate::error::{RdfError, RdfResult};
use kgraph_core::vocab::xsd;

pub(crate) fn named_node(iri: &str) -> RdfResult<NamedNode> {
    NamedNode::new(iri).map_err(|e| RdfError::invalid_term(format!("IRI <{}>", iri), e))
}

/// Check that `iri` is an absolute IRI the store accepts
pub fn validate_iri(iri: &str) -> RdfResult<()> {
    named_node(iri).map(|_| ())
}

fn blank_node(id: &str) -> RdfResult<BlankNode> {
    BlankNode::new(id).map_err(|e| RdfError::invalid_term(format!("blank node _:{}", id), e))
}

pub(crate) fn to_subject(term: &RdfTerm) -> RdfResult<Subject> {
    match term {
        RdfTerm::NamedNode(iri) => Ok(named_node(iri)?.into()),
        RdfTerm::BlankNode(id) => Ok(blank_node(id)?.into()),
        RdfTerm::Literal(lit) => Err(RdfError::InvalidTerm(format!(
            "literal {:?} cannot be a subject",
            lit.value
        ))),
    }
}

pub(crate) fn to_term(term: &RdfTerm) -> RdfResult<Term> {
    match term {
        RdfTerm::NamedNode(iri) => Ok(named_node(iri)?.into()),
        RdfTerm::BlankNode(id) => Ok(blank_node(id)?.into()),
        RdfTerm::Literal(lit) => {
            let literal = match (&lit.language, &lit.datatype) {
                (Some(lang), _) => OxLiteral::new_language_tagged_literal(&lit.value, lang)
                    .map_err(|e| RdfError::invalid_term(format!("language tag {}", lang), e))?,
                (None, Some(dt)) => OxLiteral::new_typed_literal(&lit.value, named_node(dt)?),
                (None, None) => OxLiteral::new_simple_literal(&lit.value),
            };
            Ok(literal.into())
        }
    }
}

/// `None` is the default graph; `_:id` names a blank graph
pub(crate) fn to_graph_name(graph: Option<&str>) -> RdfResult<GraphName> {
    match graph {
        None => Ok(GraphName::DefaultGraph),
        Some(g) => match g.strip_prefix("_:") {
            Some(id) => Ok(blank_node(id)?.into()),
            None => Ok(named_node(g)?.into()),
        },
    }
}

pub(crate) fn from_literal(literal: &OxLiteral) -> RdfTerm {
    match literal.language() {
        Some(lang) => RdfTerm::lang_literal(literal.value(), lang),
        None => {
            let datatype = literal.datatype().as_str();
            if datatype == xsd::STRING {
                RdfTerm::literal(literal.value())
            } else {
                RdfTerm::typed_literal(literal.value(), datatype)
            }
        }
    }
}

#[allow(unreachable_patterns)]
pub(crate) fn from_term(term: &Term) -> RdfResult<RdfTerm> {
    match term {
        Term::NamedNode(n) => Ok(RdfTerm::NamedNode(n.as_str().to_string())),
        Term::BlankNode(b) => Ok(RdfTerm::BlankNode(b.as_str().to_string())),
        Term::Literal(l) => Ok(from_literal(l)),
        other => Err(RdfError::InvalidTerm(format!("unsupported term {}", other))),
    }
}

#[allow(unreachable_patterns)]
pub(crate) fn from_subject(subject: &Subject) -> RdfResult<RdfTerm> {
    match subject {
        Subject::NamedNode(n) => Ok(RdfTerm::NamedNode(n.as_str().to_string())),
        Subject::BlankNode(b) => Ok(RdfTerm::BlankNode(b.as_str().to_string())),
        other => Err(RdfError::InvalidTerm(format!("unsupported subject {}", other))),
    }
}

pub(crate) fn from_graph_name(graph: &GraphName) -> Option<String> {
    match graph {
        GraphName::NamedNode(n) => Some(n.as_str().to_string()),
        GraphName::BlankNode(b) => Some(format!("_:{}", b.as_str())),
        GraphName::DefaultGraph => None,
    }
}

pub(crate) fn to_ox_quad(quad: &Quad) -> RdfResult<OxQuad> {
    Ok(OxQuad::new(
        to_subject(&quad.subject)?,
        named_node(&quad.predicate)?,
        to_term(&quad.object)?,
        to_graph_name(quad.graph.as_deref())?,
    ))
}

pub(crate) fn from_ox_quad(quad: &OxQuad) -> RdfResult<Quad> {
    Ok(Quad {
        subject: from_subject(&quad.subject)?,
        predicate: quad.predicate.as_str().to_string(),
        object: from_term(&quad.object)?,
        graph: from_graph_name(&quad.graph_name),
    })
}
