//! Object-level reads and writes
//!
//! Writing an object produces its `rdf:type` quads, a primary-type quad, the
//! identity quad and one typed quad per non-null scalar property (one per
//! element for lists). Reading groups a subject's quads and hands them to an
//! [`ObjectFactory`].

use std::collections::BTreeMap;

use kgraph_core::vocab::{IDENTITY_PREDICATE, PRIMARY_TYPE_PREDICATE, RDF_TYPE};
use kgraph_core::{DatatypeHint, GraphObject, ObjectFactory, PropertyValue, Quad, RdfTerm, Triple};
use tracing::{debug, warn};

use crate::convert::validate_iri;
use crate::error::RdfResult;
use crate::literal::{resolve_datatype, scalar_term};
use crate::store::{QuadPattern, TripleStore};

impl TripleStore {
    /// Write the quads describing `object`; returns how many were new
    ///
    /// The subject, its types and the identity quad must all be storable,
    /// otherwise nothing is written and the error is returned. A single
    /// property whose value cannot be expressed (an invalid IRI, say) is
    /// skipped with a warning; the rest of the object is still written.
    pub fn add_object_triples(&self, object: &dyn GraphObject, graph: Option<&str>) -> RdfResult<usize> {
        validate_iri(object.uri())?;
        let subject = RdfTerm::named(object.uri());

        let type_uris: Vec<String> = object
            .type_uris()
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect();
        for type_uri in &type_uris {
            validate_iri(type_uri)?;
        }

        let mut required = Vec::with_capacity(type_uris.len() + 2);
        if let Some(primary) = type_uris.first() {
            required.push((PRIMARY_TYPE_PREDICATE, RdfTerm::named(primary.as_str())));
        }
        for type_uri in &type_uris {
            required.push((RDF_TYPE, RdfTerm::named(type_uri.as_str())));
        }
        required.push((IDENTITY_PREDICATE, subject.clone()));

        let mut added = 0;
        for (predicate, term) in &required {
            if self.add_quad(&subject, predicate, term, graph)? {
                added += 1;
            }
        }

        for (property, entry) in object.property_entries() {
            for term in object_terms(&entry.value, entry.hint.as_ref()) {
                match self.add_quad(&subject, &property, &term, graph) {
                    Ok(true) => added += 1,
                    Ok(false) => {}
                    Err(e) => warn!(
                        uri = %object.uri(),
                        predicate = %property,
                        error = %e,
                        "Skipping property that cannot be stored"
                    ),
                }
            }
        }
        debug!(uri = %object.uri(), added, "Wrote object triples");
        Ok(added)
    }

    /// All triples with `uri` as subject, graph component dropped
    pub fn subject_triples(&self, uri: &str, graph: Option<&str>) -> RdfResult<Vec<Triple>> {
        let pattern = QuadPattern::any()
            .subject(RdfTerm::named(uri))
            .in_graph(graph);
        Ok(self
            .get_quads(&pattern)?
            .into_iter()
            .map(Quad::into_triple)
            .collect())
    }

    /// Reconstruct one object; `None` if nothing is stored or no type resolves
    pub fn get_object(
        &self,
        uri: &str,
        graph: Option<&str>,
        factory: &dyn ObjectFactory,
    ) -> RdfResult<Option<Box<dyn GraphObject>>> {
        let triples = self.subject_triples(uri, graph)?;
        if triples.is_empty() {
            return Ok(None);
        }
        Ok(factory.reconstruct(&triples))
    }

    /// Reconstruct several objects, omitting any that do not resolve
    ///
    /// One subject lookup per URI, so the cost follows the request size
    /// rather than the graph size.
    pub fn get_objects(
        &self,
        uris: &[&str],
        graph: Option<&str>,
        factory: &dyn ObjectFactory,
    ) -> RdfResult<BTreeMap<String, Box<dyn GraphObject>>> {
        let mut out = BTreeMap::new();
        for uri in uris {
            if out.contains_key(*uri) {
                continue;
            }
            if let Some(obj) = self.get_object(uri, graph, factory)? {
                out.insert(uri.to_string(), obj);
            }
        }
        Ok(out)
    }
}

/// Object terms for one property value
fn object_terms(value: &PropertyValue, hint: Option<&DatatypeHint>) -> Vec<RdfTerm> {
    match value {
        PropertyValue::Null => Vec::new(),
        PropertyValue::List(items) => items
            .iter()
            .flat_map(|item| {
                // list hints say nothing about element types
                let element_hint = hint.filter(|h| !h.is_list());
                object_terms(item, element_hint)
            })
            .collect(),
        scalar => {
            let datatype = resolve_datatype(hint, scalar);
            scalar_term(scalar, &datatype).into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::decode_term;
    use kgraph_core::vocab::xsd;
    use kgraph_core::{GenericObject, GenericObjectFactory};
    use test_case::test_case;

    const G: &str = "http://example.org/graph";

    fn factory() -> GenericObjectFactory {
        GenericObjectFactory::new(decode_term)
    }

    #[test]
    fn test_object_quads() {
        let store = TripleStore::new("obj").unwrap();
        let obj = GenericObject::new("http://e/1", "http://c/T")
            .with("http://p/name", "Apple")
            .with("http://p/gone", PropertyValue::Null)
            .with_hinted("http://p/count", "7", "LongProperty");
        let added = store.add_object_triples(&obj, Some(G)).unwrap();
        // type, primary type, identity, name, count
        assert_eq!(added, 5);

        let count = store
            .get_quads(&QuadPattern::any().predicate("http://p/count"))
            .unwrap();
        assert_eq!(count[0].object, RdfTerm::typed_literal("7", xsd::LONG));
        assert!(store
            .contains(
                &QuadPattern::any()
                    .subject(RdfTerm::named("http://e/1"))
                    .predicate(IDENTITY_PREDICATE)
                    .object(RdfTerm::named("http://e/1"))
            )
            .unwrap());
    }

    #[test]
    fn test_list_values_expand() {
        let store = TripleStore::new("obj").unwrap();
        let obj = GenericObject::new("http://e/1", "http://c/T").with_hinted(
            "http://p/links",
            PropertyValue::List(vec![
                PropertyValue::uri("http://e/2"),
                PropertyValue::Integer(3),
            ]),
            "list",
        );
        store.add_object_triples(&obj, Some(G)).unwrap();
        let mut objects: Vec<RdfTerm> = store
            .get_quads(&QuadPattern::any().predicate("http://p/links"))
            .unwrap()
            .into_iter()
            .map(|q| q.object)
            .collect();
        objects.sort_by_key(|t| t.to_compact());
        assert_eq!(
            objects,
            vec![
                RdfTerm::typed_literal("3", xsd::LONG),
                RdfTerm::named("http://e/2"),
            ]
        );
    }

    #[test_case("not a uri" ; "spaces")]
    #[test_case("" ; "empty")]
    #[test_case("relative/path" ; "relative")]
    fn test_invalid_subject_writes_nothing(uri: &str) {
        let store = TripleStore::new("obj").unwrap();
        let obj = GenericObject::new(uri, "http://c/T").with("http://p/name", "Apple");
        let err = store.add_object_triples(&obj, Some(G)).unwrap_err();
        assert!(matches!(err, crate::RdfError::InvalidTerm(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_type_writes_nothing() {
        let store = TripleStore::new("obj").unwrap();
        let obj = GenericObject::new("http://e/1", "http://c/T")
            .with_type("bad type")
            .with("http://p/name", "Apple");
        assert!(store.add_object_triples(&obj, Some(G)).is_err());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_invalid_property_value_is_skipped() {
        let store = TripleStore::new("obj").unwrap();
        let obj = GenericObject::new("http://e/1", "http://c/T")
            .with("http://p/name", "Apple")
            .with("http://p/link", PropertyValue::uri("not a uri"));
        // type, primary type, identity, name
        assert_eq!(store.add_object_triples(&obj, Some(G)).unwrap(), 4);
    }

    #[test]
    fn test_multi_typed_object_keeps_class() {
        let store = TripleStore::new("obj").unwrap();
        for n in 0..20 {
            let obj = GenericObject::new(format!("http://e/{}", n), "http://c/Zebra")
                .with_type("http://c/Animal")
                .with("http://p/name", "z");
            store.add_object_triples(&obj, Some(G)).unwrap();
        }
        for n in 0..20 {
            let obj = store
                .get_object(&format!("http://e/{}", n), Some(G), &factory())
                .unwrap()
                .unwrap();
            assert_eq!(obj.class_uri(), "http://c/Zebra");
            assert_eq!(obj.type_uris(), vec!["http://c/Zebra", "http://c/Animal"]);
        }
    }

    #[test]
    fn test_get_object_absent() {
        let store = TripleStore::new("obj").unwrap();
        assert!(store
            .get_object("http://e/none", Some(G), &factory())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_get_objects_omits_misses() {
        let store = TripleStore::new("obj").unwrap();
        for n in 1..=3 {
            let obj = GenericObject::new(format!("http://e/{}", n), "http://c/T")
                .with("http://p/name", format!("n{}", n));
            store.add_object_triples(&obj, Some(G)).unwrap();
        }
        let found = store
            .get_objects(&["http://e/1", "http://e/3", "http://e/9", "http://e/1"], Some(G), &factory())
            .unwrap();
        assert_eq!(found.keys().collect::<Vec<_>>(), vec!["http://e/1", "http://e/3"]);
        assert_eq!(
            found["http://e/3"].property_entries()["http://p/name"].value,
            PropertyValue::text("n3")
        );
    }
}
