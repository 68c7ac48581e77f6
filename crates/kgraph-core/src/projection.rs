//! Projection configuration
//!
//! A projection is a named, type-scoped selection of properties whose text is
//! concatenated and embedded into one vector per object. The mapping is
//! static per graph: `type URI → projection id → ordered property URIs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::object::{GraphObject, PropertyValue};
use crate::vocab::{haley, vital};

/// Projection id → ordered property URIs
pub type TypeProjections = BTreeMap<String, Vec<String>>;

/// Type URI → projections declared for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionConfig {
    mappings: BTreeMap<String, TypeProjections>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProjectionConfig {
    /// No projections at all; every object is stored structurally only
    pub fn empty() -> Self {
        Self {
            mappings: BTreeMap::new(),
        }
    }

    /// Built-in mappings for the core ontology types
    pub fn builtin() -> Self {
        let general = [vital::HAS_NAME, vital::HAS_DESCRIPTION];
        let actor_like = [
            ("general", &[vital::HAS_NAME, vital::HAS_DESCRIPTION, haley::HAS_KGRAPH_DESCRIPTION][..]),
            ("description", &[haley::HAS_KGRAPH_DESCRIPTION][..]),
            ("name", &[vital::HAS_NAME][..]),
        ];
        let slot_type_only = [("slot_type", &[haley::HAS_SLOT_TYPE_DESCRIPTION][..])];

        Self::empty()
            .with_type(vital::NODE, [("general", &general[..])])
            .with_type(vital::EDGE, [("general", &general[..])])
            .with_type(
                haley::ENTITY,
                [
                    ("entity_type", &[haley::HAS_ENTITY_TYPE_DESCRIPTION][..]),
                    ("entity_value", &[vital::HAS_NAME, haley::HAS_KGRAPH_DESCRIPTION][..]),
                ],
            )
            .with_type(
                haley::FRAME,
                [
                    ("type", &[haley::HAS_FRAME_TYPE_DESCRIPTION][..]),
                    ("description", &[vital::HAS_DESCRIPTION][..]),
                    (
                        "general",
                        &[vital::HAS_NAME, haley::HAS_FRAME_TYPE_DESCRIPTION, vital::HAS_DESCRIPTION][..],
                    ),
                ],
            )
            .with_type(haley::SLOT, slot_type_only)
            .with_type(
                haley::TEXT_SLOT,
                [
                    ("slot_type", &[haley::HAS_SLOT_TYPE_DESCRIPTION][..]),
                    ("slot_value", &[haley::HAS_TEXT_SLOT_VALUE][..]),
                ],
            )
            .with_type(
                haley::LONG_TEXT_SLOT,
                [
                    ("slot_type", &[haley::HAS_SLOT_TYPE_DESCRIPTION][..]),
                    ("slot_value", &[haley::HAS_LONG_TEXT_SLOT_VALUE][..]),
                ],
            )
            .with_type(haley::DATE_TIME_SLOT, slot_type_only)
            .with_type(haley::NUMBER_SLOT, slot_type_only)
            .with_type(haley::INTERACTION, actor_like)
            .with_type(haley::ACTOR, actor_like)
            .with_type(haley::AGENT, actor_like)
    }

    /// Build from an explicit mapping
    pub fn from_mappings(mappings: BTreeMap<String, TypeProjections>) -> Self {
        Self { mappings }
    }

    /// Builder: declare all projections of one type, replacing any existing
    pub fn with_type<'a, I>(mut self, type_uri: &str, projections: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let declared = projections
            .into_iter()
            .map(|(id, props)| {
                (
                    id.to_string(),
                    props.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                )
            })
            .collect();
        self.mappings.insert(type_uri.to_string(), declared);
        self
    }

    /// Overlay `overrides` at the type level: a type present in `overrides`
    /// replaces that type's projections entirely
    pub fn merge(mut self, overrides: BTreeMap<String, TypeProjections>) -> Self {
        self.mappings.extend(overrides);
        self
    }

    /// All projections declared for a type; empty if none
    pub fn projections_for_type(&self, type_uri: &str) -> TypeProjections {
        self.mappings.get(type_uri).cloned().unwrap_or_default()
    }

    /// Ordered property URIs for one projection; empty if absent
    pub fn properties_for_projection(&self, type_uri: &str, projection_id: &str) -> Vec<String> {
        self.mappings
            .get(type_uri)
            .and_then(|p| p.get(projection_id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn projection_ids_for_type(&self, type_uri: &str) -> Vec<String> {
        self.mappings
            .get(type_uri)
            .map(|p| p.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_projections(&self, type_uri: &str) -> bool {
        self.mappings.get(type_uri).is_some_and(|p| !p.is_empty())
    }

    /// Type URIs with at least one declared projection
    pub fn type_uris(&self) -> Vec<String> {
        self.mappings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Concatenate the projection text of `object` for the given properties
///
/// Only text values contribute. Each is trimmed; empty pieces are dropped;
/// the rest are joined with single spaces in declared order. Lists, numbers
/// and references never contribute.
pub fn projection_text(object: &dyn GraphObject, properties: &[String]) -> String {
    let entries = object.property_entries();
    properties
        .iter()
        .filter_map(|p| match entries.get(p).map(|e| &e.value) {
            Some(PropertyValue::Text(s)) => Some(s.trim()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
