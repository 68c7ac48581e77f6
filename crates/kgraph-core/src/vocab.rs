//! Well-known IRIs used by the storage layer

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Predicate of the identity quad every stored object carries (`<uri> URIProp <uri>`)
pub const IDENTITY_PREDICATE: &str = "http://vital.ai/ontology/vital-core#URIProp";

/// Predicate naming an object's primary class among its `rdf:type`s
pub const PRIMARY_TYPE_PREDICATE: &str = "http://vital.ai/ontology/vital-core#vitaltype";

/// XML Schema datatypes
pub mod xsd {
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// `rdf:langString`, the datatype of language-tagged literals
pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// Core ontology properties and classes referenced by the default projections
pub mod vital {
    pub const HAS_NAME: &str = "http://vital.ai/ontology/vital-core#hasName";
    pub const HAS_DESCRIPTION: &str = "http://vital.ai/ontology/vital-core#hasDescription";

    pub const NODE: &str = "http://vital.ai/ontology/vital-core#VITAL_Node";
    pub const EDGE: &str = "http://vital.ai/ontology/vital-core#VITAL_Edge";
}

/// Knowledge-graph domain ontology
pub mod haley {
    pub const HAS_KGRAPH_DESCRIPTION: &str = "http://vital.ai/ontology/haley-ai-kg#hasKGraphDescription";
    pub const HAS_ENTITY_TYPE_DESCRIPTION: &str =
        "http://vital.ai/ontology/haley-ai-kg#hasKGEntityTypeDescription";
    pub const HAS_FRAME_TYPE_DESCRIPTION: &str =
        "http://vital.ai/ontology/haley-ai-kg#hasKGFrameTypeDescription";
    pub const HAS_SLOT_TYPE_DESCRIPTION: &str =
        "http://vital.ai/ontology/haley-ai-kg#hasKGSlotTypeDescription";
    pub const HAS_TEXT_SLOT_VALUE: &str = "http://vital.ai/ontology/haley-ai-kg#hasTextSlotValue";
    pub const HAS_LONG_TEXT_SLOT_VALUE: &str =
        "http://vital.ai/ontology/haley-ai-kg#hasLongTextSlotValue";

    pub const ENTITY: &str = "http://vital.ai/ontology/haley-ai-kg#KGEntity";
    pub const FRAME: &str = "http://vital.ai/ontology/haley-ai-kg#KGFrame";
    pub const SLOT: &str = "http://vital.ai/ontology/haley-ai-kg#KGSlot";
    pub const TEXT_SLOT: &str = "http://vital.ai/ontology/haley-ai-kg#KGTextSlot";
    pub const LONG_TEXT_SLOT: &str = "http://vital.ai/ontology/haley-ai-kg#KGLongTextSlot";
    pub const DATE_TIME_SLOT: &str = "http://vital.ai/ontology/haley-ai-kg#KGDateTimeSlot";
    pub const NUMBER_SLOT: &str = "http://vital.ai/ontology/haley-ai-kg#KGNumberSlot";
    pub const INTERACTION: &str = "http://vital.ai/ontology/haley-ai-kg#KGInteraction";
    pub const ACTOR: &str = "http://vital.ai/ontology/haley-ai-kg#KGActor";
    pub const AGENT: &str = "http://vital.ai/ontology/haley-ai-kg#KGAgent";
}
