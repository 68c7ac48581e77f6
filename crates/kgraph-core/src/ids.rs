//! Deterministic vector record identifiers

use uuid::Uuid;

/// Id of the vector record for one projection of one object
///
/// `UUIDv5(NAMESPACE_URL, "{uri}#{projection_id}")`, rendered hyphenated.
/// The same object and projection always map to the same id, which makes
/// vector writes upserts and lets deletes target records without a lookup.
pub fn vector_record_id(uri: &str, projection_id: &str) -> String {
    let name = format!("{}#{}", uri, projection_id);
    Uuid::new_v5(&Uuid::NAMESPACE_URL, name.as_bytes()).to_string()
}
