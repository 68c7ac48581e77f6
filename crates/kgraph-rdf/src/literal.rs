//! Typed literal policy
//!
//! Maps an adapter's `(value, hint)` pair to an RDF term on the write side,
//! and a stored literal back to a native [`PropertyValue`] on the read side.
//! The two directions are inverse for every supported datatype, so a
//! dateTime, long, double or boolean property reads back equal by value.
//!
//! Hint resolution, first match wins:
//!
//! 1. a full XSD IRI is used verbatim
//! 2. a list hint (handled by the caller, element by element)
//! 3. a descriptive name containing `DateTime`, `Date`, `Long`/`Integer`,
//!    `Double`/`Float` or `Boolean`, compared case-insensitively
//! 4. otherwise the datatype implied by the value itself, `xsd:string` for text

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kgraph_core::vocab::xsd;
use kgraph_core::{DatatypeHint, PropertyValue, RdfTerm};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+$").unwrap());

/// Resolve the XSD datatype for a scalar value
pub fn resolve_datatype(hint: Option<&DatatypeHint>, value: &PropertyValue) -> String {
    if let Some(hint) = hint {
        if hint.is_xsd() {
            return hint.as_str().to_string();
        }
        let name = hint.as_str().to_ascii_lowercase();
        let by_name = if name.contains("datetime") {
            Some(xsd::DATE_TIME)
        } else if name.contains("date") {
            Some(xsd::DATE)
        } else if name.contains("long") || name.contains("integer") {
            Some(xsd::LONG)
        } else if name.contains("double") || name.contains("float") {
            Some(xsd::DOUBLE)
        } else if name.contains("boolean") {
            Some(xsd::BOOLEAN)
        } else {
            None
        };
        if let Some(dt) = by_name {
            return dt.to_string();
        }
    }
    value.natural_datatype().unwrap_or(xsd::STRING).to_string()
}

/// Build the object term for one scalar value
///
/// References become named nodes. A lexical form that is not valid for the
/// resolved datatype falls back to a plain string literal.
pub fn scalar_term(value: &PropertyValue, datatype: &str) -> Option<RdfTerm> {
    if let PropertyValue::Uri(uri) = value {
        return Some(RdfTerm::named(uri.clone()));
    }
    let mut lexical = value.lexical()?;
    if datatype == xsd::BOOLEAN {
        lexical = lexical.to_ascii_lowercase();
    }
    if datatype == xsd::STRING {
        return Some(RdfTerm::literal(lexical));
    }
    if is_valid_lexical(&lexical, datatype) {
        Some(RdfTerm::typed_literal(lexical, datatype))
    } else {
        warn!(
            value = %lexical,
            datatype = %datatype,
            "Lexical form invalid for datatype, storing as plain string"
        );
        Some(RdfTerm::literal(lexical))
    }
}

/// Check a lexical form against the XSD datatypes this layer produces
///
/// Unknown datatypes are accepted as-is.
pub fn is_valid_lexical(lexical: &str, datatype: &str) -> bool {
    match datatype {
        xsd::LONG | xsd::INT => lexical.parse::<i64>().is_ok(),
        xsd::INTEGER => INTEGER_RE.is_match(lexical),
        xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => parse_double(lexical).is_some(),
        xsd::BOOLEAN => matches!(lexical, "true" | "false" | "1" | "0"),
        xsd::DATE_TIME => parse_date_time(lexical).is_some(),
        xsd::DATE => NaiveDate::parse_from_str(lexical, "%Y-%m-%d").is_ok(),
        _ => true,
    }
}

/// Decode a stored term into a native value
pub fn decode_term(term: &RdfTerm) -> PropertyValue {
    let literal = match term {
        RdfTerm::NamedNode(iri) => return PropertyValue::Uri(iri.clone()),
        RdfTerm::BlankNode(_) => return PropertyValue::Text(term.to_compact()),
        RdfTerm::Literal(literal) => literal,
    };

    let value = literal.value.as_str();
    let decoded = match literal.datatype() {
        xsd::LONG | xsd::INT | xsd::INTEGER => value.parse::<i64>().ok().map(PropertyValue::Integer),
        xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => parse_double(value).map(PropertyValue::Double),
        xsd::BOOLEAN => match value {
            "true" | "1" => Some(PropertyValue::Boolean(true)),
            "false" | "0" => Some(PropertyValue::Boolean(false)),
            _ => None,
        },
        xsd::DATE_TIME => parse_date_time(value).map(PropertyValue::DateTime),
        xsd::DATE => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(PropertyValue::Date),
        _ => None,
    };
    decoded.unwrap_or_else(|| PropertyValue::Text(value.to_string()))
}

fn parse_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        // Rust accepts "inf"/"infinity", XSD does not
        other if other.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => None,
        other => other.parse::<f64>().ok(),
    }
}

/// RFC 3339, or a zone-less timestamp taken as UTC
fn parse_date_time(lexical: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    #[test_case("DateTimeProperty", xsd::DATE_TIME ; "date time name")]
    #[test_case("DateProperty", xsd::DATE ; "date name")]
    #[test_case("LongProperty", xsd::LONG ; "long name")]
    #[test_case("IntegerProperty", xsd::LONG ; "integer name")]
    #[test_case("DoubleProperty", xsd::DOUBLE ; "double name")]
    #[test_case("FloatProperty", xsd::DOUBLE ; "float name")]
    #[test_case("BooleanProperty", xsd::BOOLEAN ; "boolean name")]
    #[test_case("booleanproperty", xsd::BOOLEAN ; "lower case name")]
    #[test_case("http://www.w3.org/2001/XMLSchema#int", xsd::INT ; "xsd verbatim")]
    fn test_hint_names(hint: &str, expected: &str) {
        let hint = DatatypeHint::from(hint);
        assert_eq!(
            resolve_datatype(Some(&hint), &PropertyValue::text("x")),
            expected
        );
    }

    #[test]
    fn test_unrecognized_hint_uses_value_kind() {
        let hint = DatatypeHint::from("StringProperty");
        assert_eq!(resolve_datatype(Some(&hint), &"x".into()), xsd::STRING);
        assert_eq!(
            resolve_datatype(Some(&DatatypeHint::from("Opaque")), &PropertyValue::Integer(3)),
            xsd::LONG
        );
        assert_eq!(resolve_datatype(None, &PropertyValue::Boolean(true)), xsd::BOOLEAN);
    }

    #[test]
    fn test_boolean_lexical_lower_cased() {
        let term = scalar_term(&PropertyValue::text("True"), xsd::BOOLEAN).unwrap();
        assert_eq!(term, RdfTerm::typed_literal("true", xsd::BOOLEAN));
    }

    #[test]
    fn test_invalid_lexical_falls_back_to_string() {
        let term = scalar_term(&PropertyValue::text("next tuesday"), xsd::DATE_TIME).unwrap();
        assert_eq!(term, RdfTerm::literal("next tuesday"));
    }

    #[test]
    fn test_uri_becomes_reference() {
        let term = scalar_term(&PropertyValue::uri("http://e/2"), xsd::STRING).unwrap();
        assert_eq!(term, RdfTerm::named("http://e/2"));
    }

    #[test]
    fn test_null_has_no_term() {
        assert!(scalar_term(&PropertyValue::Null, xsd::STRING).is_none());
    }

    #[test]
    fn test_typed_values_decode_by_value() {
        let when = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        for value in [
            PropertyValue::DateTime(when),
            PropertyValue::Integer(-42),
            PropertyValue::Double(0.1),
            PropertyValue::Boolean(false),
        ] {
            let dt = resolve_datatype(None, &value);
            let term = scalar_term(&value, &dt).unwrap();
            assert_eq!(decode_term(&term), value);
        }
    }

    #[test]
    fn test_naive_date_time_read_as_utc() {
        let term = RdfTerm::typed_literal("2024-03-01T12:30:00", xsd::DATE_TIME);
        assert_eq!(
            decode_term(&term),
            PropertyValue::DateTime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_special_doubles() {
        assert!(is_valid_lexical("INF", xsd::DOUBLE));
        assert!(is_valid_lexical("1.5e3", xsd::DOUBLE));
        assert!(!is_valid_lexical("inf", xsd::DOUBLE));
        assert_eq!(
            PropertyValue::Double(f64::NEG_INFINITY).lexical().unwrap(),
            "-INF"
        );
        assert_eq!(
            decode_term(&RdfTerm::typed_literal("-INF", xsd::DOUBLE)),
            PropertyValue::Double(f64::NEG_INFINITY)
        );
    }
}
