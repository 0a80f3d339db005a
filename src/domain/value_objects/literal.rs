//! Typed literal values
//!
//! Attribute values keep their original type across transformation and
//! storage. Each kind has a lexical form and an XML Schema datatype so
//! literals can travel through RDF-shaped stores unchanged.

use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// XML Schema datatype IRIs understood by the mapper and the triple store
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
    pub const TOKEN: &str = "http://www.w3.org/2001/XMLSchema#token";
}

/// The type of a literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Timestamp,
    Boolean,
    Float,
    Integer,
    Symbol,
    Uri,
}

impl ValueKind {
    /// Canonical datatype IRI used when writing a literal of this kind
    pub fn datatype_iri(&self) -> &'static str {
        match self {
            ValueKind::String => xsd::STRING,
            ValueKind::Timestamp => xsd::DATE_TIME,
            ValueKind::Boolean => xsd::BOOLEAN,
            ValueKind::Float => xsd::DOUBLE,
            ValueKind::Integer => xsd::INTEGER,
            ValueKind::Symbol => xsd::TOKEN,
            ValueKind::Uri => xsd::ANY_URI,
        }
    }

    /// Resolve a datatype IRI to a kind, if it is one we understand
    pub fn from_datatype_iri(iri: &str) -> Option<Self> {
        match iri {
            xsd::STRING => Some(ValueKind::String),
            xsd::DATE_TIME | xsd::DATE => Some(ValueKind::Timestamp),
            xsd::BOOLEAN => Some(ValueKind::Boolean),
            xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL => Some(ValueKind::Float),
            xsd::INTEGER | xsd::INT | xsd::LONG => Some(ValueKind::Integer),
            xsd::TOKEN => Some(ValueKind::Symbol),
            xsd::ANY_URI => Some(ValueKind::Uri),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Timestamp => "timestamp",
            ValueKind::Boolean => "boolean",
            ValueKind::Float => "float",
            ValueKind::Integer => "integer",
            ValueKind::Symbol => "symbol",
            ValueKind::Uri => "uri",
        };
        f.write_str(name)
    }
}

/// A lexical form could not be read as the requested kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{lexical}' is not a valid {kind} literal")]
pub struct LiteralError {
    pub kind: ValueKind,
    pub lexical: String,
}

/// A typed literal value
///
/// Floats serialize through their lexical form so `INF`, `-INF` and `NaN`
/// survive JSON. Equality treats every NaN as equal to every other NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    Timestamp(DateTime<Utc>),
    Boolean(bool),
    Float(#[serde(with = "float_lexical")] f64),
    Integer(i64),
    Symbol(String),
    Uri(String),
}

impl Literal {
    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }

    pub fn symbol(value: impl Into<String>) -> Self {
        Literal::Symbol(value.into())
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Literal::Uri(value.into())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Literal::String(_) => ValueKind::String,
            Literal::Timestamp(_) => ValueKind::Timestamp,
            Literal::Boolean(_) => ValueKind::Boolean,
            Literal::Float(_) => ValueKind::Float,
            Literal::Integer(_) => ValueKind::Integer,
            Literal::Symbol(_) => ValueKind::Symbol,
            Literal::Uri(_) => ValueKind::Uri,
        }
    }

    /// Borrow the text of string-like literals (string, symbol, URI)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::String(s) | Literal::Symbol(s) | Literal::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Lexical form; `Literal::parse(kind, &lexical)` yields an equal literal
    pub fn lexical(&self) -> String {
        match self {
            Literal::String(s) | Literal::Symbol(s) | Literal::Uri(s) => s.clone(),
            Literal::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Literal::Boolean(b) => b.to_string(),
            Literal::Float(f) if f.is_nan() => "NaN".to_string(),
            Literal::Float(f) if f.is_infinite() => {
                let lexical = if *f > 0.0 { "INF" } else { "-INF" };
                lexical.to_string()
            }
            Literal::Float(f) => f.to_string(),
            Literal::Integer(i) => i.to_string(),
        }
    }

    /// Read a lexical form as the given kind
    ///
    /// String-like kinds are taken verbatim, so this is the exact inverse of
    /// `lexical()`. Use `validate_uri` to check URIs coming from outside.
    pub fn parse(kind: ValueKind, lexical: &str) -> Result<Self, LiteralError> {
        let fail = || LiteralError {
            kind,
            lexical: lexical.to_string(),
        };
        let trimmed = lexical.trim();
        match kind {
            ValueKind::String => Ok(Literal::String(lexical.to_string())),
            ValueKind::Symbol => Ok(Literal::Symbol(lexical.to_string())),
            ValueKind::Uri => Ok(Literal::Uri(lexical.to_string())),
            ValueKind::Timestamp => parse_timestamp(trimmed).map(Literal::Timestamp).ok_or_else(fail),
            ValueKind::Boolean => match trimmed {
                "true" | "1" => Ok(Literal::Boolean(true)),
                "false" | "0" => Ok(Literal::Boolean(false)),
                _ => Err(fail()),
            },
            ValueKind::Float => parse_float(trimmed).map(Literal::Float).ok_or_else(fail),
            ValueKind::Integer => trimmed.parse::<i64>().map(Literal::Integer).map_err(|_| fail()),
        }
    }
}

/// A usable URI is non-empty and contains no whitespace
pub fn validate_uri(lexical: &str) -> Result<(), LiteralError> {
    if lexical.is_empty() || lexical.contains(char::is_whitespace) {
        return Err(LiteralError {
            kind: ValueKind::Uri,
            lexical: lexical.to_string(),
        });
    }
    Ok(())
}

fn parse_float(s: &str) -> Option<f64> {
    match s {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::String(a), Literal::String(b))
            | (Literal::Symbol(a), Literal::Symbol(b))
            | (Literal::Uri(a), Literal::Uri(b)) => a == b,
            (Literal::Timestamp(a), Literal::Timestamp(b)) => a == b,
            (Literal::Boolean(a), Literal::Boolean(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => {
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
            }
            (Literal::Integer(a), Literal::Integer(b)) => a == b,
            _ => false,
        }
    }
}

/// Floats as lexical strings; plain JSON numbers are accepted on read
mod float_lexical {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_float, Literal, LiteralError, ValueKind};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Lexical(String),
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Literal::Float(*value).lexical())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(f) => Ok(f),
            Repr::Lexical(s) => parse_float(s.trim()).ok_or_else(|| {
                D::Error::custom(LiteralError {
                    kind: ValueKind::Float,
                    lexical: s,
                })
            }),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical())
    }
}

/// A single- or multi-valued attribute
///
/// `Many` keeps source order and is used for every multi-valued property,
/// even when the source held one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeValue {
    Single(Literal),
    Many(Vec<Literal>),
}

impl AttributeValue {
    /// All values, in order
    pub fn values(&self) -> &[Literal] {
        match self {
            AttributeValue::Single(l) => std::slice::from_ref(l),
            AttributeValue::Many(ls) => ls,
        }
    }

    pub fn first(&self) -> Option<&Literal> {
        self.values().first()
    }

    pub fn is_many(&self) -> bool {
        matches!(self, AttributeValue::Many(_))
    }

    /// True for a `Many` without values
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}
