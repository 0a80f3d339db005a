//! Attribute mapper
//!
//! Converts a legacy object's declared properties into typed attribute
//! values. Properties are enumerated from the schema descriptor. The mapping
//! is a pure function of the object's state.

use std::collections::BTreeMap;

use crate::domain::entities::{Embargo, LegacyRestriction, LegacyTerm, Lease};
use crate::domain::ports::LegacyObject;
use crate::domain::schema::{Cardinality, SchemaDescriptor};
use crate::domain::value_objects::{
    validate_uri, AttributeValue, Identifier, Literal, ValueKind, Visibility,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "cannot map '{field}' on {model} '{}': {reason}",
    .source_id.as_deref().unwrap_or("<unsaved>")
)]
pub struct MappingError {
    pub source_id: Option<String>,
    pub model: String,
    pub field: String,
    pub reason: String,
}

impl MappingError {
    fn new<O: LegacyObject + ?Sized>(object: &O, field: &str, reason: impl Into<String>) -> Self {
        Self {
            source_id: object.identifier().map(str::to_string),
            model: object.model().to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Map every declared, set property of `object`
///
/// Unset properties and multi-valued properties without values are omitted.
pub fn map_attributes<O: LegacyObject + ?Sized>(
    object: &O,
    descriptor: &SchemaDescriptor,
) -> Result<BTreeMap<String, AttributeValue>, MappingError> {
    let mut attributes = BTreeMap::new();

    for decl in &descriptor.properties {
        let Some(terms) = object.property(&decl.name) else {
            continue;
        };

        let mut values = Vec::with_capacity(terms.len());
        for term in terms {
            let value = coerce(term, decl.kind)
                .map_err(|reason| MappingError::new(object, &decl.name, reason))?;
            values.push(value);
        }

        let value = match decl.cardinality {
            Cardinality::Many if values.is_empty() => continue,
            Cardinality::Many => AttributeValue::Many(values),
            Cardinality::Single => match values.len() {
                0 => continue,
                1 => AttributeValue::Single(values.remove(0)),
                n => {
                    return Err(MappingError::new(
                        object,
                        &decl.name,
                        format!("expected a single value, found {n}"),
                    ))
                }
            },
        };
        attributes.insert(decl.name.clone(), value);
    }

    Ok(attributes)
}

/// Read one legacy term as a literal, converting to `expected` when given
///
/// Only lexical strings (and integers to floats) are converted; any other
/// type mismatch is an error rather than a silent stringification. A string
/// converted to a URI is trimmed and must then be a usable URI; URI terms
/// from the source are kept verbatim.
pub fn coerce(term: &LegacyTerm, expected: Option<ValueKind>) -> Result<Literal, String> {
    let natural = match term {
        LegacyTerm::Value(literal) => literal.clone(),
        LegacyTerm::Typed { lexical, datatype } => match ValueKind::from_datatype_iri(datatype) {
            Some(kind) => Literal::parse(kind, lexical).map_err(|e| e.to_string())?,
            None => Literal::String(lexical.clone()),
        },
        LegacyTerm::Plain(s) => Literal::String(s.clone()),
        LegacyTerm::Resource(iri) => Literal::Uri(iri.clone()),
    };

    let Some(kind) = expected else {
        return Ok(natural);
    };
    if natural.kind() == kind {
        return Ok(natural);
    }

    match (natural, kind) {
        (Literal::String(s), ValueKind::Uri) => {
            let s = s.trim();
            validate_uri(s).map_err(|e| e.to_string())?;
            Ok(Literal::uri(s))
        }
        (Literal::String(s), kind) => Literal::parse(kind, &s).map_err(|e| e.to_string()),
        (Literal::Integer(i), ValueKind::Float) => Ok(Literal::Float(i as f64)),
        (other, kind) => Err(format!("expected {kind}, found {}", other.kind())),
    }
}

struct RestrictionParts {
    id: Option<Identifier>,
    visibility_during: Option<Visibility>,
    visibility_after: Option<Visibility>,
}

fn restriction_parts<O: LegacyObject + ?Sized>(
    object: &O,
    prefix: &str,
    legacy: &LegacyRestriction,
) -> Result<RestrictionParts, MappingError> {
    let visibility = |field: &str, raw: &Option<String>| -> Result<Option<Visibility>, MappingError> {
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<Visibility>()
                .map(Some)
                .map_err(|e| MappingError::new(object, &format!("{prefix}.{field}"), e.to_string())),
        }
    };

    Ok(RestrictionParts {
        id: legacy.id.as_deref().and_then(Identifier::parse),
        visibility_during: visibility("visibility_during", &legacy.visibility_during)?,
        visibility_after: visibility("visibility_after", &legacy.visibility_after)?,
    })
}

/// Map the legacy embargo, keeping its identifier when it was already saved
pub fn map_embargo<O: LegacyObject + ?Sized>(object: &O) -> Result<Option<Embargo>, MappingError> {
    let Some(legacy) = object.embargo() else {
        return Ok(None);
    };
    let parts = restriction_parts(object, "embargo", legacy)?;
    Ok(Some(Embargo {
        id: parts.id,
        release_date: legacy.date,
        visibility_during: parts.visibility_during,
        visibility_after: parts.visibility_after,
        history: legacy.history.clone(),
    }))
}

/// Map the legacy lease, keeping its identifier when it was already saved
pub fn map_lease<O: LegacyObject + ?Sized>(object: &O) -> Result<Option<Lease>, MappingError> {
    let Some(legacy) = object.lease() else {
        return Ok(None);
    };
    let parts = restriction_parts(object, "lease", legacy)?;
    Ok(Some(Lease {
        id: parts.id,
        expiration_date: legacy.date,
        visibility_during: parts.visibility_during,
        visibility_after: parts.visibility_after,
        history: legacy.history.clone(),
    }))
}
