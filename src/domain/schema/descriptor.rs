//! Schema descriptors
//!
//! A descriptor declares, for one legacy model, which properties and
//! relationships exist and with what cardinality. The mapper and resolver
//! read objects through descriptors instead of introspecting them.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ResourceKind;
use crate::domain::value_objects::ValueKind;

/// Single- or multi-valued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    Single,
    #[default]
    Many,
}

/// A declared property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    #[serde(default)]
    pub cardinality: Cardinality,
    /// Expected value type; `None` keeps whatever type the source holds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,
    #[serde(default)]
    pub required: bool,
}

impl PropertyDecl {
    pub fn many(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::Many,
            kind: None,
            required: false,
        }
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self {
            cardinality: Cardinality::Single,
            ..Self::many(name)
        }
    }

    pub fn of(mut self, kind: ValueKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A declared relationship to other legacy objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipDecl {
    pub name: String,
    pub cardinality: Cardinality,
    /// Target model name
    pub target: String,
    /// Normalized field name; derived from `name` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl RelationshipDecl {
    /// `has_many`-style declaration
    pub fn many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cardinality: Cardinality::Many,
            target: target.into(),
            field: None,
        }
    }

    /// `belongs_to`-style declaration
    pub fn single(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            cardinality: Cardinality::Single,
            ..Self::many(name, target)
        }
    }

    pub fn as_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Field name on the resource: `<name>_id` or `<singular name>_ids`
    pub fn field_name(&self) -> String {
        if let Some(field) = &self.field {
            return field.clone();
        }
        match self.cardinality {
            Cardinality::Single => format!("{}_id", self.name),
            Cardinality::Many => format!("{}_ids", singularize(&self.name)),
        }
    }
}

fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("ss") {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('s') {
        stem.to_string()
    } else {
        word.to_string()
    }
}

/// Everything the transformer needs to know about one legacy model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub model: String,
    #[serde(default)]
    pub kind: ResourceKind,
    #[serde(default)]
    pub properties: Vec<PropertyDecl>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDecl>,
}

impl SchemaDescriptor {
    pub fn new(model: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            model: model.into(),
            kind,
            properties: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn property(mut self, decl: PropertyDecl) -> Self {
        self.properties.push(decl);
        self
    }

    pub fn relationship(mut self, decl: RelationshipDecl) -> Self {
        self.relationships.push(decl);
        self
    }

    pub fn find_property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDecl> {
        self.properties.iter().filter(|p| p.required)
    }
}
