//! Legacy object snapshot
//!
//! `LegacyRecord` is an in-process snapshot of a pre-migration domain object:
//! its property bag (possibly holding RDF-typed literals), membership and
//! file links, access grants and restriction sub-objects. It implements the
//! `LegacyObject` port, so the transformer can read it the same way it reads
//! any other legacy source.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::ports::LegacyObject;
use crate::domain::value_objects::{Literal, Permissions, Visibility};

/// A property value as held by the legacy store
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyTerm {
    /// Already-typed native value
    Value(Literal),
    /// RDF literal with an explicit datatype IRI
    Typed { lexical: String, datatype: String },
    /// Plain (untyped or language-tagged) RDF literal
    Plain(String),
    /// RDF IRI object
    Resource(String),
}

impl LegacyTerm {
    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        LegacyTerm::Typed {
            lexical: lexical.into(),
            datatype: datatype.into(),
        }
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        LegacyTerm::Resource(iri.into())
    }
}

impl From<&str> for LegacyTerm {
    fn from(s: &str) -> Self {
        LegacyTerm::Plain(s.to_string())
    }
}

impl From<String> for LegacyTerm {
    fn from(s: String) -> Self {
        LegacyTerm::Plain(s)
    }
}

impl From<Literal> for LegacyTerm {
    fn from(l: Literal) -> Self {
        LegacyTerm::Value(l)
    }
}

impl From<bool> for LegacyTerm {
    fn from(b: bool) -> Self {
        LegacyTerm::Value(Literal::Boolean(b))
    }
}

impl From<f64> for LegacyTerm {
    fn from(f: f64) -> Self {
        LegacyTerm::Value(Literal::Float(f))
    }
}

impl From<DateTime<Utc>> for LegacyTerm {
    fn from(t: DateTime<Utc>) -> Self {
        LegacyTerm::Value(Literal::Timestamp(t))
    }
}

/// A link to another legacy object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyLink {
    /// Target identifier; `None` when the target was never saved
    pub id: Option<String>,
    /// Target model name
    pub model: String,
}

impl LegacyLink {
    pub fn to(model: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            model: model.into(),
        }
    }

    pub fn unsaved(model: impl Into<String>) -> Self {
        Self {
            id: None,
            model: model.into(),
        }
    }
}

/// Value of a declared relationship property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyRelation {
    One(LegacyLink),
    Many(Vec<LegacyLink>),
}

/// Role a file plays inside a file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileRole {
    OriginalFile,
    Thumbnail,
    ExtractedText,
}

/// A file attached to a legacy file set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyFile {
    pub id: Option<String>,
    pub role: Option<FileRole>,
}

/// Single-valued `_id` links on a legacy object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkRole {
    Representative,
    Thumbnail,
    AccessControl,
    AdminSet,
}

impl LinkRole {
    pub const ALL: [LinkRole; 4] = [
        LinkRole::Representative,
        LinkRole::Thumbnail,
        LinkRole::AccessControl,
        LinkRole::AdminSet,
    ];

    /// Normalized field name
    pub fn field(&self) -> &'static str {
        match self {
            LinkRole::Representative => "representative_id",
            LinkRole::Thumbnail => "thumbnail_id",
            LinkRole::AccessControl => "access_control_id",
            LinkRole::AdminSet => "admin_set_id",
        }
    }
}

/// Embargo or lease sub-object on a legacy object
///
/// `date` is the release date of an embargo or the expiration date of a lease.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegacyRestriction {
    pub id: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub visibility_during: Option<String>,
    pub visibility_after: Option<String>,
    pub history: Vec<String>,
}

impl LegacyRestriction {
    pub fn until(date: DateTime<Utc>) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Mark the restriction as saved under `id`
    pub fn saved_as(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn visibilities(mut self, during: impl Into<String>, after: impl Into<String>) -> Self {
        self.visibility_during = Some(during.into());
        self.visibility_after = Some(after.into());
        self
    }

    pub fn deactivated(mut self, entry: impl Into<String>) -> Self {
        self.history.push(entry.into());
        self
    }
}

/// In-process snapshot of a legacy object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegacyRecord {
    pub model: String,
    pub id: Option<String>,
    pub properties: BTreeMap<String, Vec<LegacyTerm>>,
    pub relations: BTreeMap<String, LegacyRelation>,
    /// Explicit sequence, when the source maintains one
    pub ordered_members: Vec<LegacyLink>,
    pub members: Vec<LegacyLink>,
    pub member_of_collections: Vec<LegacyLink>,
    pub files: Vec<LegacyFile>,
    pub links: BTreeMap<LinkRole, String>,
    pub permissions: Permissions,
    pub embargo: Option<LegacyRestriction>,
    pub lease: Option<LegacyRestriction>,
}

impl LegacyRecord {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set a property to a list of terms
    pub fn with_values<T: Into<LegacyTerm>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.properties
            .insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Set a property to a single term
    pub fn with_value(self, name: impl Into<String>, value: impl Into<LegacyTerm>) -> Self {
        self.with_values(name, [value.into()])
    }

    pub fn has_many(mut self, name: impl Into<String>, targets: Vec<LegacyLink>) -> Self {
        self.relations
            .insert(name.into(), LegacyRelation::Many(targets));
        self
    }

    pub fn belongs_to(mut self, name: impl Into<String>, target: LegacyLink) -> Self {
        self.relations.insert(name.into(), LegacyRelation::One(target));
        self
    }

    pub fn ordered_member(mut self, link: LegacyLink) -> Self {
        self.ordered_members.push(link);
        self
    }

    pub fn member(mut self, link: LegacyLink) -> Self {
        self.members.push(link);
        self
    }

    pub fn in_collection(mut self, link: LegacyLink) -> Self {
        self.member_of_collections.push(link);
        self
    }

    pub fn file(mut self, id: impl Into<String>, role: Option<FileRole>) -> Self {
        self.files.push(LegacyFile {
            id: Some(id.into()),
            role,
        });
        self
    }

    pub fn link(mut self, role: LinkRole, id: impl Into<String>) -> Self {
        self.links.insert(role, id.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.permissions.set_visibility(visibility);
        self
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_embargo(mut self, embargo: LegacyRestriction) -> Self {
        self.embargo = Some(embargo);
        self
    }

    pub fn with_lease(mut self, lease: LegacyRestriction) -> Self {
        self.lease = Some(lease);
        self
    }
}

impl LegacyObject for LegacyRecord {
    fn model(&self) -> &str {
        &self.model
    }

    fn identifier(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn property(&self, name: &str) -> Option<&[LegacyTerm]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    fn relation(&self, name: &str) -> Option<&LegacyRelation> {
        self.relations.get(name)
    }

    fn ordered_members(&self) -> Option<&[LegacyLink]> {
        if self.ordered_members.is_empty() {
            None
        } else {
            Some(self.ordered_members.as_slice())
        }
    }

    fn members(&self) -> &[LegacyLink] {
        &self.members
    }

    fn member_of_collections(&self) -> &[LegacyLink] {
        &self.member_of_collections
    }

    fn files(&self) -> &[LegacyFile] {
        &self.files
    }

    fn linked_id(&self, role: LinkRole) -> Option<&str> {
        self.links.get(&role).map(String::as_str)
    }

    fn permissions(&self) -> &Permissions {
        &self.permissions
    }

    fn embargo(&self) -> Option<&LegacyRestriction> {
        self.embargo.as_ref()
    }

    fn lease(&self) -> Option<&LegacyRestriction> {
        self.lease.as_ref()
    }
}
