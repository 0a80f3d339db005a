//! Relationship resolver
//!
//! Turns a legacy object's object-valued properties into identifier
//! references. Membership order is kept exactly when the source sequences
//! it. References to targets that were never saved are skipped and reported
//! as warnings; the rest of the graph still resolves. So are the extra
//! targets of a single-valued relationship.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::warn;

use crate::domain::entities::{FileRole, LegacyLink, LegacyRelation, LinkRole, Reference};
use crate::domain::ports::LegacyObject;
use crate::domain::schema::{Cardinality, SchemaDescriptor};
use crate::domain::value_objects::Identifier;

/// Why a reference was left out of the resolved graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceIssue {
    /// The target was never saved and has no identifier
    Unsaved,
    /// A single-valued relationship named several targets; this one was dropped
    Dropped(Identifier),
}

/// A reference that could not be carried into the resolved graph
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ReferenceResolutionError {
    pub source_id: Option<String>,
    pub relationship: String,
    pub target_model: String,
    pub issue: ReferenceIssue,
}

impl fmt::Display for ReferenceResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = self.source_id.as_deref().unwrap_or("<unsaved>");
        match &self.issue {
            ReferenceIssue::Unsaved => write!(
                f,
                "'{}' on '{source}' points at an unsaved {}",
                self.relationship, self.target_model
            ),
            ReferenceIssue::Dropped(id) => write!(
                f,
                "'{}' on '{source}' holds a single {} but names several, dropped '{id}'",
                self.relationship, self.target_model
            ),
        }
    }
}

/// Skipped references are kept as warnings on the transformation
pub type ReferenceWarning = ReferenceResolutionError;

/// Every identifier reference found on one legacy object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRelationships {
    pub member_ids: Vec<Identifier>,
    pub members_ordered: bool,
    pub member_of_collection_ids: BTreeSet<Identifier>,
    pub file_ids: Vec<Identifier>,
    pub original_file_ids: Vec<Identifier>,
    pub thumbnail_ids: Vec<Identifier>,
    pub extracted_text_ids: Vec<Identifier>,
    pub links: BTreeMap<LinkRole, Identifier>,
    pub relationships: BTreeMap<String, Reference>,
    pub warnings: Vec<ReferenceWarning>,
}

impl ResolvedRelationships {
    pub fn link(&self, role: LinkRole) -> Option<&Identifier> {
        self.links.get(&role)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

struct Resolver<'o, O: LegacyObject + ?Sized> {
    object: &'o O,
    warnings: Vec<ReferenceWarning>,
}

impl<O: LegacyObject + ?Sized> Resolver<'_, O> {
    fn resolve(&mut self, relationship: &str, link: &LegacyLink) -> Option<Identifier> {
        if let Some(id) = link.id.as_deref().and_then(Identifier::parse) {
            return Some(id);
        }
        let warning = self.warning(relationship, &link.model, ReferenceIssue::Unsaved);
        warn!(
            source_id = ?warning.source_id,
            relationship,
            target_model = %warning.target_model,
            "skipping unresolvable reference"
        );
        self.warnings.push(warning);
        None
    }

    fn warning(
        &self,
        relationship: &str,
        target_model: &str,
        issue: ReferenceIssue,
    ) -> ReferenceWarning {
        ReferenceResolutionError {
            source_id: self.object.identifier().map(str::to_string),
            relationship: relationship.to_string(),
            target_model: target_model.to_string(),
            issue,
        }
    }

    fn resolve_all(&mut self, relationship: &str, links: &[LegacyLink]) -> Vec<Identifier> {
        links
            .iter()
            .filter_map(|link| self.resolve(relationship, link))
            .collect()
    }
}

/// Resolve every relationship family of `object`
///
/// Resolution is lossless: membership and file links are resolved whatever
/// the resource kind, so nothing the source holds is dropped silently.
pub fn resolve_relationships<O: LegacyObject + ?Sized>(
    object: &O,
    descriptor: &SchemaDescriptor,
) -> ResolvedRelationships {
    let mut resolver = Resolver {
        object,
        warnings: Vec::new(),
    };
    let mut out = ResolvedRelationships::default();

    match object.ordered_members() {
        Some(ordered) => {
            out.member_ids = resolver.resolve_all("ordered_members", ordered);
            out.members_ordered = true;
        }
        None => {
            out.member_ids = resolver.resolve_all("members", object.members());
        }
    }

    out.member_of_collection_ids = resolver
        .resolve_all("member_of_collections", object.member_of_collections())
        .into_iter()
        .collect();

    for file in object.files() {
        let link = LegacyLink {
            id: file.id.clone(),
            model: "File".to_string(),
        };
        let Some(id) = resolver.resolve("files", &link) else {
            continue;
        };
        match file.role {
            Some(FileRole::OriginalFile) => out.original_file_ids.push(id.clone()),
            Some(FileRole::Thumbnail) => out.thumbnail_ids.push(id.clone()),
            Some(FileRole::ExtractedText) => out.extracted_text_ids.push(id.clone()),
            None => {}
        }
        out.file_ids.push(id);
    }

    for role in LinkRole::ALL {
        if let Some(id) = object.linked_id(role).and_then(Identifier::parse) {
            out.links.insert(role, id);
        }
    }

    for decl in &descriptor.relationships {
        let Some(relation) = object.relation(&decl.name) else {
            continue;
        };
        let links: &[LegacyLink] = match relation {
            LegacyRelation::One(link) => std::slice::from_ref(link),
            LegacyRelation::Many(links) => links,
        };
        let mut ids = resolver.resolve_all(&decl.name, links);

        let reference = match decl.cardinality {
            Cardinality::Many if ids.is_empty() => continue,
            Cardinality::Many => Reference::Many(ids),
            Cardinality::Single => {
                if ids.is_empty() {
                    continue;
                }
                let kept = ids.remove(0);
                for dropped in ids {
                    let issue = ReferenceIssue::Dropped(dropped);
                    let warning = resolver.warning(&decl.name, &decl.target, issue);
                    warn!(
                        source_id = ?warning.source_id,
                        relationship = %decl.name,
                        "{warning}"
                    );
                    resolver.warnings.push(warning);
                }
                Reference::One(kept)
            }
        };
        out.relationships.insert(decl.field_name(), reference);
    }

    out.warnings = resolver.warnings;
    out
}
