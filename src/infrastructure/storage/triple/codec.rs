//! Record <-> triple graph encoding
//!
//! Every stored record becomes one small named graph. The record subject is
//! `urn:strata:<id>`; sequences hang off local list nodes (`_:<predicate>`)
//! that carry a `length` and indexed `item:<n>` predicates, so order and
//! duplicates survive. Sets are plain repeated triples.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Embargo, Lease, Reference, ResourceKind, ResourceRecord, StoredRecord,
};
use crate::domain::ports::{StorageError, StorageResult};
use crate::domain::value_objects::{
    xsd, AttributeValue, Identifier, Literal, Permissions, ValueKind, Visibility,
};

pub const NS: &str = "urn:strata:";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

mod vocab {
    pub const RESOURCE: &str = "urn:strata:Resource";
    pub const EMBARGO: &str = "urn:strata:Embargo";
    pub const LEASE: &str = "urn:strata:Lease";

    pub const ALTERNATE_ID: &str = "urn:strata:alternateId";
    pub const MODEL: &str = "urn:strata:model";
    pub const KIND: &str = "urn:strata:kind";
    pub const ATTRIBUTE: &str = "urn:strata:attr:";
    pub const RELATIONSHIP: &str = "urn:strata:rel:";
    pub const MEMBERS: &str = "urn:strata:members";
    pub const MEMBERS_ORDERED: &str = "urn:strata:membersOrdered";
    pub const MEMBER_OF_COLLECTION: &str = "urn:strata:memberOfCollection";
    pub const FILES: &str = "urn:strata:files";
    pub const ORIGINAL_FILES: &str = "urn:strata:originalFiles";
    pub const THUMBNAILS: &str = "urn:strata:thumbnails";
    pub const EXTRACTED_TEXTS: &str = "urn:strata:extractedTexts";
    pub const REPRESENTATIVE: &str = "urn:strata:representative";
    pub const THUMBNAIL: &str = "urn:strata:thumbnail";
    pub const ACCESS_CONTROL: &str = "urn:strata:accessControl";
    pub const ADMIN_SET: &str = "urn:strata:adminSet";
    pub const READ_USER: &str = "urn:strata:readUser";
    pub const READ_GROUP: &str = "urn:strata:readGroup";
    pub const EDIT_USER: &str = "urn:strata:editUser";
    pub const EDIT_GROUP: &str = "urn:strata:editGroup";
    pub const EMBARGO_REF: &str = "urn:strata:embargo";
    pub const LEASE_REF: &str = "urn:strata:lease";

    pub const RELEASE_DATE: &str = "urn:strata:releaseDate";
    pub const EXPIRATION_DATE: &str = "urn:strata:expirationDate";
    pub const VISIBILITY_DURING: &str = "urn:strata:visibilityDuring";
    pub const VISIBILITY_AFTER: &str = "urn:strata:visibilityAfter";
    pub const HISTORY: &str = "urn:strata:history";

    pub const LENGTH: &str = "urn:strata:length";
    pub const ITEM: &str = "urn:strata:item:";
}

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Iri(String),
    Literal { lexical: String, datatype: String },
    /// Graph-local node
    Node(String),
}

impl Term {
    fn id(id: &Identifier) -> Self {
        Term::Iri(format!("{NS}{id}"))
    }

    fn literal(literal: &Literal) -> Self {
        Term::Literal {
            lexical: literal.lexical(),
            datatype: literal.kind().datatype_iri().to_string(),
        }
    }

    fn string(value: &str) -> Self {
        Term::Literal {
            lexical: value.to_string(),
            datatype: xsd::STRING.to_string(),
        }
    }

    fn token(value: impl ToString) -> Self {
        Term::Literal {
            lexical: value.to_string(),
            datatype: xsd::TOKEN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

/// Subject IRI for a stored record
pub fn subject_of(id: &Identifier) -> String {
    format!("{NS}{id}")
}

struct GraphWriter {
    subject: String,
    triples: Vec<Triple>,
}

impl GraphWriter {
    fn new(id: &Identifier) -> Self {
        Self {
            subject: subject_of(id),
            triples: Vec::new(),
        }
    }

    fn push(&mut self, subject: &str, predicate: &str, object: Term) {
        self.triples.push(Triple {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object,
        });
    }

    fn add(&mut self, predicate: &str, object: Term) {
        let subject = self.subject.clone();
        self.push(&subject, predicate, object);
    }

    fn add_opt(&mut self, predicate: &str, object: Option<Term>) {
        if let Some(object) = object {
            self.add(predicate, object);
        }
    }

    fn add_list(&mut self, predicate: &str, items: impl IntoIterator<Item = Term>) {
        let node = format!("_:{predicate}");
        self.add(predicate, Term::Node(node.clone()));
        let mut length = 0usize;
        for (i, item) in items.into_iter().enumerate() {
            self.push(&node, &format!("{}{i}", vocab::ITEM), item);
            length += 1;
        }
        self.push(&node, vocab::LENGTH, Term::literal(&Literal::Integer(length as i64)));
    }

    /// Sequences that are empty are left out entirely
    fn add_ids(&mut self, predicate: &str, ids: &[Identifier]) {
        if !ids.is_empty() {
            self.add_list(predicate, ids.iter().map(Term::id));
        }
    }

    fn add_visibilities(&mut self, during: Option<Visibility>, after: Option<Visibility>) {
        self.add_opt(vocab::VISIBILITY_DURING, during.map(Term::token));
        self.add_opt(vocab::VISIBILITY_AFTER, after.map(Term::token));
    }

    fn add_history(&mut self, history: &[String]) {
        if !history.is_empty() {
            self.add_list(vocab::HISTORY, history.iter().map(|h| Term::string(h)));
        }
    }
}

/// Encode a record into its graph; the record must carry an identifier
pub fn encode(id: &Identifier, record: &StoredRecord) -> Vec<Triple> {
    let mut g = GraphWriter::new(id);
    match record {
        StoredRecord::Resource(r) => encode_resource(&mut g, r),
        StoredRecord::Embargo(e) => {
            g.add(RDF_TYPE, Term::Iri(vocab::EMBARGO.to_string()));
            g.add_opt(vocab::RELEASE_DATE, e.release_date.map(timestamp));
            g.add_visibilities(e.visibility_during, e.visibility_after);
            g.add_history(&e.history);
        }
        StoredRecord::Lease(l) => {
            g.add(RDF_TYPE, Term::Iri(vocab::LEASE.to_string()));
            g.add_opt(vocab::EXPIRATION_DATE, l.expiration_date.map(timestamp));
            g.add_visibilities(l.visibility_during, l.visibility_after);
            g.add_history(&l.history);
        }
    }
    g.triples
}

fn timestamp(t: DateTime<Utc>) -> Term {
    Term::literal(&Literal::Timestamp(t))
}

fn encode_resource(g: &mut GraphWriter, r: &ResourceRecord) {
    g.add(RDF_TYPE, Term::Iri(vocab::RESOURCE.to_string()));
    g.add(vocab::ALTERNATE_ID, Term::string(r.alternate_id.as_str()));
    g.add(vocab::MODEL, Term::string(&r.model));
    g.add(vocab::KIND, Term::token(r.kind));

    for (name, value) in &r.attributes {
        let predicate = format!("{}{name}", vocab::ATTRIBUTE);
        match value {
            AttributeValue::Single(literal) => g.add(&predicate, Term::literal(literal)),
            AttributeValue::Many(literals) => {
                g.add_list(&predicate, literals.iter().map(Term::literal))
            }
        }
    }

    g.add_ids(vocab::MEMBERS, &r.member_ids);
    if r.members_ordered {
        g.add(vocab::MEMBERS_ORDERED, Term::literal(&Literal::Boolean(true)));
    }
    for id in &r.member_of_collection_ids {
        g.add(vocab::MEMBER_OF_COLLECTION, Term::id(id));
    }
    g.add_ids(vocab::FILES, &r.file_ids);
    g.add_ids(vocab::ORIGINAL_FILES, &r.original_file_ids);
    g.add_ids(vocab::THUMBNAILS, &r.thumbnail_ids);
    g.add_ids(vocab::EXTRACTED_TEXTS, &r.extracted_text_ids);
    g.add_opt(vocab::REPRESENTATIVE, r.representative_id.as_ref().map(Term::id));
    g.add_opt(vocab::THUMBNAIL, r.thumbnail_id.as_ref().map(Term::id));
    g.add_opt(vocab::ACCESS_CONTROL, r.access_control_id.as_ref().map(Term::id));
    g.add_opt(vocab::ADMIN_SET, r.admin_set_id.as_ref().map(Term::id));

    for (field, reference) in &r.relationships {
        let predicate = format!("{}{field}", vocab::RELATIONSHIP);
        match reference {
            Reference::One(id) => g.add(&predicate, Term::id(id)),
            Reference::Many(ids) => g.add_list(&predicate, ids.iter().map(Term::id)),
        }
    }

    let grants = [
        (vocab::READ_USER, &r.permissions.read_users),
        (vocab::READ_GROUP, &r.permissions.read_groups),
        (vocab::EDIT_USER, &r.permissions.edit_users),
        (vocab::EDIT_GROUP, &r.permissions.edit_groups),
    ];
    for (predicate, principals) in grants {
        for principal in principals {
            g.add(predicate, Term::string(principal));
        }
    }

    g.add_opt(vocab::EMBARGO_REF, r.embargo_id.as_ref().map(Term::id));
    g.add_opt(vocab::LEASE_REF, r.lease_id.as_ref().map(Term::id));
}

struct GraphReader<'g> {
    subject: String,
    by_subject: BTreeMap<&'g str, Vec<(&'g str, &'g Term)>>,
}

impl<'g> GraphReader<'g> {
    fn new(id: &Identifier, triples: &'g [Triple]) -> Self {
        let mut by_subject: BTreeMap<&str, Vec<(&str, &Term)>> = BTreeMap::new();
        for t in triples {
            by_subject
                .entry(t.subject.as_str())
                .or_default()
                .push((t.predicate.as_str(), &t.object));
        }
        Self {
            subject: subject_of(id),
            by_subject,
        }
    }

    fn corrupt(&self, message: impl Into<String>) -> StorageError {
        StorageError::Corrupt {
            location: self.subject.clone(),
            message: message.into(),
        }
    }

    fn objects_of<'s>(
        &'s self,
        subject: &str,
        predicate: &'s str,
    ) -> impl Iterator<Item = &'g Term> + 's {
        self.by_subject
            .get(subject)
            .into_iter()
            .flatten()
            .filter(move |(p, _)| *p == predicate)
            .map(|&(_, o)| o)
    }

    fn objects<'s>(&'s self, predicate: &'s str) -> impl Iterator<Item = &'g Term> + 's {
        self.objects_of(&self.subject, predicate)
    }

    /// Predicates on the record subject starting with `prefix`, suffix first
    fn prefixed(&self, prefix: &str) -> Vec<(&'g str, &'g Term)> {
        self.by_subject
            .get(self.subject.as_str())
            .into_iter()
            .flatten()
            .filter_map(|&(p, o)| p.strip_prefix(prefix).map(|rest| (rest, o)))
            .collect()
    }

    fn at_most_one_of(&self, subject: &str, predicate: &str) -> StorageResult<Option<&'g Term>> {
        let mut found = self.objects_of(subject, predicate);
        let first = found.next();
        if found.next().is_some() {
            return Err(self.corrupt(format!("several values for {predicate}")));
        }
        Ok(first)
    }

    fn at_most_one(&self, predicate: &str) -> StorageResult<Option<&'g Term>> {
        self.at_most_one_of(&self.subject, predicate)
    }

    fn exactly_one(&self, predicate: &str) -> StorageResult<&'g Term> {
        self.at_most_one(predicate)?
            .ok_or_else(|| self.corrupt(format!("missing {predicate}")))
    }

    fn literal(&self, term: &Term) -> StorageResult<Literal> {
        let Term::Literal { lexical, datatype } = term else {
            return Err(self.corrupt(format!("expected a literal, found {term:?}")));
        };
        let kind = ValueKind::from_datatype_iri(datatype)
            .ok_or_else(|| self.corrupt(format!("unknown datatype {datatype}")))?;
        Literal::parse(kind, lexical).map_err(|e| self.corrupt(e.to_string()))
    }

    fn text(&self, term: &Term) -> StorageResult<String> {
        match term {
            Term::Literal { lexical, .. } => Ok(lexical.clone()),
            other => Err(self.corrupt(format!("expected text, found {other:?}"))),
        }
    }

    fn id(&self, term: &Term) -> StorageResult<Identifier> {
        match term {
            Term::Iri(iri) => iri
                .strip_prefix(NS)
                .map(Identifier::from)
                .ok_or_else(|| self.corrupt(format!("foreign IRI {iri}"))),
            other => Err(self.corrupt(format!("expected an identifier, found {other:?}"))),
        }
    }

    fn list(&self, term: &Term) -> StorageResult<Vec<&'g Term>> {
        let Term::Node(node) = term else {
            return Err(self.corrupt(format!("expected a list node, found {term:?}")));
        };
        let length = match self.at_most_one_of(node, vocab::LENGTH)? {
            Some(t) => match self.literal(t)? {
                Literal::Integer(n) if n >= 0 => n as usize,
                _ => return Err(self.corrupt(format!("bad length on {node}"))),
            },
            None => return Err(self.corrupt(format!("list {node} has no length"))),
        };
        (0..length)
            .map(|i| {
                self.at_most_one_of(node, &format!("{}{i}", vocab::ITEM))?
                    .ok_or_else(|| self.corrupt(format!("list {node} is missing item {i}")))
            })
            .collect()
    }

    fn ids(&self, predicate: &str) -> StorageResult<Vec<Identifier>> {
        match self.at_most_one(predicate)? {
            None => Ok(Vec::new()),
            Some(node) => self.list(node)?.into_iter().map(|t| self.id(t)).collect(),
        }
    }

    fn opt_id(&self, predicate: &str) -> StorageResult<Option<Identifier>> {
        self.at_most_one(predicate)?.map(|t| self.id(t)).transpose()
    }

    fn timestamp(&self, predicate: &str) -> StorageResult<Option<DateTime<Utc>>> {
        match self.at_most_one(predicate)? {
            None => Ok(None),
            Some(t) => match self.literal(t)? {
                Literal::Timestamp(ts) => Ok(Some(ts)),
                other => Err(self.corrupt(format!("expected a timestamp, found {other}"))),
            },
        }
    }

    fn visibility(&self, predicate: &str) -> StorageResult<Option<Visibility>> {
        match self.at_most_one(predicate)? {
            None => Ok(None),
            Some(t) => self
                .text(t)?
                .parse::<Visibility>()
                .map(Some)
                .map_err(|e| self.corrupt(e.to_string())),
        }
    }

    fn history(&self) -> StorageResult<Vec<String>> {
        match self.at_most_one(vocab::HISTORY)? {
            None => Ok(Vec::new()),
            Some(node) => self.list(node)?.into_iter().map(|t| self.text(t)).collect(),
        }
    }

    fn strings(&self, predicate: &str) -> StorageResult<BTreeSet<String>> {
        self.objects(predicate).map(|t| self.text(t)).collect()
    }
}

/// Alternate identifier recorded in a resource graph
pub fn alternate_of(id: &Identifier, triples: &[Triple]) -> Option<Identifier> {
    let subject = subject_of(id);
    triples
        .iter()
        .find(|t| t.subject == subject && t.predicate == vocab::ALTERNATE_ID)
        .and_then(|t| match &t.object {
            Term::Literal { lexical, .. } => Identifier::parse(lexical),
            _ => None,
        })
}

/// Decode the graph written by [`encode`] for `id`
pub fn decode(id: &Identifier, triples: &[Triple]) -> StorageResult<StoredRecord> {
    let g = GraphReader::new(id, triples);
    let rdf_type = match g.exactly_one(RDF_TYPE)? {
        Term::Iri(iri) => iri.as_str(),
        other => return Err(g.corrupt(format!("bad rdf:type {other:?}"))),
    };

    match rdf_type {
        vocab::RESOURCE => decode_resource(id, &g).map(StoredRecord::Resource),
        vocab::EMBARGO => Ok(StoredRecord::Embargo(Embargo {
            id: Some(id.clone()),
            release_date: g.timestamp(vocab::RELEASE_DATE)?,
            visibility_during: g.visibility(vocab::VISIBILITY_DURING)?,
            visibility_after: g.visibility(vocab::VISIBILITY_AFTER)?,
            history: g.history()?,
        })),
        vocab::LEASE => Ok(StoredRecord::Lease(Lease {
            id: Some(id.clone()),
            expiration_date: g.timestamp(vocab::EXPIRATION_DATE)?,
            visibility_during: g.visibility(vocab::VISIBILITY_DURING)?,
            visibility_after: g.visibility(vocab::VISIBILITY_AFTER)?,
            history: g.history()?,
        })),
        other => Err(g.corrupt(format!("unknown record type {other}"))),
    }
}

fn parse_kind(value: &str) -> Option<ResourceKind> {
    [
        ResourceKind::Work,
        ResourceKind::FileSet,
        ResourceKind::Collection,
        ResourceKind::AdminSet,
    ]
    .into_iter()
    .find(|k| k.to_string() == value)
}

fn decode_resource(id: &Identifier, g: &GraphReader<'_>) -> StorageResult<ResourceRecord> {
    let alternate_id = g.text(g.exactly_one(vocab::ALTERNATE_ID)?)?;
    let model = g.text(g.exactly_one(vocab::MODEL)?)?;
    let kind_text = g.text(g.exactly_one(vocab::KIND)?)?;
    let kind = parse_kind(&kind_text).ok_or_else(|| g.corrupt(format!("unknown kind {kind_text}")))?;

    let mut attributes = BTreeMap::new();
    for (name, term) in g.prefixed(vocab::ATTRIBUTE) {
        let value = match term {
            Term::Node(_) => AttributeValue::Many(
                g.list(term)?
                    .into_iter()
                    .map(|t| g.literal(t))
                    .collect::<StorageResult<_>>()?,
            ),
            _ => AttributeValue::Single(g.literal(term)?),
        };
        if attributes.insert(name.to_string(), value).is_some() {
            return Err(g.corrupt(format!("attribute {name} stored twice")));
        }
    }

    let mut relationships = BTreeMap::new();
    for (field, term) in g.prefixed(vocab::RELATIONSHIP) {
        let reference = match term {
            Term::Node(_) => Reference::Many(
                g.list(term)?
                    .into_iter()
                    .map(|t| g.id(t))
                    .collect::<StorageResult<_>>()?,
            ),
            _ => Reference::One(g.id(term)?),
        };
        if relationships.insert(field.to_string(), reference).is_some() {
            return Err(g.corrupt(format!("relationship {field} stored twice")));
        }
    }

    let members_ordered = match g.at_most_one(vocab::MEMBERS_ORDERED)? {
        None => false,
        Some(t) => matches!(g.literal(t)?, Literal::Boolean(true)),
    };

    Ok(ResourceRecord {
        id: id.clone(),
        alternate_id: Identifier::from(alternate_id),
        model,
        kind,
        attributes,
        member_ids: g.ids(vocab::MEMBERS)?,
        members_ordered,
        member_of_collection_ids: g
            .objects(vocab::MEMBER_OF_COLLECTION)
            .map(|t| g.id(t))
            .collect::<StorageResult<_>>()?,
        file_ids: g.ids(vocab::FILES)?,
        original_file_ids: g.ids(vocab::ORIGINAL_FILES)?,
        thumbnail_ids: g.ids(vocab::THUMBNAILS)?,
        extracted_text_ids: g.ids(vocab::EXTRACTED_TEXTS)?,
        representative_id: g.opt_id(vocab::REPRESENTATIVE)?,
        thumbnail_id: g.opt_id(vocab::THUMBNAIL)?,
        access_control_id: g.opt_id(vocab::ACCESS_CONTROL)?,
        admin_set_id: g.opt_id(vocab::ADMIN_SET)?,
        relationships,
        permissions: Permissions {
            read_users: g.strings(vocab::READ_USER)?,
            read_groups: g.strings(vocab::READ_GROUP)?,
            edit_users: g.strings(vocab::EDIT_USER)?,
            edit_groups: g.strings(vocab::EDIT_GROUP)?,
        },
        embargo_id: g.opt_id(vocab::EMBARGO_REF)?,
        lease_id: g.opt_id(vocab::LEASE_REF)?,
    })
}
