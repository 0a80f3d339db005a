//! LegacyObject port - read access to a pre-migration object
//!
//! The transformer never assumes how a legacy object is stored; it only asks
//! these questions, synchronously.

use crate::domain::entities::{
    LegacyFile, LegacyLink, LegacyRelation, LegacyRestriction, LegacyTerm, LinkRole,
};
use crate::domain::value_objects::Permissions;

pub trait LegacyObject {
    /// Legacy model name, used to find the schema descriptor
    fn model(&self) -> &str;

    /// Existing persisted identifier, if any
    fn identifier(&self) -> Option<&str>;

    /// Values of a declared property; `None` when unset
    fn property(&self, name: &str) -> Option<&[LegacyTerm]>;

    /// Value of a declared relationship; `None` when unset
    fn relation(&self, name: &str) -> Option<&LegacyRelation>;

    /// Explicitly sequenced members, when the source maintains an order
    fn ordered_members(&self) -> Option<&[LegacyLink]>;

    /// Members in the source's natural enumeration order
    fn members(&self) -> &[LegacyLink];

    fn member_of_collections(&self) -> &[LegacyLink];

    fn files(&self) -> &[LegacyFile];

    /// Raw `_id` link for a role
    fn linked_id(&self, role: LinkRole) -> Option<&str>;

    fn permissions(&self) -> &Permissions;

    fn embargo(&self) -> Option<&LegacyRestriction>;

    fn lease(&self) -> Option<&LegacyRestriction>;
}
