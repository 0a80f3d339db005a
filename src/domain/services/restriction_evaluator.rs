//! Time-bound rule evaluator
//!
//! Pure classification of embargoes and leases. The date comparison and the
//! history check are separate pieces of evidence, so one restriction can land
//! in more than one class.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Embargo, Lease, TimeBound};

/// Which classes a restriction belongs to at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RestrictionStatus {
    /// A release or expiration date is set, past or future
    pub dated: bool,
    /// The date has passed and the restriction was never deactivated
    pub expired_but_active: bool,
    /// The restriction carries deactivation history
    pub deactivated: bool,
}

/// A queryable restriction class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestrictionClass {
    ExpiredButActive,
    Dated,
    Deactivated,
}

impl RestrictionStatus {
    pub fn in_class(&self, class: RestrictionClass) -> bool {
        match class {
            RestrictionClass::ExpiredButActive => self.expired_but_active,
            RestrictionClass::Dated => self.dated,
            RestrictionClass::Deactivated => self.deactivated,
        }
    }

    /// No date and no history: not a restriction at all
    pub fn is_unrestricted(&self) -> bool {
        !self.dated && !self.deactivated
    }
}

pub fn classify<T: TimeBound + ?Sized>(restriction: &T, now: DateTime<Utc>) -> RestrictionStatus {
    let date = restriction.restriction_date();
    let deactivated = !restriction.history().is_empty();
    RestrictionStatus {
        dated: date.is_some(),
        expired_but_active: !deactivated && date.is_some_and(|d| d <= now),
        deactivated,
    }
}

pub fn classify_embargo(embargo: &Embargo, now: DateTime<Utc>) -> RestrictionStatus {
    classify(embargo, now)
}

pub fn classify_lease(lease: &Lease, now: DateTime<Utc>) -> RestrictionStatus {
    classify(lease, now)
}
