//! Restriction queries
//!
//! Read-only lookups of resources by the state of their embargo or lease.
//! Each query scans the stored population and classifies restrictions
//! against a single instant.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::storage_facade::StorageFacade;
use crate::domain::entities::Resource;
use crate::domain::ports::{ModelFilter, StorageResult};
use crate::domain::services::{classify_embargo, classify_lease, RestrictionClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Restriction {
    Embargo,
    Lease,
}

pub struct RestrictionService<'a> {
    facade: &'a StorageFacade,
}

impl<'a> RestrictionService<'a> {
    pub fn new(facade: &'a StorageFacade) -> Self {
        Self { facade }
    }

    /// Resources whose embargo release date has passed but which were never
    /// deactivated
    pub fn assets_with_expired_embargoes(&self) -> StorageResult<Vec<Resource>> {
        self.assets_with_expired_embargoes_at(Utc::now())
    }

    pub fn assets_with_expired_embargoes_at(
        &self,
        now: DateTime<Utc>,
    ) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Embargo, RestrictionClass::ExpiredButActive, now)
    }

    /// Resources whose embargo carries a release date
    pub fn assets_under_embargo(&self) -> StorageResult<Vec<Resource>> {
        self.assets_under_embargo_at(Utc::now())
    }

    pub fn assets_under_embargo_at(&self, now: DateTime<Utc>) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Embargo, RestrictionClass::Dated, now)
    }

    /// Resources whose embargo has deactivation history
    pub fn assets_with_deactivated_embargoes(&self) -> StorageResult<Vec<Resource>> {
        self.assets_with_deactivated_embargoes_at(Utc::now())
    }

    pub fn assets_with_deactivated_embargoes_at(
        &self,
        now: DateTime<Utc>,
    ) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Embargo, RestrictionClass::Deactivated, now)
    }

    pub fn assets_with_expired_leases(&self) -> StorageResult<Vec<Resource>> {
        self.assets_with_expired_leases_at(Utc::now())
    }

    pub fn assets_with_expired_leases_at(
        &self,
        now: DateTime<Utc>,
    ) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Lease, RestrictionClass::ExpiredButActive, now)
    }

    pub fn assets_under_lease(&self) -> StorageResult<Vec<Resource>> {
        self.assets_under_lease_at(Utc::now())
    }

    pub fn assets_under_lease_at(&self, now: DateTime<Utc>) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Lease, RestrictionClass::Dated, now)
    }

    pub fn assets_with_deactivated_leases(&self) -> StorageResult<Vec<Resource>> {
        self.assets_with_deactivated_leases_at(Utc::now())
    }

    pub fn assets_with_deactivated_leases_at(
        &self,
        now: DateTime<Utc>,
    ) -> StorageResult<Vec<Resource>> {
        self.select(Restriction::Lease, RestrictionClass::Deactivated, now)
    }

    fn select(
        &self,
        restriction: Restriction,
        class: RestrictionClass,
        now: DateTime<Utc>,
    ) -> StorageResult<Vec<Resource>> {
        let mut matches = Vec::new();
        for resource in self.facade.find_all(ModelFilter::All) {
            let resource = resource?;
            let status = match restriction {
                Restriction::Embargo => resource.embargo.as_ref().map(|e| classify_embargo(e, now)),
                Restriction::Lease => resource.lease.as_ref().map(|l| classify_lease(l, now)),
            };
            if status.is_some_and(|s| s.in_class(class)) {
                matches.push(resource);
            }
        }
        debug!(?restriction, ?class, found = matches.len(), "restriction scan");
        Ok(matches)
    }
}
