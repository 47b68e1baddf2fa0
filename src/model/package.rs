//! Package registrations: one id, its owners, and the versions published under it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// A package registry entry.
///
/// Owners are account or organization names. Versions are never deleted by this crate;
/// an orphaned registration is hidden by unlisting its versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRegistration {
    pub id: String,
    pub owners: BTreeSet<String>,
    pub versions: Vec<PackageVersion>,
    pub pending_owner_requests: Vec<OwnershipRequest>,
}

impl PackageRegistration {
    pub fn is_orphaned(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn listed_versions(&self) -> impl Iterator<Item = &PackageVersion> {
        self.versions.iter().filter(|v| v.listed)
    }

    pub fn version_mut(&mut self, version: &str) -> Option<&mut PackageVersion> {
        self.versions
            .iter_mut()
            .find(|v| v.version.eq_ignore_ascii_case(version))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageVersion {
    pub version: String,
    pub listed: bool,
}

/// An outstanding invitation to become a co-owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRequest {
    pub requesting_owner: String,
    pub new_owner: String,
}

impl OwnershipRequest {
    pub fn involves(&self, username: &str) -> bool {
        self.requesting_owner == username || self.new_owner == username
    }
}

/// Addresses one version of one package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageVersionKey {
    pub package_id: String,
    pub version: String,
}

impl PackageVersionKey {
    pub fn new(package_id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            version: version.into(),
        }
    }
}

impl Display for PackageVersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.package_id, self.version)
    }
}

/// Payload for registering a package. Every version starts listed.
#[derive(Debug, Clone, Default)]
pub struct PackageCreate {
    pub id: String,
    pub owners: Vec<String>,
    pub versions: Vec<String>,
}

impl PackageCreate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn owned_by(mut self, owner: impl Into<String>) -> Self {
        self.owners.push(owner.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.versions.push(version.into());
        self
    }
}

/// Publishes additional versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageUpdate {
    pub add_versions: Vec<String>,
}
