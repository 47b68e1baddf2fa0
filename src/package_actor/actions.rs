//! Custom actions for the Package actor.

/// Custom actions for PackageRegistration entities.
#[derive(Debug, Clone)]
pub enum PackageAction {
    /// Adds an account or organization to the owner set.
    AddOwner(String),
    /// Removes `owner` from the owner set and drops every pending ownership request
    /// it takes part in. Owners that are not present are ignored.
    RemoveOwner(String),
    /// Invites `new_owner` to co-own the package.
    ///
    /// # Errors
    /// Fails unless `requesting_owner` is a current owner.
    RequestOwnership {
        requesting_owner: String,
        new_owner: String,
    },
    /// Hides one version from search. Unlisting twice is not an error.
    ///
    /// # Errors
    /// Fails if the version does not exist.
    Unlist(String),
}

/// Results from PackageActions - variants match 1:1 with PackageAction
#[derive(Debug, Clone)]
pub enum PackageActionResult {
    AddOwner(()),
    /// Whether `owner` was an owner before the call.
    RemoveOwner(bool),
    RequestOwnership(()),
    /// Whether the version was listed before the call.
    Unlist(bool),
}
