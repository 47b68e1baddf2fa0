//! Type-safe wrappers around [`ResourceClient`](resource_actor::ResourceClient).
//!
//! Each client implements [`ActorClient`](resource_actor::ActorClient) for the generic
//! `get`/`list`/`delete`, adds the resource's own operations, and implements the
//! collaborator traits from [`services`](crate::services).

pub mod account_client;
pub mod audit_client;
pub mod namespace_client;
pub mod package_client;

pub use account_client::*;
pub use audit_client::*;
pub use namespace_client::*;
pub use package_client::*;

use resource_actor::FrameworkError;

/// Recovers an entity's own error from the framework wrapper, or hands the framework
/// error back when it carries none (or one of another type).
pub(crate) fn entity_error<E>(e: FrameworkError) -> Result<E, FrameworkError>
where
    E: std::error::Error + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => inner
            .downcast::<E>()
            .map(|err| *err)
            .map_err(FrameworkError::EntityError),
        other => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package_actor::PackageError;

    #[test]
    fn test_entity_error_downcasts_matching_type() {
        let wrapped = FrameworkError::EntityError(Box::new(PackageError::NotFound("p".into())));
        assert_eq!(
            entity_error::<PackageError>(wrapped).unwrap(),
            PackageError::NotFound("p".into())
        );
    }

    #[test]
    fn test_entity_error_passes_other_errors_through() {
        let wrapped = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            entity_error::<PackageError>(wrapped),
            Err(FrameworkError::EntityError(_))
        ));
        assert!(matches!(
            entity_error::<PackageError>(FrameworkError::ActorClosed),
            Err(FrameworkError::ActorClosed)
        ));
    }
}
