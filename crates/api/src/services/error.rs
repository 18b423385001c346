//! Shared error type for the domain services.

use crate::db::RepositoryError;

/// Errors produced by the cart, wishlist, address, catalog and profile
/// services.
///
/// Ownership failures surface as `NotFound`, not a forbidden-style error,
/// so the existence of other users' resources is never leaked.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced entity does not exist or is not owned by the caller.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Domain-level uniqueness violation.
    #[error("{0}")]
    Conflict(String),

    /// Malformed or out-of-range input, rejected before any state change.
    #[error("{0}")]
    InvalidInput(String),

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Rewrite a repository `NotFound`/`Conflict` into a domain error
    /// naming the entity, leaving other repository errors untouched.
    #[must_use]
    pub fn entity(entity: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |e| match e {
            RepositoryError::NotFound => Self::NotFound(entity),
            RepositoryError::Conflict(message) => Self::Conflict(message),
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_rewrites_not_found() {
        let err = ServiceError::entity("cart item")(RepositoryError::NotFound);
        assert!(matches!(err, ServiceError::NotFound("cart item")));
        assert_eq!(err.to_string(), "cart item not found");
    }

    #[test]
    fn test_entity_passes_conflict_through() {
        let err =
            ServiceError::entity("wishlist")(RepositoryError::Conflict("duplicate".to_owned()));
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_entity_keeps_database_errors() {
        let err = ServiceError::entity("address")(RepositoryError::DataCorruption("x".to_owned()));
        assert!(matches!(
            err,
            ServiceError::Repository(RepositoryError::DataCorruption(_))
        ));
    }
}
