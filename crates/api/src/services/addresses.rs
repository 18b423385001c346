//! Address service.
//!
//! Wraps the address repository's invariant-preserving mutations and
//! returns the user's full address list from every mutation, so the
//! client never needs a follow-up read.

use sqlx::PgPool;

use shopcart_core::{AddressId, UserId};

use super::ServiceError;
use crate::db::addresses::AddressRepository;
use crate::models::address::{Address, AddressChanges, NewAddress};

/// Address service.
pub struct AddressService<'a> {
    addresses: AddressRepository<'a>,
}

impl<'a> AddressService<'a> {
    /// Create a new address service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            addresses: AddressRepository::new(pool),
        }
    }

    /// List the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Address>, ServiceError> {
        Ok(self.addresses.list_by_user(user_id).await?)
    }

    /// Create an address and return the updated address list.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InvalidInput` if a required field is blank.
    pub async fn create(
        &self,
        user_id: UserId,
        new: NewAddress,
    ) -> Result<Vec<Address>, ServiceError> {
        validate_new_address(&new)?;

        self.addresses
            .create(user_id, &new)
            .await
            .map_err(ServiceError::entity("user"))?;

        self.list(user_id).await
    }

    /// Apply a partial update and return the updated address list.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the address doesn't exist or
    /// belongs to another user; `ServiceError::InvalidInput` if a provided
    /// field is blank.
    pub async fn update(
        &self,
        user_id: UserId,
        address_id: AddressId,
        changes: AddressChanges,
    ) -> Result<Vec<Address>, ServiceError> {
        validate_changes(&changes)?;

        self.addresses
            .update(user_id, address_id, &changes)
            .await
            .map_err(ServiceError::entity("address"))?;

        self.list(user_id).await
    }

    /// Delete an address and return the updated address list.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the address doesn't exist or
    /// belongs to another user.
    pub async fn delete(
        &self,
        user_id: UserId,
        address_id: AddressId,
    ) -> Result<Vec<Address>, ServiceError> {
        self.addresses
            .delete(user_id, address_id)
            .await
            .map_err(ServiceError::entity("address"))?;

        self.list(user_id).await
    }
}

/// Reject blank required fields before any state mutation.
fn validate_new_address(new: &NewAddress) -> Result<(), ServiceError> {
    for (name, value) in [
        ("street", &new.street),
        ("city", &new.city),
        ("state", &new.state),
        ("zip_code", &new.zip_code),
        ("country", &new.country),
    ] {
        require_non_blank(name, value)?;
    }
    Ok(())
}

/// Reject explicitly-provided blank fields in a partial update.
fn validate_changes(changes: &AddressChanges) -> Result<(), ServiceError> {
    for (name, value) in [
        ("street", &changes.street),
        ("city", &changes.city),
        ("state", &changes.state),
        ("zip_code", &changes.zip_code),
        ("country", &changes.country),
    ] {
        if let Some(value) = value {
            require_non_blank(name, value)?;
        }
    }
    Ok(())
}

fn require_non_blank(name: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "{name} must not be blank"
        )));
    }
    Ok(())
}
