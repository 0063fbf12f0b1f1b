#![allow(async_fn_in_trait)]

use uco_domain::id::{CityId, CountryId, DepartmentId, IdTypeId, UserId};
use uco_domain::pagination::{Page, PageRequest};

use crate::domain::types::{City, Country, Department, IdType, User, VerificationCode};
use crate::error::UsersServiceError;

/// Repository for registered users.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UsersServiceError>;
    async fn exists_by_id(&self, id: UserId) -> Result<bool, UsersServiceError>;
    async fn find_by_identification(
        &self,
        id_type: IdTypeId,
        id_number: &str,
    ) -> Result<Option<User>, UsersServiceError>;
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError>;
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<User>, UsersServiceError>;
    async fn create(&self, user: &User) -> Result<(), UsersServiceError>;
    /// Newest first.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UsersServiceError>;
    async fn mark_email_confirmed(&self, id: UserId) -> Result<(), UsersServiceError>;
    async fn mark_mobile_confirmed(&self, id: UserId) -> Result<(), UsersServiceError>;
}

/// Repository for identification document types.
pub trait IdTypeRepository: Send + Sync {
    /// Ordered by name.
    async fn list(&self) -> Result<Vec<IdType>, UsersServiceError>;
    async fn exists(&self, id: IdTypeId) -> Result<bool, UsersServiceError>;
}

/// Repository for the country → department → city catalog.
pub trait LocationRepository: Send + Sync {
    async fn countries(&self) -> Result<Vec<Country>, UsersServiceError>;
    async fn departments(&self, country: CountryId) -> Result<Vec<Department>, UsersServiceError>;
    async fn cities(&self, department: DepartmentId) -> Result<Vec<City>, UsersServiceError>;
    async fn city_exists(&self, id: CityId) -> Result<bool, UsersServiceError>;
}

/// Repository for pending verification codes. Contacts compare case-insensitively.
pub trait VerificationCodeRepository: Send + Sync {
    async fn find_by_contact(
        &self,
        contact: &str,
    ) -> Result<Option<VerificationCode>, UsersServiceError>;
    async fn save(&self, code: &VerificationCode) -> Result<(), UsersServiceError>;
    /// Returns the number of deleted rows.
    async fn delete_by_contact(&self, contact: &str) -> Result<u64, UsersServiceError>;
}

/// Outbound email/SMS delivery.
///
/// Implementations return [`UsersServiceError::NotificationDeliveryFailed`]
/// when the provider rejects or cannot be reached.
pub trait NotificationPort: Send + Sync {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), UsersServiceError>;
    /// `to` is an E.164 number.
    async fn send_sms(&self, to: &str, message: &str) -> Result<(), UsersServiceError>;
}

/// Read access to the runtime parameters catalog.
pub trait ParameterPort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, UsersServiceError>;
}
