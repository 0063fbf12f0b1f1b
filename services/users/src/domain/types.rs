use chrono::{DateTime, Utc};

use uco_domain::contact::VerificationChannel;
use uco_domain::id::{CityId, CountryId, DepartmentId, IdTypeId, UserId};

/// Fallback lifetime of a verification code.
pub const DEFAULT_CODE_TTL_MINUTES: i64 = 15;
/// Longest accepted code lifetime (one week).
pub const MAX_CODE_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Parameter key overriding [`DEFAULT_CODE_TTL_MINUTES`].
pub const CODE_TTL_PARAMETER: &str = "token.duration.minutes";

/// Parameter key for the administrator alert address.
pub const ADMIN_EMAIL_PARAMETER: &str = "notification.admin.email";

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub id_type: IdTypeId,
    pub id_number: String,
    pub first_name: String,
    pub second_name: Option<String>,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub home_city: CityId,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub email_confirmed: bool,
    pub mobile_number_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The contact registered for `channel`, if any.
    pub fn contact(&self, channel: VerificationChannel) -> Option<&str> {
        match channel {
            VerificationChannel::Email => self.email.as_deref(),
            VerificationChannel::Mobile => self.mobile_number.as_deref(),
        }
    }

    /// First and second surname joined by a space.
    pub fn last_name(&self) -> String {
        match &self.second_surname {
            Some(second) => format!("{} {}", self.first_surname, second),
            None => self.first_surname.clone(),
        }
    }

    pub fn first_names(&self) -> String {
        match &self.second_name {
            Some(second) => format!("{} {}", self.first_name, second),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdType {
    pub id: IdTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: DepartmentId,
    pub country_id: CountryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub department_id: DepartmentId,
    pub name: String,
}

/// A code sent to a contact, stored under its normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub contact: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl VerificationCode {
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
