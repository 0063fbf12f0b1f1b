use chrono::Utc;
use uuid::Uuid;

use uco_domain::contact::{
    VerificationChannel, is_valid_co_mobile, is_valid_email, normalize_contact, to_e164,
};
use uco_domain::id::{CityId, IdTypeId, UserId};
use uco_domain::pagination::{Page, PageRequest};
use uco_domain::user::{blank_to_none, is_valid_id_number, is_valid_name};

use crate::domain::repository::{
    IdTypeRepository, LocationRepository, NotificationPort, ParameterPort, UserRepository,
    VerificationCodeRepository,
};
use crate::domain::types::{ADMIN_EMAIL_PARAMETER, User};
use crate::error::{FieldError, UsersServiceError};
use crate::usecase::verification::CodeIssuer;

const DUPLICATE_SUBJECT: &str = "UCO Challenge - Duplicate registration attempt";
const ADMIN_SUBJECT: &str = "UCO Challenge - Duplicate registration alert";

// ── RegisterUser ─────────────────────────────────────────────────────────────

/// Raw registration payload. Everything is optional text so that every
/// problem can be reported at once.
#[derive(Debug, Clone, Default)]
pub struct RegisterUserInput {
    pub id: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub home_city: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
}

/// The administrator issuing the request, as forwarded by the gateway.
#[derive(Debug, Clone, Default)]
pub struct Executor {
    pub id: String,
    /// Set only when the identity carries a usable email address.
    pub email: Option<String>,
}

/// Validated registration, ready for the catalog and uniqueness checks.
#[derive(Debug, Clone)]
struct Registration {
    id: Option<UserId>,
    id_type: IdTypeId,
    id_number: String,
    first_name: String,
    second_name: Option<String>,
    first_surname: String,
    second_surname: Option<String>,
    home_city: CityId,
    email: Option<String>,
    mobile_number: Option<String>,
}

fn required_name(
    problems: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: Option<String>,
) -> String {
    match blank_to_none(value) {
        None => {
            problems.push(FieldError::new(field, format!("{label} is required")));
            String::new()
        }
        Some(v) if !is_valid_name(&v) => {
            problems.push(FieldError::new(
                field,
                format!("{label} must be at most 40 letters or spaces"),
            ));
            v
        }
        Some(v) => v,
    }
}

fn optional_name(
    problems: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: Option<String>,
) -> Option<String> {
    let value = blank_to_none(value)?;
    if !is_valid_name(&value) {
        problems.push(FieldError::new(
            field,
            format!("{label} must be at most 40 letters or spaces"),
        ));
    }
    Some(value)
}

fn required_uuid(
    problems: &mut Vec<FieldError>,
    field: &'static str,
    label: &str,
    value: Option<String>,
) -> Uuid {
    match blank_to_none(value) {
        None => {
            problems.push(FieldError::new(field, format!("{label} is required")));
            Uuid::nil()
        }
        Some(v) => v.parse().unwrap_or_else(|_| {
            problems.push(FieldError::new(field, format!("{label} is not a valid id")));
            Uuid::nil()
        }),
    }
}

fn validate(input: RegisterUserInput) -> Result<Registration, UsersServiceError> {
    let mut problems = Vec::new();

    let id = match blank_to_none(input.id) {
        None => None,
        Some(raw) => match raw.parse::<UserId>() {
            Ok(id) => Some(id),
            Err(_) => {
                problems.push(FieldError::new("id", "id is not a valid UUID"));
                None
            }
        },
    };
    let id_type = required_uuid(&mut problems, "idType", "id type", input.id_type);
    let id_number = match blank_to_none(input.id_number) {
        None => {
            problems.push(FieldError::new("idNumber", "id number is required"));
            String::new()
        }
        Some(v) if !is_valid_id_number(&v) => {
            problems.push(FieldError::new(
                "idNumber",
                "id number must be 4 to 20 letters or digits",
            ));
            v
        }
        Some(v) => v,
    };
    let first_name = required_name(&mut problems, "firstName", "first name", input.first_name);
    let second_name = optional_name(&mut problems, "secondName", "second name", input.second_name);
    let first_surname = required_name(
        &mut problems,
        "firstSurname",
        "first surname",
        input.first_surname,
    );
    let second_surname = optional_name(
        &mut problems,
        "secondSurname",
        "second surname",
        input.second_surname,
    );
    let home_city = required_uuid(&mut problems, "homeCity", "home city", input.home_city);

    let email = blank_to_none(input.email).map(|e| normalize_contact(VerificationChannel::Email, &e));
    if let Some(e) = &email {
        if !is_valid_email(e) {
            problems.push(FieldError::new("email", "email format is invalid"));
        }
    }
    let mobile_number = blank_to_none(input.mobile_number);
    if let Some(m) = &mobile_number {
        if !is_valid_co_mobile(m) {
            problems.push(FieldError::new(
                "mobileNumber",
                "mobile number must be 10 digits starting with 3",
            ));
        }
    }
    if email.is_none() && mobile_number.is_none() {
        problems.push(FieldError::new(
            "contact",
            "an email or a mobile number is required",
        ));
    }

    if !problems.is_empty() {
        return Err(UsersServiceError::ValidationFailed(problems));
    }
    Ok(Registration {
        id,
        id_type: IdTypeId(id_type),
        id_number,
        first_name,
        second_name,
        first_surname,
        second_surname,
        home_city: CityId(home_city),
        email,
        mobile_number,
    })
}

/// Which unique value collided with an existing user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Duplicate {
    Identification,
    Email,
    Mobile,
}

impl Duplicate {
    fn field(self) -> &'static str {
        match self {
            Self::Identification => "idNumber",
            Self::Email => "email",
            Self::Mobile => "mobileNumber",
        }
    }

    fn channel(self) -> &'static str {
        match self {
            Self::Identification => "identification",
            Self::Email => "email",
            Self::Mobile => "sms",
        }
    }
}

pub struct RegisterUserUseCase<U, I, L, V, N, P>
where
    U: UserRepository,
    I: IdTypeRepository,
    L: LocationRepository,
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub users: U,
    pub id_types: I,
    pub locations: L,
    pub issuer: CodeIssuer<V, N, P>,
    /// Used when the parameters catalog has no administrator address.
    pub fallback_admin_email: String,
}

impl<U, I, L, V, N, P> RegisterUserUseCase<U, I, L, V, N, P>
where
    U: UserRepository,
    I: IdTypeRepository,
    L: LocationRepository,
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub async fn execute(
        &self,
        input: RegisterUserInput,
        executor: Executor,
    ) -> Result<User, UsersServiceError> {
        let reg = validate(input)?;

        if !self.id_types.exists(reg.id_type).await? {
            return Err(UsersServiceError::IdTypeNotFound);
        }
        if !self.locations.city_exists(reg.home_city).await? {
            return Err(UsersServiceError::CityNotFound);
        }

        let id = self.available_id(reg.id).await?;
        self.ensure_unique(&reg, &executor).await?;

        let now = Utc::now();
        let user = User {
            id,
            id_type: reg.id_type,
            id_number: reg.id_number,
            first_name: reg.first_name,
            second_name: reg.second_name,
            first_surname: reg.first_surname,
            second_surname: reg.second_surname,
            home_city: reg.home_city,
            email: reg.email,
            mobile_number: reg.mobile_number,
            email_confirmed: false,
            mobile_number_confirmed: false,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        tracing::info!(user_id = %user.id, executor = %executor.id, "user registered");

        for channel in [VerificationChannel::Email, VerificationChannel::Mobile] {
            if let Some(contact) = user.contact(channel) {
                if let Err(e) = self.issuer.issue(channel, contact).await {
                    tracing::warn!(
                        user_id = %user.id,
                        channel = %channel,
                        error = %e,
                        "confirmation code not sent"
                    );
                }
            }
        }
        Ok(user)
    }

    /// Keep the proposed id when it is free; otherwise draw v7 ids until one is.
    async fn available_id(&self, proposed: Option<UserId>) -> Result<UserId, UsersServiceError> {
        let mut id = proposed.unwrap_or_else(UserId::nil);
        while id.is_nil() || self.users.exists_by_id(id).await? {
            id = UserId(Uuid::now_v7());
        }
        Ok(id)
    }

    async fn ensure_unique(
        &self,
        reg: &Registration,
        executor: &Executor,
    ) -> Result<(), UsersServiceError> {
        if self
            .users
            .find_by_identification(reg.id_type, &reg.id_number)
            .await?
            .is_some()
        {
            return self
                .reject_duplicate(Duplicate::Identification, &reg.id_number, None, executor)
                .await;
        }
        if let Some(email) = &reg.email {
            if let Some(owner) = self.users.find_by_email(email).await? {
                return self
                    .reject_duplicate(Duplicate::Email, email, Some(&owner), executor)
                    .await;
            }
        }
        if let Some(mobile) = &reg.mobile_number {
            if let Some(owner) = self.users.find_by_mobile(mobile).await? {
                return self
                    .reject_duplicate(Duplicate::Mobile, mobile, Some(&owner), executor)
                    .await;
            }
        }
        Ok(())
    }

    /// Alert the administrator, the owner of the duplicated contact and the
    /// executor, then fail. Alert failures are logged only.
    async fn reject_duplicate(
        &self,
        duplicate: Duplicate,
        value: &str,
        owner: Option<&User>,
        executor: &Executor,
    ) -> Result<(), UsersServiceError> {
        tracing::info!(field = duplicate.field(), "duplicate registration rejected");
        let notifier = &self.issuer.notifier;
        let admin = self.admin_email().await;

        let alert = format!(
            "A registration attempt reused an existing {} ({value}).",
            duplicate.channel()
        );
        log_failure(
            notifier.send_email(&admin, ADMIN_SUBJECT, &alert).await,
            "administrator",
        );

        if let Some(owner) = owner {
            let message = "Someone tried to register a new account with your contact \
                           information. If this was not you, please contact support.";
            match duplicate {
                Duplicate::Email => {
                    if let Some(email) = &owner.email {
                        log_failure(
                            notifier.send_email(email, DUPLICATE_SUBJECT, message).await,
                            "email owner",
                        );
                    }
                }
                Duplicate::Mobile => {
                    if let Some(mobile) = &owner.mobile_number {
                        log_failure(
                            notifier.send_sms(&to_e164(mobile), message).await,
                            "mobile owner",
                        );
                    }
                }
                Duplicate::Identification => {}
            }
        }

        let executor_message = format!(
            "The user you tried to register already exists: duplicated {} {value}.",
            duplicate.channel()
        );
        match &executor.email {
            Some(email) => log_failure(
                notifier
                    .send_email(email, DUPLICATE_SUBJECT, &executor_message)
                    .await,
                "executor",
            ),
            None => {
                let message = format!(
                    "Executor {} (no email on record) hit a duplicated {} {value}.",
                    executor.id,
                    duplicate.channel()
                );
                log_failure(
                    notifier.send_email(&admin, ADMIN_SUBJECT, &message).await,
                    "executor via administrator",
                );
            }
        }

        Err(UsersServiceError::UserAlreadyExists {
            field: duplicate.field(),
            value: value.to_owned(),
        })
    }

    async fn admin_email(&self) -> String {
        match self.issuer.parameters.get(ADMIN_EMAIL_PARAMETER).await {
            Ok(Some(v)) if !v.trim().is_empty() => v.trim().to_owned(),
            Ok(_) => self.fallback_admin_email.clone(),
            Err(e) => {
                tracing::warn!(error = ?e, "admin email parameter unavailable");
                self.fallback_admin_email.clone()
            }
        }
    }
}

fn log_failure(result: Result<(), UsersServiceError>, recipient: &'static str) {
    if let Err(e) = result {
        tracing::warn!(recipient, error = %e, "duplicate alert not delivered");
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<User>, UsersServiceError> {
        self.users.list(page.normalized()).await
    }
}
