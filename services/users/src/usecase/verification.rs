use chrono::{Duration, Utc};
use rand::RngExt;

use uco_domain::contact::{
    VerificationChannel, channel_of, is_e164, is_valid_co_mobile, is_valid_code, is_valid_email,
    normalize_contact, to_e164,
};
use uco_domain::id::UserId;

use crate::domain::repository::{
    NotificationPort, ParameterPort, UserRepository, VerificationCodeRepository,
};
use crate::domain::types::{
    CODE_TTL_PARAMETER, DEFAULT_CODE_TTL_MINUTES, MAX_CODE_TTL_MINUTES, User, VerificationCode,
};
use crate::error::{FieldError, UsersServiceError};

const CODE_SUBJECT: &str = "UCO Challenge - Verification code";

/// Six random digits, zero-padded.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(0..1_000_000u32))
}

/// Code lifetime in minutes from a raw parameter value. Blank, unparsable,
/// non-positive and out-of-range values fall back to the default.
pub fn parse_ttl_minutes(raw: Option<&str>) -> i64 {
    raw.map(str::trim)
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|v| (1..=MAX_CODE_TTL_MINUTES).contains(v))
        .unwrap_or(DEFAULT_CODE_TTL_MINUTES)
}

fn as_delivery_failure(err: UsersServiceError) -> UsersServiceError {
    match err {
        UsersServiceError::NotificationDeliveryFailed(_) => err,
        UsersServiceError::Internal(cause) => {
            UsersServiceError::NotificationDeliveryFailed(format!("{cause:#}"))
        }
        other => UsersServiceError::NotificationDeliveryFailed(other.to_string()),
    }
}

// ── CodeIssuer ───────────────────────────────────────────────────────────────

/// Stores a fresh code for a contact and delivers it.
pub struct CodeIssuer<V, N, P>
where
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub codes: V,
    pub notifier: N,
    pub parameters: P,
}

impl<V, N, P> CodeIssuer<V, N, P>
where
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub async fn ttl_minutes(&self) -> i64 {
        match self.parameters.get(CODE_TTL_PARAMETER).await {
            Ok(raw) => parse_ttl_minutes(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = ?e, "code ttl parameter unavailable, using default");
                DEFAULT_CODE_TTL_MINUTES
            }
        }
    }

    /// Replace any pending code for `raw_contact` and send the new one.
    pub async fn issue(
        &self,
        channel: VerificationChannel,
        raw_contact: &str,
    ) -> Result<VerificationCode, UsersServiceError> {
        let contact = normalize_contact(channel, raw_contact);
        self.codes.delete_by_contact(&contact).await?;

        let ttl = self.ttl_minutes().await;
        let now = Utc::now();
        let code = VerificationCode {
            contact,
            code: generate_code(),
            expires_at: now + Duration::minutes(ttl),
            created_at: now,
        };
        self.codes.save(&code).await?;

        let message = format!(
            "Your UCO Challenge verification code is {}. It expires in {ttl} minutes.",
            code.code
        );
        let delivered = match channel {
            VerificationChannel::Email => {
                self.notifier
                    .send_email(&code.contact, CODE_SUBJECT, &message)
                    .await
            }
            VerificationChannel::Mobile => {
                self.notifier
                    .send_sms(&to_e164(&code.contact), &message)
                    .await
            }
        };
        delivered.map_err(as_delivery_failure)?;

        tracing::info!(channel = %channel, "verification code issued");
        Ok(code)
    }
}

// ── SendVerificationCode ─────────────────────────────────────────────────────

pub struct SendVerificationCodeUseCase<U, V, N, P>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub users: U,
    pub issuer: CodeIssuer<V, N, P>,
}

impl<U, V, N, P> SendVerificationCodeUseCase<U, V, N, P>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    N: NotificationPort,
    P: ParameterPort,
{
    pub async fn execute(&self, user_id: UserId, channel: &str) -> Result<(), UsersServiceError> {
        let channel: VerificationChannel = channel
            .parse()
            .map_err(|_| UsersServiceError::InvalidChannel(channel.trim().to_owned()))?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        let contact = user
            .contact(channel)
            .filter(|c| !c.trim().is_empty())
            .ok_or(UsersServiceError::ContactNotAvailable(channel))?;
        self.issuer.issue(channel, contact).await?;
        Ok(())
    }
}

// ── ConfirmVerificationCode ──────────────────────────────────────────────────

/// Check `code` against the pending code for the user's contact on `channel`
/// and mark the contact confirmed.
async fn confirm_contact<U, V>(
    users: &U,
    codes: &V,
    user: &User,
    channel: VerificationChannel,
    code: &str,
) -> Result<(), UsersServiceError>
where
    U: UserRepository,
    V: VerificationCodeRepository,
{
    let raw = user
        .contact(channel)
        .ok_or(UsersServiceError::ContactNotAvailable(channel))?;
    let contact = normalize_contact(channel, raw);

    let stored = codes
        .find_by_contact(&contact)
        .await?
        .ok_or(UsersServiceError::InvalidCode)?;
    if stored.code != code {
        return Err(UsersServiceError::InvalidCode);
    }
    if stored.is_expired() {
        codes.delete_by_contact(&contact).await?;
        return Err(UsersServiceError::CodeExpired);
    }

    match channel {
        VerificationChannel::Email => users.mark_email_confirmed(user.id).await?,
        VerificationChannel::Mobile => users.mark_mobile_confirmed(user.id).await?,
    }
    codes.delete_by_contact(&contact).await?;
    tracing::info!(user_id = %user.id, channel = %channel, "contact confirmed");
    Ok(())
}

pub struct ConfirmVerificationCodeUseCase<U, V>
where
    U: UserRepository,
    V: VerificationCodeRepository,
{
    pub users: U,
    pub codes: V,
}

impl<U, V> ConfirmVerificationCodeUseCase<U, V>
where
    U: UserRepository,
    V: VerificationCodeRepository,
{
    pub async fn execute(
        &self,
        user_id: UserId,
        channel: &str,
        code: &str,
    ) -> Result<(), UsersServiceError> {
        let channel: VerificationChannel = channel
            .parse()
            .map_err(|_| UsersServiceError::InvalidChannel(channel.trim().to_owned()))?;
        let code = code.trim();
        if !is_valid_code(code) {
            return Err(UsersServiceError::InvalidCode);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(UsersServiceError::UserNotFound)?;
        confirm_contact(&self.users, &self.codes, &user, channel, code).await
    }
}

// ── VerifyContactCode ────────────────────────────────────────────────────────

/// Public confirmation by contact: an email, or a `+` E.164 / local mobile number.
pub struct VerifyContactCodeUseCase<U, V>
where
    U: UserRepository,
    V: VerificationCodeRepository,
{
    pub users: U,
    pub codes: V,
}

impl<U, V> VerifyContactCodeUseCase<U, V>
where
    U: UserRepository,
    V: VerificationCodeRepository,
{
    pub async fn execute(&self, contact: &str, code: &str) -> Result<(), UsersServiceError> {
        let contact = contact.trim();
        let code = code.trim();
        let channel = channel_of(contact);

        let mut problems = Vec::new();
        let contact_ok = match channel {
            VerificationChannel::Email => is_valid_email(contact),
            VerificationChannel::Mobile => is_e164(contact) || is_valid_co_mobile(contact),
        };
        if !contact_ok {
            problems.push(FieldError::new(
                "contact",
                "contact must be an email or a +E.164 phone number",
            ));
        }
        if !is_valid_code(code) {
            problems.push(FieldError::new("code", "code must be six digits"));
        }
        if !problems.is_empty() {
            return Err(UsersServiceError::ValidationFailed(problems));
        }

        let user = match channel {
            VerificationChannel::Email => {
                self.users
                    .find_by_email(&normalize_contact(channel, contact))
                    .await?
            }
            VerificationChannel::Mobile => self.find_by_phone(contact).await?,
        };
        // Unknown contacts look like a wrong code.
        let user = user.ok_or(UsersServiceError::InvalidCode)?;
        confirm_contact(&self.users, &self.codes, &user, channel, code).await
    }

    async fn find_by_phone(&self, contact: &str) -> Result<Option<User>, UsersServiceError> {
        let e164 = to_e164(contact);
        if let Some(local) = e164.strip_prefix("+57").filter(|l| is_valid_co_mobile(l)) {
            if let Some(user) = self.users.find_by_mobile(local).await? {
                return Ok(Some(user));
            }
        }
        self.users.find_by_mobile(&e164).await
    }
}
