use chrono::{DateTime, Utc};

use uuid::Uuid;

/// Length of a generated OTP code in digits.
pub const OTP_CODE_LEN: usize = 6;

/// Failed verification attempts after which a record stops matching.
pub const OTP_MAX_ATTEMPTS: i32 = 5;

/// Minimum password length for registration and reset.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    pub fn as_wire(self) -> i16 {
        match self {
            Self::Customer => 0,
            Self::Admin => 1,
        }
    }

    pub fn from_wire(value: i16) -> Self {
        match value {
            1 => Self::Admin,
            _ => Self::Customer,
        }
    }
}

/// Storefront account as the identity flows see it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_verified: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flow a code is scoped to. Codes never verify across purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_wire(self) -> i16 {
        match self {
            Self::Registration => 0,
            Self::PasswordReset => 1,
        }
    }

    pub fn from_wire(value: i16) -> Self {
        match value {
            1 => Self::PasswordReset,
            _ => Self::Registration,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::PasswordReset => "password_reset",
        }
    }
}

/// One-time verification code record.
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub attempts: i32,
    pub consumed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// A record matches a verification attempt only while live: unconsumed,
    /// unexpired, and under the failed-attempt limit.
    pub fn is_live(&self) -> bool {
        self.consumed_at.is_none()
            && self.expires_at > Utc::now()
            && self.attempts < OTP_MAX_ATTEMPTS
    }
}

/// Shallow shape check, not RFC 5322. The mail relay bounces anything
/// undeliverable.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// A submitted code must be exactly six ASCII digits.
pub fn validate_code_shape(code: &str) -> bool {
    code.len() == OTP_CODE_LEN && code.bytes().all(|b| b.is_ascii_digit())
}
