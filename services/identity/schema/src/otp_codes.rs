use sea_orm::entity::prelude::*;

/// One-time verification code sent to an email address.
///
/// Scoped to a purpose (registration vs password reset); a code never
/// verifies across purposes. `consumed_at` is set exactly once, by a
/// conditional update, and never reverts. `attempts` counts failed
/// verification attempts against this record.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    /// Six-digit zero-padded decimal string.
    pub code: String,
    /// Wire value of `OtpPurpose` (0 = registration, 1 = password reset).
    pub purpose: i16,
    pub attempts: i32,
    pub consumed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
