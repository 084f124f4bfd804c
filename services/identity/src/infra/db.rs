use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, sea_query::Expr,
};
use uuid::Uuid;

use mercato_identity_schema::{otp_codes, users};

use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::types::{OTP_MAX_ATTEMPTS, OtpCode, OtpPurpose, User, UserRole};
use crate::error::IdentityServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_wire()),
            is_verified: Set(user.is_verified),
            email_verified_at: Set(user.email_verified_at),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            is_verified: Set(true),
            email_verified_at: Set(Some(at)),
            updated_at: Set(at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark user verified")?;
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        hash: &str,
    ) -> Result<(), IdentityServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), IdentityServiceError> {
        let mut model = users::ActiveModel {
            id: Set(id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(name) = name {
            model.name = Set(name.to_owned());
        }
        if let Some(phone) = phone {
            model.phone = Set(Some(phone.to_owned()));
        }
        model.update(&self.db).await.context("update profile")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        name: model.name,
        phone: model.phone,
        password_hash: model.password_hash,
        role: UserRole::from_wire(model.role),
        is_verified: model.is_verified,
        email_verified_at: model.email_verified_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn insert(&self, code: &OtpCode) -> Result<(), IdentityServiceError> {
        otp_codes::ActiveModel {
            id: Set(code.id),
            email: Set(code.email.clone()),
            code: Set(code.code.clone()),
            purpose: Set(code.purpose.as_wire()),
            attempts: Set(code.attempts),
            consumed_at: Set(code.consumed_at),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert otp code")?;
        Ok(())
    }

    async fn find_live(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, IdentityServiceError> {
        let now = Utc::now();
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Code.eq(code))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_wire()))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .filter(otp_codes::Column::Attempts.lt(OTP_MAX_ATTEMPTS))
            .one(&self.db)
            .await
            .context("find live otp code")?;
        Ok(model.map(otp_from_model))
    }

    async fn consume(&self, id: Uuid) -> Result<bool, IdentityServiceError> {
        // Single conditional write: the WHERE on consumed_at makes the
        // transition atomic, so racing consumers see exactly one success.
        let result = otp_codes::Entity::update_many()
            .col_expr(otp_codes::Column::ConsumedAt, Expr::value(Utc::now()))
            .filter(otp_codes::Column::Id.eq(id))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await
            .context("consume otp code")?;
        Ok(result.rows_affected == 1)
    }

    async fn record_failed_attempt(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError> {
        otp_codes::Entity::update_many()
            .col_expr(
                otp_codes::Column::Attempts,
                Expr::col(otp_codes::Column::Attempts).add(1),
            )
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_wire()))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await
            .context("record failed otp attempt")?;
        Ok(())
    }

    async fn delete_unconsumed(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, IdentityServiceError> {
        let result = otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_wire()))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .exec(&self.db)
            .await
            .context("delete unconsumed otp codes")?;
        Ok(result.rows_affected)
    }

    async fn latest_issued_at(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<DateTime<Utc>>, IdentityServiceError> {
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::Email.eq(email))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_wire()))
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest otp issuance")?;
        Ok(model.map(|m| m.created_at))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, IdentityServiceError> {
        let result = otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .context("delete expired otp codes")?;
        Ok(result.rows_affected)
    }
}

fn otp_from_model(model: otp_codes::Model) -> OtpCode {
    OtpCode {
        id: model.id,
        email: model.email,
        code: model.code,
        purpose: OtpPurpose::from_wire(model.purpose),
        attempts: model.attempts,
        consumed_at: model.consumed_at,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}
