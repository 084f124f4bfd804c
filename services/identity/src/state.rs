use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbOtpRepository, DbUserRepository};
use crate::infra::mailer::RelayMailer;
use crate::usecase::otp::OtpService;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub mailer: RelayMailer,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub otp_ttl: Duration,
    pub otp_resend_cooldown: Duration,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_service(&self) -> OtpService<DbOtpRepository, RelayMailer> {
        OtpService {
            otp_codes: self.otp_repo(),
            mailer: self.mailer.clone(),
            ttl: self.otp_ttl,
            resend_cooldown: self.otp_resend_cooldown,
        }
    }
}
