use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use mercato_identity::domain::repository::{Mailer, OtpRepository, UserRepository};
use mercato_identity::domain::types::{OtpCode, OtpPurpose, User, UserRole};
use mercato_identity::error::IdentityServiceError;
use mercato_identity::usecase::otp::OtpService;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the user list for post-execution inspection.
    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), IdentityServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn mark_verified(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.is_verified = true;
            u.email_verified_at = Some(at);
            u.updated_at = at;
        }
        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        hash: &str,
    ) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            u.password_hash = hash.to_owned();
            u.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<(), IdentityServiceError> {
        let mut users = self.users.lock().unwrap();
        if let Some(u) = users.iter_mut().find(|u| u.id == id) {
            if let Some(name) = name {
                u.name = name.to_owned();
            }
            if let Some(phone) = phone {
                u.phone = Some(phone.to_owned());
            }
            u.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    pub codes: Arc<Mutex<Vec<OtpCode>>>,
}

impl MockOtpRepo {
    pub fn empty() -> Self {
        Self {
            codes: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Shared handle to the record list for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<OtpCode>>> {
        Arc::clone(&self.codes)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn insert(&self, code: &OtpCode) -> Result<(), IdentityServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn find_live(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, IdentityServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email && c.code == code && c.purpose == purpose && c.is_live())
            .cloned())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, IdentityServiceError> {
        // Mutex-serialized check-and-set mirrors the conditional UPDATE:
        // exactly one caller observes the unconsumed state.
        let mut codes = self.codes.lock().unwrap();
        match codes.iter_mut().find(|c| c.id == id) {
            Some(c) if c.consumed_at.is_none() => {
                c.consumed_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn record_failed_attempt(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError> {
        let mut codes = self.codes.lock().unwrap();
        for c in codes
            .iter_mut()
            .filter(|c| c.email == email && c.purpose == purpose && c.consumed_at.is_none())
        {
            c.attempts += 1;
        }
        Ok(())
    }

    async fn delete_unconsumed(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<u64, IdentityServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| {
            !(c.email == email && c.purpose == purpose && c.consumed_at.is_none())
        });
        Ok((before - codes.len()) as u64)
    }

    async fn latest_issued_at(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<DateTime<Utc>>, IdentityServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.email == email && c.purpose == purpose)
            .map(|c| c.created_at)
            .max())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, IdentityServiceError> {
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| c.expires_at >= now);
        Ok((before - codes.len()) as u64)
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String, OtpPurpose)>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    /// Code carried by the most recently dispatched message.
    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code, _)| code.clone())
    }
}

impl Mailer for MockMailer {
    async fn send_otp(
        &self,
        to: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), IdentityServiceError> {
        if self.fail {
            return Err(IdentityServiceError::Internal(anyhow::anyhow!(
                "relay unreachable"
            )));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned(), purpose));
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, verified: bool) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        name: "Test User".into(),
        phone: None,
        password_hash: "unset".into(),
        role: UserRole::Customer,
        is_verified: verified,
        email_verified_at: verified.then_some(now),
        created_at: now,
        updated_at: now,
    }
}

/// OTP service over the given mocks with a 10-minute TTL and no resend
/// cooldown (cooldown behavior is tested explicitly where it matters).
pub fn otp_service(repo: &MockOtpRepo, mailer: &MockMailer) -> OtpService<MockOtpRepo, MockMailer> {
    OtpService {
        otp_codes: repo.clone(),
        mailer: mailer.clone(),
        ttl: Duration::minutes(10),
        resend_cooldown: Duration::zero(),
    }
}
