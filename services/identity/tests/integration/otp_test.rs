use chrono::{Duration, Utc};
use uuid::Uuid;

use mercato_identity::domain::repository::OtpRepository;
use mercato_identity::domain::types::{OTP_MAX_ATTEMPTS, OtpCode, OtpPurpose};
use mercato_identity::error::IdentityServiceError;
use mercato_identity::usecase::otp::OtpService;

use crate::helpers::{MockMailer, MockOtpRepo, otp_service};

fn stored_code(email: &str, purpose: OtpPurpose, expires_at: chrono::DateTime<Utc>) -> OtpCode {
    OtpCode {
        id: Uuid::new_v4(),
        email: email.to_owned(),
        code: "042917".into(),
        purpose,
        attempts: 0,
        consumed_at: None,
        expires_at,
        created_at: Utc::now() - Duration::minutes(5),
    }
}

#[tokio::test]
async fn issued_code_is_six_zero_padded_digits() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    assert_eq!(code.len(), 6);
    assert!(code.bytes().all(|b| b.is_ascii_digit()));
    // The notification carries the same code that was persisted.
    assert_eq!(mailer.last_code().as_deref(), Some(code.as_str()));
}

#[tokio::test]
async fn consume_succeeds_exactly_once() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    assert!(
        svc.consume("alice@example.com", &code, OtpPurpose::Registration)
            .await
            .unwrap()
    );
    assert!(
        !svc.consume("alice@example.com", &code, OtpPurpose::Registration)
            .await
            .unwrap(),
        "a consumed code must not verify again"
    );
}

#[tokio::test]
async fn expired_code_does_not_consume() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let record = stored_code(
        "alice@example.com",
        OtpPurpose::Registration,
        Utc::now() - Duration::seconds(1),
    );
    repo.insert(&record).await.unwrap();

    assert!(
        !svc.consume("alice@example.com", "042917", OtpPurpose::Registration)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn code_is_scoped_to_its_purpose() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    assert!(
        !svc.consume("alice@example.com", &code, OtpPurpose::PasswordReset)
            .await
            .unwrap(),
        "registration code must not open a password reset"
    );
    // Still live for its own purpose.
    assert!(
        svc.consume("alice@example.com", &code, OtpPurpose::Registration)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn reissue_supersedes_prior_code() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let first = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();
    let second = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    let unconsumed = repo
        .codes_handle()
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c.email == "alice@example.com" && c.consumed_at.is_none())
        .count();
    assert_eq!(unconsumed, 1, "delete-old-before-issue leaves one live code");

    if first != second {
        assert!(
            !svc.consume("alice@example.com", &first, OtpPurpose::Registration)
                .await
                .unwrap(),
            "superseded code must not verify"
        );
    }
    assert!(
        svc.consume("alice@example.com", &second, OtpPurpose::Registration)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn concurrent_consumers_race_to_exactly_one_winner() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc_a = otp_service(&repo, &mailer);
    let svc_b = otp_service(&repo, &mailer);

    let code = svc_a
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        svc_a.consume("alice@example.com", &code, OtpPurpose::Registration),
        svc_b.consume("alice@example.com", &code, OtpPurpose::Registration),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a ^ b, "exactly one of two racing consumes must win (a={a}, b={b})");
}

#[tokio::test]
async fn sweep_removes_all_and_only_expired_records() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);
    let now = Utc::now();

    // Expired, both purposes.
    repo.insert(&stored_code(
        "a@example.com",
        OtpPurpose::Registration,
        now - Duration::minutes(1),
    ))
    .await
    .unwrap();
    repo.insert(&stored_code(
        "b@example.com",
        OtpPurpose::PasswordReset,
        now - Duration::hours(2),
    ))
    .await
    .unwrap();
    // Live.
    repo.insert(&stored_code(
        "c@example.com",
        OtpPurpose::Registration,
        now + Duration::minutes(9),
    ))
    .await
    .unwrap();
    // Consumed but unexpired: untouched by the sweep.
    let mut consumed = stored_code(
        "d@example.com",
        OtpPurpose::Registration,
        now + Duration::minutes(9),
    );
    consumed.consumed_at = Some(now);
    repo.insert(&consumed).await.unwrap();

    let purged = svc.sweep_expired().await.unwrap();
    assert_eq!(purged, 2);

    let remaining = repo.codes_handle().lock().unwrap().len();
    assert_eq!(remaining, 2);
}

#[tokio::test]
async fn attempt_limit_locks_out_the_code() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    for _ in 0..OTP_MAX_ATTEMPTS {
        assert!(
            !svc.consume("alice@example.com", "000000", OtpPurpose::Registration)
                .await
                .unwrap()
        );
    }

    // The correct code no longer matches once the limit is reached, and the
    // failure is indistinguishable from a wrong code.
    assert!(
        !svc.consume("alice@example.com", &code, OtpPurpose::Registration)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn resend_cooldown_rejects_rapid_reissue() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = OtpService {
        otp_codes: repo.clone(),
        mailer: mailer.clone(),
        ttl: Duration::minutes(10),
        resend_cooldown: Duration::seconds(60),
    };

    svc.issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    let result = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await;
    assert!(matches!(result, Err(IdentityServiceError::ResendCooldown)));

    // Cooldown is per (email, purpose): a reset code for the same address
    // issues fine.
    svc.issue("alice@example.com", OtpPurpose::PasswordReset)
        .await
        .unwrap();
}

#[tokio::test]
async fn mailer_failure_does_not_fail_issuance() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::failing();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .expect("issuance must survive a dead notification sink");

    // The persisted code is live and enterable even though no email went out.
    assert!(
        svc.consume("alice@example.com", &code, OtpPurpose::Registration)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn check_does_not_consume() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::PasswordReset)
        .await
        .unwrap();

    assert!(
        svc.check("alice@example.com", &code, OtpPurpose::PasswordReset)
            .await
            .unwrap()
    );
    assert!(
        svc.check("alice@example.com", &code, OtpPurpose::PasswordReset)
            .await
            .unwrap(),
        "check is non-consuming and repeatable"
    );
    assert!(
        svc.consume("alice@example.com", &code, OtpPurpose::PasswordReset)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn failed_check_counts_toward_attempt_limit() {
    let repo = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&repo, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::PasswordReset)
        .await
        .unwrap();

    for _ in 0..OTP_MAX_ATTEMPTS {
        assert!(
            !svc.check("alice@example.com", "999999", OtpPurpose::PasswordReset)
                .await
                .unwrap()
        );
    }
    assert!(
        !svc.check("alice@example.com", &code, OtpPurpose::PasswordReset)
            .await
            .unwrap()
    );
}
