use mercato_identity::domain::password::verify_password;
use mercato_identity::domain::types::OtpPurpose;
use mercato_identity::error::IdentityServiceError;
use mercato_identity::usecase::password_reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetUseCase, ResendResetOtpUseCase,
    VerifyResetOtpUseCase,
};

use crate::helpers::{MockMailer, MockOtpRepo, MockUserRepo, otp_service, test_user};

#[tokio::test]
async fn full_reset_flow_rotates_the_password() {
    let users = MockUserRepo::new(vec![test_user("alice@example.com", true)]);
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();

    let request = RequestResetUseCase {
        users: users.clone(),
        otp: otp_service(&otps, &mailer),
    };
    request.execute("alice@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();

    // Intermediate confirmation does not burn the code.
    let verify = VerifyResetOtpUseCase {
        otp: otp_service(&otps, &mailer),
    };
    verify.execute("alice@example.com", &code).await.unwrap();
    verify.execute("alice@example.com", &code).await.unwrap();

    let complete = CompleteResetUseCase {
        users: users.clone(),
        otp: otp_service(&otps, &mailer),
    };
    complete
        .execute(CompleteResetInput {
            email: "alice@example.com".into(),
            code: code.clone(),
            password: "brand new secret".into(),
            password_confirmation: "brand new secret".into(),
        })
        .await
        .unwrap();

    let stored = users
        .users_handle()
        .lock()
        .unwrap()
        .first()
        .cloned()
        .unwrap();
    assert!(verify_password("brand new secret", &stored.password_hash).unwrap());

    // Completion consumed the code: neither re-check nor replay works.
    assert!(matches!(
        verify.execute("alice@example.com", &code).await,
        Err(IdentityServiceError::InvalidOtp)
    ));
    let replay = complete
        .execute(CompleteResetInput {
            email: "alice@example.com".into(),
            code,
            password: "another secret!".into(),
            password_confirmation: "another secret!".into(),
        })
        .await;
    assert!(matches!(replay, Err(IdentityServiceError::InvalidOtp)));
}

#[tokio::test]
async fn request_gates_on_account_state() {
    let users = MockUserRepo::new(vec![test_user("pending@example.com", false)]);
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let request = RequestResetUseCase {
        users,
        otp: otp_service(&otps, &mailer),
    };

    assert!(matches!(
        request.execute("ghost@example.com").await,
        Err(IdentityServiceError::UserNotFound)
    ));
    assert!(matches!(
        request.execute("pending@example.com").await,
        Err(IdentityServiceError::UserNotVerified)
    ));
    assert!(mailer.last_code().is_none());
}

#[tokio::test]
async fn resend_invalidates_the_previous_reset_code() {
    let users = MockUserRepo::new(vec![test_user("alice@example.com", true)]);
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let resend = ResendResetOtpUseCase {
        users: users.clone(),
        otp: otp_service(&otps, &mailer),
    };

    resend.execute("alice@example.com").await.unwrap();
    let first = mailer.last_code().unwrap();
    resend.execute("alice@example.com").await.unwrap();
    let second = mailer.last_code().unwrap();

    let verify = VerifyResetOtpUseCase {
        otp: otp_service(&otps, &mailer),
    };
    if first != second {
        assert!(matches!(
            verify.execute("alice@example.com", &first).await,
            Err(IdentityServiceError::InvalidOtp)
        ));
    }
    verify.execute("alice@example.com", &second).await.unwrap();
}

#[tokio::test]
async fn complete_rejects_weak_or_mismatched_passwords() {
    let users = MockUserRepo::new(vec![test_user("alice@example.com", true)]);
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();

    let request = RequestResetUseCase {
        users: users.clone(),
        otp: otp_service(&otps, &mailer),
    };
    request.execute("alice@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();

    let complete = CompleteResetUseCase {
        users,
        otp: otp_service(&otps, &mailer),
    };

    let short = complete
        .execute(CompleteResetInput {
            email: "alice@example.com".into(),
            code: code.clone(),
            password: "short".into(),
            password_confirmation: "short".into(),
        })
        .await;
    assert!(matches!(short, Err(IdentityServiceError::Validation(_))));

    let mismatch = complete
        .execute(CompleteResetInput {
            email: "alice@example.com".into(),
            code: code.clone(),
            password: "long enough one".into(),
            password_confirmation: "long enough two".into(),
        })
        .await;
    assert!(matches!(mismatch, Err(IdentityServiceError::Validation(_))));

    // Validation failures never reach the code: it is still live.
    let verify = VerifyResetOtpUseCase {
        otp: otp_service(&otps, &mailer),
    };
    verify.execute("alice@example.com", &code).await.unwrap();
}

#[tokio::test]
async fn registration_code_does_not_complete_a_reset() {
    let users = MockUserRepo::new(vec![test_user("alice@example.com", true)]);
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let svc = otp_service(&otps, &mailer);

    let code = svc
        .issue("alice@example.com", OtpPurpose::Registration)
        .await
        .unwrap();

    let complete = CompleteResetUseCase {
        users,
        otp: otp_service(&otps, &mailer),
    };
    let result = complete
        .execute(CompleteResetInput {
            email: "alice@example.com".into(),
            code,
            password: "brand new secret".into(),
            password_confirmation: "brand new secret".into(),
        })
        .await;
    assert!(matches!(result, Err(IdentityServiceError::InvalidOtp)));
}

#[tokio::test]
async fn verify_rejects_malformed_and_wrong_codes() {
    let otps = MockOtpRepo::empty();
    let mailer = MockMailer::new();
    let verify = VerifyResetOtpUseCase {
        otp: otp_service(&otps, &mailer),
    };

    assert!(matches!(
        verify.execute("alice@example.com", "12ab56").await,
        Err(IdentityServiceError::Validation(_))
    ));
    assert!(matches!(
        verify.execute("alice@example.com", "123456").await,
        Err(IdentityServiceError::InvalidOtp)
    ));
}
