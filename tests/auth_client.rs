use anyhow::{bail, ensure, Context, Result};
use mentorship_web::{
    app_lib::{AppConfig, AppError},
    features::auth::{
        client::{
            failure_message, login_failure_message, register_failure_message, AuthClient,
            SEND_OTP_FALLBACK_MESSAGE, USER_NOT_FOUND_MESSAGE,
        },
        flows::{self, LoginForm, RegisterForm, MISSING_TOKEN_MESSAGE},
        otp::{OtpChallenge, OtpError, OtpRejection, RESEND_COOLDOWN_SECS},
        session::SessionStore,
        storage::MemoryStorage,
        types::{Profile, Role},
    },
};
use serde_json::json;
use std::{net::TcpListener, time::Duration};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const PASSWORD: &str = "Valid1Pass!";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn client_for(server: &MockServer) -> Result<AuthClient> {
    let config = AppConfig::with_base_url(format!("{}/api/v1", server.uri()));
    AuthClient::from_config(&config).context("build auth client")
}

fn login_form(role: Role) -> LoginForm {
    LoginForm {
        email: " ada@example.com ".to_string(),
        password: PASSWORD.to_string(),
        role,
    }
}

#[tokio::test]
async fn sign_in_persists_token_and_profile() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/api"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "userType": "mentor"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123",
            "token_type": "bearer",
            "message": "Login successful",
            "user": {"id": 7, "name": "Ada Lovelace", "email": "ada@example.com", "role": "mentor"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let store = SessionStore::new(MemoryStorage::new());
    let signed_in = flows::sign_in(&client, &store, login_form(Role::Mentor)).await?;

    let expected = Profile {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role: Role::Mentor,
    };
    ensure!(signed_in.message == "Login successful", "unexpected message {}", signed_in.message);
    ensure!(store.is_authenticated(), "session should be stored");
    ensure!(store.token().as_deref() == Some("tok-123"), "token mismatch");
    ensure!(store.current_profile() == Some(expected), "profile mismatch");
    Ok(())
}

#[tokio::test]
async fn sign_in_without_token_stores_nothing() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let store = SessionStore::new(MemoryStorage::new());
    let Err(err) = flows::sign_in(&client, &store, login_form(Role::Mentee)).await else {
        bail!("login without a token must fail");
    };

    ensure!(login_failure_message(&err) == MISSING_TOKEN_MESSAGE, "got {err}");
    ensure!(!store.is_authenticated(), "no session expected");
    Ok(())
}

#[tokio::test]
async fn sign_in_with_unreadable_body_reports_invalid_response() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/api"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let store = SessionStore::new(MemoryStorage::new());
    let Err(err) = flows::sign_in(&client, &store, login_form(Role::Mentee)).await else {
        bail!("unreadable login body must fail");
    };

    ensure!(matches!(err, AppError::Parse(_)), "got {err:?}");
    ensure!(login_failure_message(&err) == MISSING_TOKEN_MESSAGE, "got {err}");
    ensure!(!store.is_authenticated(), "no session expected");
    Ok(())
}

#[tokio::test]
async fn login_rejections_map_to_user_messages() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/api"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "userType": "admin"
        })))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "This account is registered as a mentor, not an admin"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login/api"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "password": PASSWORD,
            "userType": "mentee"
        })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let store = SessionStore::new(MemoryStorage::new());

    let Err(forbidden) = flows::sign_in(&client, &store, login_form(Role::Admin)).await else {
        bail!("role mismatch must fail");
    };
    ensure!(forbidden.status() == Some(403), "expected 403, got {forbidden}");
    ensure!(
        login_failure_message(&forbidden) == "This account is registered as a mentor, not an admin",
        "got {}",
        login_failure_message(&forbidden)
    );

    let Err(missing) = flows::sign_in(&client, &store, login_form(Role::Mentee)).await else {
        bail!("unknown user must fail");
    };
    ensure!(login_failure_message(&missing) == USER_NOT_FOUND_MESSAGE, "got {missing}");
    ensure!(!store.is_authenticated(), "no session expected");
    Ok(())
}

#[tokio::test]
async fn weak_password_never_reaches_backend() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let store = SessionStore::new(MemoryStorage::new());
    let mut form = login_form(Role::Mentee);
    form.password = "short1!".to_string();

    let err = flows::sign_in(&client, &store, form)
        .await
        .err()
        .context("weak password must be rejected")?;
    ensure!(
        err == AppError::Validation("Password must be at least 8 characters long".to_string()),
        "got {err}"
    );

    let register = RegisterForm {
        name: "John  Doe".to_string(),
        email: "john@example.com".to_string(),
        password: PASSWORD.to_string(),
        role: Role::Mentee,
    };
    let err = flows::register_account(&client, register)
        .await
        .err()
        .context("double space must be rejected")?;
    ensure!(matches!(err, AppError::Validation(_)), "got {err}");
    Ok(())
}

#[tokio::test]
async fn register_sends_trimmed_name_and_strips_database_prefix() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register/raw"))
        .and(body_json(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "password": PASSWORD,
            "userType": "mentee"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/register/raw"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": PASSWORD,
            "userType": "mentor"
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Database error: 400: Email already registered"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    flows::register_account(
        &client,
        RegisterForm {
            name: " Grace Hopper ".to_string(),
            email: "grace@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: Role::Mentee,
        },
    )
    .await?;

    let err = flows::register_account(
        &client,
        RegisterForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: PASSWORD.to_string(),
            role: Role::Mentor,
        },
    )
    .await
    .err()
    .context("duplicate email must fail")?;
    ensure!(
        register_failure_message(&err) == "Email already registered",
        "got {}",
        register_failure_message(&err)
    );
    Ok(())
}

#[tokio::test]
async fn password_reset_failure_uses_fallback() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/send-otp"))
        .and(body_json(json!({"email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let err = flows::request_password_reset(&client, " ada@example.com")
        .await
        .err()
        .context("server error must fail")?;
    ensure!(
        failure_message(&err, SEND_OTP_FALLBACK_MESSAGE) == SEND_OTP_FALLBACK_MESSAGE,
        "got {err}"
    );
    Ok(())
}

#[tokio::test]
async fn otp_challenge_round_trip_against_backend() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/verify-otp"))
        .and(body_json(json!({"email": "ada@example.com", "otp": "111111"})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid OTP"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/verify-otp"))
        .and(body_json(json!({"email": "ada@example.com", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "verified"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/resend-otp"))
        .and(body_json(json!({"email": "ada@example.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;
    let mut challenge = OtpChallenge::new("ada@example.com");

    let early = challenge.resend(&client).await;
    ensure!(
        early
            == Err(OtpError::Rejected(OtpRejection::CoolingDown {
                remaining: RESEND_COOLDOWN_SECS
            })),
        "resend must wait for the cooldown"
    );
    while challenge.tick() > 0 {}
    challenge.resend(&client).await.context("resend after cooldown")?;
    ensure!(challenge.cooldown_remaining() == RESEND_COOLDOWN_SECS, "cooldown restarts");

    ensure!(challenge.input(0, "111111"), "paste accepted");
    let rejected = challenge.submit(&client).await;
    ensure!(rejected == Err(OtpError::Failed("Invalid OTP".to_string())), "got {rejected:?}");
    ensure!(challenge.code().as_deref() == Some("111111"), "digits kept after failure");

    ensure!(challenge.input(0, "123456"), "second paste accepted");
    challenge.submit(&client).await.context("valid code")?;
    ensure!(challenge.is_verified(), "challenge verified");
    Ok(())
}

#[tokio::test]
async fn slow_backend_times_out() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/send-otp"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = AppConfig::with_base_url(format!("{}/api/v1", server.uri()));
    config.request_timeout = Duration::from_millis(200);
    let client = AuthClient::from_config(&config)?;

    let err = client
        .send_otp("ada@example.com")
        .await
        .err()
        .context("slow backend must time out")?;
    ensure!(matches!(err, AppError::Timeout(_)), "got {err}");
    ensure!(
        failure_message(&err, SEND_OTP_FALLBACK_MESSAGE) == "Request timed out. Please try again.",
        "transport message wins over fallback"
    );
    Ok(())
}
