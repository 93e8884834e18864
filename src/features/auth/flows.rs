//! Multi-step auth flows shared by the pages: validate locally, call the
//! backend, and update the session. Validation failures return before any
//! request is made.

use super::{
    client::AuthClient,
    session::SessionStore,
    storage::KeyValueStorage,
    types::{LoginRequest, Profile, RegisterRequest, Role},
    validation::{
        normalize_email, normalize_name, validate_email, validate_name, validate_password,
    },
};
use crate::app_lib::AppError;
use tracing::info;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Logged in successfully.";
pub const MISSING_TOKEN_MESSAGE: &str = "Login failed: Invalid response from server";

/// Values collected by the login form.
#[derive(Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Values collected by the registration form.
#[derive(Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedIn {
    /// Backend greeting, or a default one.
    pub message: String,
    pub profile: Option<Profile>,
}

/// Logs in and persists the session.
///
/// # Errors
/// `AppError::Validation` for bad input (nothing sent), backend and transport
/// errors, and `AppError::Parse` when a 200 answer is unreadable or carries
/// no token.
pub async fn sign_in<S: KeyValueStorage>(
    client: &AuthClient,
    store: &SessionStore<S>,
    form: LoginForm,
) -> Result<SignedIn, AppError> {
    let email = normalize_email(&form.email);
    validate_email(&email)?;
    validate_password(&form.password)?;

    let request = LoginRequest {
        email,
        password: form.password,
        user_type: form.role,
    };
    let response = client.login(&request).await.map_err(|err| match err {
        AppError::Parse(_) => AppError::Parse(MISSING_TOKEN_MESSAGE.to_string()),
        other => other,
    })?;

    let token = response
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Parse(MISSING_TOKEN_MESSAGE.to_string()))?;

    store.save(&token, response.user.as_ref())?;
    info!(role = %form.role, "signed in");

    Ok(SignedIn {
        message: response
            .message
            .unwrap_or_else(|| LOGIN_SUCCESS_MESSAGE.to_string()),
        profile: response.user,
    })
}

/// Clears the persisted session.
pub fn sign_out<S: KeyValueStorage>(store: &SessionStore<S>) {
    store.clear();
}

/// Creates an account. The user signs in separately afterwards.
///
/// # Errors
/// `AppError::Validation` for bad input (nothing sent), backend and transport
/// errors otherwise.
pub async fn register_account(client: &AuthClient, form: RegisterForm) -> Result<(), AppError> {
    validate_name(&form.name)?;
    let email = normalize_email(&form.email);
    validate_email(&email)?;
    validate_password(&form.password)?;
    if !form.role.can_self_register() {
        return Err(AppError::Validation(
            "Admin accounts cannot be created here.".to_string(),
        ));
    }

    let request = RegisterRequest {
        name: normalize_name(&form.name),
        email,
        password: form.password,
        user_type: form.role,
    };
    client.register(&request).await?;
    info!(role = %form.role, "account registered");
    Ok(())
}

/// Sends the password reset code and returns the normalized address the
/// OTP challenge should use.
///
/// # Errors
/// `AppError::Validation` for a bad address, backend and transport errors
/// otherwise.
pub async fn request_password_reset(client: &AuthClient, email: &str) -> Result<String, AppError> {
    let email = normalize_email(email);
    validate_email(&email)?;
    client.send_otp(&email).await?;
    Ok(email)
}
