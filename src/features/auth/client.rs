//! Client wrappers for the backend auth endpoints. These helpers centralize
//! paths and failure wording so routes never build requests by hand. Request
//! bodies carry passwords and codes and must never be logged.

use super::{
    otp::OtpBackend,
    types::{LoginRequest, LoginResponse, OtpEmailRequest, RegisterRequest, VerifyOtpRequest},
};
use crate::app_lib::{ApiClient, AppConfig, AppError};

pub const LOGIN_ENDPOINT: &str = "/auth/login/api";
pub const REGISTER_ENDPOINT: &str = "/auth/register/raw";
pub const SEND_OTP_ENDPOINT: &str = "/auth/send-otp";
pub const VERIFY_OTP_ENDPOINT: &str = "/auth/verify-otp";
pub const RESEND_OTP_ENDPOINT: &str = "/auth/resend-otp";

pub const LOGIN_FALLBACK_MESSAGE: &str = "Invalid credentials. Please try again.";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found. Please check your email and try again.";
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";
pub const SEND_OTP_FALLBACK_MESSAGE: &str = "Error sending OTP. Please try again later.";

/// Prefix some backend versions leak into duplicate-account errors.
const DATABASE_ERROR_PREFIX: &str = "Database error: 400:";

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    /// Propagates HTTP client construction failures.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        ApiClient::new(config).map(Self::new)
    }

    /// Exchanges credentials and the chosen role for a bearer token.
    /// A 403 means the account exists under a different role.
    ///
    /// # Errors
    /// Transport failures and backend rejections.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        self.api.post_json(LOGIN_ENDPOINT, request).await
    }

    /// # Errors
    /// Transport failures and backend rejections such as duplicate emails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), AppError> {
        self.api.post_json_empty(REGISTER_ENDPOINT, request).await
    }

    /// Emails a fresh code to start password reset.
    ///
    /// # Errors
    /// Transport failures and backend rejections.
    pub async fn send_otp(&self, email: &str) -> Result<(), AppError> {
        let request = OtpEmailRequest {
            email: email.to_string(),
        };
        self.api.post_json_empty(SEND_OTP_ENDPOINT, &request).await
    }
}

impl OtpBackend for AuthClient {
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AppError> {
        let request = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.api.post_json_empty(VERIFY_OTP_ENDPOINT, &request).await
    }

    async fn resend_otp(&self, email: &str) -> Result<(), AppError> {
        let request = OtpEmailRequest {
            email: email.to_string(),
        };
        self.api.post_json_empty(RESEND_OTP_ENDPOINT, &request).await
    }
}

/// Text to show for a failed call: the backend's own explanation when it
/// sent one, `fallback` for a bare HTTP rejection, and the transport or
/// validation message otherwise.
#[must_use]
pub fn failure_message(err: &AppError, fallback: &str) -> String {
    match err {
        AppError::Http { .. } => err
            .backend_message()
            .map_or_else(|| fallback.to_string(), str::to_string),
        _ => err.user_message().to_string(),
    }
}

#[must_use]
pub fn login_failure_message(err: &AppError) -> String {
    match err.status() {
        Some(404) => USER_NOT_FOUND_MESSAGE.to_string(),
        _ => failure_message(err, LOGIN_FALLBACK_MESSAGE),
    }
}

#[must_use]
pub fn register_failure_message(err: &AppError) -> String {
    let message = failure_message(err, REGISTER_FALLBACK_MESSAGE);
    if message.contains(DATABASE_ERROR_PREFIX) {
        message.replace(DATABASE_ERROR_PREFIX, "").trim().to_string()
    } else {
        message
    }
}
