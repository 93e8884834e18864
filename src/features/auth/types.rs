//! Request and response types for auth-related API calls. Requests carry
//! passwords and one-time codes, so their `Debug` output redacts them and they
//! must never be logged whole.

use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Account role chosen at login and registration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Mentee,
    Mentor,
    Admin,
}

impl Role {
    /// Roles offered on the login form.
    pub const LOGIN_CHOICES: [Role; 3] = [Role::Mentee, Role::Mentor, Role::Admin];
    /// Roles offered on the registration form; admins are provisioned elsewhere.
    pub const REGISTER_CHOICES: [Role; 2] = [Role::Mentee, Role::Mentor];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Mentee => "mentee",
            Role::Mentor => "mentor",
            Role::Admin => "admin",
        }
    }

    /// Capitalized form used in button labels ("Login as Mentor").
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Mentee => "Mentee",
            Role::Mentor => "Mentor",
            Role::Admin => "Admin",
        }
    }

    #[must_use]
    pub fn can_self_register(self) -> bool {
        !matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown role `{}`", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Case-insensitive; the backend compares roles the same way.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mentee" => Ok(Role::Mentee),
            "mentor" => Ok(Role::Mentor),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Identity shown in the navbar and dashboard, persisted as `userInfo`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: Role,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("user_type", &self.user_type)
            .finish()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub user: Option<Profile>,
}

/// A malformed `user` object must not fail the whole login; the profile is
/// only a display cache.
fn lenient_profile<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Profile>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match serde_json::from_value::<Profile>(value) {
        Ok(profile) => Some(profile),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed user profile in login response");
            None
        }
    }))
}

#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("user_type", &self.user_type)
            .finish()
    }
}

/// Body of the send-otp and resend-otp calls.
#[derive(Clone, Debug, Serialize)]
pub struct OtpEmailRequest {
    pub email: String,
}

#[derive(Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

impl fmt::Debug for VerifyOtpRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("VerifyOtpRequest")
            .field("email", &self.email)
            .field("otp", &"[redacted]")
            .finish()
    }
}
