//! Client-side form checks run before any request is sent. They give early
//! feedback only; the backend validates everything again.

use crate::app_lib::AppError;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length accepted by the forms.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum length of a trimmed full name.
pub const MIN_NAME_LENGTH: usize = 2;
/// Characters that satisfy the "special character" rule.
pub const SPECIAL_CHARACTERS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Requirement list shown under the registration password field.
pub const PASSWORD_REQUIREMENTS: [&str; 6] = [
    "Minimum 8 characters",
    "At least one uppercase letter (A-Z)",
    "At least one lowercase letter (a-z)",
    "At least one number (0-9)",
    r#"At least one special character (!@#$%^&*(),.?":{}|<>)"#,
    "No spaces allowed",
];

static UPPERCASE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[A-Z]").ok());
static LOWERCASE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[a-z]").ok());
static DIGIT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[0-9]").ok());
static SPECIAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).ok());
static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s").ok());
static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// A rule that must hold. An unavailable pattern never satisfies it.
fn satisfies(rule: &LazyLock<Option<Regex>>, value: &str) -> bool {
    rule.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// A pattern that must be absent. An unavailable pattern counts as present.
fn violates(rule: &LazyLock<Option<Regex>>, value: &str) -> bool {
    rule.as_ref().map_or(true, |regex| regex.is_match(value))
}

/// Returns the first unmet password rule, or an empty string when the
/// password is acceptable. Rules are checked in a fixed order so the message
/// is stable while the user types.
#[must_use]
pub fn password_message(password: &str) -> String {
    let message = if password.chars().count() < MIN_PASSWORD_LENGTH {
        "Password must be at least 8 characters long"
    } else if !satisfies(&UPPERCASE, password) {
        "Password must contain at least one uppercase letter"
    } else if !satisfies(&LOWERCASE, password) {
        "Password must contain at least one lowercase letter"
    } else if !satisfies(&DIGIT, password) {
        "Password must contain at least one number"
    } else if !satisfies(&SPECIAL, password) {
        "Password must contain at least one special character"
    } else if violates(&WHITESPACE, password) {
        "Password cannot contain spaces"
    } else {
        ""
    };
    message.to_string()
}

/// # Errors
/// `AppError::Validation` carrying the first unmet rule.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    as_result(password_message(password))
}

/// Returns the problem with a full name, or an empty string when it is fine.
/// Name parts must be separated by exactly one space.
#[must_use]
pub fn name_message(name: &str) -> String {
    let trimmed = name.trim();
    let message = if trimmed.is_empty() {
        "Name is required"
    } else if name.contains("  ") {
        "Please use only one space between name parts"
    } else if trimmed.chars().count() < MIN_NAME_LENGTH {
        "Name must be at least 2 characters long"
    } else {
        ""
    };
    message.to_string()
}

/// # Errors
/// `AppError::Validation` describing the problem.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    as_result(name_message(name))
}

/// # Errors
/// `AppError::Validation` when the address is missing or malformed.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required.".to_string()));
    }
    if !satisfies(&EMAIL, email) {
        return Err(AppError::Validation(
            "Email address looks invalid.".to_string(),
        ));
    }
    Ok(())
}

#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

fn as_result(message: String) -> Result<(), AppError> {
    if message.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(message))
    }
}
