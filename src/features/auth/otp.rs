//! One-time passcode challenge owned by the verification view.
//!
//! The challenge tracks six digit slots, the input focus, a resend cooldown
//! and whether a backend call is in flight. Transitions are synchronous
//! (`begin_*` / `finish_*`) so a reactive view can hold the challenge in a
//! signal and release it across the `await`; [`OtpChallenge::submit`] and
//! [`OtpChallenge::resend`] wrap the same transitions for callers that can
//! hold `&mut` across the call.
//!
//! ```text
//! Editing --submit(6 digits)--> Submitting --ok--> Verified
//!    ^                              |
//!    +-------------err--------------+   (digits kept)
//! Editing --resend(cooldown 0)--> Resending --ok: cooldown 30 / err: stays 0--> Editing
//! ```

use super::client::failure_message;
use crate::app_lib::AppError;
use std::fmt;

/// Number of digit slots.
pub const OTP_LENGTH: usize = 6;
/// Seconds before the code may be resent, counted from entry and from each
/// successful resend.
pub const RESEND_COOLDOWN_SECS: u32 = 30;
pub const INCOMPLETE_CODE_MESSAGE: &str = "Please enter all 6 digits of the OTP";
pub const VERIFY_FALLBACK_MESSAGE: &str = "Failed to verify OTP. Please try again.";
pub const RESEND_FALLBACK_MESSAGE: &str = "Failed to resend OTP. Please try again.";

/// Remote calls the challenge coordinates with.
#[allow(async_fn_in_trait)]
pub trait OtpBackend {
    async fn verify_otp(&self, email: &str, otp: &str) -> Result<(), AppError>;
    async fn resend_otp(&self, email: &str) -> Result<(), AppError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OtpPhase {
    Editing,
    Submitting,
    Resending,
    Verified,
}

/// Why an action was refused without contacting the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OtpRejection {
    Incomplete,
    Busy,
    CoolingDown { remaining: u32 },
    AlreadyVerified,
}

impl fmt::Display for OtpRejection {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpRejection::Incomplete => formatter.write_str(INCOMPLETE_CODE_MESSAGE),
            OtpRejection::Busy => formatter.write_str("Please wait for the current request to finish."),
            OtpRejection::CoolingDown { remaining } => {
                write!(formatter, "You can resend the code in {remaining}s.")
            }
            OtpRejection::AlreadyVerified => formatter.write_str("The code is already verified."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OtpError {
    Rejected(OtpRejection),
    /// The backend call failed; the text is ready to show to the user.
    Failed(String),
}

impl fmt::Display for OtpError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OtpError::Rejected(rejection) => rejection.fmt(formatter),
            OtpError::Failed(message) => formatter.write_str(message),
        }
    }
}

impl std::error::Error for OtpError {}

impl From<OtpRejection> for OtpError {
    fn from(rejection: OtpRejection) -> Self {
        OtpError::Rejected(rejection)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpChallenge {
    email: String,
    digits: [Option<char>; OTP_LENGTH],
    focus: usize,
    cooldown: u32,
    phase: OtpPhase,
}

impl OtpChallenge {
    /// Starts a challenge for `email` with the cooldown running.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            digits: [None; OTP_LENGTH],
            focus: 0,
            cooldown: RESEND_COOLDOWN_SECS,
            phase: OtpPhase::Editing,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn digit(&self, index: usize) -> Option<char> {
        self.digits.get(index).copied().flatten()
    }

    /// Slot the input cursor should be in.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown
    }

    #[must_use]
    pub fn phase(&self) -> OtpPhase {
        self.phase
    }

    /// True while a verify or resend call is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, OtpPhase::Submitting | OtpPhase::Resending)
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.phase == OtpPhase::Verified
    }

    #[must_use]
    pub fn can_resend(&self) -> bool {
        self.cooldown == 0 && self.phase == OtpPhase::Editing
    }

    /// The full code once every slot holds a digit.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.digits.iter().copied().collect()
    }

    fn accepts_input(&self) -> bool {
        self.phase == OtpPhase::Editing
    }

    /// Applies the text typed into slot `index`. Only numerals are accepted;
    /// an empty value clears the slot. A single digit fills the slot and moves
    /// focus to the next one; a pasted run of digits fills consecutive slots.
    /// Returns whether the input was taken.
    pub fn input(&mut self, index: usize, value: &str) -> bool {
        if !self.accepts_input() || index >= OTP_LENGTH {
            return false;
        }
        if !value.chars().all(|ch| ch.is_ascii_digit()) {
            return false;
        }

        let mut slot = index;
        let mut chars = value.chars();
        match chars.next() {
            None => {
                self.digits[index] = None;
                self.focus = index;
                return true;
            }
            Some(first) => self.digits[slot] = Some(first),
        }
        for ch in chars {
            if slot + 1 >= OTP_LENGTH {
                break;
            }
            slot += 1;
            self.digits[slot] = Some(ch);
        }
        self.focus = (slot + 1).min(OTP_LENGTH - 1);
        true
    }

    /// Backspace in slot `index`: clears a filled slot in place, or moves
    /// focus back one slot when the slot is already empty.
    pub fn backspace(&mut self, index: usize) {
        if !self.accepts_input() || index >= OTP_LENGTH {
            return;
        }
        if self.digits[index].is_some() {
            self.digits[index] = None;
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
    }

    pub fn focus_slot(&mut self, index: usize) {
        if index < OTP_LENGTH {
            self.focus = index;
        }
    }

    /// One elapsed second. Never goes below zero.
    pub fn tick(&mut self) -> u32 {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.cooldown
    }

    /// Moves to `Submitting` and returns the code to send.
    ///
    /// # Errors
    /// Refuses, without any state change, when a call is already in flight,
    /// the challenge is verified, or any slot is empty.
    pub fn begin_submit(&mut self) -> Result<String, OtpRejection> {
        if self.is_verified() {
            return Err(OtpRejection::AlreadyVerified);
        }
        if self.is_submitting() {
            return Err(OtpRejection::Busy);
        }
        let code = self.code().ok_or(OtpRejection::Incomplete)?;
        self.phase = OtpPhase::Submitting;
        Ok(code)
    }

    /// Records the verification outcome. Digits are kept on failure so the
    /// user can correct a single slot.
    ///
    /// # Errors
    /// `OtpError::Failed` with the message to show when verification failed.
    pub fn finish_submit(&mut self, result: Result<(), AppError>) -> Result<(), OtpError> {
        match result {
            Ok(()) => {
                self.phase = OtpPhase::Verified;
                Ok(())
            }
            Err(err) => {
                self.phase = OtpPhase::Editing;
                Err(OtpError::Failed(failure_message(&err, VERIFY_FALLBACK_MESSAGE)))
            }
        }
    }

    /// Moves to `Resending`.
    ///
    /// # Errors
    /// Refuses while the cooldown runs, a call is in flight, or after
    /// verification.
    pub fn begin_resend(&mut self) -> Result<(), OtpRejection> {
        if self.is_verified() {
            return Err(OtpRejection::AlreadyVerified);
        }
        if self.is_submitting() {
            return Err(OtpRejection::Busy);
        }
        if self.cooldown > 0 {
            return Err(OtpRejection::CoolingDown {
                remaining: self.cooldown,
            });
        }
        self.phase = OtpPhase::Resending;
        Ok(())
    }

    /// Records the resend outcome. Success restarts the cooldown; failure
    /// leaves it at zero so the user can retry at once.
    ///
    /// # Errors
    /// `OtpError::Failed` with the message to show when the resend failed.
    pub fn finish_resend(&mut self, result: Result<(), AppError>) -> Result<(), OtpError> {
        self.phase = OtpPhase::Editing;
        match result {
            Ok(()) => {
                self.cooldown = RESEND_COOLDOWN_SECS;
                Ok(())
            }
            Err(err) => Err(OtpError::Failed(failure_message(&err, RESEND_FALLBACK_MESSAGE))),
        }
    }

    /// Validates, verifies against `backend` and records the outcome.
    ///
    /// # Errors
    /// A rejection when nothing was sent, or the failure message.
    pub async fn submit<B: OtpBackend>(&mut self, backend: &B) -> Result<(), OtpError> {
        let code = self.begin_submit()?;
        let result = backend.verify_otp(&self.email, &code).await;
        self.finish_submit(result)
    }

    /// Requests a fresh code from `backend` if the cooldown allows it.
    ///
    /// # Errors
    /// A rejection when nothing was sent, or the failure message.
    pub async fn resend<B: OtpBackend>(&mut self, backend: &B) -> Result<(), OtpError> {
        self.begin_resend()?;
        let result = backend.resend_otp(&self.email).await;
        self.finish_resend(result)
    }
}
