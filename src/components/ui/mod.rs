mod alert;
mod button;
mod password_field;
mod spinner;

pub(crate) use alert::{Alert, AlertKind};
pub(crate) use button::{Button, ButtonStyle};
pub(crate) use password_field::PasswordField;
pub(crate) use spinner::Spinner;
