use std::sync::LazyLock;

use regex::Regex;

use crate::accounts::AccountError;

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Shape checks for caller-supplied credentials, applied by the API and the
/// CLI before anything reaches the manager. An empty email is left to the
/// manager, which owns that rule. `None` means "no password"; `Some("")` is a
/// password and is rejected as too short.
pub fn validate_credentials(email: &str, password: Option<&str>) -> Result<(), AccountError> {
    let email = email.trim();
    if !email.is_empty() && !EMAIL_RE.is_match(email) {
        return Err(AccountError::InvalidEmail);
    }
    if let Some(pw) = password {
        if pw.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }
    }
    Ok(())
}
