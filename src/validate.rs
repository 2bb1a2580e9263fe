//! Client-side form checks: presence and format only.
//!
//! SYSTEM CONTEXT
//! ==============
//! Screens run these before calling the API so obviously bad input never
//! reaches the network. Anything subtler is the server's call.

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

use crate::net::error::ValidationError;
use crate::net::types::Profile;

/// Minimum accepted password length for registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check the login form: both fields present.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] when either field is empty.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Check the registration form: all fields present, plausible email,
/// password long enough.
///
/// # Errors
///
/// Returns the first failing check, in the order the form reports them.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(())
}

/// Check the questionnaire: positive measurements and a non-empty
/// restriction set (callers normalize an empty selection to the `None`
/// sentinel before submitting).
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    if profile.age == 0 || profile.weight_kg <= 0.0 || profile.height_cm <= 0.0 {
        return Err(ValidationError::MissingMeasurements);
    }
    if profile.dietary_restrictions.is_empty() {
        return Err(ValidationError::EmptyRestrictions);
    }
    Ok(())
}

/// Shape check for `local@domain.tld`: no whitespace, exactly one `@`,
/// non-empty local part, and a dot strictly inside the domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
