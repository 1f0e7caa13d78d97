//! Contact-field validation for suppliers.

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// North American numbers, optional `+1` prefix, area code in parentheses
/// or bare, `.`/`-`/space separators and an optional extension.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:\+?1\s*(?:[.-]\s*)?)?(?:\(\s*([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9])\s*\)|([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]))\s*(?:[.-]\s*)?)?([2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2})\s*(?:[.-]\s*)?([0-9]{4})(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?$",
    )
    .expect("valid phone regex")
});

/// True when `input` is empty or a well-formed email address.
pub fn is_valid_email(input: &str) -> bool {
    input.is_empty() || EMAIL_RE.is_match(input)
}

/// True when `input` is empty or a well-formed phone number.
pub fn is_valid_phone_number(input: &str) -> bool {
    input.is_empty() || PHONE_RE.is_match(input)
}

/// `validator` hook: a supplier email must be present and well formed.
pub fn validate_required_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Email is required".into());
        return Err(err);
    }
    if !EMAIL_RE.is_match(email) {
        let mut err = ValidationError::new("email");
        err.message = Some("Invalid email".into());
        return Err(err);
    }
    Ok(())
}

/// `validator` hook: a supplier phone number must be present and well formed.
pub fn validate_required_phone_number(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("Phone number is required".into());
        return Err(err);
    }
    if !PHONE_RE.is_match(phone) {
        let mut err = ValidationError::new("phone");
        err.message = Some("Invalid phone number".into());
        return Err(err);
    }
    Ok(())
}
