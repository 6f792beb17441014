//! Normalization and validation of account and trip input.

use crate::error::CoreError;

/// Longest accepted mobile number.
pub const MAX_MOBILE_LEN: usize = 20;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 80;

/// Longest accepted trip name.
pub const MAX_TRIP_NAME_LEN: usize = 100;

/// Signup fields after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub mobile: String,
    pub username: String,
    pub password: String,
}

/// Mobile numbers are compared and stored trimmed.
pub fn normalize_mobile(mobile: &str) -> String {
    mobile.trim().to_string()
}

/// Usernames are compared and stored trimmed and lowercased.
pub fn normalize_username(username: &str) -> String {
    username.trim().to_lowercase()
}

/// Normalize signup input and reject empty or oversized fields.
///
/// The password is kept verbatim; only its presence is required.
pub fn validate_signup(mobile: &str, username: &str, password: &str) -> Result<NewAccount, CoreError> {
    let mobile = normalize_mobile(mobile);
    let username = normalize_username(username);

    if mobile.is_empty() || username.is_empty() || password.is_empty() {
        return Err(CoreError::Validation("All fields are required".into()));
    }
    if mobile.chars().count() > MAX_MOBILE_LEN {
        return Err(CoreError::Validation(format!(
            "Mobile number must be at most {MAX_MOBILE_LEN} characters"
        )));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }

    Ok(NewAccount {
        mobile,
        username,
        password: password.to_string(),
    })
}

/// Trim a trip name and reject empty or oversized names.
pub fn validate_trip_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation("Trip name is required".into()));
    }
    if name.chars().count() > MAX_TRIP_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Trip name must be at most {MAX_TRIP_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_is_normalized() {
        let account = validate_signup("  98765 ", "  Maya ", " pw ").unwrap();
        assert_eq!(account.mobile, "98765");
        assert_eq!(account.username, "maya");
        assert_eq!(account.password, " pw ");
    }

    #[test]
    fn signup_requires_every_field() {
        for (m, u, p) in [("", "maya", "pw"), ("1", "   ", "pw"), ("1", "maya", "")] {
            let err = validate_signup(m, u, p).unwrap_err();
            assert!(matches!(err, CoreError::Validation(ref msg) if msg == "All fields are required"));
        }
    }

    #[test]
    fn signup_rejects_long_fields() {
        assert!(validate_signup(&"1".repeat(21), "maya", "pw").is_err());
        assert!(validate_signup("1", &"m".repeat(81), "pw").is_err());
        assert!(validate_signup(&"1".repeat(20), &"m".repeat(80), "pw").is_ok());
    }

    #[test]
    fn trip_name_rules() {
        assert_eq!(validate_trip_name("  Goa 2024 ").unwrap(), "Goa 2024");
        assert!(validate_trip_name("   ").is_err());
        assert!(validate_trip_name(&"x".repeat(101)).is_err());
    }
}
