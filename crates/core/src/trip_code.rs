//! Join codes that let friends find a trip.

use rand::Rng;

use crate::error::CoreError;

/// Number of characters in a join code.
pub const TRIP_CODE_LEN: usize = 6;

/// Characters a join code is drawn from.
pub const TRIP_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// How many fresh codes to try before giving up on finding an unused one.
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// Draw a random join code, uniform over [`TRIP_CODE_ALPHABET`].
///
/// Uniqueness is not checked here; the caller retries against the store.
pub fn generate_trip_code() -> String {
    let mut rng = rand::rng();
    (0..TRIP_CODE_LEN)
        .map(|_| TRIP_CODE_ALPHABET[rng.random_range(0..TRIP_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Canonical form of a user-typed code: trimmed and uppercased.
pub fn normalize_trip_code(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Check that `code` is already in canonical form.
pub fn validate_trip_code(code: &str) -> Result<(), CoreError> {
    if code.len() != TRIP_CODE_LEN {
        return Err(CoreError::Validation(format!(
            "Trip code must be {TRIP_CODE_LEN} characters"
        )));
    }
    if !code.bytes().all(|b| TRIP_CODE_ALPHABET.contains(&b)) {
        return Err(CoreError::Validation(
            "Trip code may only contain A-Z and 0-9".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_valid() {
        for _ in 0..200 {
            let code = generate_trip_code();
            assert_eq!(code.len(), TRIP_CODE_LEN);
            validate_trip_code(&code).expect("generated code must validate");
        }
    }

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_trip_code("  ab12cd \n"), "AB12CD");
    }

    #[test]
    fn validate_rejects_bad_codes() {
        assert!(validate_trip_code("ABC").is_err());
        assert!(validate_trip_code("abc123").is_err());
        assert!(validate_trip_code("ABC-12").is_err());
        assert!(validate_trip_code("ABC123").is_ok());
    }
}
