//! Credential input rules shared by registration and password reset

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ValidationError;

pub const EMAIL_MIN_LEN: usize = 6;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 50;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Trim, lowercase and check an email address
pub fn normalize_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }
    if !(EMAIL_MIN_LEN..=EMAIL_MAX_LEN).contains(&email.chars().count()) {
        return Err(ValidationError::InvalidLength {
            field: "email".to_string(),
            min: EMAIL_MIN_LEN,
            max: EMAIL_MAX_LEN,
        });
    }
    if !EMAIL_REGEX.is_match(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

/// 6 to 50 characters with at least one lowercase, uppercase, digit and symbol
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "password".to_string(),
        });
    }
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&password.chars().count()) {
        return Err(ValidationError::InvalidLength {
            field: "password".to_string(),
            min: PASSWORD_MIN_LEN,
            max: PASSWORD_MAX_LEN,
        });
    }

    let strong = password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric());
    if !strong {
        return Err(ValidationError::WeakPassword);
    }
    Ok(())
}

/// Password rules plus confirmation
pub fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    validate_password(password)?;
    if password != confirm_password {
        return Err(ValidationError::PasswordConfirmationMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert_eq!(normalize_email("a@b.co").unwrap(), "a@b.co");
        assert!(matches!(normalize_email("a@b"), Err(ValidationError::InvalidLength { .. })));
        assert_eq!(normalize_email("not-an-email"), Err(ValidationError::InvalidEmail));
        assert!(matches!(normalize_email(""), Err(ValidationError::RequiredField { .. })));

        let long = format!("{}@example.com", "x".repeat(95));
        assert!(matches!(normalize_email(&long), Err(ValidationError::InvalidLength { .. })));
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password("Secr3t!").is_ok());
        assert_eq!(validate_password("secret1!"), Err(ValidationError::WeakPassword));
        assert_eq!(validate_password("SECRET1!"), Err(ValidationError::WeakPassword));
        assert_eq!(validate_password("Secret!!"), Err(ValidationError::WeakPassword));
        assert_eq!(validate_password("Secret11"), Err(ValidationError::WeakPassword));
        assert!(matches!(validate_password("Aa1!"), Err(ValidationError::InvalidLength { .. })));
        assert!(matches!(
            validate_password(&format!("Aa1!{}", "x".repeat(47))),
            Err(ValidationError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_confirmation_must_match() {
        assert!(validate_new_password("Secr3t!", "Secr3t!").is_ok());
        assert_eq!(
            validate_new_password("Secr3t!", "Secr3t?"),
            Err(ValidationError::PasswordConfirmationMismatch)
        );
    }
}
