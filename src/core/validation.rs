//! Validation of auth form fields (email, password, confirmation)
//!
//! Runs in the browser before anything is sent to the backend; the backend
//! still has the final word.

/// Minimum password length accepted by the backend
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field left empty
    Required(&'static str),
    /// Not shaped like `name@domain.tld`
    InvalidEmail,
    /// Email longer than the backend accepts
    EmailTooLong { max: usize, actual: usize },
    /// Password shorter than the backend accepts
    PasswordTooShort { min: usize, actual: usize },
    /// Password and confirmation differ
    PasswordMismatch,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{} is required", field),
            ValidationError::InvalidEmail => write!(f, "Invalid email address"),
            ValidationError::EmailTooLong { max, actual } => {
                write!(f, "Email is too long ({} chars, max {})", actual, max)
            }
            ValidationError::PasswordTooShort { min, .. } => {
                write!(f, "Password must be at least {} characters", min)
            }
            ValidationError::PasswordMismatch => write!(f, "The passwords do not match"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates an email address
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required("Email"));
    }

    let length = email.chars().count();
    if length > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong {
            max: MAX_EMAIL_LENGTH,
            actual: length,
        });
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));

    // Domain needs at least one dot and an alphabetic TLD of 2+ chars
    let domain_ok = match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty()
                && host
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
                && tld.len() >= 2
                && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    };

    if local_ok && domain_ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a new password
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }

    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
            actual: length,
        });
    }

    Ok(())
}

/// Validates the "confirm password" field against the password
pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if confirmation.is_empty() {
        return Err(ValidationError::Required("Password confirmation"));
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Convenience wrapper returning the message, for form error signals
pub fn message<T>(result: Result<T, ValidationError>) -> Option<String> {
    result.err().map(|e| e.to_string())
}
