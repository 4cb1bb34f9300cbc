use crate::config::ValidationConfig;
use crate::error::validation::ValidationError;
use crate::models::auth::Credentials;
use crate::validation::is_numeric;
use validator::ValidateLength;

/// Trims both fields and checks them in a fixed order: empty identification, empty
/// password, short identification, short password, non-numeric identification, then
/// the upper length bounds.
pub fn validate_credentials(identification: &str, password: &str, rules: &ValidationConfig) -> Result<Credentials, ValidationError> {
    let identification = identification.trim().to_string();
    let password = password.trim().to_string();

    if identification.is_empty() {
        return Err(ValidationError::EmptyIdentification);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if !identification.validate_length(Some(rules.min_identification_length as u64), None, None) {
        return Err(ValidationError::IdentificationTooShort {
            min: rules.min_identification_length,
        });
    }
    if !password.validate_length(Some(rules.min_password_length as u64), None, None) {
        return Err(ValidationError::PasswordTooShort {
            min: rules.min_password_length,
        });
    }
    if !is_numeric(&identification) {
        return Err(ValidationError::IdentificationNotNumeric);
    }
    if !identification.validate_length(None, Some(rules.max_identification_length as u64), None) {
        return Err(ValidationError::IdentificationTooLong {
            max: rules.max_identification_length,
        });
    }
    if !password.validate_length(None, Some(rules.max_password_length as u64), None) {
        return Err(ValidationError::PasswordTooLong {
            max: rules.max_password_length,
        });
    }

    Ok(Credentials { identification, password })
}
