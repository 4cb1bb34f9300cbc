use thiserror::Error;

/// A locally detected input problem. Raised before any request is built, so
/// a value of this type always means nothing was sent over the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your identification number")]
    EmptyIdentification,
    #[error("Please enter your password")]
    EmptyPassword,
    #[error("The identification number must have at least {min} digits")]
    IdentificationTooShort { min: usize },
    #[error("The password must have at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("The identification number must contain only digits")]
    IdentificationNotNumeric,
    #[error("The identification number must have at most {max} digits")]
    IdentificationTooLong { max: usize },
    #[error("The password must have at most {max} characters")]
    PasswordTooLong { max: usize },
    #[error("Please select the issue date")]
    EmptyIssueDate,
    #[error("Invalid date format, use dd/mm/yyyy")]
    InvalidIssueDate,
    #[error("The issue date cannot be in the future")]
    FutureIssueDate,
    #[error("The issue date is too old")]
    IssueDateTooOld,
    #[error("Please enter the employee's name")]
    EmptyName,
    #[error("The scanned code is empty")]
    EmptyQrToken,
}

impl ValidationError {
    /// Stable machine-readable code, in the style of `validator::ValidationError::new`.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::EmptyIdentification => "identification_required",
            ValidationError::EmptyPassword => "password_required",
            ValidationError::IdentificationTooShort { .. } => "identification_too_short",
            ValidationError::PasswordTooShort { .. } => "password_too_short",
            ValidationError::IdentificationNotNumeric => "identification_not_numeric",
            ValidationError::IdentificationTooLong { .. } => "identification_too_long",
            ValidationError::PasswordTooLong { .. } => "password_too_long",
            ValidationError::EmptyIssueDate => "issue_date_required",
            ValidationError::InvalidIssueDate => "issue_date_invalid_format",
            ValidationError::FutureIssueDate => "issue_date_in_future",
            ValidationError::IssueDateTooOld => "issue_date_too_old",
            ValidationError::EmptyName => "name_required",
            ValidationError::EmptyQrToken => "qr_token_required",
        }
    }
}
