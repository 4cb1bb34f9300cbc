use crate::error::validation::ValidationError;
use crate::models::registration::{DISPLAY_DATE_FORMAT, RegistrationInput};
use crate::validation::is_numeric;
use chrono::{Months, NaiveDate};

pub const MAX_ISSUE_DATE_AGE_YEARS: u32 = 100;

/// Oldest issue date still accepted on `today`. Feb 29 clamps to Feb 28.
pub fn earliest_issue_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(12 * MAX_ISSUE_DATE_AGE_YEARS)).unwrap_or(NaiveDate::MIN)
}

/// Checks a registration form. `issue_date` is `dd/mm/yyyy`; `today` is the caller's
/// local date so the future/too-old bounds are deterministic.
pub fn validate_registration(identification: &str, issue_date: &str, today: NaiveDate) -> Result<RegistrationInput, ValidationError> {
    let identification = identification.trim();
    if identification.is_empty() {
        return Err(ValidationError::EmptyIdentification);
    }
    if !is_numeric(identification) {
        return Err(ValidationError::IdentificationNotNumeric);
    }

    let issue_date = issue_date.trim();
    if issue_date.is_empty() {
        return Err(ValidationError::EmptyIssueDate);
    }
    let issue_date = NaiveDate::parse_from_str(issue_date, DISPLAY_DATE_FORMAT).map_err(|_| ValidationError::InvalidIssueDate)?;

    if issue_date > today {
        return Err(ValidationError::FutureIssueDate);
    }
    if issue_date < earliest_issue_date(today) {
        return Err(ValidationError::IssueDateTooOld);
    }

    Ok(RegistrationInput {
        identification_number: identification.to_string(),
        issue_date,
    })
}
