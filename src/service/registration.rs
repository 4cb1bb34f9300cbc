use crate::api::RegistrationApi;
use crate::error::app_error::AppError;
use crate::models::registration::{DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE, IssueDateRequest, IssueDateResponse, RegistrationOutcome};
use crate::validation::validate_registration;
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

#[derive(Clone)]
pub struct RegistrationService {
    api: RegistrationApi,
}

impl RegistrationService {
    pub fn new(api: RegistrationApi) -> Self {
        Self { api }
    }

    /// Validates against the local calendar date.
    pub async fn execute(&self, identification: &str, issue_date: &str) -> Result<RegistrationOutcome, AppError> {
        self.execute_on(identification, issue_date, Local::now().date_naive()).await
    }

    /// Only the issue date is sent; the identification number is checked locally.
    #[tracing::instrument(skip(self, identification, issue_date))]
    pub async fn execute_on(&self, identification: &str, issue_date: &str, today: NaiveDate) -> Result<RegistrationOutcome, AppError> {
        let input = validate_registration(identification, issue_date, today)?;
        let response = self.api.validate_issue_date(&IssueDateRequest::from(&input)).await?;
        outcome_from_response(response)
    }
}

fn outcome_from_response(response: IssueDateResponse) -> Result<RegistrationOutcome, AppError> {
    if !response.success {
        let message = response.message.unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
        warn!(server_message = %message, "Issue date rejected");
        return Err(AppError::ValidationFailed(message));
    }

    let outcome = RegistrationOutcome {
        message: response.message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
        security_questions: response.questions.unwrap_or_default(),
    };
    info!(questions = outcome.security_questions.len(), "Issue date accepted");
    Ok(outcome)
}
