use crate::api::IdentificationApi;
use crate::error::app_error::AppError;
use crate::error::network::NetworkError;
use crate::models::identification::{EmployeeLookupRequest, IdentificationQuery, LookupOutcome, QrLookupRequest};
use crate::validation::validate_identification_query;
use tracing::info;

#[derive(Clone)]
pub struct IdentificationService {
    api: IdentificationApi,
}

impl IdentificationService {
    pub fn new(api: IdentificationApi) -> Self {
        Self { api }
    }

    pub async fn by_document(&self, identification_number: &str, name: &str) -> Result<LookupOutcome, AppError> {
        self.execute(IdentificationQuery::manual(identification_number, name)).await
    }

    pub async fn by_qr(&self, token: &str) -> Result<LookupOutcome, AppError> {
        self.execute(IdentificationQuery::qr(token)).await
    }

    /// A missing employee is an outcome, not an error: both a body status other
    /// than 201 and an HTTP 404 report `NotFound`.
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, query: IdentificationQuery) -> Result<LookupOutcome, AppError> {
        let query = validate_identification_query(query)?;

        let response = match query {
            IdentificationQuery::Manual { identification_number, name } => {
                self.api.lookup(&EmployeeLookupRequest { identification_number, name }).await
            }
            IdentificationQuery::Qr { token } => self.api.read_qr(&QrLookupRequest { token }).await,
        };

        let outcome = match response {
            Ok(response) => response.into_outcome(),
            Err(NetworkError::ClientError(404)) => LookupOutcome::NotFound,
            Err(e) => return Err(e.into()),
        };

        info!(found = outcome.record().is_some(), "Employee lookup finished");
        Ok(outcome)
    }
}
