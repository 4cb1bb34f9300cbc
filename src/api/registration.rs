use crate::api::ApiClient;
use crate::error::network::NetworkError;
use crate::models::registration::{IssueDateRequest, IssueDateResponse};

const ISSUE_DATE_PATH: &str = "fecha";

#[derive(Clone)]
pub struct RegistrationApi {
    client: ApiClient,
}

impl RegistrationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Checks the document issue date against the civil registry.
    pub async fn validate_issue_date(&self, request: &IssueDateRequest) -> Result<IssueDateResponse, NetworkError> {
        self.client.post(ISSUE_DATE_PATH, request, &[]).await
    }
}
