use crate::api::ApiClient;
use crate::error::network::NetworkError;
use crate::models::identification::{EmployeeLookupRequest, IdentificationResponse, QrLookupRequest};
use crate::transport::{ACCEPT_HEADER, JSON_CONTENT_TYPE};

const LOOKUP_PATH: &str = "consultarPublico";
const READ_QR_PATH: &str = "readPublico";

#[derive(Clone)]
pub struct IdentificationApi {
    client: ApiClient,
}

impl IdentificationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn lookup(&self, request: &EmployeeLookupRequest) -> Result<IdentificationResponse, NetworkError> {
        self.client.post(LOOKUP_PATH, request, &[]).await
    }

    pub async fn read_qr(&self, request: &QrLookupRequest) -> Result<IdentificationResponse, NetworkError> {
        self.client.post(READ_QR_PATH, request, &[(ACCEPT_HEADER, JSON_CONTENT_TYPE)]).await
    }
}
