use crate::api::ApiClient;
use crate::error::network::NetworkError;
use crate::models::auth::{LoginRequest, LoginResponse};

/// The login endpoint is the configured base URL itself.
const LOGIN_PATH: &str = "";

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, NetworkError> {
        self.client.post(LOGIN_PATH, request, &[]).await
    }
}
