pub mod auth;
pub mod identification;
pub mod registration;

pub use auth::AuthApi;
pub use identification::IdentificationApi;
pub use registration::RegistrationApi;

use crate::config::EndpointConfig;
use crate::error::network::NetworkError;
use crate::transport::{ACCESS_TOKEN_HEADER, Transport, TransportRequest, classify_status, decode_json, join_url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// JSON-over-POST client bound to one configured host.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    endpoint: EndpointConfig,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, endpoint: EndpointConfig) -> Self {
        Self { transport, endpoint }
    }

    /// Encodes `body`, posts it to `path` under the base URL, classifies the status
    /// and decodes a 2xx body into `Resp`.
    pub async fn post<Req, Resp>(&self, path: &str, body: &Req, extra_headers: &[(&str, &str)]) -> Result<Resp, NetworkError>
    where
        Req: Serialize + ?Sized + Sync,
        Resp: DeserializeOwned,
    {
        let url = join_url(&self.endpoint.base_url, path);
        let payload = serde_json::to_vec(body).map_err(|e| NetworkError::invalid_request(format!("Failed to encode request body: {}", e)))?;

        let mut request = TransportRequest::post_json(url.clone(), payload);
        if let Some(token) = self.endpoint.access_token.as_deref().filter(|token| !token.is_empty()) {
            request = request.with_header(ACCESS_TOKEN_HEADER, token);
        }
        for (name, value) in extra_headers {
            request = request.with_header(*name, *value);
        }

        let request_id = Uuid::new_v4();
        debug!(%request_id, url = %url, "Sending request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%request_id, url = %url, error = %e, "Request failed");
                return Err(e);
            }
        };

        debug!(%request_id, url = %url, status = response.status, "Received response");
        if let Err(e) = classify_status(response.status) {
            warn!(%request_id, url = %url, status = response.status, "Request rejected by server");
            return Err(e);
        }

        decode_json(&response.body)
    }
}
