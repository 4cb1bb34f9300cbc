use crate::config::{Config, EndpointConfig};
use crate::error::network::NetworkError;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub const AUTH_URL: &str = "https://auth.test/v1/api/general/";
pub const REGISTRATION_URL: &str = "https://registry.test/v1/api/general/";
pub const IDENTIFICATION_URL: &str = "https://staff.test/v1/funcionario/";

/// Replays scripted responses in order and records every request it receives.
/// Once the script runs out each call fails with `NetworkError::Unknown`.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<TransportResponse, NetworkError>>>,
    requests: Mutex<Vec<TransportRequest>>,
    gate: Option<Arc<Notify>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.push(Ok(TransportResponse::new(status, body.to_string())))
    }

    pub fn respond_raw(self, status: u16, body: &str) -> Self {
        self.push(Ok(TransportResponse::new(status, body)))
    }

    pub fn fail(self, error: NetworkError) -> Self {
        self.push(Err(error))
    }

    /// Holds every `send` until the returned `Notify` is signalled.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    fn push(self, entry: Result<TransportResponse, NetworkError>) -> Self {
        self.script.lock().unwrap().push_back(entry);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<TransportRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Body of the last request, parsed as JSON.
    pub fn last_body(&self) -> Value {
        let request = self.last_request().expect("no request was sent");
        serde_json::from_slice(&request.body).expect("request body is JSON")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, NetworkError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(NetworkError::unknown("no scripted response")))
    }
}

pub fn test_config() -> Config {
    Config {
        auth: EndpointConfig {
            base_url: AUTH_URL.to_string(),
            access_token: Some("auth-test-token".to_string()),
        },
        registration: EndpointConfig {
            base_url: REGISTRATION_URL.to_string(),
            access_token: Some("registration-test-token".to_string()),
        },
        identification: EndpointConfig::new(IDENTIFICATION_URL),
        ..Config::default()
    }
}

pub fn sample_user_json() -> Value {
    json!({
        "codigoUsuario": 42,
        "nombresUsuario": "Ana Maria",
        "apellidosUsuario": "Perez",
        "correoElectronico": "ana@example.test",
        "estadoUsuario": "ACTIVO",
        "numeroDocumento": "12345678",
        "esAdministrador": false
    })
}

pub fn login_success_json(token: &str) -> Value {
    json!({
        "success": true,
        "message": "Bienvenido",
        "data": {"token": token, "usuario": sample_user_json()}
    })
}

pub fn sample_employee_json() -> Value {
    json!({
        "idUsuario": 7,
        "nombre": "Carlos Rodriguez",
        "image": "https://staff.test/photos/7.jpg",
        "tipoSangre": "O+",
        "doc": "1140873991",
        "dependencia": "Secretaria de Hacienda",
        "fechaVigencia": "2027-12-31",
        "entidad": "Alcaldia"
    })
}
