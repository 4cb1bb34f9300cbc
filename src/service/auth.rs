use crate::api::AuthApi;
use crate::config::ValidationConfig;
use crate::error::app_error::AppError;
use crate::error::network::NetworkError;
use crate::models::auth::{AuthSession, LoginRequest, LoginResponse};
use crate::validation::validate_credentials;
use tracing::{info, warn};

#[derive(Clone)]
pub struct LoginService {
    api: AuthApi,
    rules: ValidationConfig,
}

impl LoginService {
    pub fn new(api: AuthApi, rules: ValidationConfig) -> Self {
        Self { api, rules }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, identification: &str, password: &str) -> Result<AuthSession, AppError> {
        let credentials = validate_credentials(identification, password, &self.rules)?;
        let response = self.api.login(&LoginRequest::from(&credentials)).await?;
        let session = session_from_response(response)?;

        info!(user_id = ?session.user.user_id, "Login succeeded");
        Ok(session)
    }
}

/// A 2xx body with `success: false` means the credentials were refused.
fn session_from_response(response: LoginResponse) -> Result<AuthSession, AppError> {
    if !response.success {
        warn!(server_message = ?response.message, "Login refused by server");
        return Err(NetworkError::Unauthorized.into());
    }

    let data = response.data.unwrap_or_default();
    let token = data.token.filter(|token| !token.trim().is_empty()).ok_or(AppError::MissingToken)?;

    Ok(AuthSession {
        token,
        user: data.user.unwrap_or_default(),
    })
}
