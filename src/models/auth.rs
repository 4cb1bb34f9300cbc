use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, validated login input. Built by `validation::validate_credentials`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identification: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identification", &self.identification)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(rename = "numero_identificacion")]
    pub identification: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identification", &self.identification)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl From<&Credentials> for LoginRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            identification: credentials.identification.clone(),
            password: credentials.password.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginResponse {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<LoginData>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginData {
    pub token: Option<String>,
    #[serde(rename = "usuario")]
    pub user: Option<UserProfile>,
}

/// Profile of the signed-in citizen. The server may omit any field.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    #[serde(rename = "codigoUsuario")]
    pub user_id: Option<i64>,
    #[serde(rename = "nombresUsuario")]
    pub first_name: Option<String>,
    #[serde(rename = "apellidosUsuario")]
    pub last_name: Option<String>,
    #[serde(rename = "correoElectronico")]
    pub email: Option<String>,
    #[serde(rename = "estadoUsuario")]
    pub status: Option<String>,
    #[serde(rename = "numeroDocumento")]
    pub document_number: Option<String>,
    #[serde(rename = "esAdministrador")]
    pub is_admin: Option<bool>,
}

impl UserProfile {
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() { None } else { Some(parts.join(" ")) }
    }
}

/// Result of a successful login, held by `session::SessionStore`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession").field("token", &"<redacted>").field("user", &self.user).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_uses_wire_names() {
        let request = LoginRequest {
            identification: "12345678".to_string(),
            password: "abcd".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"numero_identificacion": "12345678", "contrasena": "abcd"}));

        let decoded: LoginRequest = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn login_response_tolerates_missing_fields() {
        let response: LoginResponse = serde_json::from_value(json!({"success": false})).unwrap();
        assert!(!response.success);
        assert!(response.message.is_none());
        assert!(response.data.is_none());
    }

    #[test]
    fn user_profile_decodes_partial_payload() {
        let profile: UserProfile = serde_json::from_value(json!({
            "codigoUsuario": 7,
            "nombresUsuario": "Ana",
            "esAdministrador": false
        }))
        .unwrap();
        assert_eq!(profile.user_id, Some(7));
        assert_eq!(profile.first_name.as_deref(), Some("Ana"));
        assert_eq!(profile.last_name, None);
        assert_eq!(profile.is_admin, Some(false));
    }

    #[test]
    fn display_name_joins_present_parts() {
        let profile = UserProfile {
            first_name: Some("Ana María".to_string()),
            last_name: Some(" Pérez ".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(profile.display_name().as_deref(), Some("Ana María Pérez"));
        assert_eq!(UserProfile::default().display_name(), None);
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let session = AuthSession {
            token: "secret-token".to_string(),
            user: UserProfile::default(),
        };
        assert!(!format!("{:?}", session).contains("secret-token"));

        let credentials = Credentials {
            identification: "123456".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
