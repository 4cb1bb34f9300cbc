use crate::error::app_error::AppError;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

pub const CONFIG_FILE: &str = "Civic.toml";
pub const ENV_PREFIX: &str = "CIVIC_";

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct Config {
    #[validate(nested)]
    pub auth: EndpointConfig,
    #[validate(nested)]
    pub registration: EndpointConfig,
    #[validate(nested)]
    pub identification: EndpointConfig,
    #[validate(nested)]
    pub http: HttpConfig,
    #[validate(nested)]
    pub validation: ValidationConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// One remote host. `access_token` is sent as `x-access-token` when present and is
/// never compiled in; supply it through `Civic.toml` or `CIVIC_<SECTION>__ACCESS_TOKEN`.
#[derive(Deserialize, Serialize, Clone, Validate)]
pub struct EndpointConfig {
    #[validate(url)]
    pub base_url: String,
    pub access_token: Option<String>,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[validate(schema(function = "validate_timeouts"))]
pub struct HttpConfig {
    /// Connect and per-read timeout, in seconds.
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    /// Whole-exchange timeout, in seconds.
    #[validate(range(min = 1))]
    pub resource_timeout_secs: u64,
}

fn validate_timeouts(config: &HttpConfig) -> Result<(), ValidationError> {
    if config.request_timeout_secs > config.resource_timeout_secs {
        return Err(ValidationError::new("request_timeout_must_not_exceed_resource_timeout"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
#[validate(schema(function = "validate_length_bounds"))]
pub struct ValidationConfig {
    #[validate(range(min = 1))]
    pub min_identification_length: usize,
    pub max_identification_length: usize,
    #[validate(range(min = 1))]
    pub min_password_length: usize,
    pub max_password_length: usize,
}

fn validate_length_bounds(config: &ValidationConfig) -> Result<(), ValidationError> {
    if config.min_identification_length > config.max_identification_length {
        return Err(ValidationError::new("identification_length_bounds_inverted"));
    }
    if config.min_password_length > config.max_password_length {
        return Err(ValidationError::new("password_length_bounds_inverted"));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct SessionConfig {
    /// JSON file holding the persisted session. In-memory only when unset.
    pub store_path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            resource_timeout_secs: 60,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_identification_length: 6,
            max_identification_length: 20,
            min_password_length: 4,
            max_password_length: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth: EndpointConfig::new("https://appciudad.barranquilla.gov.co/v1/api/general/"),
            registration: EndpointConfig::new("https://appciudad.barranquilla.gov.co/v1/api/general/"),
            identification: EndpointConfig::new("https://funcionarios.barranquilla.gov.co/v1/funcionario/"),
            http: HttpConfig::default(),
            validation: ValidationConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Civic.toml, if present
    /// 3. Environment variables prefixed with CIVIC_, nested with `__`
    ///    (e.g. CIVIC_AUTH__ACCESS_TOKEN, CIVIC_HTTP__REQUEST_TIMEOUT_SECS)
    pub fn load() -> Result<Self, AppError> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, AppError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_toml(toml: &str) -> Result<Config, AppError> {
        Config::from_figment(Figment::from(Serialized::defaults(Config::default())).merge(Toml::string(toml)))
    }

    #[test]
    fn defaults_are_valid() {
        let config = with_toml("").unwrap();
        assert_eq!(config.http.request_timeout_secs, 30);
        assert_eq!(config.http.resource_timeout_secs, 60);
        assert_eq!(config.validation.min_identification_length, 6);
        assert_eq!(config.validation.min_password_length, 4);
        assert!(config.auth.access_token.is_none());
        assert!(config.session.store_path.is_none());
    }

    #[test]
    fn toml_overrides_nested_values() {
        let config = with_toml(
            r#"
            [auth]
            base_url = "https://auth.example.test/login"
            access_token = "from-file"

            [http]
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.base_url, "https://auth.example.test/login");
        assert_eq!(config.auth.access_token.as_deref(), Some("from-file"));
        assert_eq!(config.http.request_timeout_secs, 5);
        assert_eq!(config.http.resource_timeout_secs, 60);
    }

    #[test]
    fn rejects_malformed_base_url() {
        let result = with_toml(
            r#"
            [identification]
            base_url = "not a url"
            "#,
        );
        assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_request_timeout_above_resource_timeout() {
        let result = with_toml(
            r#"
            [http]
            request_timeout_secs = 90
            resource_timeout_secs = 60
            "#,
        );
        assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_inverted_length_bounds() {
        let result = with_toml(
            r#"
            [validation]
            min_password_length = 10
            max_password_length = 8
            "#,
        );
        assert!(matches!(result, Err(AppError::InvalidConfiguration(_))));
    }

    #[test]
    fn wrong_type_is_a_configuration_error() {
        let result = with_toml(
            r#"
            [http]
            request_timeout_secs = "soon"
            "#,
        );
        assert!(matches!(result, Err(AppError::ConfigurationError { .. })));
    }

    #[test]
    fn debug_redacts_access_token() {
        let endpoint = EndpointConfig {
            base_url: "https://example.test".to_string(),
            access_token: Some("very-secret".to_string()),
        };
        let rendered = format!("{:?}", endpoint);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
