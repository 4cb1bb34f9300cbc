use crate::api::{ApiClient, AuthApi, IdentificationApi, RegistrationApi};
use crate::config::Config;
use crate::error::app_error::AppError;
use crate::flow::{FlowController, SubmitOutcome};
use crate::models::auth::AuthSession;
use crate::models::identification::{IdentificationQuery, LookupOutcome};
use crate::models::registration::RegistrationOutcome;
use crate::service::{IdentificationService, LoginService, RegistrationService};
use crate::session::SessionStore;
use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::info;

/// Everything a client screen needs: the three flows, their services and the
/// signed-in session. Built once and shared.
pub struct AppContext {
    config: Config,
    session: SessionStore,
    login: LoginService,
    registration: RegistrationService,
    identification: IdentificationService,
    login_flow: FlowController<AuthSession>,
    registration_flow: FlowController<RegistrationOutcome>,
    identification_flow: FlowController<LookupOutcome>,
}

impl AppContext {
    pub fn new(config: Config, transport: Arc<dyn Transport>, store: Arc<dyn KeyValueStore>) -> Self {
        let auth_api = AuthApi::new(ApiClient::new(transport.clone(), config.auth.clone()));
        let registration_api = RegistrationApi::new(ApiClient::new(transport.clone(), config.registration.clone()));
        let identification_api = IdentificationApi::new(ApiClient::new(transport, config.identification.clone()));

        Self {
            login: LoginService::new(auth_api, config.validation.clone()),
            registration: RegistrationService::new(registration_api),
            identification: IdentificationService::new(identification_api),
            session: SessionStore::new(store),
            login_flow: FlowController::new(),
            registration_flow: FlowController::new(),
            identification_flow: FlowController::new(),
            config,
        }
    }

    /// Wires the HTTP transport and the configured session store, then restores
    /// any persisted session.
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let transport = Arc::new(HttpTransport::new(&config.http)?);
        let store: Arc<dyn KeyValueStore> = match &config.session.store_path {
            Some(path) => Arc::new(JsonFileStore::open(path).await?),
            None => Arc::new(MemoryStore::new()),
        };

        let context = Self::new(config, transport, store);
        if context.session.restore().await?.is_some() {
            info!("Restored previous session");
        }
        Ok(context)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Signs in and, on success, persists the session before the flow reports it.
    pub async fn login(&self, identification: &str, password: &str) -> SubmitOutcome {
        let service = &self.login;
        let session = &self.session;
        self.login_flow
            .submit(async move {
                let auth = service.execute(identification, password).await?;
                session.sign_in(auth.clone()).await?;
                Ok(auth)
            })
            .await
    }

    pub async fn sign_out(&self) -> Result<(), AppError> {
        self.session.clear().await
    }

    pub async fn validate_registration(&self, identification: &str, issue_date: &str) -> SubmitOutcome {
        self.registration_flow.submit(self.registration.execute(identification, issue_date)).await
    }

    pub async fn lookup_employee(&self, identification_number: &str, name: &str) -> SubmitOutcome {
        self.identify(IdentificationQuery::manual(identification_number, name)).await
    }

    pub async fn scan_employee_qr(&self, token: &str) -> SubmitOutcome {
        self.identify(IdentificationQuery::qr(token)).await
    }

    async fn identify(&self, query: IdentificationQuery) -> SubmitOutcome {
        self.identification_flow.submit(self.identification.execute(query)).await
    }

    pub fn login_flow(&self) -> &FlowController<AuthSession> {
        &self.login_flow
    }

    pub fn registration_flow(&self) -> &FlowController<RegistrationOutcome> {
        &self.registration_flow
    }

    pub fn identification_flow(&self) -> &FlowController<LookupOutcome> {
        &self.identification_flow
    }
}
