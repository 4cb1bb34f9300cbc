//! One orchestrator per flow. Each `execute` validates first, then calls its
//! endpoint client once and turns the decoded body into a domain payload.

pub mod auth;
pub mod identification;
pub mod registration;

pub use auth::LoginService;
pub use identification::IdentificationService;
pub use registration::RegistrationService;
