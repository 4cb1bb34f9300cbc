pub mod app_error;
pub mod network;
pub mod validation;
