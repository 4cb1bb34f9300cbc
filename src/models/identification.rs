use serde::{Deserialize, Serialize};

/// The lookup endpoints report success in the body, not in the HTTP status.
pub const LOOKUP_FOUND_STATUS: i32 = 201;

/// Two ways of asking for the same employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentificationQuery {
    /// Typed in by the citizen.
    Manual { identification_number: String, name: String },
    /// Read from the QR code on an employee badge.
    Qr { token: String },
}

impl IdentificationQuery {
    pub fn manual(identification_number: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Manual {
            identification_number: identification_number.into(),
            name: name.into(),
        }
    }

    pub fn qr(token: impl Into<String>) -> Self {
        Self::Qr { token: token.into() }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLookupRequest {
    #[serde(rename = "identificacion")]
    pub identification_number: String,
    #[serde(rename = "nombre")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QrLookupRequest {
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentificationResponse {
    pub status: i32,
    pub user: Option<EmployeeRecord>,
}

impl IdentificationResponse {
    pub fn is_success(&self) -> bool {
        self.status == LOOKUP_FOUND_STATUS
    }

    pub fn into_outcome(self) -> LookupOutcome {
        match self.user {
            Some(record) if self.status == LOOKUP_FOUND_STATUS => LookupOutcome::Found(record),
            _ => LookupOutcome::NotFound,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeRecord {
    #[serde(rename = "idUsuario")]
    pub user_id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "image")]
    pub photo_url: Option<String>,
    #[serde(rename = "tipoSangre")]
    pub blood_type: Option<String>,
    #[serde(rename = "doc")]
    pub document_number: Option<String>,
    #[serde(rename = "dependencia")]
    pub department: Option<String>,
    #[serde(rename = "fechaVigencia")]
    pub valid_until: Option<String>,
    #[serde(rename = "entidad")]
    pub entity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(EmployeeRecord),
    NotFound,
}

impl LookupOutcome {
    pub fn record(&self) -> Option<&EmployeeRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound => None,
        }
    }
}
