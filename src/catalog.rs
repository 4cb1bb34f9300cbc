//! The city services directory shown on the home screen and what tapping an entry does.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const EMERGENCY_LINE: &str = "195";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Eventos,
    Novedades,
    Clima,
    Identificacion,
    Rutas,
    Adopcion,
    Transmetro,
    Sibus,
    Directorio,
    #[serde(rename = "195")]
    Linea195,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 10] = [
        ServiceKind::Eventos,
        ServiceKind::Novedades,
        ServiceKind::Clima,
        ServiceKind::Identificacion,
        ServiceKind::Rutas,
        ServiceKind::Adopcion,
        ServiceKind::Transmetro,
        ServiceKind::Sibus,
        ServiceKind::Directorio,
        ServiceKind::Linea195,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Eventos => "eventos",
            ServiceKind::Novedades => "novedades",
            ServiceKind::Clima => "clima",
            ServiceKind::Identificacion => "identificacion",
            ServiceKind::Rutas => "rutas",
            ServiceKind::Adopcion => "adopcion",
            ServiceKind::Transmetro => "transmetro",
            ServiceKind::Sibus => "sibus",
            ServiceKind::Directorio => "directorio",
            ServiceKind::Linea195 => EMERGENCY_LINE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Eventos => "Eventos",
            ServiceKind::Novedades => "Novedades",
            ServiceKind::Clima => "Clima",
            ServiceKind::Identificacion => "Identificacion",
            ServiceKind::Rutas => "Rutas",
            ServiceKind::Adopcion => "Adopcion Animal",
            ServiceKind::Transmetro => "Transmetro",
            ServiceKind::Sibus => "SIBUS",
            ServiceKind::Directorio => "Directorio",
            ServiceKind::Linea195 => EMERGENCY_LINE,
        }
    }

    fn image_name(&self) -> &'static str {
        match self {
            ServiceKind::Linea195 => "a195",
            other => other.as_str(),
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown service: {}", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceItem {
    pub title: String,
    pub image_name: String,
    pub kind: ServiceKind,
}

impl From<ServiceKind> for ServiceItem {
    fn from(kind: ServiceKind) -> Self {
        Self {
            title: kind.display_name().to_string(),
            image_name: kind.image_name().to_string(),
            kind,
        }
    }
}

/// Home screen entries, in display order.
pub fn directory() -> Vec<ServiceItem> {
    ServiceKind::ALL.into_iter().map(ServiceItem::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceAction {
    /// Start a phone call to the given `tel://` URI.
    Dial(String),
    OpenIdentification,
    Open(ServiceKind),
}

/// What tapping `item` does. The emergency line dials directly, matched by kind or by title.
pub fn resolve(item: &ServiceItem) -> ServiceAction {
    if item.kind == ServiceKind::Linea195 || item.title == EMERGENCY_LINE {
        return ServiceAction::Dial(format!("tel://{}", clean_phone_number(EMERGENCY_LINE)));
    }

    match item.kind {
        ServiceKind::Identificacion => ServiceAction::OpenIdentification,
        kind => ServiceAction::Open(kind),
    }
}

/// `tel://` URI for `number` with spaces, dashes and parentheses removed. `None` when
/// nothing dialable remains.
pub fn dial_uri(number: &str) -> Option<String> {
    let cleaned = clean_phone_number(number);
    let dialable = !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit() || matches!(c, '+' | '*' | '#'));
    dialable.then(|| format!("tel://{}", cleaned))
}

fn clean_phone_number(number: &str) -> String {
    number.chars().filter(|c| !matches!(c, ' ' | '-' | '(' | ')')).collect()
}
