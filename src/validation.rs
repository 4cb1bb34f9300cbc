//! Pure, synchronous input checks. Every flow runs these to completion before it
//! builds a request, and each check reports the first rule it finds violated.

pub mod credentials;
pub mod identification;
pub mod registration;

pub use credentials::validate_credentials;
pub use identification::validate_identification_query;
pub use registration::{earliest_issue_date, validate_registration};

use regex::Regex;
use std::sync::LazyLock;

static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits-only pattern compiles"));

/// True when `value` is non-empty and made of ASCII digits only.
pub fn is_numeric(value: &str) -> bool {
    DIGITS_ONLY.is_match(value)
}
