use crate::error::validation::ValidationError;
use crate::models::identification::IdentificationQuery;

/// Trims the query and rejects blank fields. The document number is not format
/// checked; the directory accepts whatever the badge shows.
pub fn validate_identification_query(query: IdentificationQuery) -> Result<IdentificationQuery, ValidationError> {
    match query {
        IdentificationQuery::Manual { identification_number, name } => {
            let identification_number = identification_number.trim();
            let name = name.trim();
            if identification_number.is_empty() {
                return Err(ValidationError::EmptyIdentification);
            }
            if name.is_empty() {
                return Err(ValidationError::EmptyName);
            }
            Ok(IdentificationQuery::manual(identification_number, name))
        }
        IdentificationQuery::Qr { token } => {
            let token = token.trim();
            if token.is_empty() {
                return Err(ValidationError::EmptyQrToken);
            }
            Ok(IdentificationQuery::qr(token))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_query_is_trimmed() {
        let query = validate_identification_query(IdentificationQuery::manual(" 1140873991 ", " Carlos ")).unwrap();
        assert_eq!(query, IdentificationQuery::manual("1140873991", "Carlos"));
    }

    #[test]
    fn manual_query_requires_both_fields() {
        assert_eq!(
            validate_identification_query(IdentificationQuery::manual("  ", "")),
            Err(ValidationError::EmptyIdentification)
        );
        assert_eq!(
            validate_identification_query(IdentificationQuery::manual("123", "\t")),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn qr_query_requires_token() {
        assert_eq!(validate_identification_query(IdentificationQuery::qr(" ")), Err(ValidationError::EmptyQrToken));
        assert_eq!(
            validate_identification_query(IdentificationQuery::qr(" abc123\n")).unwrap(),
            IdentificationQuery::qr("abc123")
        );
    }
}
