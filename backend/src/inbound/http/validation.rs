//! Shared validation helpers for inbound HTTP adapters.

use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, RecordId};

/// Path segment carrying a record identifier, kept as text so malformed ids
/// surface as `invalid_request` rather than an extractor failure.
#[derive(Debug, Deserialize)]
pub struct RecordPath {
    pub id: String,
}

/// Parse a numeric record id from a path segment.
///
/// # Examples
/// ```
/// use lmis_backend::domain::{ErrorCode, RecordId};
/// use lmis_backend::inbound::http::validation::parse_record_id;
///
/// assert_eq!(parse_record_id("12").map_err(|e| e.code()), Ok(RecordId::new(12)));
/// assert_eq!(parse_record_id("abc").map_err(|e| e.code()), Err(ErrorCode::InvalidRequest));
/// ```
pub fn parse_record_id(raw: &str) -> Result<RecordId, Error> {
    raw.parse::<RecordId>().map_err(|_| {
        Error::invalid_request("id must be a non-negative integer").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_id",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    fn numeric_ids_parse(#[case] raw: &str, #[case] expected: u64) {
        assert_eq!(
            parse_record_id(raw).expect("numeric id"),
            RecordId::new(expected)
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("-1")]
    #[case("1.5")]
    #[case("")]
    fn malformed_ids_are_invalid_requests(#[case] raw: &str) {
        let error = parse_record_id(raw).expect_err("malformed id");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details().and_then(|d| d.get("value")),
            Some(&json!(raw))
        );
    }
}
