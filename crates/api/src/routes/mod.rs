pub mod customers;
pub mod health;
pub mod metrics;
pub mod partial_shipments;
pub mod reports;
pub mod shipments;
pub mod uploads;
pub mod users;

use common::RecordId;
use domain::Include;

use crate::error::ApiError;

/// Parses a comma-separated `include` query value into hydration options.
pub(crate) fn parse_include(raw: Option<&str>) -> Result<Include, ApiError> {
    let mut include = Include::none();
    let Some(raw) = raw else {
        return Ok(include);
    };

    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        match token {
            "customer" => include.customer = true,
            "shipment" => include.shipment = true,
            "packages" => include.packages = true,
            "items" => include.items = true,
            "note" => include.note = true,
            other => {
                return Err(ApiError::BadRequest(format!(
                    "unknown include relation: {other}"
                )));
            }
        }
    }
    Ok(include)
}

/// Converts a path id into a record key.
pub(crate) fn record_id(id: i64) -> RecordId {
    RecordId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_include_accepts_known_relations() {
        let include = parse_include(Some("customer, packages,note")).unwrap();
        assert!(include.customer);
        assert!(include.packages);
        assert!(include.note);
        assert!(!include.shipment);
        assert!(!include.items);
    }

    #[test]
    fn parse_include_defaults_to_nothing() {
        assert_eq!(parse_include(None).unwrap(), Include::none());
        assert_eq!(parse_include(Some("")).unwrap(), Include::none());
    }

    #[test]
    fn parse_include_rejects_unknown_relations() {
        assert!(parse_include(Some("customer,everything")).is_err());
    }
}
