use serde_json::Value;

use crate::core::error::QueryError;
use crate::models::PilotDocument;

/// Borrow the element array of a raw listing
///
/// Accepts a bare JSON array or an object wrapping it in `documents`.
pub fn listing_items(value: &Value) -> Result<&Vec<Value>, QueryError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(obj) => obj
            .get("documents")
            .and_then(Value::as_array)
            .ok_or_else(|| QueryError::InvalidInput("object listing has no documents array".into())),
        Value::Null => Err(QueryError::InvalidInput("pilot listing is null".into())),
        other => Err(QueryError::InvalidInput(format!(
            "pilot listing must be an array, got {}",
            json_type_name(other)
        ))),
    }
}

/// Parse a raw listing into pilot documents
///
/// Fails only when the listing itself is not a collection. Elements that
/// cannot be read become malformed placeholders at the same index, so the
/// query engine reports them alongside other skipped records.
pub fn parse_listing(value: &Value) -> Result<Vec<PilotDocument>, QueryError> {
    let items = listing_items(value)?;

    let documents = items
        .iter()
        .map(|item| match serde_json::from_value::<PilotDocument>(item.clone()) {
            Ok(document) => document,
            Err(e) => {
                let id = ["_id", "$id", "id"]
                    .iter()
                    .find_map(|key| item.get(*key))
                    .cloned()
                    .unwrap_or(Value::Null);
                PilotDocument::malformed(id, e.to_string())
            }
        })
        .collect();

    Ok(documents)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::filter_by_range;
    use crate::models::Coordinate;
    use serde_json::json;

    #[test]
    fn test_parse_bare_array() {
        let listing = json!([
            {"_id": "a", "name": "Amelia", "coordinates": [51.5, -0.1], "experience": 12, "location": "London"},
            {"_id": {"$oid": "b"}, "name": "Bessie", "coordinates": [40.0, -70.0], "experience": 8, "location": "Atlantic"}
        ]);

        let docs = parse_listing(&listing).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].pilot_id().as_deref(), Some("a"));
        assert_eq!(docs[1].pilot_id().as_deref(), Some("b"));
        assert!(docs.iter().all(|d| d.malformed.is_none()));
    }

    #[test]
    fn test_parse_documents_envelope() {
        let listing = json!({"total": 1, "documents": [
            {"$id": "abc", "$collectionId": "pilots", "coordinates": [0.0, 0.0], "experience": 3}
        ]});

        let docs = parse_listing(&listing).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].pilot_id().as_deref(), Some("abc"));

        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let result = filter_by_range(&docs, origin, 10.0);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].id, "abc");
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_document_with_underscore_and_plain_id() {
        let listing = json!([{"_id": "a", "id": "a", "coordinates": [0.0, 0.0], "experience": 1}]);

        let docs = parse_listing(&listing).unwrap();
        assert!(docs[0].malformed.is_none());

        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let result = filter_by_range(&docs, origin, 10.0);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].id, "a");
    }

    #[test]
    fn test_non_collection_is_invalid_input() {
        assert!(matches!(parse_listing(&Value::Null), Err(QueryError::InvalidInput(_))));
        assert!(matches!(parse_listing(&json!("pilots")), Err(QueryError::InvalidInput(_))));
        assert!(matches!(parse_listing(&json!({"pilots": []})), Err(QueryError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_elements_become_placeholders() {
        let listing = json!([
            {"_id": "ok", "coordinates": [0, 0]},
            "not a pilot",
            {"_id": "bad-name", "name": 17, "coordinates": [0, 0]},
            {"_id": "bad-id", "coordinates": [0, 0], "experience": {"years": 3}}
        ]);

        let docs = parse_listing(&listing).unwrap();
        assert_eq!(docs.len(), 4);
        assert!(docs[0].malformed.is_none());
        assert!(docs[1].malformed.is_some());
        assert_eq!(docs[1].pilot_id(), None);

        // A wrongly typed name is read as absent, not as a broken document
        assert!(docs[2].malformed.is_none());
        assert_eq!(docs[2].name, None);

        // Experience stays raw; the query engine rejects it later
        assert!(docs[3].malformed.is_none());
        assert_eq!(docs[3].pilot_id().as_deref(), Some("bad-id"));
    }

    #[test]
    fn test_empty_listing() {
        assert!(parse_listing(&json!([])).unwrap().is_empty());
    }
}
