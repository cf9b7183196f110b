//! Stored records survive serialize, store and re-read unchanged

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use mcpmarket_core::schema::ViolationKind;
use mcpmarket_core::{
    validate_create, validate_extended, validate_function, validate_parameter, McpExtended,
};
use tests::fixtures::*;

#[test]
fn extended_record_round_trips() {
    tests::init_tracing();

    let record = validate_extended(&extended_json()).unwrap();
    assert_eq!(record.id, "mcp-1");
    assert_eq!(record.owner.name, "Alice");
    assert_eq!(record.ratings.len(), 2);
    assert_eq!(record.ratings[1].comment.as_deref(), Some("Fast"));
    assert_eq!(record.average_rating, 4.3);
    assert_eq!(record.downloads, 12);
    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );

    let stored = serde_json::to_value(&record).unwrap();
    let reread = validate_extended(&stored).unwrap();
    assert_eq!(reread, record);
}

#[test]
fn published_record_validates_as_extended() {
    let create = validate_create(&image_tagger_json()).unwrap();
    let record = McpExtended::publish(create, test_owner());

    let stored = serde_json::to_value(&record).unwrap();
    assert_eq!(stored["ratings"], json!([]));
    assert_eq!(stored["downloads"], json!(0));

    assert_eq!(validate_extended(&stored).unwrap(), record);
}

#[test]
fn create_validation_is_idempotent() {
    for input in [classifier_json(), image_tagger_json()] {
        let first = validate_create(&input).unwrap();
        let second = validate_create(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(second, first);
    }
}

#[test]
fn extended_fills_counters_when_absent() {
    let mut input = extended_json();
    let fields = input.as_object_mut().unwrap();
    for key in ["ratings", "averageRating", "downloads", "isPublic"] {
        fields.remove(key);
    }

    let record = validate_extended(&input).unwrap();
    assert!(record.ratings.is_empty());
    assert_eq!(record.average_rating, 0.0);
    assert_eq!(record.downloads, 0);
    assert!(record.is_public);
}

#[test]
fn extended_reports_identity_and_counter_violations() {
    let mut input = extended_json();
    input["id"] = json!("");
    input["owner"] = json!({ "id": "owner-1" });
    input["downloads"] = json!(-1);
    input["ratings"][0]["value"] = json!(9);
    input["updatedAt"] = json!("yesterday");

    let errors = validate_extended(&input).unwrap_err();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(
        paths,
        vec!["id", "owner.name", "ratings[0].value", "downloads", "updatedAt"]
    );
    assert_eq!(errors.at("downloads")[0].kind, ViolationKind::TooSmall { minimum: 0.0 });
}

#[test]
fn extended_accepts_integral_float_downloads() {
    let mut input = extended_json();
    input["downloads"] = json!(3.0);
    assert_eq!(validate_extended(&input).unwrap().downloads, 3);

    input["downloads"] = json!(3.5);
    assert!(validate_extended(&input).is_err());
}

#[test]
fn extended_date_times_normalize_to_utc() {
    let mut input = extended_json();
    input["createdAt"] = json!("2023-01-01T02:00:00+02:00");

    let record = validate_extended(&input).unwrap();
    assert_eq!(
        record.created_at,
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn function_and_parameter_validate_standalone() {
    let function = validate_function(&image_tagger_json()["functions"][0]).unwrap();
    assert_eq!(function.name, "tag");
    assert_eq!(function.required_parameters().len(), 1);

    let parameter = validate_parameter(&json!({
        "name": "limit",
        "type": "number",
        "description": "Max results",
        "default": 10
    }))
    .unwrap();
    assert!(!parameter.required);
    assert_eq!(parameter.default, Some(json!(10)));
    assert_eq!(parameter.allowed_values, None);

    let errors = validate_parameter(&json!({ "name": "limit", "type": 3 })).unwrap_err();
    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["type", "description"]);
}
