//! Create, update, rating and nested-path behavior

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use mcpmarket_core::schema::{
    ExpectedType, UnknownFields, ValidationMode, ValidationOptions, Validator, ViolationKind,
};
use mcpmarket_core::{validate_create, validate_rating, validate_update, McpUpdate};
use tests::fixtures::*;

fn paths(errors: &mcpmarket_core::ValidationErrors) -> Vec<String> {
    errors.iter().map(|e| e.path.to_string()).collect()
}

#[test]
fn create_example_yields_public_document() {
    tests::init_tracing();

    let create = validate_create(&classifier_json()).unwrap();

    assert_eq!(create.mcp.name, "Classifier");
    assert_eq!(create.mcp.category, "nlp");
    assert_eq!(create.mcp.tags, vec!["nlp".to_string()]);
    assert!(create.is_public);

    let value = serde_json::to_value(&create).unwrap();
    assert_eq!(value["isPublic"], json!(true));
}

#[test]
fn create_without_is_public_always_defaults_true() {
    for extra in [json!({}), json!({ "metadata": {} }), json!({ "tags": ["a", "a"] })] {
        let mut input = classifier_json();
        for (key, value) in extra.as_object().unwrap() {
            input[key] = value.clone();
        }
        assert!(validate_create(&input).unwrap().is_public);
    }
}

#[test]
fn create_keeps_nested_values_and_duplicate_tags() {
    let create = validate_create(&image_tagger_json()).unwrap();

    assert!(!create.is_public);
    assert_eq!(create.mcp.tags, vec!["images", "tagging", "images"]);

    let function = &create.mcp.functions[0];
    assert_eq!(function.parameters.len(), 3);
    assert!(function.parameters[0].required);
    assert!(!function.parameters[1].required);
    assert_eq!(function.parameters[1].default, Some(json!(0.5)));
    assert_eq!(
        function.parameters[2].allowed_values,
        Some(vec![json!("en"), json!("it"), json!("de")])
    );

    let metadata = create.mcp.metadata.unwrap();
    assert_eq!(metadata["gpu"], json!(true));
}

#[test]
fn nested_parameter_type_mismatch_has_qualified_path() {
    let input = json!({
        "name": "x",
        "description": "y",
        "version": "1.0.0",
        "category": "z",
        "tags": [],
        "functions": [{
            "name": "f",
            "description": "d",
            "parameters": [{ "name": "p", "type": "string", "description": "d", "required": "yes" }],
            "returns": { "type": "string", "description": "d" }
        }]
    });

    let errors = validate_create(&input).unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = &errors.as_slice()[0];
    assert_eq!(error.path.to_string(), "functions[0].parameters[0].required");
    assert_eq!(
        error.kind,
        ViolationKind::InvalidType {
            expected: ExpectedType::Boolean
        }
    );
    assert_eq!(error.received, Some(json!("yes")));
    assert_eq!(error.message(), "Expected boolean, received string");
}

#[test]
fn every_nested_violation_is_reported() {
    let mut input = image_tagger_json();
    input["functions"][0]["parameters"][0]["name"] = json!("");
    input["functions"][0]["parameters"][2]["enum"] = json!("en");
    input["functions"][0]["returns"] = json!({ "type": "string" });
    if let Some(functions) = input["functions"].as_array_mut() {
        functions.push(json!("not a function"));
    }

    let errors = validate_create(&input).unwrap_err();
    assert_eq!(
        paths(&errors),
        vec![
            "functions[0].parameters[0].name",
            "functions[0].parameters[2].enum",
            "functions[0].returns.description",
            "functions[1]",
        ]
    );
}

#[test]
fn errors_map_onto_form_fields() {
    let errors = validate_create(&json!({
        "name": "x",
        "version": 1,
        "category": "z",
        "tags": ["ok", 2],
        "functions": []
    }))
    .unwrap_err();

    let by_path = errors.by_path();
    assert_eq!(
        by_path.keys().cloned().collect::<Vec<_>>(),
        vec!["description", "tags[1]", "version"]
    );
    assert_eq!(by_path["description"], vec!["Required"]);
    assert_eq!(by_path["version"], vec!["Expected string, received number"]);
}

#[test]
fn http_error_body_is_a_json_list() {
    let errors = validate_create(&json!({ "name": "x" })).unwrap_err();
    let body = serde_json::to_value(&errors).unwrap();

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), errors.len());
    assert_eq!(entries[0], json!({ "path": "description", "code": "required" }));
}

#[test]
fn update_empty_object_injects_nothing() {
    let update = validate_update(&json!({})).unwrap();

    assert_eq!(update, McpUpdate::default());
    assert!(update.is_empty());
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));
}

#[test]
fn update_validates_only_present_fields() {
    let update = validate_update(&json!({ "version": "1.1.0", "isPublic": false })).unwrap();
    assert_eq!(update.version.as_deref(), Some("1.1.0"));
    assert_eq!(update.is_public, Some(false));
    assert_eq!(update.changed_fields(), vec!["version", "isPublic"]);

    let errors = validate_update(&json!({ "functions": [{ "name": "f" }] })).unwrap_err();
    assert_eq!(
        paths(&errors),
        vec![
            "functions[0].description",
            "functions[0].parameters",
            "functions[0].returns",
        ]
    );
}

#[test]
fn rating_example_out_of_range() {
    let errors = validate_rating(&json!({
        "userId": "u1",
        "userName": "A",
        "value": 7,
        "createdAt": "2023-01-01T00:00:00Z"
    }))
    .unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = &errors.as_slice()[0];
    assert_eq!(error.path.to_string(), "value");
    assert_eq!(
        error.kind,
        ViolationKind::OutOfRange {
            minimum: 1.0,
            maximum: 5.0
        }
    );
}

#[test]
fn rating_bounds_are_inclusive() {
    for value in [1.0, 2.5, 5.0] {
        let rating = validate_rating(&rating_json("u1", json!(value))).unwrap();
        assert_eq!(rating.value, value);
    }
    for value in [json!(0), json!(-1), json!(0.99), json!(5.01), json!(6)] {
        let errors = validate_rating(&rating_json("u1", value)).unwrap_err();
        assert_eq!(paths(&errors), vec!["value"]);
    }
}

#[test]
fn rating_timestamp_must_be_date_time() {
    let mut input = rating_json("u1", json!(4));
    input["createdAt"] = json!("01/01/2023");

    let errors = validate_rating(&input).unwrap_err();
    assert_eq!(paths(&errors), vec!["createdAt"]);
    assert_eq!(errors.as_slice()[0].message(), "Invalid date-time");
}

#[test]
fn fail_fast_mode_reports_first_violation_only() {
    let validator = Validator::new(ValidationOptions::new().fail_fast());
    assert_eq!(validator.options().mode, ValidationMode::FailFast);

    let errors = validator
        .validate_create(&json!({ "name": 1, "description": 2, "tags": 3 }))
        .unwrap_err();
    assert_eq!(paths(&errors), vec!["name"]);
}

#[test]
fn reject_mode_flags_nested_unknown_keys() {
    let validator = Validator::new(ValidationOptions::new().reject_unknown_fields());
    assert_eq!(validator.options().unknown_fields, UnknownFields::Reject);

    let mut input = image_tagger_json();
    input["functions"][0]["returns"]["schema"] = json!({});

    let errors = validator.validate_create(&input).unwrap_err();
    assert_eq!(paths(&errors), vec!["functions[0].returns.schema"]);
    assert_eq!(errors.as_slice()[0].kind, ViolationKind::UnrecognizedKey);
}

#[test]
fn strip_mode_drops_unknown_keys_from_output() {
    let mut input = classifier_json();
    input["pricing"] = json!({ "tier": "free" });

    let create = validate_create(&input).unwrap();
    let value = serde_json::to_value(&create).unwrap();
    assert!(value.get("pricing").is_none());
}

#[test]
fn options_load_from_json() {
    let options = ValidationOptions::from_json_str(
        r#"{ "mode": "failFast", "unknownFields": "reject", "requireSemverVersion": true }"#,
    )
    .unwrap();
    let validator = Validator::new(options);

    let mut input = classifier_json();
    input["version"] = Value::String("v2".to_string());
    input["extra"] = json!(1);

    let errors = validator.validate_create(&input).unwrap_err();
    assert_eq!(paths(&errors), vec!["version"]);
}

#[tokio::test]
async fn validator_is_safe_to_share_across_tasks() {
    let validator = std::sync::Arc::new(Validator::default());
    let mut handles = Vec::new();

    for i in 0..16 {
        let validator = validator.clone();
        handles.push(tokio::spawn(async move {
            let value = json!((i % 7) as f64);
            validator.validate_rating(&rating_json("u", value)).is_ok()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }
    // 1..=5 out of 0..=6, cycling over 16 tasks
    assert_eq!(accepted, (0..16).filter(|i| (1..=5).contains(&(i % 7))).count());
}
