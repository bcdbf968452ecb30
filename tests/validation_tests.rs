// Integration tests for the runtime arity check and the strict
// authoring-time manifest validator

use docgo::manifest::{FunctionDecl, ParamDecl, ParamType};
use docgo::validation::{check_arity, validate_manifest};
use serde_json::{json, Value};

fn function_with_params(specs: &[(&str, &str, bool)]) -> FunctionDecl {
    FunctionDecl {
        script: "scripts/run.js".to_string(),
        description: "a test function".to_string(),
        category: "general".to_string(),
        params: specs
            .iter()
            .map(|(name, ty, required)| ParamDecl {
                name: name.to_string(),
                ty: ParamType::parse(ty),
                required: *required,
                description: String::new(),
            })
            .collect(),
        mcp: None,
    }
}

#[test]
fn exact_required_count_is_valid() {
    let func = function_with_params(&[
        ("a", "string", true),
        ("b", "number", true),
        ("c", "string", false),
    ]);
    let supplied = vec![json!("x"), json!(2)];

    let result = check_arity(&func, &supplied);
    assert!(result.valid);
    assert!(result.error.is_none());
}

#[test]
fn missing_required_parameter_reports_expected_and_actual() {
    let func = function_with_params(&[
        ("a", "string", true),
        ("b", "number", true),
        ("c", "string", false),
    ]);
    let supplied = vec![json!("x")];

    let result = check_arity(&func, &supplied);
    assert!(!result.valid);
    let error = result.error.unwrap();
    assert!(error.contains("Expected at least 2, got 1"), "{}", error);
}

#[test]
fn optional_parameters_do_not_raise_the_minimum() {
    let func = function_with_params(&[("a", "string", false), ("b", "string", false)]);

    let result = check_arity(&func, &[]);
    assert!(result.valid);
}

#[test]
fn extra_supplied_values_are_tolerated() {
    let func = function_with_params(&[("a", "string", true)]);
    let supplied = vec![json!("x"), json!("surplus")];

    assert!(check_arity(&func, &supplied).valid);
}

// ---- strict validator ----

fn valid_manifest_doc() -> Value {
    json!({
        "name": "docgo",
        "version": "1.0.0",
        "description": "Legal process toolkit",
        "functions": {
            "fetch_case": {
                "script": "scripts/fetch_case.js",
                "description": "Fetch a case by number",
                "category": "cases",
                "params": [
                    {
                        "name": "case_number",
                        "type": "string",
                        "required": true,
                        "description": "Case number to fetch",
                        "form": { "type": "text", "label": "Case number" }
                    }
                ]
            }
        },
        "config": { "timeout": 30, "max_retries": 3, "cache_ttl": 300 },
        "mcp": true
    })
}

#[test]
fn well_formed_manifest_passes() {
    let report = validate_manifest(&valid_manifest_doc());
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn missing_top_level_fields_are_enumerated() {
    let report = validate_manifest(&json!({ "functions": {} }));
    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.contains("'name'")));
    assert!(report.errors.iter().any(|e| e.contains("'version'")));
    assert!(report.errors.iter().any(|e| e.contains("'description'")));
    assert!(report.errors.iter().any(|e| e.contains("'config'")));
    assert!(report.errors.iter().any(|e| e.contains("'mcp'")));
}

#[test]
fn function_without_category_fails_strict_validation() {
    let mut doc = valid_manifest_doc();
    doc["functions"]["fetch_case"]
        .as_object_mut()
        .unwrap()
        .remove("category");

    let report = validate_manifest(&doc);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("fetch_case") && e.contains("'category'")));
}

#[test]
fn param_without_form_metadata_fails_strict_validation() {
    let mut doc = valid_manifest_doc();
    doc["functions"]["fetch_case"]["params"][0]
        .as_object_mut()
        .unwrap()
        .remove("form");

    let report = validate_manifest(&doc);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("fetch_case.params[0]") && e.contains("'form'")));
}

#[test]
fn invalid_form_type_is_reported() {
    let mut doc = valid_manifest_doc();
    doc["functions"]["fetch_case"]["params"][0]["form"]["type"] = json!("dropdown");

    let report = validate_manifest(&doc);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("invalid form type 'dropdown'")));
}

#[test]
fn select_field_requires_options() {
    let mut doc = valid_manifest_doc();
    doc["functions"]["fetch_case"]["params"][0]["form"] =
        json!({ "type": "select", "label": "Court" });

    let report = validate_manifest(&doc);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("'options' is required for type 'select'")));
}

#[test]
fn select_options_accept_strings_and_label_value_objects() {
    let mut doc = valid_manifest_doc();
    doc["functions"]["fetch_case"]["params"][0]["form"] = json!({
        "type": "select",
        "label": "Court",
        "options": ["TJSP", { "label": "TJRJ", "value": "tjrj" }, 42]
    });

    let report = validate_manifest(&doc);
    assert_eq!(
        report
            .errors
            .iter()
            .filter(|e| e.contains("option"))
            .count(),
        1
    );
    assert!(report.errors.iter().any(|e| e.contains("option 2")));
}

#[test]
fn numeric_config_block_bounds_are_enforced() {
    let mut doc = valid_manifest_doc();
    doc["config"] = json!({ "timeout": 0, "max_retries": -1, "cache_ttl": "300" });

    let report = validate_manifest(&doc);
    assert!(report.errors.iter().any(|e| e.contains("'timeout'")));
    assert!(report.errors.iter().any(|e| e.contains("'max_retries'")));
    assert!(report.errors.iter().any(|e| e.contains("'cache_ttl'")));
}

#[test]
fn zero_max_retries_is_allowed() {
    let mut doc = valid_manifest_doc();
    doc["config"]["max_retries"] = json!(0);

    let report = validate_manifest(&doc);
    assert!(report.is_valid(), "unexpected errors: {:?}", report.errors);
}

#[test]
fn non_object_manifest_is_rejected_outright() {
    let report = validate_manifest(&json!([1, 2, 3]));
    assert_eq!(report.errors, vec!["Manifest must be a JSON object"]);
}
