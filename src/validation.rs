//! Parameter arity checks and strict manifest validation
//!
//! Two deliberately independent contracts live here. The runtime check is
//! arity-only and tolerant, matching what scripts can rely on at invocation
//! time. The strict validator backs `docgo-validate` and enforces the full
//! authoring shape (category, per-parameter form metadata, numeric config
//! block) over raw JSON, enumerating every violation instead of stopping at
//! the first.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::manifest::FunctionDecl;

/// Outcome of a runtime parameter check. Returned, never raised; the
/// embedding script decides whether to abort.
#[derive(Debug, Clone, Serialize)]
pub struct ParamValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParamValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Arity-only check of supplied positional values against the declaration.
/// Declared types are not checked against runtime values.
pub fn check_arity(func: &FunctionDecl, supplied: &[Value]) -> ParamValidation {
    let required = func.params.iter().filter(|p| p.required).count();
    if supplied.len() < required {
        return ParamValidation::fail(format!(
            "Missing required parameters. Expected at least {}, got {}",
            required,
            supplied.len()
        ));
    }
    ParamValidation::ok()
}

const VALID_FORM_TYPES: &[&str] = &[
    "text",
    "password",
    "textarea",
    "code",
    "number",
    "switch",
    "select",
    "segmented",
    "radio",
    "kv-list",
];

const VALID_CODE_LANGUAGES: &[&str] = &["json", "text"];

/// Result of strict manifest validation
#[derive(Debug, Default)]
pub struct ManifestReport {
    pub errors: Vec<String>,
}

impl ManifestReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a manifest document against the strict authoring schema
pub fn validate_manifest(doc: &Value) -> ManifestReport {
    let mut errors = Vec::new();

    let obj = match doc.as_object() {
        Some(obj) => obj,
        None => {
            return ManifestReport {
                errors: vec!["Manifest must be a JSON object".to_string()],
            }
        }
    };

    for field in ["name", "version", "description"] {
        if !is_nonempty_string(obj.get(field)) {
            errors.push(format!(
                "Field '{}' is required and must be a non-empty string",
                field
            ));
        }
    }

    match obj.get("functions").and_then(Value::as_object) {
        Some(functions) => {
            for (name, func) in functions {
                errors.extend(validate_function(name, func));
            }
        }
        None => errors.push("Field 'functions' is required and must be an object".to_string()),
    }

    match obj.get("config").and_then(Value::as_object) {
        Some(config) => errors.extend(validate_config(config)),
        None => errors.push("Field 'config' is required and must be an object".to_string()),
    }

    if !obj.get("mcp").map_or(false, Value::is_boolean) {
        errors.push("Field 'mcp' is required and must be a boolean".to_string());
    }

    ManifestReport { errors }
}

/// Validate one function declaration
pub fn validate_function(name: &str, func: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let obj = match func.as_object() {
        Some(obj) => obj,
        None => return vec![format!("Function '{}' must be an object", name)],
    };

    for field in ["script", "description", "category"] {
        if !is_nonempty_string(obj.get(field)) {
            errors.push(format!("Function '{}': field '{}' is required", name, field));
        }
    }

    match obj.get("params").and_then(Value::as_array) {
        Some(params) => {
            for (index, param) in params.iter().enumerate() {
                errors.extend(validate_param(&format!("{}.params[{}]", name, index), param));
            }
        }
        None => errors.push(format!(
            "Function '{}': field 'params' is required and must be an array",
            name
        )),
    }

    errors
}

/// Validate one parameter declaration, including its form metadata
pub fn validate_param(context: &str, param: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let obj = match param.as_object() {
        Some(obj) => obj,
        None => return vec![format!("Function '{}': parameter must be an object", context)],
    };

    for field in ["name", "type", "description"] {
        if !is_nonempty_string(obj.get(field)) {
            errors.push(format!("Function '{}': field '{}' is required", context, field));
        }
    }

    if !obj.get("required").map_or(false, Value::is_boolean) {
        errors.push(format!(
            "Function '{}': field 'required' is required and must be a boolean",
            context
        ));
    }

    let param_name = obj.get("name").and_then(Value::as_str).unwrap_or("?");
    let field_context = format!("{}.{}", context, param_name);
    match obj.get("form") {
        Some(form) if form.is_object() => {
            errors.extend(validate_form_field(&field_context, form));
        }
        _ => errors.push(format!("Function '{}': field 'form' is required", context)),
    }

    errors
}

/// Validate the UI form metadata of a parameter
pub fn validate_form_field(param_name: &str, field: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let form_type = field.get("type").and_then(Value::as_str).unwrap_or("");
    if !VALID_FORM_TYPES.contains(&form_type) {
        errors.push(format!(
            "Parameter '{}': invalid form type '{}'",
            param_name, form_type
        ));
    }

    if !is_nonempty_string(field.get("label")) {
        errors.push(format!(
            "Parameter '{}': field 'label' is required and must be a string",
            param_name
        ));
    }

    if matches!(form_type, "select" | "segmented" | "radio") {
        match field.get("options").and_then(Value::as_array) {
            Some(options) => {
                for (index, option) in options.iter().enumerate() {
                    errors.extend(validate_form_option(param_name, index, option));
                }
            }
            None => errors.push(format!(
                "Parameter '{}': field 'options' is required for type '{}'",
                param_name, form_type
            )),
        }
    }

    if form_type == "code" {
        if let Some(language) = field.get("language").and_then(Value::as_str) {
            if !VALID_CODE_LANGUAGES.contains(&language) {
                errors.push(format!(
                    "Parameter '{}': invalid language '{}' for code field",
                    param_name, language
                ));
            }
        }
    }

    if form_type == "number" {
        for bound in ["min", "max", "step"] {
            if let Some(value) = field.get(bound) {
                if !value.is_number() {
                    errors.push(format!(
                        "Parameter '{}': field '{}' must be a number",
                        param_name, bound
                    ));
                }
            }
        }
    }

    if form_type == "textarea" {
        if let Some(rows) = field.get("rows") {
            if !rows.is_number() {
                errors.push(format!(
                    "Parameter '{}': field 'rows' must be a number",
                    param_name
                ));
            }
        }
    }

    errors
}

fn validate_form_option(param_name: &str, index: usize, option: &Value) -> Vec<String> {
    match option {
        Value::String(_) => Vec::new(),
        Value::Object(obj) => {
            if is_nonempty_string(obj.get("label")) && is_nonempty_string(obj.get("value")) {
                Vec::new()
            } else {
                vec![format!(
                    "Parameter '{}': option {} must have 'label' and 'value'",
                    param_name, index
                )]
            }
        }
        _ => vec![format!(
            "Parameter '{}': option {} must be a string or an object with label/value",
            param_name, index
        )],
    }
}

/// Validate the mandatory numeric config block
pub fn validate_config(config: &Map<String, Value>) -> Vec<String> {
    let mut errors = Vec::new();

    match config.get("timeout").and_then(Value::as_f64) {
        Some(timeout) if timeout > 0.0 => {}
        _ => errors.push("Config: field 'timeout' must be a positive number".to_string()),
    }

    match config.get("max_retries").and_then(Value::as_f64) {
        Some(retries) if retries >= 0.0 => {}
        _ => errors.push("Config: field 'max_retries' must be a non-negative number".to_string()),
    }

    match config.get("cache_ttl").and_then(Value::as_f64) {
        Some(ttl) if ttl > 0.0 => {}
        _ => errors.push("Config: field 'cache_ttl' must be a positive number".to_string()),
    }

    errors
}

fn is_nonempty_string(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}
