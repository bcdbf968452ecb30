//! Manifest model for docgo applications
//!
//! The manifest declares the application's identity, its callable functions
//! with their parameter contracts, and an optional flat config mapping.
//! Loaded once per process and read-only afterwards.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Scalar parameter types with a JSON-Schema mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Number,
    Boolean,
}

impl ScalarType {
    /// JSON-Schema type name
    pub fn json_name(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Number => "number",
            ScalarType::Boolean => "boolean",
        }
    }

    /// Unrecognized base types degrade to string; schema synthesis is
    /// advisory and must never fail on a loose manifest.
    fn parse(s: &str) -> Self {
        match s {
            "number" => ScalarType::Number,
            "boolean" => ScalarType::Boolean,
            _ => ScalarType::String,
        }
    }
}

/// Declared parameter type: a scalar or an array of one scalar kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Scalar(ScalarType),
    Array(ScalarType),
}

impl ParamType {
    /// Parse a declared type string such as `"number"` or `"number[]"`
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match s.strip_suffix("[]") {
            Some(base) => ParamType::Array(ScalarType::parse(base)),
            None => ParamType::Scalar(ScalarType::parse(s)),
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Scalar(base) => write!(f, "{}", base.json_name()),
            ParamType::Array(base) => write!(f, "{}[]", base.json_name()),
        }
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ParamType::parse(&raw))
    }
}

fn default_param_type() -> ParamType {
    ParamType::Scalar(ScalarType::String)
}

/// One declared parameter of a function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type", default = "default_param_type")]
    pub ty: ParamType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// One script's contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub script: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Historical manifests used "parameters"; both spellings are accepted
    #[serde(default, alias = "parameters")]
    pub params: Vec<ParamDecl>,
    /// Explicitly authored MCP tool definition. Returned verbatim when
    /// present, so it stays an untyped value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp: Option<Value>,
}

/// The parsed, read-only application manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub functions: HashMap<String, FunctionDecl>,
    /// Flat key/value overrides; scalar values are coerced to string on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, Value>>,
}

impl Manifest {
    /// Look up a function declaration by name
    pub fn function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.get(name)
    }

    /// Manifest-level config value for a key, coerced to string.
    /// Null and compound values are treated as absent.
    pub fn config_value(&self, key: &str) -> Option<String> {
        let config = self.config.as_ref()?;
        coerce_scalar(config.get(key)?)
    }

    /// Structural invariants checked at load time
    fn check_invariants(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("Manifest 'name' must not be empty");
        }
        if self.version.is_empty() {
            bail!("Manifest 'version' must not be empty");
        }
        if self.description.is_empty() {
            bail!("Manifest 'description' must not be empty");
        }
        for (func_name, func) in &self.functions {
            let mut seen = HashSet::new();
            for param in &func.params {
                if !seen.insert(&param.name) {
                    bail!(
                        "Function '{}' declares duplicate parameter '{}'",
                        func_name,
                        param.name
                    );
                }
            }
        }
        Ok(())
    }
}

fn coerce_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Load and structurally check a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest at {}", path.display()))?;
    let manifest: Manifest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest at {}", path.display()))?;
    manifest.check_invariants()?;
    Ok(manifest)
}
