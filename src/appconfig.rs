//! App config model (`config.yml`)
//!
//! A deployment-side file mapping an application's logical settings to
//! environment-variable bindings. Lets an operator redirect which variable
//! backs a setting without touching the manifest or the script.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fs;
use std::path::Path;

/// A binding value: either a literal string or a reference to a process
/// environment variable (`$VAR` in the file). Parsed once at load time;
/// references resolve against the raw environment only, one level deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingValue {
    Literal(String),
    EnvRef(String),
}

impl BindingValue {
    /// Parse the file form: a leading `$` marks an environment reference
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('$') {
            Some(var) => BindingValue::EnvRef(var.to_string()),
            None => BindingValue::Literal(raw.to_string()),
        }
    }

    /// Resolve against the process environment. A reference to an unset
    /// variable is absent; a literal is always itself.
    pub fn resolve(&self) -> Option<String> {
        match self {
            BindingValue::Literal(value) => Some(value.clone()),
            BindingValue::EnvRef(var) => env::var(var).ok(),
        }
    }
}

impl std::fmt::Display for BindingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingValue::Literal(value) => write!(f, "{}", value),
            BindingValue::EnvRef(var) => write!(f, "${}", var),
        }
    }
}

impl Serialize for BindingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BindingValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(BindingValue::parse(&raw))
    }
}

/// One environment-variable binding of an app entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvBinding {
    pub name: String,
    pub value: BindingValue,
}

/// Bindings for one application, matched against the manifest name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppEntry {
    pub name: String,
    #[serde(default)]
    pub env: Vec<EnvBinding>,
}

impl AppEntry {
    /// Find the binding declared for a key
    pub fn binding(&self, key: &str) -> Option<&EnvBinding> {
        self.env.iter().find(|b| b.name == key)
    }
}

/// The parsed, read-only config.yml contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

impl AppConfig {
    /// Find the entry for an application name
    pub fn app(&self, name: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|a| a.name == name)
    }
}

/// Load a config.yml file
pub fn load_app_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))
}
