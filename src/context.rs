//! Per-invocation runtime context
//!
//! Constructed once at process start via [`DocGoContext::init`]; owns the
//! parsed manifest and app config as plain fields. Everything after
//! construction is a pure read - no lazy getters, no global singleton.

use anyhow::{Context as _, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;
use std::path::PathBuf;

use crate::appconfig::{load_app_config, AppConfig};
use crate::dotenv;
use crate::error::DocGoError;
use crate::locate;
use crate::logging::{self, LogEntry, LogLevel, ResultEnvelope};
use crate::manifest::{load_manifest, FunctionDecl, Manifest};
use crate::resolve::resolve_value;
use crate::schema;
use crate::validation::{check_arity, ParamValidation};

/// The invocation context handed to the embedding script
#[derive(Debug)]
pub struct DocGoContext {
    pub manifest_path: Option<PathBuf>,
    pub function_name: Option<String>,
    pub params: Vec<Value>,
    pub manifest: Option<Manifest>,
    pub app_config: Option<AppConfig>,
    pub debug: bool,
    pub(crate) client: reqwest::Client,
}

impl DocGoContext {
    /// Build the context for the current process.
    ///
    /// Loads `.env` (guarded against reloading), then locates and parses the
    /// manifest and `config.yml` at most once. Missing or malformed
    /// artifacts degrade to absent and are only surfaced in debug mode;
    /// a malformed `DOCGO_PARAMS` is an error because the invocation itself
    /// is unusable without its arguments.
    pub fn init() -> Result<Self> {
        dotenv::load_dotenv();
        let debug = debug_enabled();

        let manifest_path = match env::var("DOCGO_MANIFEST_PATH") {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => locate::find_manifest(),
        };

        let manifest = match &manifest_path {
            Some(path) => match load_manifest(path) {
                Ok(manifest) => Some(manifest),
                Err(e) => {
                    diag(debug, &format!("Manifest treated as absent: {:#}", e));
                    None
                }
            },
            None => {
                diag(debug, "No manifest.json found");
                None
            }
        };

        let app_config = match locate::find_config_file(manifest_path.as_deref()) {
            Some(path) => match load_app_config(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    diag(debug, &format!("App config treated as absent: {:#}", e));
                    None
                }
            },
            None => None,
        };

        let function_name = match env::var("DOCGO_FUNCTION") {
            Ok(name) if !name.is_empty() => Some(name),
            _ => inferred_function_name(),
        };

        let params = parse_params(env::var("DOCGO_PARAMS").ok().as_deref())?;

        Ok(Self {
            manifest_path,
            function_name,
            params,
            manifest,
            app_config,
            debug,
            client: reqwest::Client::new(),
        })
    }

    /// Declaration of the currently-executing function
    pub fn current_function(&self) -> Option<&FunctionDecl> {
        let manifest = self.manifest.as_ref()?;
        manifest.function(self.function_name.as_deref()?)
    }

    /// Resolve a configuration key through the precedence chain
    pub fn resolve(&self, key: &str) -> Option<String> {
        resolve_value(self.manifest.as_ref(), self.app_config.as_ref(), key, None)
    }

    /// Resolve a key, falling back to the caller's default
    pub fn resolve_or(&self, key: &str, default: &str) -> String {
        resolve_value(
            self.manifest.as_ref(),
            self.app_config.as_ref(),
            key,
            Some(default),
        )
        .unwrap_or_else(|| default.to_string())
    }

    /// Check the supplied parameters against the active declaration
    pub fn validate_params(&self) -> ParamValidation {
        match self.current_function() {
            Some(func) => check_arity(func, &self.params),
            None => ParamValidation::fail("Function not found"),
        }
    }

    /// Supplied value at a position
    pub fn param(&self, index: usize) -> Option<&Value> {
        self.params.get(index)
    }

    /// Supplied value for a declared parameter name, via its positional index
    pub fn param_by_name(&self, name: &str) -> Option<&Value> {
        let func = self.current_function()?;
        let index = func.params.iter().position(|p| p.name == name)?;
        self.params.get(index)
    }

    /// MCP tool definition for the active function, authored or synthesized
    pub fn mcp_definition(&self) -> Option<Value> {
        let func = self.current_function()?;
        let name = self
            .function_name
            .as_deref()
            .unwrap_or(schema::UNKNOWN_TOOL_NAME);
        schema::mcp_definition(func, name)
    }

    /// Parse a structured entity payload, given as a JSON value or a JSON
    /// string. Failure carries the target type name and the parse message.
    pub fn parse_entity<T: DeserializeOwned>(
        &self,
        entity: &str,
        value: &Value,
    ) -> Result<T, DocGoError> {
        let parsed = match value {
            Value::String(raw) => serde_json::from_str(raw),
            other => serde_json::from_value(other.clone()),
        };
        parsed.map_err(|e| DocGoError::EntityParse {
            entity: entity.to_string(),
            message: e.to_string(),
        })
    }

    /// Emit one structured log line tagged with the active function
    pub fn log(&self, level: LogLevel, message: &str, data: Value) {
        logging::emit(&LogEntry::new(
            level,
            self.function_name.as_deref(),
            message,
            data,
        ));
    }

    pub fn info(&self, message: &str, data: Value) {
        self.log(LogLevel::Info, message, data);
    }

    pub fn error(&self, message: &str, data: Value) {
        self.log(LogLevel::Error, message, data);
    }

    pub fn debug(&self, message: &str, data: Value) {
        self.log(LogLevel::Debug, message, data);
    }

    /// Success envelope serialized for the invoking process
    pub fn success(&self, data: Value) -> String {
        let data = if data.is_null() { None } else { Some(data) };
        ResultEnvelope::success(self.function_name.as_deref(), data).render()
    }

    /// Failure envelope serialized for the invoking process
    pub fn failure(&self, error: &str) -> String {
        ResultEnvelope::failure(self.function_name.as_deref(), error).render()
    }
}

/// Internal diagnostics, visible only when DOCGO_DEBUG is set
fn diag(debug: bool, message: &str) {
    if debug {
        logging::emit(&LogEntry::new(LogLevel::Debug, None, message, Value::Null));
    }
}

fn debug_enabled() -> bool {
    match env::var("DOCGO_DEBUG") {
        Ok(value) => !value.is_empty() && value != "0" && value != "false",
        Err(_) => false,
    }
}

/// Function name inferred from the entry script's base filename
fn inferred_function_name() -> Option<String> {
    let entry = locate::entry_script_path()?;
    let stem = entry.file_stem()?;
    Some(stem.to_string_lossy().into_owned())
}

fn parse_params(raw: Option<&str>) -> Result<Vec<Value>> {
    match raw {
        Some(raw) if !raw.is_empty() => {
            serde_json::from_str(raw).context("DOCGO_PARAMS must be a JSON array")
        }
        _ => Ok(Vec::new()),
    }
}
