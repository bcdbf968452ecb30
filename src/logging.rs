//! Structured JSON log lines and the standardized result envelope

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Error,
    Debug,
}

/// One structured log line
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    pub message: String,
    pub data: Value,
}

impl LogEntry {
    pub fn new(level: LogLevel, function: Option<&str>, message: &str, data: Value) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            level,
            function: function.map(str::to_string),
            message: message.to_string(),
            data,
        }
    }
}

/// Write one log line to stdout
pub fn emit(entry: &LogEntry) {
    if let Ok(line) = serde_json::to_string(entry) {
        println!("{}", line);
    }
}

/// Standardized result envelope serialized for the invoking process
#[derive(Debug, Serialize)]
pub struct ResultEnvelope {
    pub success: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResultEnvelope {
    pub fn success(function: Option<&str>, data: Option<Value>) -> Self {
        Self {
            success: true,
            timestamp: Utc::now().to_rfc3339(),
            function: function.map(str::to_string),
            data,
            error: None,
        }
    }

    pub fn failure(function: Option<&str>, error: &str) -> Self {
        Self {
            success: false,
            timestamp: Utc::now().to_rfc3339(),
            function: function.map(str::to_string),
            data: None,
            error: Some(error.to_string()),
        }
    }

    /// Pretty-printed JSON for process output
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
