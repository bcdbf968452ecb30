//! Layered configuration value resolution
//!
//! Precedence, evaluated lazily and short-circuiting at the first source
//! that yields a value:
//! 1. config.yml binding scoped to the current application
//! 2. manifest-level flat config
//! 3. process environment
//! 4. caller-supplied default

use std::env;

use crate::appconfig::AppConfig;
use crate::manifest::Manifest;

/// Resolve the effective string value for a key.
///
/// An app-scoped binding, once found, is final for the whole chain: a
/// `$`-reference to an unset environment variable resolves to absent
/// without falling through to the manifest config. Without a manifest,
/// steps 1 and 2 are skipped entirely.
pub fn resolve_value(
    manifest: Option<&Manifest>,
    app_config: Option<&AppConfig>,
    key: &str,
    default: Option<&str>,
) -> Option<String> {
    if let Some(manifest) = manifest {
        if let Some(config) = app_config {
            if let Some(app) = config.app(&manifest.name) {
                if let Some(binding) = app.binding(key) {
                    return binding.value.resolve();
                }
            }
        }
        if let Some(value) = manifest.config_value(key) {
            return Some(value);
        }
    }
    if let Ok(value) = env::var(key) {
        return Some(value);
    }
    default.map(str::to_string)
}
