//! docgo - runtime support library for function-as-a-script applications
//!
//! Locates the application's `manifest.json` and optional `config.yml`,
//! resolves configuration values through a layered precedence chain,
//! validates the parameters supplied to the running function, and
//! synthesizes MCP tool schemas from the declared parameters.

pub mod api;
pub mod appconfig;
pub mod context;
pub mod dotenv;
pub mod error;
pub mod locate;
pub mod logging;
pub mod manifest;
pub mod resolve;
pub mod schema;
pub mod validation;
