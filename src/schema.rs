//! MCP tool schema synthesis
//!
//! Builds a JSON-Schema-shaped tool definition from a function's declared
//! parameters when no explicit one was authored. Advisory schema for a
//! tool-calling client, not a strict contract: unknown types degrade to
//! string rather than failing.

use serde_json::{json, Map, Value};

use crate::manifest::{FunctionDecl, ParamType};

/// Tool name used when the active function cannot be determined
pub const UNKNOWN_TOOL_NAME: &str = "unknown_function";

/// MCP tool definition for a function: the authored `mcp` fragment verbatim
/// when present, a synthesized one otherwise. A function without parameters
/// has no invocable inputs and is not synthesized.
pub fn mcp_definition(func: &FunctionDecl, name: &str) -> Option<Value> {
    if let Some(explicit) = &func.mcp {
        return Some(explicit.clone());
    }
    if func.params.is_empty() {
        return None;
    }

    let mut properties = Map::new();
    let mut required = Vec::new();
    for param in &func.params {
        let mut property = type_schema(param.ty);
        if !param.description.is_empty() {
            property["description"] = json!(param.description);
        }
        properties.insert(param.name.clone(), property);
        if param.required {
            required.push(param.name.clone());
        }
    }

    let mut input_schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        input_schema["required"] = json!(required);
    }

    Some(json!({
        "name": name,
        "description": func.description,
        "inputSchema": input_schema,
    }))
}

fn type_schema(ty: ParamType) -> Value {
    match ty {
        ParamType::Scalar(base) => json!({ "type": base.json_name() }),
        ParamType::Array(base) => json!({
            "type": "array",
            "items": { "type": base.json_name() },
        }),
    }
}
