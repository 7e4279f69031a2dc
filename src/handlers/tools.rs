use serde_json::{json, Value};

use crate::guides::{Guide, Provider};

pub const INSTALL_GUIDE_TOOL: &str = "install_openfeature_sdk";
pub const OFREP_EVAL_TOOL: &str = "ofrep_flag_eval";

/// Input schema advertised for the install-guide tool. Enumerations come
/// from the bundled guide and provider tables.
pub fn install_guide_schema() -> Value {
    let guides: Vec<&str> = Guide::ALL.iter().map(|g| g.id()).collect();
    let providers: Vec<&str> = Provider::ALL.iter().map(|p| p.id()).collect();
    let mut schema = install_guide_arguments_schema();
    schema["properties"]["guide"]["enum"] = json!(guides);
    schema["properties"]["providers"]["items"]["enum"] = json!(providers);
    schema
}

/// Shape-only schema applied to incoming install-guide arguments. Unknown
/// ids pass here so the guide store reports them as `unknown_guide` or
/// `unknown_provider`.
pub fn install_guide_arguments_schema() -> Value {
    json!({
        "type": "object",
        "required": ["guide"],
        "properties": {
            "guide": {
                "type": "string",
                "description": "SDK ecosystem to install OpenFeature for"
            },
            "providers": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Flag providers to add setup instructions for, in order"
            }
        }
    })
}

pub fn ofrep_eval_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "base_url": {
                "type": "string",
                "description": concat!(
                    "OFREP service base URL; falls back to ",
                    "OPENFEATURE_OFREP_BASE_URL or the config file"
                )
            },
            "flag_key": {
                "type": "string",
                "description": concat!(
                    "Flag to evaluate; omit to evaluate all flags at once. ",
                    "\".\" and \"..\" are not valid keys"
                )
            },
            "context": {
                "type": "object",
                "description": "Evaluation context, e.g. { \"targetingKey\": \"user-123\" }",
                "properties": {
                    "targetingKey": { "type": "string" }
                },
                "additionalProperties": true
            },
            "etag": {
                "type": "string",
                "description": "ETag from a previous bulk evaluation, sent as If-None-Match"
            },
            "auth": {
                "type": "object",
                "properties": {
                    "bearer_token": { "type": "string" },
                    "api_key": { "type": "string" }
                },
                "additionalProperties": false
            },
            "timeout_ms": {
                "type": "integer",
                "minimum": 1,
                "description": "Abort the request after this many milliseconds"
            }
        }
    })
}

/// Schema that `name`'s arguments are validated against, if it is a known tool.
pub fn input_schema(name: &str) -> Option<Value> {
    match name {
        INSTALL_GUIDE_TOOL => Some(install_guide_arguments_schema()),
        OFREP_EVAL_TOOL => Some(ofrep_eval_schema()),
        _ => None,
    }
}

/// The `tools/list` payload.
pub fn tool_definitions() -> Value {
    json!({
        "tools": [
            {
                "name": INSTALL_GUIDE_TOOL,
                "description": concat!(
                    "Get a markdown guide for installing the OpenFeature SDK for an ecosystem, ",
                    "optionally with setup instructions for specific flag providers"
                ),
                "inputSchema": install_guide_schema()
            },
            {
                "name": OFREP_EVAL_TOOL,
                "description": concat!(
                    "Evaluate one feature flag, or all flags at once, ",
                    "against an OFREP-compatible service"
                ),
                "inputSchema": ofrep_eval_schema()
            }
        ]
    })
}
