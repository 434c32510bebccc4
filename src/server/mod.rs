//! MCP server shell around the history tools.
//!
//! ## Modules
//!
//! - [`jsonrpc`] — JSON-RPC 2.0 envelopes and error codes
//! - [`tools`] — tool registry, schemas and dispatch
//! - [`transport`] — newline-delimited stdio sessions
//! - [`sse`] — MCP HTTP+SSE transport (`GET /sse`, `POST /messages`)
//!
//! Supported methods: `initialize`, `notifications/initialized`, `ping`,
//! `tools/list`, `tools/call`. Notifications never get a reply.

pub mod jsonrpc;
pub mod sse;
pub mod tools;
pub mod transport;

use serde_json::{Value, json};

use crate::constants::MCP_PROTOCOL_VERSION;
use crate::server::jsonrpc::*;
use crate::server::tools::ToolRegistry;

/// Stateless request dispatcher shared by every session.
#[derive(Debug, Clone)]
pub struct McpServer {
    name: String,
    registry: ToolRegistry,
}

impl McpServer {
    /// Build a dispatcher advertising `name` in `serverInfo`.
    pub fn new(name: impl Into<String>, registry: ToolRegistry) -> Self {
        Self {
            name: name.into(),
            registry,
        }
    }

    /// Tools served by this dispatcher.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one raw message that may not be valid UTF-8. Undecodable input
    /// gets a parse-error reply like any other malformed JSON.
    pub async fn handle_bytes(&self, bytes: &[u8]) -> Option<String> {
        match std::str::from_utf8(bytes) {
            Ok(text) => self.handle_line(text).await,
            Err(e) => serialize(&JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(PARSE_ERROR, format!("parse error: invalid UTF-8: {e}")),
            )),
        }
    }

    /// Handle one raw JSON line. Returns the serialized reply, or `None` for
    /// notifications.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(e) => Some(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")),
            )),
            Ok(value) => match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(req) => self.dispatch(req).await,
                Err(e) => Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
                )),
            },
        }?;

        serialize(&response)
    }

    /// Route one request to its method.
    pub async fn dispatch(&self, req: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %req.method, id = ?req.id, "request");

        let outcome = match req.method.as_str() {
            "initialize" => Ok(self.initialize_result()),
            "notifications/initialized" | "notifications/cancelled" => return None,
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": self.registry.definitions() })),
            "tools/call" => self.call_tool(req.params.clone()).await,
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        };

        let id = req.id?;
        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => {
                tracing::warn!(method = %req.method, code = error.code, "{}", error.message);
                JsonRpcResponse::failure(id, error)
            }
        })
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": self.name,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "missing params"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "missing tool name"))?;

        let output = self.registry.call(name, params.get("arguments").cloned()).await?;
        Ok(json!({
            "content": [{ "type": "text", "text": output.text }],
            "isError": output.is_error,
        }))
    }
}

fn serialize(response: &JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::error!("failed to serialize response: {e}");
            None
        }
    }
}
