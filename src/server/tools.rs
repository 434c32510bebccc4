//! Tool registry: one history tool per configured market.

use serde::Serialize;
use serde_json::{Value, json};

use crate::handler::{HistoryArgs, HistoryQueryHandler};
use crate::market::MarketConfig;
use crate::server::jsonrpc::{INVALID_PARAMS, JsonRpcError};

/// Tool metadata advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Outcome of a tool call: the text to return and whether it is an error
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

/// Maps tool names to history handlers.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    handlers: Vec<HistoryQueryHandler>,
}

impl ToolRegistry {
    /// One tool per market, listed in the order given.
    pub fn new(markets: impl IntoIterator<Item = MarketConfig>) -> Self {
        Self {
            handlers: markets.into_iter().map(HistoryQueryHandler::new).collect(),
        }
    }

    /// Registered tool names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.config().tool_name)
    }

    /// Metadata for `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.handlers.iter().map(|h| definition(h.config())).collect()
    }

    /// Run the named tool with raw JSON arguments.
    ///
    /// Unknown tools and unusable argument objects are protocol errors;
    /// everything past argument decoding is reported inside the output.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Result<ToolOutput, JsonRpcError> {
        let handler = self
            .handlers
            .iter()
            .find(|h| h.config().tool_name == name)
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, format!("unknown tool '{name}'")))?;

        let arguments = arguments.unwrap_or_else(|| json!({}));
        if !arguments.is_object() {
            return Err(JsonRpcError::new(INVALID_PARAMS, "tool arguments must be an object"));
        }
        let args: HistoryArgs = serde_json::from_value(arguments)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("invalid arguments for '{name}': {e}")))?;

        Ok(match handler.handle(args).await {
            Ok(report) => ToolOutput {
                text: report.into_string(),
                is_error: false,
            },
            Err(err) => ToolOutput {
                text: err.to_json(),
                is_error: true,
            },
        })
    }
}

fn definition(config: &MarketConfig) -> ToolDefinition {
    ToolDefinition {
        name: config.tool_name.to_owned(),
        description: format!(
            "获取{}历史行情数据（日/周/月线），返回 Markdown 报告；失败时返回包含 error 与 code 的 JSON",
            config.market.display_name()
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": config.symbol_hint,
                },
                "period": {
                    "type": "string",
                    "description": "数据周期，可选择 'daily'(日线)、'weekly'(周线)、'monthly'(月线)",
                    "default": "daily",
                },
                "start_date": {
                    "type": "string",
                    "description": format!("开始日期，格式为 YYYYMMDD，例如 '{}'", config.default_start),
                    "default": config.default_start,
                },
                "end_date": {
                    "type": "string",
                    "description": format!("结束日期，格式为 YYYYMMDD，例如 '{}'", config.default_end),
                    "default": config.default_end,
                },
                "adjust": {
                    "type": "string",
                    "description": "复权类型：''(不复权)、'qfq'(前复权)、'hfq'(后复权)",
                    "default": "",
                },
            },
            "required": ["symbol"],
        }),
    }
}
