use serde::Deserialize;
use serde_json::Value;

use super::error::GatewayError;
use crate::constants::{SESSIONS_LIST_TOOL, UNKNOWN_API_ERROR};

// Wire shapes for `POST /tools/invoke`. Required fields stay required so a shape mismatch is a
// decode error instead of a silently empty summary.

#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvokeResponse {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<ToolResult>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolResult {
    #[serde(default)]
    pub details: Option<SessionListDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionListDetails {
    pub count: u64,
    pub sessions: Vec<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub key: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Unsigned on purpose: a negative count fails decoding.
    #[serde(default)]
    pub total_tokens: Option<u64>,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ToolInvokeResponse {
    /// `ok: false` and a missing `result.details` are both logical failures.
    pub fn into_details(self) -> Result<SessionListDetails, GatewayError> {
        let ToolInvokeResponse { ok, result, error } = self;
        let details = if ok { result.and_then(|r| r.details) } else { None };
        details.ok_or_else(|| {
            GatewayError::Api(
                error
                    .map(|e| e.message)
                    .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string()),
            )
        })
    }
}

pub fn sessions_list_request() -> Value {
    serde_json::json!({
        "tool": SESSIONS_LIST_TOOL,
        "action": "json",
        "args": {},
    })
}

/// Validates a raw gateway reply: status first, then the envelope schema, then `ok`.
pub fn decode_response(status: u16, body: &[u8]) -> Result<SessionListDetails, GatewayError> {
    if status != 200 {
        return Err(GatewayError::Http(status));
    }
    let envelope: ToolInvokeResponse = serde_json::from_slice(body)
        .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
    envelope.into_details()
}
