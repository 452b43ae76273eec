//! Message framing for newline-delimited JSON.

use crate::types::{JsonRpcMessage, McpError, McpResult};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &serde_json::Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let msg = parse_message(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#).unwrap();
        assert!(matches!(msg, JsonRpcMessage::Request(r) if r.method == "ping"));
    }

    #[test]
    fn test_parse_rejects_empty_line() {
        assert!(matches!(
            parse_message("   "),
            Err(McpError::ParseError(_))
        ));
    }

    #[test]
    fn test_frame_appends_newline() {
        let framed = frame_message(&serde_json::json!({"ok": true})).unwrap();
        assert!(framed.ends_with('\n'));
        assert!(!framed[..framed.len() - 1].contains('\n'));
    }
}
