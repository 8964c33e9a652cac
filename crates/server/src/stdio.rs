//! stdio transport
//!
//! Newline-delimited JSON-RPC: one request per stdin line, one response per
//! stdout line. Nothing else may be written to stdout.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use voice_mcp_tools::{ErrorCode, JsonRpcError, JsonRpcResponse};

use crate::mcp_server::handle_message;
use crate::state::AppState;

/// Serve frames from `reader` until it reaches end of input
///
/// Only I/O failures end the loop. A frame that is not UTF-8 gets a parse
/// error like any other unreadable frame.
pub async fn serve<R, W>(state: &AppState, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let frame = line.trim();
                if frame.is_empty() {
                    continue;
                }
                handle_message(state, frame).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Frame is not valid UTF-8");
                encode_parse_error(&e)
            }
        };

        if let Some(response) = response {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    tracing::info!("stdin closed");
    Ok(())
}

fn encode_parse_error(err: &std::str::Utf8Error) -> Option<String> {
    let response = JsonRpcResponse::error(
        None,
        JsonRpcError::new(ErrorCode::ParseError, format!("Parse error: {}", err)),
    );
    serde_json::to_string(&response)
        .map_err(|e| tracing::warn!(error = %e, "Failed to encode response"))
        .ok()
}

/// Serve the process's stdin and stdout
pub async fn run_stdio(state: AppState) -> std::io::Result<()> {
    tracing::info!("MCP server running on stdio");
    serve(&state, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use voice_mcp_config::Settings;

    #[tokio::test]
    async fn test_one_response_per_request() {
        let state = AppState::new(Settings::default());
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();

        serve(&state, input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 14);
    }

    #[tokio::test]
    async fn test_bad_frame_does_not_stop_the_loop() {
        let state = AppState::new(Settings::default());
        let input = "garbage\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&state, input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("-32700"));
        assert!(lines[1].contains("\"id\":7"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_gets_parse_error() {
        let state = AppState::new(Settings::default());
        let input: &[u8] = b"\xff\xfe\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve(&state, input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let responses: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 2);
        assert!(responses[0]["id"].is_null());
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["id"], 7);
        assert!(responses[1]["result"].is_object());
    }

    #[tokio::test]
    async fn test_last_frame_without_newline() {
        let state = AppState::new(Settings::default());
        let input = r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
        let mut output = Vec::new();

        serve(&state, input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let response: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(response["id"], 1);
    }
}
