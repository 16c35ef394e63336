//! Wire protocol between the daemon and the room clients.
//!
//! Every message is a single JSON object on its own line, terminated by `\n`.
//! The `type` field selects the variant:
//!
//! ```text
//! client -> daemon  {"type":"progress_update","room":"A","step":3}
//! daemon -> client  {"type":"state","data":{"A":{"step":3,"last_updated":"..."},"B":{...}}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A decoded line of the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// A room reports the step it has reached.
    ProgressUpdate(ProgressUpdate),
    /// Full snapshot of every room, sent by the daemon.
    State(StateMessage),
}

impl Message {
    /// Shorthand for a `progress_update` message.
    pub fn progress_update(room: impl Into<String>, step: u64) -> Self {
        Message::ProgressUpdate(ProgressUpdate {
            room: room.into(),
            step,
        })
    }
}

/// Payload of a `progress_update` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub room: String,
    pub step: u64,
}

/// Payload of a `state` message.
///
/// `data` is a `BTreeMap` so rooms always serialize in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateMessage {
    pub data: BTreeMap<String, RoomStateInfo>,
}

impl StateMessage {
    /// Step of `room`, or `None` when the daemon does not know the room.
    pub fn step_of(&self, room: &str) -> Option<u64> {
        self.data.get(room).map(|info| info.step)
    }
}

/// Per-room entry of a `state` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateInfo {
    pub step: u64,
    /// RFC 3339 timestamp of the last update, `null` if never updated
    pub last_updated: Option<String>,
}

/// Failure to turn a line into a [`Message`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The line is not a complete JSON document.
    #[error("malformed JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// Valid JSON, but unknown `type`, missing fields or wrong field types.
    #[error("invalid message: {0}")]
    Schema(#[source] serde_json::Error),

    /// The raw line is not UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => DecodeError::Schema(e),
            _ => DecodeError::Malformed(e),
        }
    }
}

/// Failure to serialize a [`Message`].
#[derive(Debug, Error)]
#[error("failed to encode message: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Decode one line (with or without its trailing newline).
pub fn decode(line: &str) -> Result<Message, DecodeError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(serde_json::from_str(line)?)
}

/// Decode one raw line as read from a socket.
pub fn decode_bytes(line: &[u8]) -> Result<Message, DecodeError> {
    decode(std::str::from_utf8(line)?)
}

/// Encode a message as a single `\n`-terminated line.
///
/// `serde_json` escapes control characters inside strings, so the only raw
/// newline in the output is the terminator.
pub fn encode(message: &Message) -> Result<String, EncodeError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(entries: &[(&str, u64, Option<&str>)]) -> StateMessage {
        StateMessage {
            data: entries
                .iter()
                .map(|(room, step, last_updated)| {
                    (
                        room.to_string(),
                        RoomStateInfo {
                            step: *step,
                            last_updated: last_updated.map(str::to_string),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_decode_progress_update() {
        // テスト項目: progress_update が正しくデコードされる
        // given (前提条件):
        let line = r#"{"type":"progress_update","room":"A","step":3}"#;

        // when (操作):
        let result = decode(line);

        // then (期待する結果):
        assert_eq!(result.unwrap(), Message::progress_update("A", 3));
    }

    #[test]
    fn test_decode_accepts_trailing_newline_and_extra_fields() {
        // テスト項目: 改行付きの行や未知のフィールドを含む行もデコードできる
        // given (前提条件):
        let line = "{\"type\":\"progress_update\",\"room\":\"B\",\"step\":0,\"by\":\"gm\"}\r\n";

        // when (操作):
        let result = decode(line);

        // then (期待する結果):
        assert_eq!(result.unwrap(), Message::progress_update("B", 0));
    }

    #[test]
    fn test_decode_rejects_non_integer_step() {
        // テスト項目: step が整数でない場合は DecodeError::Schema になる
        // given (前提条件):
        let line = r#"{"type":"progress_update","room":"A","step":"x"}"#;

        // when (操作):
        let result = decode(line);

        // then (期待する結果):
        assert!(matches!(result, Err(DecodeError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_negative_and_fractional_step() {
        // テスト項目: 負数や小数の step は受け付けない
        // given (前提条件):
        let negative = r#"{"type":"progress_update","room":"A","step":-1}"#;
        let fractional = r#"{"type":"progress_update","room":"A","step":1.5}"#;

        // when (操作):
        let negative_result = decode(negative);
        let fractional_result = decode(fractional);

        // then (期待する結果):
        assert!(matches!(negative_result, Err(DecodeError::Schema(_))));
        assert!(matches!(fractional_result, Err(DecodeError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_non_string_room() {
        // テスト項目: room が文字列でない場合はエラーになる
        // given (前提条件):
        let line = r#"{"type":"progress_update","room":1,"step":1}"#;

        // when (操作):
        let result = decode(line);

        // then (期待する結果):
        assert!(matches!(result, Err(DecodeError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        // テスト項目: 必須フィールドが欠けている場合はエラーになる
        // given (前提条件):
        let missing_step = r#"{"type":"progress_update","room":"A"}"#;
        let missing_type = r#"{"room":"A","step":1}"#;

        // when (操作):
        let missing_step_result = decode(missing_step);
        let missing_type_result = decode(missing_type);

        // then (期待する結果):
        assert!(matches!(missing_step_result, Err(DecodeError::Schema(_))));
        assert!(matches!(missing_type_result, Err(DecodeError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        // テスト項目: 未知の type はエラーになる
        // given (前提条件):
        let line = r#"{"type":"reset","room":"A"}"#;

        // when (操作):
        let result = decode(line);

        // then (期待する結果):
        assert!(matches!(result, Err(DecodeError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        // テスト項目: JSON として不正な行や空行は DecodeError::Malformed になる
        // given (前提条件):
        let truncated = r#"{"type":"progress_update","room":"A""#;
        let empty = "\n";

        // when (操作):
        let truncated_result = decode(truncated);
        let empty_result = decode(empty);

        // then (期待する結果):
        assert!(matches!(truncated_result, Err(DecodeError::Malformed(_))));
        assert!(matches!(empty_result, Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_bytes_rejects_invalid_utf8() {
        // テスト項目: UTF-8 として不正なバイト列は DecodeError::InvalidUtf8 になる
        // given (前提条件):
        let line = b"{\"type\":\"progress_update\",\"room\":\"\xff\",\"step\":1}\n";

        // when (操作):
        let result = decode_bytes(line);

        // then (期待する結果):
        assert!(matches!(result, Err(DecodeError::InvalidUtf8(_))));
    }

    #[test]
    fn test_decode_bytes_accepts_raw_line() {
        // テスト項目: ソケットから読んだ改行付きのバイト列をそのまま解釈できる
        // given (前提条件):
        let line = b"{\"type\":\"progress_update\",\"room\":\"B\",\"step\":2}\r\n";

        // when (操作):
        let result = decode_bytes(line);

        // then (期待する結果):
        assert_eq!(result.unwrap(), Message::progress_update("B", 2));
    }

    #[test]
    fn test_encode_state_is_single_sorted_line() {
        // テスト項目: state メッセージがソート済みの 1 行としてエンコードされる
        // given (前提条件):
        let state = state_with(&[
            ("B", 0, None),
            ("A", 2, Some("2025-04-21T16:00:00.000Z")),
        ]);

        // when (操作):
        let line = encode(&Message::State(state)).unwrap();

        // then (期待する結果):
        assert_eq!(
            line,
            "{\"type\":\"state\",\"data\":{\"A\":{\"step\":2,\"last_updated\":\"2025-04-21T16:00:00.000Z\"},\"B\":{\"step\":0,\"last_updated\":null}}}\n"
        );
    }

    #[test]
    fn test_encode_escapes_embedded_newlines() {
        // テスト項目: room id に改行が含まれても出力は 1 行のまま
        // given (前提条件):
        let message = Message::progress_update("A\nB", 1);

        // when (操作):
        let line = encode(&message).unwrap();

        // then (期待する結果):
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn test_state_round_trip_preserves_steps() {
        // テスト項目: state をエンコードしてデコードすると同じ内容に戻る
        // given (前提条件):
        let state = state_with(&[
            ("A", 4, Some("2025-04-21T16:00:00.000Z")),
            ("B", 1, None),
            ("C", 6, Some("2025-04-21T16:05:00.250Z")),
        ]);

        // when (操作):
        let line = encode(&Message::State(state.clone())).unwrap();
        let decoded = decode(&line).unwrap();

        // then (期待する結果):
        assert_eq!(decoded, Message::State(state));
    }

    #[test]
    fn test_state_step_of() {
        // テスト項目: step_of が既知のルームのみ値を返す
        // given (前提条件):
        let state = state_with(&[("A", 2, None)]);

        // when (操作):
        let known = state.step_of("A");
        let unknown = state.step_of("Z");

        // then (期待する結果):
        assert_eq!(known, Some(2));
        assert_eq!(unknown, None);
    }
}
