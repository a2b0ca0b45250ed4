//! JSON frames exchanged over the interview channel.

use super::message::{MessageKind, NewMessage};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Client → server frame types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientFrameType {
    StartInterview,
    Answer,
    EndInterview,
}

/// `{type, message}` sent by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFrame {
    #[serde(rename = "type")]
    pub frame_type: ClientFrameType,
    pub message: String,
}

impl ClientFrame {
    pub fn start_interview() -> Self {
        Self {
            frame_type: ClientFrameType::StartInterview,
            message: String::new(),
        }
    }

    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            frame_type: ClientFrameType::Answer,
            message: text.into(),
        }
    }

    pub fn end_interview() -> Self {
        Self {
            frame_type: ClientFrameType::EndInterview,
            message: String::new(),
        }
    }

    pub fn to_json(&self) -> String {
        // Both fields are plain strings; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Why an inbound frame was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRejection {
    NotJson(String),
    NotAnObject,
    UnknownType(String),
}

/// Decodes a server text frame into a transcript message.
///
/// `answer_evaluation` and `interview_result` are accepted as older names
/// for `evaluation` and `final_decision`.
pub fn decode_server_frame(text: &str) -> Result<NewMessage, FrameRejection> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| FrameRejection::NotJson(e.to_string()))?;
    let object = value.as_object().ok_or(FrameRejection::NotAnObject)?;

    let frame_type = object
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let kind = match frame_type {
        "question" => MessageKind::Question,
        "evaluation" | "answer_evaluation" => MessageKind::Evaluation,
        "final_decision" | "interview_result" => MessageKind::FinalDecision,
        "error" => MessageKind::Error,
        other => return Err(FrameRejection::UnknownType(other.to_string())),
    };

    let content = match object.get("message") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    Ok(NewMessage::from_ai(kind, content))
}
