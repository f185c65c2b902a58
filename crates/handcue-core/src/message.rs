//! Wire messages.
//!
//! Outbound intents are JSON objects tagged by `action`. Inbound server
//! messages are loose JSON objects; the client only acts on `sub_action` and
//! keeps a few display fields for logging. Anything else is ignored.

use crate::{SessionState, ZoneId};
use serde::{Deserialize, Serialize};

/// A confirmed user gesture, sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Intent {
    /// Closed fist: ask the server to roll.
    #[serde(rename = "requestDiceRoll")]
    TriggerRequest,
    /// Dwell on a zone: submit it as the answer.
    #[serde(rename = "submitAnswer")]
    ChoiceSubmission {
        #[serde(rename = "answer")]
        choice: ZoneId,
    },
}

impl Intent {
    /// Encode for the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Server instruction that switches how local gestures are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerDirective {
    /// `"sub_action": "waitForAnswer"`
    ExpectChoice,
    /// `"sub_action": "waitForFist"`
    ExpectTrigger,
}

impl ServerDirective {
    /// Parse a `sub_action` value. Unknown values give `None`.
    pub fn from_sub_action(s: &str) -> Option<Self> {
        match s {
            "waitForAnswer" => Some(Self::ExpectChoice),
            "waitForFist" => Some(Self::ExpectTrigger),
            _ => None,
        }
    }

    /// The `sub_action` value for this directive.
    pub fn as_sub_action(&self) -> &'static str {
        match self {
            Self::ExpectChoice => "waitForAnswer",
            Self::ExpectTrigger => "waitForFist",
        }
    }

    /// The session state this directive asks for.
    pub fn target_state(&self) -> SessionState {
        match self {
            Self::ExpectChoice => SessionState::AwaitingChoice,
            Self::ExpectTrigger => SessionState::AwaitingTrigger,
        }
    }
}

/// Round information the server attaches to its broadcasts.
///
/// Purely informational. Each field is decoded on its own: one that is
/// missing or of the wrong type is left empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dice_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerMessage {
    /// `None` when `sub_action` is absent or not one we know.
    pub directive: Option<ServerDirective>,
    pub details: RoundDetails,
}

impl ServerMessage {
    /// Decode a text payload. Only invalid JSON is an error.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let directive = value
            .get("sub_action")
            .and_then(serde_json::Value::as_str)
            .and_then(ServerDirective::from_sub_action);
        let details = RoundDetails {
            action: field(&value, "action"),
            dice_value: field(&value, "diceValue"),
            question: field(&value, "question"),
            options: field(&value, "options"),
            correct: field(&value, "correct"),
            correct_answer: field(&value, "correctAnswer"),
        };
        Ok(Self { directive, details })
    }
}

fn field<T: serde::de::DeserializeOwned>(value: &serde_json::Value, key: &str) -> Option<T> {
    T::deserialize(value.get(key)?).ok()
}
