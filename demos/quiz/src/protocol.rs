//! Quiz server messages.
//!
//! Clients send `handcue_core::Intent`. The server answers with broadcasts
//! that carry a `sub_action` telling every controller what to wait for next.

use handcue_core::ServerDirective;
use serde::{Serialize, Serializer};

/// Server -> client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Broadcast {
    /// Dice rolled, question open.
    ShowQuiz {
        #[serde(rename = "sub_action", serialize_with = "sub_action")]
        directive: ServerDirective,
        dice_value: u32,
        question: String,
        options: Vec<String>,
    },
    /// Answer judged, back to rolling.
    AnswerResult {
        #[serde(rename = "sub_action", serialize_with = "sub_action")]
        directive: ServerDirective,
        correct: bool,
        correct_answer: String,
        dice_value: u32,
    },
    /// Sent only to the client that caused it. Still carries a directive so
    /// the controller leaves `AwaitingServerResponse`.
    Error {
        #[serde(rename = "sub_action", serialize_with = "sub_action")]
        directive: ServerDirective,
        message: String,
    },
}

fn sub_action<S: Serializer>(directive: &ServerDirective, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(directive.as_sub_action())
}

impl Broadcast {
    /// Encode for the wire.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handcue_core::ServerMessage;

    #[test]
    fn show_quiz_is_understood_by_controllers() {
        let json = Broadcast::ShowQuiz {
            directive: ServerDirective::ExpectChoice,
            dice_value: 4,
            question: "How many continents are there?".into(),
            options: vec!["5".into(), "6".into(), "7".into(), "8".into()],
        }
        .to_json()
        .unwrap();
        assert!(json.starts_with(r#"{"action":"showQuiz","sub_action":"waitForAnswer","diceValue":4"#));

        let decoded = ServerMessage::decode(&json).unwrap();
        assert_eq!(decoded.directive, Some(ServerDirective::ExpectChoice));
        assert_eq!(decoded.details.dice_value, Some(4));
    }

    #[test]
    fn answer_result_shape() {
        let json = Broadcast::AnswerResult {
            directive: ServerDirective::ExpectTrigger,
            correct: false,
            correct_answer: "C".into(),
            dice_value: 0,
        }
        .to_json()
        .unwrap();
        assert_eq!(
            json,
            r#"{"action":"answerResult","sub_action":"waitForFist","correct":false,"correctAnswer":"C","diceValue":0}"#
        );
    }

    #[test]
    fn error_reply_releases_the_controller() {
        let json = Broadcast::Error {
            directive: ServerDirective::ExpectTrigger,
            message: "no question is open; roll first".into(),
        }
        .to_json()
        .unwrap();
        let decoded = ServerMessage::decode(&json).unwrap();
        assert_eq!(decoded.directive, Some(ServerDirective::ExpectTrigger));
        assert_eq!(decoded.details.action.as_deref(), Some("error"));
    }
}
