//! Question bank and round state.

use crate::protocol::Broadcast;
use handcue_core::{ServerDirective, ZoneId};
use rand::Rng;

pub const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 4],
    pub answer: &'static str,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        text: "What is the capital of France?",
        options: ["Berlin", "Madrid", "Paris", "Rome"],
        answer: "C",
    },
    Question {
        text: "Which planet is known as the Red Planet?",
        options: ["Earth", "Mars", "Jupiter", "Venus"],
        answer: "B",
    },
    Question {
        text: "What is the largest ocean on Earth?",
        options: ["Atlantic", "Indian", "Arctic", "Pacific"],
        answer: "D",
    },
    Question {
        text: "Who wrote 'Romeo and Juliet'?",
        options: ["Charles Dickens", "William Shakespeare", "Jane Austen", "Mark Twain"],
        answer: "B",
    },
    Question {
        text: "What is the chemical symbol for water?",
        options: ["O2", "CO2", "H2O", "NaCl"],
        answer: "C",
    },
    Question {
        text: "How many continents are there?",
        options: ["5", "6", "7", "8"],
        answer: "C",
    },
];

/// An open question waiting for an answer.
struct Round {
    question: &'static Question,
    dice_value: u32,
}

#[derive(Default)]
pub struct Quiz {
    round: Option<Round>,
    pub rounds_played: u64,
}

impl Quiz {
    /// Roll the die and open a new round, replacing any unanswered one.
    pub fn roll(&mut self, rng: &mut impl Rng) -> Broadcast {
        let dice_value = rng.gen_range(1..=6);
        let question = &QUESTIONS[rng.gen_range(0..QUESTIONS.len())];
        self.round = Some(Round {
            question,
            dice_value,
        });
        Broadcast::ShowQuiz {
            directive: ServerDirective::ExpectChoice,
            dice_value,
            question: question.text.to_string(),
            options: question.options.map(String::from).to_vec(),
        }
    }

    /// Judge an answer and close the round. The dice value only counts when
    /// the answer is right. With no round open the reply sends the controller
    /// back to rolling.
    pub fn answer(&mut self, answer: &ZoneId) -> Broadcast {
        let Some(round) = self.round.take() else {
            return Broadcast::Error {
                directive: ServerDirective::ExpectTrigger,
                message: "no question is open; roll first".to_string(),
            };
        };
        self.rounds_played += 1;
        let correct = answer.as_str() == round.question.answer;
        Broadcast::AnswerResult {
            directive: ServerDirective::ExpectTrigger,
            correct,
            correct_answer: round.question.answer.to_string(),
            dice_value: if correct { round.dice_value } else { 0 },
        }
    }
}
