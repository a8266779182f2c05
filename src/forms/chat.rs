use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::assistant::{ChatRole, ChatTurn};

const MESSAGE_MAX_LEN_VALIDATOR: u64 = 4000;

/// Only the most recent turns are forwarded to the model.
pub const MAX_HISTORY_TURNS: usize = 20;

pub type ChatFormResult<T> = Result<T, ChatFormError>;

#[derive(Debug, Error)]
pub enum ChatFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("message cannot be empty")]
    EmptyMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatTurnForm {
    pub role: ChatRole,
    #[serde(alias = "text")]
    pub content: String,
}

/// Message sent from the assistant chat widget.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatForm {
    #[validate(length(max = MESSAGE_MAX_LEN_VALIDATOR))]
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurnForm>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

impl ChatForm {
    pub fn into_request(self) -> ChatFormResult<ChatRequest> {
        self.validate()?;

        let message = self.message.trim().to_string();
        if message.is_empty() {
            return Err(ChatFormError::EmptyMessage);
        }

        let mut history: Vec<ChatTurn> = self
            .history
            .into_iter()
            .filter_map(|turn| {
                let text = turn.content.trim();
                (!text.is_empty()).then(|| ChatTurn::new(turn.role, text))
            })
            .collect();

        if history.len() > MAX_HISTORY_TURNS {
            history.drain(..history.len() - MAX_HISTORY_TURNS);
        }

        Ok(ChatRequest { message, history })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_form_trims_and_caps_history() {
        let history: Vec<ChatTurnForm> = (0..25)
            .map(|index| ChatTurnForm {
                role: if index % 2 == 0 {
                    ChatRole::User
                } else {
                    ChatRole::Model
                },
                content: format!(" turn {index} "),
            })
            .collect();
        let form = ChatForm {
            message: "  What is vegan?  ".to_string(),
            history,
        };

        let request = form.into_request().expect("expected success");

        assert_eq!(request.message, "What is vegan?");
        assert_eq!(request.history.len(), MAX_HISTORY_TURNS);
        assert_eq!(request.history[0].text, "turn 5");
        assert_eq!(request.history[19].text, "turn 24");
    }

    #[test]
    fn chat_form_accepts_assistant_alias() {
        let form: ChatForm = serde_json::from_str(
            r#"{"message":"hi","history":[{"role":"assistant","text":"Hello!"},{"role":"user","content":"  "}]}"#,
        )
        .expect("valid json");

        let request = form.into_request().expect("expected success");

        assert_eq!(request.history, vec![ChatTurn::new(ChatRole::Model, "Hello!")]);
    }

    #[test]
    fn chat_form_rejects_blank_message() {
        let form = ChatForm {
            message: "   ".to_string(),
            history: Vec::new(),
        };

        assert!(matches!(
            form.into_request(),
            Err(ChatFormError::EmptyMessage)
        ));
    }
}
