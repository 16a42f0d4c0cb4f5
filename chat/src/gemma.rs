//! Chat adapter for the Gemma model family.

use engine::{EngineError, PromptTokenizer, StopConfig, TokenBatch};
use tracing::debug;

use crate::conversation::{Conversation, Turn};
use crate::policy::{Banner, ChatPolicy};
use crate::template::{ChatTemplate, GemmaTemplate};
use crate::types::Message;

#[derive(Clone, Copy, Debug, Default)]
pub struct Gemma {
    template: GemmaTemplate,
}

impl Gemma {
    pub fn new() -> Self {
        Self {
            template: GemmaTemplate,
        }
    }

    /// Flatten `history` plus the live `query` into template messages.
    ///
    /// The walk appends the query as an open turn and stops at the last turn
    /// when its model side is empty: the sequence must end with the
    /// unanswered user message, which is where the template's generation
    /// marker anchors the reply. Earlier turns emit user then model,
    /// skipping empty sides; an earlier turn that is itself missing its
    /// model answer is not special-cased and simply contributes its user
    /// message.
    pub fn messages(query: &str, history: &Conversation) -> Vec<Message> {
        let mut extended = history.turns().to_vec();
        extended.push(Turn::open(query));

        let last = extended.len() - 1;
        let mut messages = Vec::new();
        for (idx, turn) in extended.iter().enumerate() {
            debug!(index = idx, user = ?turn.user, model = ?turn.model, "assembling turn");
            if idx == last && non_empty(&turn.model).is_none() {
                messages.push(Message::user(turn.user.clone().unwrap_or_default()));
                break;
            }
            if let Some(user) = non_empty(&turn.user) {
                messages.push(Message::user(user));
            }
            if let Some(model) = non_empty(&turn.model) {
                messages.push(Message::model(model));
            }
        }
        messages
    }
}

fn non_empty(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|s| !s.is_empty())
}

impl ChatPolicy for Gemma {
    fn input_tokens(
        &self,
        query: &str,
        history: &Conversation,
        tokenizer: &dyn PromptTokenizer,
    ) -> Result<TokenBatch, EngineError> {
        let prompt = self
            .template
            .render(&Self::messages(query, history), true);
        tokenizer.encode(&prompt, true)
    }

    fn stop_ids(&self) -> StopConfig {
        StopConfig::new(vec![vec![2], vec![6], vec![7], vec![8]])
    }

    fn banner(&self) -> Banner {
        Banner {
            title: "webchat".into(),
            subtitle: "Gemma".into(),
        }
    }
}
