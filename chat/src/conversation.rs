use serde::{Deserialize, Serialize};

/// One exchange slot: what the user said and what the model answered.
///
/// Either side may be absent; a turn with no model answer is still awaiting
/// generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: Option<String>,
    pub model: Option<String>,
}

impl Turn {
    /// A turn whose model answer has not been produced yet.
    pub fn open(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            model: None,
        }
    }

    /// A completed user/model exchange.
    pub fn exchange(user: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            model: Some(model.into()),
        }
    }
}

/// Ordered conversation history, insertion order chronological.
///
/// Owned by the chat runner; prompt construction only ever reads it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn push_exchange(&mut self, user: impl Into<String>, model: impl Into<String>) {
        self.turns.push(Turn::exchange(user, model));
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
