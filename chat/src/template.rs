//! Dialogue markup for prompt text.

use crate::types::{Message, Role};

/// Converts role-tagged messages into a model family's dialogue markup.
///
/// With `add_generation_prompt` the rendered text ends in the marker that
/// tells the model where its reply begins.
pub trait ChatTemplate: Send + Sync {
    fn render(&self, messages: &[Message], add_generation_prompt: bool) -> String;
}

/// Gemma turn markup (`<start_of_turn>` / `<end_of_turn>`).
///
/// No BOS here; boundary specials are the tokenizer's job.
#[derive(Clone, Copy, Debug, Default)]
pub struct GemmaTemplate;

impl ChatTemplate for GemmaTemplate {
    fn render(&self, messages: &[Message], add_generation_prompt: bool) -> String {
        let mut out = String::new();
        for message in messages {
            let role = match message.role {
                Role::User => "user",
                Role::Model => "model",
            };
            out.push_str("<start_of_turn>");
            out.push_str(role);
            out.push('\n');
            out.push_str(&message.content);
            out.push_str("<end_of_turn>\n");
        }
        if add_generation_prompt {
            out.push_str("<start_of_turn>model\n");
        }
        out
    }
}
