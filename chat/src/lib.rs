//! Conversation model and chat adapters.
//!
//! This crate turns a running conversation into engine-ready input: the
//! [`Conversation`] history, the [`ChatTemplate`] dialogue markup, and the
//! [`ChatPolicy`] strategy trait a generic runner consumes. [`Gemma`] is the
//! shipped adapter for the Gemma model family.

pub mod conversation;
pub mod gemma;
pub mod policy;
pub mod template;
pub mod types;

pub use conversation::{Conversation, Turn};
pub use gemma::Gemma;
pub use policy::{Banner, ChatPolicy};
pub use template::{ChatTemplate, GemmaTemplate};
pub use types::{Message, Role};
