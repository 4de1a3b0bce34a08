//! Role-tagged prompt messages.

use serde::{Deserialize, Serialize};

/// Conversation participant.
///
/// # Examples
///
/// ```
/// use deckhand_core::Role;
///
/// assert_eq!(format!("{}", Role::User), "user");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Messages from the application
    #[display("user")]
    User,
    /// Messages from the model
    #[display("assistant")]
    Assistant,
}

/// A single text message in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
