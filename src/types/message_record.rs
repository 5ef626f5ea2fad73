use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::utils::time::{clock_label, now, rfc3339};

/// Who produced a message.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text the person at the keyboard typed.
    User,
    /// Text that came back from the webhook, or a canned fallback.
    Bot,
}

impl Role {
    /// Returns true for bot messages.
    pub fn is_bot(&self) -> bool {
        matches!(self, Role::Bot)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Bot => write!(f, "bot"),
        }
    }
}

/// One line of the conversation.
///
/// Records are immutable: every field is fixed at construction and only
/// readable afterwards.  The `time` label is captured once so a transcript
/// re-rendered later shows the original clock reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageRecord {
    role: Role,
    text: String,
    time: String,
    #[serde(with = "rfc3339")]
    created_at: OffsetDateTime,
}

impl MessageRecord {
    /// Create a record stamped with the current local time.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, now())
    }

    /// Create a record stamped with `created_at`.
    pub fn at(role: Role, text: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            role,
            text: text.into(),
            time: clock_label(&created_at),
            created_at,
        }
    }

    /// Create a user record stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a bot record stamped now.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }

    /// Who produced this message.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The displayed content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The `HH:MM` label captured at creation.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// The instant this record was created.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
