use serde::Serialize;
use std::fmt;

/// The canonical kind of an inbound event. Exactly one per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    AddedToSpace,
    Message,
    DialogRequest,
    ActionSubmit,
    ActionCancel,
    Unknown,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::AddedToSpace => "ADDED_TO_SPACE",
            EventKind::Message => "MESSAGE",
            EventKind::DialogRequest => "DIALOG_REQUEST",
            EventKind::ActionSubmit => "ACTION_SUBMIT",
            EventKind::ActionCancel => "ACTION_CANCEL",
            EventKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an event happened and what the user said, normalized across every
/// payload shape the platform has used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationContext {
    pub space_id: Option<String>,
    pub thread_id: Option<String>,
    /// Lower-cased and trimmed, for trigger matching.
    pub text: String,
    /// The text as the user typed it.
    pub raw_text: String,
    /// The action method the payload carried, recognized or not.
    pub action_method: Option<String>,
}

impl ConversationContext {
    pub fn with_text(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        Self {
            text: raw_text.trim().to_lowercase(),
            raw_text,
            ..Self::default()
        }
    }

    pub fn thread(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: EventKind,
    pub context: ConversationContext,
}
