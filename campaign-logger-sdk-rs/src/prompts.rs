pub const WELCOME_MESSAGE: &str =
    "🤖 Campaign Logger Bot added! Type /positive or say 'hi' to open the form.";

pub const FALLBACK_PROMPT: &str = "Got your message — type /positive or 'hi' to open the form.";

pub const CANCELLED_MESSAGE: &str = "❌ Cancelled logging.";

pub const DIAGNOSTIC_MESSAGE: &str = "diagnostic: event received";

pub const ACTION_RECEIVED_MESSAGE: &str = "Action received.";

pub const ERROR_MESSAGE: &str = "⚠️ Error processing request on server.";

pub const DIALOG_TITLE: &str = "Log Positive Response";

/// Shown by clients that cannot render the dialog or the card.
pub const DIALOG_FALLBACK_TEXT: &str = "Opening the positive response form...";

pub const CONFIRMATION_HEADER: &str = "✅ Positive Response Logged:";

/// Placeholder for a form field the user left out.
pub const MISSING_FIELD: &str = "-";
