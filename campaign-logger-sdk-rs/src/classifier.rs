use crate::events::{Classification, ConversationContext, EventKind};
use crate::path::{FieldPath, extract, extract_str};
use crate::wire::markers;
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    static ref DIALOG_TYPE: Regex = Regex::new("(?i)DIALOG|APP_ACTION").expect("valid dialog type pattern");
}

/// A classification rule: the first rule whose predicate holds decides the kind.
struct Rule {
    kind: EventKind,
    matches: fn(&Value) -> bool,
}

/// Ordered most-specific first. A new payload shape is a new row here or a
/// new path in one of the lists below.
const RULES: &[Rule] = &[
    Rule {
        kind: EventKind::ActionSubmit,
        matches: is_submit,
    },
    Rule {
        kind: EventKind::ActionCancel,
        matches: is_cancel,
    },
    Rule {
        kind: EventKind::DialogRequest,
        matches: is_dialog_request,
    },
    Rule {
        kind: EventKind::AddedToSpace,
        matches: is_added_to_space,
    },
    Rule {
        kind: EventKind::Message,
        matches: is_message,
    },
];

const ACTION_METHOD_PATHS: &[FieldPath] = &[
    &["action", "actionMethodName"],
    &["action", "actionMethod", "name"],
    &["action", "function"],
    &["commonEventObject", "invokedFunction"],
    &["common", "invokedFunction"],
    &["chat", "commonEventObject", "invokedFunction"],
];

const DIALOG_EVENT_TYPE_PATHS: &[FieldPath] = &[
    &["dialogEventType"],
    &["chat", "dialogEventType"],
    &["chat", "appCommandPayload", "dialogEventType"],
    &["chat", "buttonClickedPayload", "dialogEventType"],
];

const DIALOG_FLAG_PATHS: &[FieldPath] = &[
    &["isDialogEvent"],
    &["chat", "isDialogEvent"],
    &["chat", "appCommandPayload", "isDialogEvent"],
    &["chat", "buttonClickedPayload", "isDialogEvent"],
];

const EVENT_TYPE_PATHS: &[FieldPath] = &[&["type"], &["chat", "type"]];

const MESSAGE_PATHS: &[FieldPath] = &[
    &["message"],
    &["chat", "message"],
    &["chat", "messagePayload", "message"],
    &["messagePayload", "message"],
];

const MESSAGE_TEXT_PATHS: &[FieldPath] = &[&["argumentText"], &["text"]];

const SPACE_PATHS: &[FieldPath] = &[
    &["chat", "message", "space", "name"],
    &["message", "space", "name"],
    &["chat", "messagePayload", "space", "name"],
    &["messagePayload", "space", "name"],
    &["chat", "messagePayload", "message", "space", "name"],
    &["messagePayload", "message", "space", "name"],
    &["chat", "addedToSpacePayload", "space", "name"],
    &["addedToSpacePayload", "space", "name"],
    &["chat", "appCommandPayload", "space", "name"],
    &["appCommandPayload", "space", "name"],
    &["chat", "buttonClickedPayload", "space", "name"],
    &["space", "name"],
];

const THREAD_PATHS: &[FieldPath] = &[
    &["chat", "message", "thread", "name"],
    &["message", "thread", "name"],
    &["chat", "messagePayload", "thread", "name"],
    &["messagePayload", "thread", "name"],
    &["chat", "messagePayload", "message", "thread", "name"],
    &["messagePayload", "message", "thread", "name"],
    &["chat", "addedToSpacePayload", "thread", "name"],
    &["addedToSpacePayload", "thread", "name"],
    &["chat", "appCommandPayload", "message", "thread", "name"],
    &["chat", "appCommandPayload", "thread", "name"],
    &["appCommandPayload", "message", "thread", "name"],
    &["appCommandPayload", "thread", "name"],
    &["chat", "buttonClickedPayload", "message", "thread", "name"],
    &["thread", "name"],
];

/// Decides what kind of event `raw` is and pulls out its conversation context.
///
/// Never fails: a payload nothing recognizes is `Unknown` with empty text.
pub fn classify(raw: &Value) -> Classification {
    let kind = RULES
        .iter()
        .find(|rule| (rule.matches)(raw))
        .map(|rule| rule.kind)
        .unwrap_or(EventKind::Unknown);

    let raw_text = match kind {
        EventKind::Message => message_text(raw),
        _ => String::new(),
    };

    let context = ConversationContext {
        space_id: extract_str(raw, SPACE_PATHS).map(str::to_string),
        thread_id: extract_thread(raw).map(str::to_string),
        action_method: action_method(raw).map(str::to_string),
        ..ConversationContext::with_text(raw_text)
    };

    Classification { kind, context }
}

pub fn extract_thread(raw: &Value) -> Option<&str> {
    extract_str(raw, THREAD_PATHS)
}

pub fn action_method(raw: &Value) -> Option<&str> {
    extract_str(raw, ACTION_METHOD_PATHS)
}

fn message_text(raw: &Value) -> String {
    extract(raw, MESSAGE_PATHS)
        .and_then(|message| extract_str(message, MESSAGE_TEXT_PATHS))
        .unwrap_or_default()
        .to_string()
}

fn dialog_event_type(raw: &Value) -> Option<&str> {
    extract_str(raw, DIALOG_EVENT_TYPE_PATHS)
}

fn is_submit(raw: &Value) -> bool {
    action_method(raw) == Some(markers::SUBMIT)
}

fn is_cancel(raw: &Value) -> bool {
    action_method(raw) == Some(markers::CANCEL) || dialog_event_type(raw) == Some("CANCEL_DIALOG")
}

fn is_dialog_request(raw: &Value) -> bool {
    let flagged = extract(raw, DIALOG_FLAG_PATHS)
        .and_then(Value::as_bool)
        .unwrap_or(false);

    flagged
        || DIALOG_EVENT_TYPE_PATHS
            .iter()
            .chain(EVENT_TYPE_PATHS)
            .filter_map(|path| extract_str(raw, &[*path]))
            .any(|t| DIALOG_TYPE.is_match(t))
}

fn is_added_to_space(raw: &Value) -> bool {
    let config_complete = raw.get("authorizationEventObject").is_some_and(|v| !v.is_null())
        && extract_str(raw, &[&["configCompleteRedirectUri"]]).is_some();

    config_complete
        || extract_str(raw, EVENT_TYPE_PATHS) == Some("ADDED_TO_SPACE")
        || extract(raw, &[&["chat", "addedToSpacePayload"]]).is_some()
}

fn is_message(raw: &Value) -> bool {
    extract(raw, MESSAGE_PATHS).is_some()
}
