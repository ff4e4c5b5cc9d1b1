use crate::form::FormValues;
use crate::prompts;
use crate::wire::{DIALOG_CARD_ID, fields, markers, response_types};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
}

impl FieldKind {
    fn wire_name(self) -> &'static str {
        match self {
            FieldKind::SingleLine => "SINGLE_LINE",
            FieldKind::MultiLine => "MULTIPLE_LINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: String,
    pub name: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSpec {
    pub label: String,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub text: String,
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogPayload {
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub submit_action: ActionSpec,
    pub cancel_action: ActionSpec,
    /// Top-level text for clients that render neither the dialog nor the card.
    pub fallback_text: String,
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPayload {
    pub text: String,
    pub thread_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutgoingPayload {
    Text(TextPayload),
    Dialog(DialogPayload),
    Confirmation(ConfirmationPayload),
}

impl OutgoingPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            OutgoingPayload::Text(_) => "text",
            OutgoingPayload::Dialog(_) => "dialog",
            OutgoingPayload::Confirmation(_) => "confirmation",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            OutgoingPayload::Text(p) => &p.text,
            OutgoingPayload::Dialog(p) => &p.fallback_text,
            OutgoingPayload::Confirmation(p) => &p.text,
        }
    }

    pub fn thread_id(&self) -> Option<&str> {
        match self {
            OutgoingPayload::Text(p) => p.thread_id.as_deref(),
            OutgoingPayload::Dialog(p) => p.thread_id.as_deref(),
            OutgoingPayload::Confirmation(p) => p.thread_id.as_deref(),
        }
    }
}

impl From<TextPayload> for OutgoingPayload {
    fn from(p: TextPayload) -> Self {
        OutgoingPayload::Text(p)
    }
}

impl From<DialogPayload> for OutgoingPayload {
    fn from(p: DialogPayload) -> Self {
        OutgoingPayload::Dialog(p)
    }
}

impl From<ConfirmationPayload> for OutgoingPayload {
    fn from(p: ConfirmationPayload) -> Self {
        OutgoingPayload::Confirmation(p)
    }
}

fn scoped(thread_id: Option<&str>) -> Option<String> {
    thread_id.filter(|t| !t.is_empty()).map(str::to_string)
}

pub fn build_text(text: impl Into<String>, thread_id: Option<&str>) -> TextPayload {
    TextPayload {
        text: text.into(),
        thread_id: scoped(thread_id),
    }
}

/// The "Log Positive Response" form.
pub fn build_dialog(thread_id: Option<&str>) -> DialogPayload {
    DialogPayload {
        title: prompts::DIALOG_TITLE.to_string(),
        fields: vec![
            FieldSpec {
                label: "Prospect Name".to_string(),
                name: fields::PROSPECT_NAME,
                kind: FieldKind::SingleLine,
            },
            FieldSpec {
                label: "Email".to_string(),
                name: fields::EMAIL,
                kind: FieldKind::SingleLine,
            },
            FieldSpec {
                label: "Response".to_string(),
                name: fields::RESPONSE,
                kind: FieldKind::MultiLine,
            },
        ],
        submit_action: ActionSpec {
            label: "Submit".to_string(),
            method: markers::SUBMIT,
        },
        cancel_action: ActionSpec {
            label: "Cancel".to_string(),
            method: markers::CANCEL,
        },
        fallback_text: prompts::DIALOG_FALLBACK_TEXT.to_string(),
        thread_id: scoped(thread_id),
    }
}

pub fn build_confirmation(values: &FormValues, thread_id: Option<&str>) -> ConfirmationPayload {
    let field = |keys: &[&str]| values.first_of(keys).unwrap_or(prompts::MISSING_FIELD);

    let text = format!(
        "{}\n• Name: {}\n• Email: {}\n• Response: {}",
        prompts::CONFIRMATION_HEADER,
        field(&[fields::PROSPECT_NAME, fields::PROSPECT_NAME_ALIAS]),
        field(&[fields::EMAIL]),
        field(&[fields::RESPONSE]),
    );

    ConfirmationPayload {
        text,
        thread_id: scoped(thread_id),
    }
}

// Wire shapes. Field names follow the platform's camelCase JSON.

#[derive(Serialize)]
struct ThreadRef<'a> {
    name: &'a str,
}

fn thread_ref(thread_id: Option<&str>) -> Option<ThreadRef<'_>> {
    thread_id
        .filter(|t| !t.is_empty())
        .map(|name| ThreadRef { name })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    action_response: Option<ActionResponseWire<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cards_v2: Option<[CardWithId<'a>; 1]>,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread: Option<ThreadRef<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionResponseWire<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dialog_action: Option<DialogActionWire<'a>>,
}

#[derive(Serialize)]
struct DialogActionWire<'a> {
    dialog: DialogWire<'a>,
}

#[derive(Serialize)]
struct DialogWire<'a> {
    title: &'a str,
    body: CardWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardWithId<'a> {
    card_id: &'static str,
    card: CardWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<CardHeader<'a>>,
    sections: [SectionWire<'a>; 1],
    fixed_footer: FooterWire<'a>,
}

#[derive(Serialize)]
struct CardHeader<'a> {
    title: &'a str,
}

#[derive(Serialize)]
struct SectionWire<'a> {
    widgets: Vec<WidgetWire<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WidgetWire<'a> {
    text_input: TextInputWire<'a>,
}

#[derive(Serialize)]
struct TextInputWire<'a> {
    label: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FooterWire<'a> {
    primary_button: ButtonWire<'a>,
    secondary_button: ButtonWire<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ButtonWire<'a> {
    text: &'a str,
    on_click: OnClickWire<'a>,
}

#[derive(Serialize)]
struct OnClickWire<'a> {
    action: ButtonActionWire<'a>,
}

/// Card v2 clients read `function`; older clients echo `actionMethodName`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ButtonActionWire<'a> {
    function: &'a str,
    action_method_name: &'a str,
}

impl<'a> ButtonWire<'a> {
    fn from_spec(spec: &'a ActionSpec) -> Self {
        ButtonWire {
            text: &spec.label,
            on_click: OnClickWire {
                action: ButtonActionWire {
                    function: spec.method,
                    action_method_name: spec.method,
                },
            },
        }
    }
}

impl DialogPayload {
    fn card<'a>(&'a self, header: Option<CardHeader<'a>>) -> CardWire<'a> {
        CardWire {
            header,
            sections: [SectionWire {
                widgets: self
                    .fields
                    .iter()
                    .map(|f| WidgetWire {
                        text_input: TextInputWire {
                            label: &f.label,
                            name: f.name,
                            kind: f.kind.wire_name(),
                        },
                    })
                    .collect(),
            }],
            fixed_footer: FooterWire {
                primary_button: ButtonWire::from_spec(&self.submit_action),
                secondary_button: ButtonWire::from_spec(&self.cancel_action),
            },
        }
    }
}

impl Serialize for TextPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MessageWire {
            action_response: None,
            cards_v2: None,
            text: &self.text,
            thread: thread_ref(self.thread_id.as_deref()),
        }
        .serialize(serializer)
    }
}

impl Serialize for DialogPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MessageWire {
            action_response: Some(ActionResponseWire {
                kind: response_types::DIALOG,
                dialog_action: Some(DialogActionWire {
                    dialog: DialogWire {
                        title: &self.title,
                        body: self.card(None),
                    },
                }),
            }),
            cards_v2: Some([CardWithId {
                card_id: DIALOG_CARD_ID,
                card: self.card(Some(CardHeader { title: &self.title })),
            }]),
            text: &self.fallback_text,
            thread: thread_ref(self.thread_id.as_deref()),
        }
        .serialize(serializer)
    }
}

impl Serialize for ConfirmationPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MessageWire {
            action_response: Some(ActionResponseWire {
                kind: response_types::UPDATE_MESSAGE,
                dialog_action: None,
            }),
            cards_v2: None,
            text: &self.text,
            thread: thread_ref(self.thread_id.as_deref()),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn to_json(payload: impl Into<OutgoingPayload>) -> Value {
        serde_json::to_value(payload.into()).unwrap()
    }

    fn widget_names(widgets: &Value) -> Vec<&str> {
        widgets
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["textInput"]["name"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn test_text_payload_shape() {
        assert_eq!(to_json(build_text("hello", None)), json!({ "text": "hello" }));
        assert_eq!(
            to_json(build_text("hello", Some("spaces/A/threads/1"))),
            json!({ "text": "hello", "thread": { "name": "spaces/A/threads/1" } })
        );
        assert_eq!(to_json(build_text("hello", Some(""))), json!({ "text": "hello" }));
    }

    #[test]
    fn test_dialog_carries_every_shape() {
        let json = to_json(build_dialog(None));

        assert_eq!(json["actionResponse"]["type"], "DIALOG");
        let dialog = &json["actionResponse"]["dialogAction"]["dialog"];
        assert_eq!(dialog["title"], "Log Positive Response");
        assert_eq!(
            widget_names(&dialog["body"]["sections"][0]["widgets"]),
            vec!["prospectName", "email", "response"]
        );

        let card = &json["cardsV2"][0]["card"];
        assert_eq!(json["cardsV2"].as_array().unwrap().len(), 1);
        assert_eq!(json["cardsV2"][0]["cardId"], DIALOG_CARD_ID);
        assert_eq!(card["header"]["title"], "Log Positive Response");
        assert_eq!(
            widget_names(&card["sections"][0]["widgets"]),
            vec!["prospectName", "email", "response"]
        );

        assert_eq!(json["text"], prompts::DIALOG_FALLBACK_TEXT);
        assert!(json.get("thread").is_none());
    }

    #[test]
    fn test_dialog_fields_and_footer() {
        let json = to_json(build_dialog(None));
        let body = &json["actionResponse"]["dialogAction"]["dialog"]["body"];
        let widgets = &body["sections"][0]["widgets"];

        assert_eq!(widgets[0]["textInput"]["label"], "Prospect Name");
        assert_eq!(widgets[0]["textInput"]["type"], "SINGLE_LINE");
        assert_eq!(widgets[1]["textInput"]["type"], "SINGLE_LINE");
        assert_eq!(widgets[2]["textInput"]["label"], "Response");
        assert_eq!(widgets[2]["textInput"]["type"], "MULTIPLE_LINE");

        let primary = &body["fixedFooter"]["primaryButton"];
        assert_eq!(primary["text"], "Submit");
        assert_eq!(primary["onClick"]["action"]["actionMethodName"], markers::SUBMIT);
        assert_eq!(primary["onClick"]["action"]["function"], markers::SUBMIT);

        let secondary = &json["cardsV2"][0]["card"]["fixedFooter"]["secondaryButton"];
        assert_eq!(secondary["text"], "Cancel");
        assert_eq!(secondary["onClick"]["action"]["actionMethodName"], markers::CANCEL);
    }

    #[test]
    fn test_confirmation_placeholders() {
        let payload = build_confirmation(&FormValues::new(), None);
        assert_eq!(
            payload.text,
            "✅ Positive Response Logged:\n• Name: -\n• Email: -\n• Response: -"
        );
        assert_eq!(
            to_json(payload),
            json!({
                "actionResponse": { "type": "UPDATE_MESSAGE" },
                "text": "✅ Positive Response Logged:\n• Name: -\n• Email: -\n• Response: -"
            })
        );
    }

    #[test]
    fn test_confirmation_uses_values_and_alias() {
        let values: FormValues = [
            ("prospect_name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("response", ""),
        ]
        .into_iter()
        .collect();

        let payload = build_confirmation(&values, None);
        assert!(payload.text.contains("• Name: Ada Lovelace"));
        assert!(payload.text.contains("• Email: ada@example.com"));
        assert!(payload.text.ends_with("• Response: -"));
    }

    #[test]
    fn test_thread_propagates_to_every_builder() {
        let thread = Some("spaces/A/threads/T");
        let payloads: Vec<OutgoingPayload> = vec![
            build_text("x", thread).into(),
            build_dialog(thread).into(),
            build_confirmation(&FormValues::new(), thread).into(),
        ];
        for payload in payloads {
            assert_eq!(payload.thread_id(), thread);
            assert_eq!(to_json(payload)["thread"]["name"], "spaces/A/threads/T");
        }

        let payloads: Vec<OutgoingPayload> = vec![
            build_text("x", None).into(),
            build_dialog(None).into(),
            build_confirmation(&FormValues::new(), None).into(),
        ];
        for payload in payloads {
            assert!(to_json(payload).get("thread").is_none());
        }
    }
}
