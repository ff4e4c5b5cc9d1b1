//! Identifiers shared between the dialog the bot sends and the submissions it
//! parses. The platform echoes these back verbatim, so both sides must agree.

/// Form field names, used as widget `name`s and as `FormValues` keys.
pub mod fields {
    pub const PROSPECT_NAME: &str = "prospectName";
    /// Older clients submitted the name under a snake_case key.
    pub const PROSPECT_NAME_ALIAS: &str = "prospect_name";
    pub const EMAIL: &str = "email";
    pub const RESPONSE: &str = "response";
}

/// Action method names bound to the dialog footer buttons.
pub mod markers {
    pub const SUBMIT: &str = "handleSubmit";
    pub const CANCEL: &str = "handleCancel";
}

/// `actionResponse.type` values.
pub mod response_types {
    pub const DIALOG: &str = "DIALOG";
    pub const UPDATE_MESSAGE: &str = "UPDATE_MESSAGE";
}

pub const DIALOG_CARD_ID: &str = "positiveResponseForm";
