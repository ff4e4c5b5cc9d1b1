use crate::classifier::classify;
use crate::config::BotConfig;
use crate::events::{Classification, EventKind};
use crate::form::{self, FormValues};
use crate::response::{OutgoingPayload, build_confirmation, build_dialog, build_text};
use serde_json::Value;
use std::sync::Arc;

/// Receives what the router saw and decided, one call per step.
///
/// The router itself has no side effects; everything it would log goes through
/// here. A surrounding service can also use `on_classified` to pick up the
/// space and thread for follow-up work after the response is sent.
pub trait RouteObserver: Send + Sync {
    fn on_classified(&self, _classification: &Classification) {}
    fn on_form_submitted(&self, _values: &FormValues) {}
    fn on_response(&self, _kind: EventKind, _payload: &OutgoingPayload) {}
}

/// Reports routing steps as `tracing` events.
pub struct TracingObserver;

impl RouteObserver for TracingObserver {
    fn on_classified(&self, classification: &Classification) {
        let ctx = &classification.context;
        tracing::info!(
            kind = classification.kind.as_str(),
            space = ctx.space_id.as_deref().unwrap_or("-"),
            thread = ctx.thread().unwrap_or("-"),
            "Normalized event"
        );
        if let Some(method) = &ctx.action_method {
            tracing::debug!(method = method.as_str(), "Action method");
        }
    }

    fn on_form_submitted(&self, values: &FormValues) {
        match serde_json::to_string(values) {
            Ok(json) => tracing::info!(fields = values.len(), "Form submission data: {}", json),
            Err(e) => tracing::warn!("Could not serialize form data: {}", e),
        }
    }

    fn on_response(&self, kind: EventKind, payload: &OutgoingPayload) {
        tracing::debug!(
            kind = kind.as_str(),
            payload = payload.kind(),
            threaded = payload.thread_id().is_some(),
            "Built response"
        );
    }
}

/// Turns one inbound event into exactly one outgoing payload.
///
/// Holds only configuration, so a single router can be shared across
/// concurrent requests.
pub struct EventRouter {
    config: BotConfig,
    observer: Arc<dyn RouteObserver>,
}

impl EventRouter {
    pub fn new(config: BotConfig) -> Self {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    pub fn with_observer(config: BotConfig, observer: Arc<dyn RouteObserver>) -> Self {
        Self { config, observer }
    }

    pub fn route(&self, raw: &Value) -> OutgoingPayload {
        let classification = classify(raw);
        self.observer.on_classified(&classification);

        let payload = self.dispatch(raw, &classification);
        self.observer.on_response(classification.kind, &payload);
        payload
    }

    fn dispatch(&self, raw: &Value, classification: &Classification) -> OutgoingPayload {
        let ctx = &classification.context;
        let thread = ctx.thread();

        match classification.kind {
            EventKind::AddedToSpace => build_text(&self.config.welcome_message, None).into(),
            EventKind::Message if self.config.triggers.matches(&ctx.text) => self.dialog(thread),
            EventKind::Message => build_text(&self.config.fallback_prompt, thread).into(),
            EventKind::DialogRequest => self.dialog(thread),
            EventKind::ActionSubmit => {
                let values = form::parse(raw);
                self.observer.on_form_submitted(&values);
                build_confirmation(&values, thread).into()
            }
            EventKind::ActionCancel => build_text(&self.config.cancelled_message, thread).into(),
            EventKind::Unknown if ctx.action_method.is_some() => {
                build_text(&self.config.action_received_message, thread).into()
            }
            EventKind::Unknown => build_text(&self.config.diagnostic_message, None).into(),
        }
    }

    fn dialog(&self, thread: Option<&str>) -> OutgoingPayload {
        let mut dialog = build_dialog(thread);
        dialog.fallback_text = self.config.dialog_fallback_text.clone();
        dialog.into()
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}
