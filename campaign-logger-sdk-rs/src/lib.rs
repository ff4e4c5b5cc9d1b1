pub mod classifier;
pub mod config;
pub mod events;
pub mod form;
pub mod logger;
pub mod path;
pub mod prompts;
pub mod response;
pub mod router;
pub mod wire;

pub use config::BotConfig;
pub use events::{Classification, ConversationContext, EventKind};
pub use response::OutgoingPayload;
pub use router::{EventRouter, RouteObserver, TracingObserver};
