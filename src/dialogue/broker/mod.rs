//! Reply broker trait and the Gemini-backed implementation.

pub mod config;
pub mod gemini;

pub use gemini::GeminiReplyBroker;

use std::sync::Arc;

use bevy::prelude::Resource;

use super::{errors::ReplyError, types::ReplyRequest};

/// Contract every reply backend must satisfy. Called from a background
/// thread, so implementations must be shareable.
pub trait ReplyBroker: Send + Sync + 'static {
    /// Human-readable provider label for logging.
    fn provider_label(&self) -> &'static str;

    /// Produces the NPC's reply text for one exchange.
    fn generate_reply(&self, request: &ReplyRequest) -> Result<String, ReplyError>;
}

/// Resource holding the broker shared with reply worker threads.
#[derive(Resource, Clone)]
pub struct ActiveReplyBroker(pub Arc<dyn ReplyBroker>);

impl ActiveReplyBroker {
    pub fn new(broker: Arc<dyn ReplyBroker>) -> Self {
        Self(broker)
    }

    pub fn provider_label(&self) -> &'static str {
        self.0.provider_label()
    }
}
