//! Canopy Advice Library
//!
//! Rainy-day travel checklists and chat replies from a hosted generative
//! model. Calls are blocking, single-attempt and never retried; wrap an
//! advisor in [`FallbackAdvisor`] to get fixed fallbacks instead of errors.

pub mod config;
pub mod fallback;
pub mod gemini;
pub mod types;

pub use config::{AdviceConfig, ConfigError};
pub use fallback::{CHAT_FALLBACK, EMPTY_REPLY, FallbackAdvisor, fallback_checklist};
pub use gemini::GeminiAdvisor;
pub use types::{AdviceError, AdviceResult, ChatRole, ChatTurn, TravelChecklist, TravelRequest};

/// A source of travel advice and chat replies.
pub trait Advisor {
    /// Structured checklist for a trip.
    fn travel_advice(&self, request: &TravelRequest) -> AdviceResult<TravelChecklist>;

    /// Reply to `message` given the prior conversation.
    fn chat(&self, history: &[ChatTurn], message: &str) -> AdviceResult<String>;
}
