//! Infallible wrapper around an advisor.
//!
//! Every failure is logged and replaced by a fixed fallback value, so
//! callers always get something they can show.

use crate::Advisor;
use crate::types::{AdviceError, ChatTurn, TravelChecklist, TravelRequest};

/// Reply used when the chat call fails.
pub const CHAT_FALLBACK: &str = "The connection is unstable, please try again later.";
/// Reply used when the service answers with nothing.
pub const EMPTY_REPLY: &str = "The rain clouds are thick and I didn't quite catch that. Could you say it again?";

/// Checklist used when the advice call fails.
pub fn fallback_checklist() -> TravelChecklist {
    TravelChecklist {
        weather_summary: "Weather data can't be analysed right now.".into(),
        gear: vec!["Umbrella".into(), "Spare clothes".into()],
        safety_tips: vec!["Roads are slippery in the rain, please take care.".into()],
        clothing_recommendation: "A waterproof jacket is recommended.".into(),
    }
}

/// Wraps an optional advisor; without one every call returns the fallback.
pub struct FallbackAdvisor<A> {
    inner: Option<A>,
}

impl<A: Advisor> FallbackAdvisor<A> {
    pub fn new(inner: A) -> Self {
        Self { inner: Some(inner) }
    }

    /// An advisor that is never reachable, e.g. when no API key is set.
    pub fn offline() -> Self {
        Self { inner: None }
    }

    pub fn is_online(&self) -> bool {
        self.inner.is_some()
    }

    /// Travel checklist, or the fixed fallback on any failure.
    pub fn advice(&self, request: &TravelRequest) -> TravelChecklist {
        let Some(inner) = &self.inner else {
            log::warn!("Advice service unavailable, using fallback checklist");
            return fallback_checklist();
        };
        match inner.travel_advice(request) {
            Ok(checklist) => checklist,
            Err(e) => {
                log::error!("Travel advice failed: {e}");
                fallback_checklist()
            }
        }
    }

    /// Chat reply, or a fixed fallback string on any failure.
    pub fn reply(&self, history: &[ChatTurn], message: &str) -> String {
        let Some(inner) = &self.inner else {
            log::warn!("Chat service unavailable, using fallback reply");
            return CHAT_FALLBACK.to_string();
        };
        match inner.chat(history, message) {
            Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(AdviceError::EmptyResponse) => EMPTY_REPLY.to_string(),
            Err(e) => {
                log::error!("Chat failed: {e}");
                CHAT_FALLBACK.to_string()
            }
        }
    }
}
