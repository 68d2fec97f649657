use std::future::Future;
use std::sync::Arc;

use anyhow::Result;

use crate::conversation::{ChatMessage, Conversation};
use crate::gateway::{Advice, AdviceGateway};

/// Shown verbatim when the gateway cannot be reached, as if it were a
/// normal concierge reply.
pub const APOLOGY: &str =
    "I'm currently recalibrating my neural links. Please try again in a moment, or visit our showroom.";

/// Drives the concierge conversation: input capture, optimistic echo of the
/// user's message, gateway round trips, and the typing indicator. The
/// gateway is injected at construction so the live client and test doubles
/// are interchangeable.
pub struct Assistant {
    conversation: Conversation,
    input: String,
    pending: usize,
    gateway: Arc<dyn AdviceGateway>,
}

impl Assistant {
    pub fn new(gateway: Arc<dyn AdviceGateway>) -> Self {
        Assistant {
            conversation: Conversation::new(),
            input: String::new(),
            pending: 0,
            gateway,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn is_typing(&self) -> bool {
        self.pending > 0
    }

    /// True only while the transcript still holds nothing but the welcome
    /// line, which is when starter questions are offered.
    pub fn awaiting_first_question(&self) -> bool {
        self.conversation.len() == 1 && self.pending == 0
    }

    /// Appends the user's message, clears the buffer, and hands back the
    /// gateway round trip for the runtime to drive. Whitespace-only input is
    /// a no-op. The user entry is in the transcript before the returned
    /// future is first polled.
    pub fn submit(&mut self) -> Option<impl Future<Output = Result<Advice>> + Send + 'static> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        // History snapshot taken before the echo: the new input travels
        // separately as the latest turn.
        let history: Vec<ChatMessage> = self.conversation.messages().to_vec();
        self.conversation.push(ChatMessage::user(text.clone()));
        self.input.clear();
        self.pending += 1;

        let gateway = Arc::clone(&self.gateway);
        Some(async move { gateway.advise(&history, &text).await })
    }

    /// Integrates a finished round trip. Failures never escape: any error
    /// becomes the fixed apology entry. Overlapping requests each resolve
    /// here once, and the indicator clears only when none remain in flight.
    pub fn resolve(&mut self, outcome: Result<Advice>) {
        self.pending = self.pending.saturating_sub(1);
        match outcome {
            Ok(advice) => self
                .conversation
                .push(ChatMessage::model(advice.text, advice.sources)),
            Err(e) => {
                if std::env::var("CONCIERGE_DEBUG").is_ok() {
                    eprintln!("concierge: advice request failed: {e:#}");
                }
                self.conversation
                    .push(ChatMessage::model(APOLOGY, Vec::new()));
            }
        }
    }
}
