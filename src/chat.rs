//! Chat widget: transcript, `/chat` wire types and request flow.

use crate::api::{ApiClient, ApiResult, Validate};
use crate::i18n::{self, Language};
use crate::request_flow::{Dispatch, RequestFlow};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Assistant text appended when a chat request fails.
///
/// Deliberately the same in every language.
pub const FALLBACK_REPLY: &str = "Sorry, I'm having trouble connecting. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl Validate for ChatReply {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// POST the whole transcript to `/chat`.
pub async fn send_chat(client: &ApiClient, request: ChatRequest) -> ApiResult<ChatReply> {
    client.post_json("/chat", &request).await
}

/// Draft input, transcript and the chat request flow.
///
/// The transcript only grows. Dropping the widget cancels its in-flight
/// request.
pub struct ChatWidget {
    client: ApiClient,
    transcript: Mutex<Vec<ChatTurn>>,
    input: Mutex<String>,
    flow: RequestFlow<ChatReply>,
}

impl ChatWidget {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            transcript: Mutex::new(Vec::new()),
            input: Mutex::new(String::new()),
            flow: RequestFlow::new("chat"),
        }
    }

    fn transcript_lock(&self) -> MutexGuard<'_, Vec<ChatTurn>> {
        self.transcript
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn input_lock(&self) -> MutexGuard<'_, String> {
        self.input.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.transcript_lock().clone()
    }

    pub fn input(&self) -> String {
        self.input_lock().clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        *self.input_lock() = text.into();
    }

    /// Whether a reply is pending; the send trigger is disabled meanwhile.
    pub fn is_busy(&self) -> bool {
        self.flow.is_in_flight()
    }

    /// Greeting shown above the transcript.
    pub fn welcome(&self, language: Language) -> &'static str {
        i18n::lookup(language, "chat_welcome")
    }

    /// Busy indicator text, if a reply is pending.
    pub fn thinking_indicator(&self, language: Language) -> Option<&'static str> {
        self.is_busy()
            .then(|| i18n::lookup(language, "chat_thinking"))
    }

    /// Hint shown in the empty input field.
    pub fn placeholder(&self, language: Language) -> &'static str {
        i18n::lookup(language, "chat_placeholder")
    }

    /// Send the draft input as a user turn.
    pub async fn submit_input(&self, language: Language) -> Dispatch<ChatReply> {
        let text = self.input();
        self.send_turn(&text, language).await
    }

    /// Append a user turn and exchange it for one assistant turn.
    ///
    /// A no-op for blank text or while a reply is pending. The user turn is
    /// appended and the input cleared before any network activity. The
    /// assistant turn is the service's reply or `FALLBACK_REPLY`.
    pub async fn send_turn(&self, text: &str, language: Language) -> Dispatch<ChatReply> {
        let text = text.trim();
        if text.is_empty() {
            debug!("chat: ignoring blank message");
            return Dispatch::Skipped;
        }
        // Claimed before the user turn goes in, so every appended user turn
        // gets exactly one assistant turn.
        let Some(ticket) = self.flow.reserve() else {
            debug!("chat: reply pending, ignoring message");
            return Dispatch::Skipped;
        };

        let messages = {
            let mut transcript = self.transcript_lock();
            transcript.push(ChatTurn::user(text));
            transcript.clone()
        };
        self.input_lock().clear();

        let request = ChatRequest { messages, language };
        let dispatch = ticket.run(send_chat(&self.client, request)).await;

        match &dispatch {
            Dispatch::Succeeded(reply) => {
                self.transcript_lock()
                    .push(ChatTurn::assistant(reply.reply.as_str()));
            }
            Dispatch::Failed(_) => {
                self.transcript_lock()
                    .push(ChatTurn::assistant(FALLBACK_REPLY));
            }
            Dispatch::Skipped | Dispatch::Cancelled => {}
        }

        dispatch
    }

    /// Abort the pending reply, if any.
    pub fn cancel(&self) {
        self.flow.cancel();
    }
}

impl Drop for ChatWidget {
    fn drop(&mut self) {
        self.flow.cancel();
    }
}
