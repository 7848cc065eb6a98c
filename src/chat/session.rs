//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns one user's
//! message log and drives streaming API interactions against a shared
//! client.

use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::chat::config::ChatConfig;
use crate::client::SharedClient;
use crate::error::Result;
use crate::fragment::{self, TextFragment, TurnOutcome};
use crate::render::Renderer;
use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, Model, Role, UsageMetadata,
};

/// One entry of the message log.
///
/// Immutable once appended; insertion order is the display and replay
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the entry.
    pub role: Role,
    /// The entry's text.
    pub content: String,
}

impl Message {
    /// Creates a user entry.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant entry.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

/// A chat session bound to one model and temperature.
///
/// The session holds the ordered message log and replays it as request
/// context on every turn. The log alternates user/assistant by
/// construction: each turn appends the user prompt and exactly one
/// assistant reply, and nothing else ever appends. `reset` replaces the
/// log wholesale.
pub struct ChatSession {
    client: SharedClient,
    config: ChatConfig,
    messages: Vec<Message>,
    usage_totals: UsageMetadata,
    last_turn_usage: Option<UsageMetadata>,
    request_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The model used for the session.
    pub model: Model,
    /// The sampling temperature.
    pub temperature: f32,
    /// The number of messages in the log.
    pub message_count: usize,
    /// Total number of API requests made.
    pub total_requests: u64,
    /// Total prompt tokens across all requests.
    pub total_prompt_tokens: u64,
    /// Total reply tokens across all requests.
    pub total_reply_tokens: u64,
    /// Usage reported for the last turn, if the stream delivered it.
    pub last_turn_usage: Option<UsageMetadata>,
}

impl ChatSession {
    /// Creates a new, empty session against the shared client.
    pub fn new(client: SharedClient, config: ChatConfig) -> Self {
        Self {
            client,
            config,
            messages: Vec::new(),
            usage_totals: UsageMetadata::default(),
            last_turn_usage: None,
            request_count: 0,
        }
    }

    /// Sends a user prompt and streams the reply.
    ///
    /// This method:
    /// 1. Issues a streaming request carrying the full log plus the prompt
    /// 2. Appends the user prompt to the log
    /// 3. Renders reply fragments as they arrive
    /// 4. Appends the accumulated reply as one assistant message
    ///
    /// A transport failure mid-stream ends the turn early: the partial
    /// reply is kept and appended exactly as a complete one would be, and
    /// the interruption is reported through the returned [`TurnOutcome`]
    /// rather than the log.
    ///
    /// # Errors
    ///
    /// Returns an error only when the request fails before any streaming
    /// begins; in that case the log is unchanged.
    pub async fn send_streaming(
        &mut self,
        prompt: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<TurnOutcome> {
        let request = self.build_request(prompt);
        let chunks = self
            .client
            .client()
            .stream_generate(&self.config.model, request)
            .await?;
        self.request_count += 1;

        let mut usage: Option<UsageMetadata> = None;
        let chunks = chunks.inspect(|chunk| {
            if let Ok(chunk) = chunk
                && let Some(reported) = chunk.usage_metadata
            {
                usage = Some(reported);
            }
        });
        let outcome = self
            .stream_turn(prompt, fragment::fragments(chunks), renderer)
            .await;
        self.record_usage(usage);
        Ok(outcome)
    }

    /// Drives one turn from an already-open fragment sequence.
    ///
    /// Appends the user prompt, renders each fragment, and appends the
    /// accumulated text as the assistant reply. Both terminal states of the
    /// stream append identically; an interrupted turn leaves no error
    /// marker in the log.
    pub async fn stream_turn<S>(
        &mut self,
        prompt: &str,
        fragments: S,
        renderer: &mut dyn Renderer,
    ) -> TurnOutcome
    where
        S: Stream<Item = Result<TextFragment>>,
    {
        self.messages.push(Message::user(prompt));

        renderer.begin_message(Role::Model);
        let outcome = fragment::drive_turn(fragments, renderer).await;
        renderer.finish_message();

        self.messages.push(Message::assistant(outcome.text()));
        outcome
    }

    /// Sends a user prompt and returns the complete reply, non-streaming.
    ///
    /// The log is updated exactly as in [`send_streaming`]; on error the
    /// log is unchanged.
    pub async fn send(&mut self, prompt: &str) -> Result<String> {
        let request = self.build_request(prompt);
        let response = self
            .client
            .client()
            .generate(&self.config.model, request)
            .await?;
        self.request_count += 1;
        self.record_usage(response.usage_metadata);

        let reply = response.text();
        self.messages.push(Message::user(prompt));
        self.messages.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Replays the whole message log through the renderer, in order.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        for message in &self.messages {
            renderer.begin_message(message.role);
            renderer.print_text(&message.content);
            renderer.finish_message();
        }
    }

    /// Discards the conversation and starts over with the same config.
    ///
    /// The old log is dropped wholesale; the new one shares no entries
    /// with it.
    pub fn reset(&mut self) {
        self.messages = Vec::new();
        self.last_turn_usage = None;
    }

    /// Resets the session onto a different model.
    ///
    /// Model and temperature are fixed for a session's lifetime, so
    /// changing the model means a fresh conversation.
    pub fn reset_with_model(&mut self, model: Model) {
        self.config.model = model;
        self.reset();
    }

    /// Resets the session onto a different temperature.
    pub fn reset_with_temperature(&mut self, temperature: f32) {
        self.config.temperature = temperature;
        self.reset();
    }

    /// Returns the message log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the log.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the current model.
    pub fn model(&self) -> &Model {
        &self.config.model
    }

    /// Returns the sampling temperature.
    pub fn temperature(&self) -> f32 {
        self.config.temperature
    }

    /// Returns the shared client handle this session uses.
    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            message_count: self.message_count(),
            total_requests: self.request_count,
            total_prompt_tokens: self.usage_totals.prompt_token_count,
            total_reply_tokens: self.usage_totals.candidates_token_count,
            last_turn_usage: self.last_turn_usage,
        }
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = self
            .messages
            .iter()
            .map(|m| Content::new(m.role, m.content.clone()))
            .collect();
        contents.push(Content::user(prompt));
        GenerateContentRequest::new(contents)
            .with_generation_config(GenerationConfig::with_temperature(self.config.temperature))
    }

    fn record_usage(&mut self, usage: Option<UsageMetadata>) {
        self.last_turn_usage = usage;
        if let Some(usage) = usage {
            self.usage_totals = self.usage_totals + usage;
        }
    }
}
