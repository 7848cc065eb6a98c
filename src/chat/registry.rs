//! Explicit per-user session storage.
//!
//! The surrounding application supplies a session identifier; the registry
//! owns one `ChatSession` per identifier with an explicit
//! create/reset/destroy lifecycle. Sessions are created lazily on first
//! use and never outlive the process.

use std::collections::HashMap;
use std::fmt;

use crate::chat::config::ChatConfig;
use crate::chat::session::ChatSession;
use crate::client::SharedClient;

/// Opaque identifier for one user session, chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        SessionId::new(id)
    }
}

/// Owns all live sessions, keyed by caller-supplied identifier.
///
/// Every session created here shares one client handle; each session's
/// message log belongs exclusively to its identifier.
pub struct SessionRegistry {
    client: SharedClient,
    config: ChatConfig,
    sessions: HashMap<SessionId, ChatSession>,
}

impl SessionRegistry {
    /// Creates a registry that hands the shared client to every session.
    pub fn new(client: SharedClient, config: ChatConfig) -> Self {
        Self {
            client,
            config,
            sessions: HashMap::new(),
        }
    }

    /// Returns the session for `id`, creating an empty one on first use.
    pub fn get_or_create(&mut self, id: impl Into<SessionId>) -> &mut ChatSession {
        let id = id.into();
        self.sessions
            .entry(id)
            .or_insert_with(|| ChatSession::new(self.client.clone(), self.config.clone()))
    }

    /// Returns the session for `id`, if it exists.
    pub fn get(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.get(id)
    }

    /// Returns the session for `id` mutably, if it exists.
    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut ChatSession> {
        self.sessions.get_mut(id)
    }

    /// Resets the session for `id`, keeping its configuration.
    ///
    /// Returns false if no such session exists.
    pub fn reset(&mut self, id: &SessionId) -> bool {
        match self.sessions.get_mut(id) {
            Some(session) => {
                session.reset();
                true
            }
            None => false,
        }
    }

    /// Destroys the session for `id` entirely.
    ///
    /// Returns false if no such session exists.
    pub fn destroy(&mut self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// The number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
