// File: src/csrf.rs
// Purpose: Per-form CSRF tokens kept in the caller's session

use crate::error::ForgeryReason;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Bytes of randomness in a token, before encoding
pub const TOKEN_BYTES: usize = 32;

/// Where issued tokens live between rendering a form and receiving it.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);
}

/// In-memory session, for tests and single-process apps
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Generate a fresh token: random bytes, standard base64.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Token stored under `key`, issuing and storing a new one if absent.
pub fn issue_token(session: &mut dyn SessionStore, key: &str) -> String {
    if let Some(token) = session.get(key) {
        return token;
    }

    let token = generate_token();
    session.set(key, token.clone());
    debug!(key, "issued CSRF token");
    token
}

/// Check a submitted token against the one stored under `key`.
pub fn verify(
    session: &dyn SessionStore,
    key: &str,
    submitted: Option<&str>,
) -> Result<(), ForgeryReason> {
    let result = match (submitted, session.get(key)) {
        (None, _) => Err(ForgeryReason::MissingFromInput),
        (Some(""), _) => Err(ForgeryReason::EmptyInInput),
        (Some(_), None) => Err(ForgeryReason::MissingFromSession),
        (Some(submitted), Some(stored)) if tokens_match(submitted, &stored) => Ok(()),
        (Some(_), Some(_)) => Err(ForgeryReason::Invalid),
    };

    if let Err(reason) = &result {
        warn!(key, %reason, "rejected CSRF token");
    }
    result
}

/// Compare without stopping at the first differing byte
fn tokens_match(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
