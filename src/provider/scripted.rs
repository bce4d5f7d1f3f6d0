use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Provider;
use crate::errors::{Result, SiteGenError};

/// Offline provider for tests: fixed reply or fixed failure, records calls.
pub struct ScriptedProvider {
    reply: std::result::Result<String, String>,
    calls: AtomicUsize,
    last: Mutex<Option<(String, String)>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self { reply: Ok(text.to_string()), calls: AtomicUsize::new(0), last: Mutex::new(None) }
    }

    pub fn failing(msg: &str) -> Self {
        Self { reply: Err(msg.to_string()), calls: AtomicUsize::new(0), last: Mutex::new(None) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some((system.to_string(), user.to_string()));
        self.reply.clone().map_err(SiteGenError::GenerationService)
    }
}
