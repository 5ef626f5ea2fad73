//! Logging hooks for webhook traffic.
//!
//! The conversation controller hides webhook failures behind a canned
//! apology, so this trait is the only place the real cause is visible.

use crate::{ChatRequest, Error, WebhookReply};

/// A trait for logging webhook interactions.
///
/// Attach an implementation with [`WebhookClient::with_logger`].
///
/// [`WebhookClient::with_logger`]: crate::WebhookClient::with_logger
pub trait WebhookLogger: Send + Sync {
    /// Called right before a request is POSTed.
    fn log_request(&self, url: &str, request: &ChatRequest);

    /// Called once per successful call with the HTTP status and decoded body.
    fn log_reply(&self, status: u16, reply: &WebhookReply);

    /// Called once per failed call.
    fn log_failure(&self, error: &Error);
}

/// Writes one line per event to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogger;

impl WebhookLogger for StderrLogger {
    fn log_request(&self, url: &str, request: &ChatRequest) {
        eprintln!(
            "[webhook] POST {url} session={} chars={}",
            request.session_id,
            request.chat_input.chars().count()
        );
    }

    fn log_reply(&self, status: u16, reply: &WebhookReply) {
        match reply.text() {
            Some(text) => eprintln!("[webhook] {status} reply chars={}", text.chars().count()),
            None => eprintln!("[webhook] {status} reply without text: {}", reply.body()),
        }
    }

    fn log_failure(&self, error: &Error) {
        eprintln!("[webhook] failed: {error}");
    }
}
