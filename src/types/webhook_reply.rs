use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields checked, in order, for the reply text.
///
/// `output` is what an n8n Chat Trigger returns; the others cover common
/// hand-written workflows.
pub const REPLY_FIELDS: [&str; 4] = ["output", "text", "message", "response"];

/// A decoded webhook response body.
///
/// The webhook may answer with any JSON value.  Only objects carrying one of
/// [`REPLY_FIELDS`] as a non-empty string yield reply text; every other shape
/// is accepted and simply has none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct WebhookReply(Value);

impl WebhookReply {
    /// Wrap an already-decoded body.
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    /// The reply text, if any recognized field carries one.
    pub fn text(&self) -> Option<&str> {
        REPLY_FIELDS
            .iter()
            .filter_map(|field| self.field(field))
            .next()
    }

    /// Like [`WebhookReply::text`], substituting `fallback` when nothing matched.
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.text().unwrap_or(fallback)
    }

    /// The raw body.
    pub fn body(&self) -> &Value {
        &self.0
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }
}

impl From<Value> for WebhookReply {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}
