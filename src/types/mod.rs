// Public modules
pub mod chat_request;
pub mod message_record;
pub mod session_token;
pub mod webhook_reply;

// Re-exports
pub use chat_request::ChatRequest;
pub use message_record::{MessageRecord, Role};
pub use session_token::SessionToken;
pub use webhook_reply::{REPLY_FIELDS, WebhookReply};
