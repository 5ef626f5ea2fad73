// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod types;
pub mod utils;

// Re-exports
pub use client::{Webhook, WebhookClient};
pub use client_logger::{StderrLogger, WebhookLogger};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
