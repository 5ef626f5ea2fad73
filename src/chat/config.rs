//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::chat::quotes::DEFAULT_QUOTE_INTERVAL;
use crate::chat::transcript::DEFAULT_GREETING;
use crate::client::DEFAULT_TIMEOUT;

/// Bot text used when the webhook answered without any recognized field.
pub const DEFAULT_FALLBACK_REPLY: &str = "¡Ánimo! Sigue adelante. 💪";

/// Bot text used when the webhook could not be reached or answered badly.
pub const DEFAULT_ERROR_REPLY: &str = "⚠️ No pude conectarme al servidor. Revisa la URL del webhook. ¡Pero recuerda: los obstáculos son temporales!";

/// Command-line arguments for the animo-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Webhook that answers chat turns.
    #[arrrg(optional, "Webhook URL (default: $ANIMO_WEBHOOK_URL)", "URL")]
    pub webhook_url: Option<String>,

    /// Request timeout in seconds; zero waits forever.
    #[arrrg(optional, "Webhook timeout in seconds, 0 to wait forever (default: 60)", "SECS")]
    pub timeout_secs: Option<u64>,

    /// Replace the opening greeting.
    #[arrrg(optional, "Greeting shown when the chat starts", "TEXT")]
    pub greeting: Option<String>,

    /// Export the transcript here after every turn.
    #[arrrg(optional, "Write the transcript to this file after each turn", "PATH")]
    pub transcript: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log webhook traffic to stderr.
    #[arrrg(flag, "Log webhook requests and failures to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// Webhook URL; `None` defers to the environment.
    pub webhook_url: Option<String>,

    /// Request timeout; `None` waits for the webhook indefinitely.
    pub timeout: Option<Duration>,

    /// The bot's opening message.
    pub greeting: String,

    /// Bot text when a reply carries no recognized field.
    pub fallback_reply: String,

    /// Bot text when the webhook call fails.
    pub error_reply: String,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log webhook traffic to stderr.
    pub verbose: bool,

    /// Path to export the transcript to after each turn.
    pub transcript_path: Option<PathBuf>,

    /// How long each motivational quote stays on screen.
    pub quote_interval: Duration,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Webhook URL: from `ANIMO_WEBHOOK_URL`
    /// - Timeout: 60 seconds
    /// - Color: enabled
    /// - Transcript export: disabled
    pub fn new() -> Self {
        Self {
            webhook_url: None,
            timeout: Some(DEFAULT_TIMEOUT),
            greeting: DEFAULT_GREETING.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            error_reply: DEFAULT_ERROR_REPLY.to_string(),
            use_color: true,
            verbose: false,
            transcript_path: None,
            quote_interval: DEFAULT_QUOTE_INTERVAL,
        }
    }

    /// Sets the webhook URL.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the greeting; a blank greeting keeps the default.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = non_blank(greeting.into(), DEFAULT_GREETING);
        self
    }

    /// Sets the fallback reply; a blank reply keeps the default.
    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = non_blank(reply.into(), DEFAULT_FALLBACK_REPLY);
        self
    }

    /// Sets the error reply; a blank reply keeps the default.
    pub fn with_error_reply(mut self, reply: impl Into<String>) -> Self {
        self.error_reply = non_blank(reply.into(), DEFAULT_ERROR_REPLY);
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables stderr logging of webhook traffic.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Sets the transcript export path.
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        self.transcript_path = path;
        self
    }

    /// Sets the quote rotation interval.
    pub fn with_quote_interval(mut self, interval: Duration) -> Self {
        self.quote_interval = interval;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let timeout = match args.timeout_secs {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(DEFAULT_TIMEOUT),
        };
        let greeting = non_blank(args.greeting.unwrap_or_default(), DEFAULT_GREETING);

        ChatConfig {
            webhook_url: args.webhook_url,
            timeout,
            greeting,
            use_color: !args.no_color,
            verbose: args.verbose,
            transcript_path: args.transcript.map(PathBuf::from),
            ..ChatConfig::new()
        }
    }
}

/// Returns `text` unless it is blank, in which case `default`.
pub(crate) fn non_blank(text: String, default: &str) -> String {
    if text.trim().is_empty() {
        default.to_string()
    } else {
        text
    }
}
