//! Interactive chat against a webhook-backed bot.
//!
//! This module provides the conversation core and a terminal front-end:
//!
//! - A single-flight conversation controller with an append-only transcript
//! - ANSI-styled rendering with a typing indicator
//! - Slash commands for inspecting the session
//! - A rotating motivational quote banner
//!
//! # Architecture
//!
//! - [`controller`]: sending turns, owning the transcript and typing state
//! - [`transcript`]: the append-only message history
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash command parsing
//! - [`render`]: the renderer trait and its plain-text implementation
//! - [`quotes`]: the decorative quote rotation

mod commands;
mod config;
mod controller;
mod quotes;
mod render;
mod transcript;

pub use commands::{ChatCommand, continued_line, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_ERROR_REPLY, DEFAULT_FALLBACK_REPLY};
pub use controller::{ConversationController, SendOutcome, SessionStats, SkipReason, TurnState};
pub use quotes::{DEFAULT_QUOTE_INTERVAL, MOTIVATIONAL_QUOTES, QuoteRotator};
pub use render::{PlainTextRenderer, Renderer, format_record};
pub use transcript::{DEFAULT_GREETING, Transcript};
