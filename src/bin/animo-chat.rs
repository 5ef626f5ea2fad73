//! Interactive terminal chat with a webhook-backed motivational coach.
//!
//! # Usage
//!
//! ```bash
//! # Webhook from the environment
//! ANIMO_WEBHOOK_URL=https://n8n.example.com/webhook/<id>/chat animo-chat
//!
//! # Explicit webhook, no timeout
//! animo-chat --webhook-url http://localhost:5678/webhook/<id>/chat --timeout-secs 0
//!
//! # Disable colors (useful for piping output)
//! animo-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/history` - Print the conversation so far
//! - `/session` - Show the session token
//! - `/stats` - Show session statistics
//! - `/save <path>` - Save the transcript as JSON
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use animo::chat::{
    ChatArgs, ChatCommand, ChatConfig, ConversationController, PlainTextRenderer, QuoteRotator,
    Renderer, continued_line, help_text, parse_command,
};
use animo::{StderrLogger, WebhookClient};

/// Main entry point for the animo-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("animo-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;
    let quote_interval = config.quote_interval;

    let mut client = WebhookClient::with_options(config.webhook_url.clone(), config.timeout)?;
    if config.verbose {
        client = client.with_logger(Arc::new(StderrLogger));
    }
    let webhook_host = client.url().host_str().unwrap_or("webhook").to_string();

    let controller = ConversationController::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut quotes = QuoteRotator::new(quote_interval, Instant::now());
    let mut rl = DefaultEditor::new()?;

    // A reply in flight always runs to completion; Ctrl+C only gets noted.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Coach Motivacional IA (webhook: {})", webhook_host);
    println!("Type /help for commands, /quit to exit\n");
    renderer.print_banner(quotes.current());
    controller.render_transcript(&mut renderer);

    let mut draft = String::new();
    loop {
        interrupted.store(false, Ordering::Relaxed);
        if let Some(quote) = quotes.tick(Instant::now()) {
            renderer.print_banner(quote);
        }

        let prompt = if draft.is_empty() { "Tú: " } else { "...  " };
        let readline = rl.readline(prompt);

        match readline {
            Ok(line) => {
                if let Some(head) = continued_line(&line) {
                    draft.push_str(head);
                    draft.push('\n');
                    continue;
                }
                draft.push_str(&line);
                let input = std::mem::take(&mut draft);
                if input.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(input.trim());

                // Check for slash commands
                if let Some(cmd) = parse_command(&input) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("¡Hasta pronto!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::History => {
                            controller.render_transcript(&mut renderer);
                        }
                        ChatCommand::Session => {
                            renderer.print_info(&format!(
                                "Session: {}",
                                controller.session_token()
                            ));
                        }
                        ChatCommand::Quote => {
                            renderer.print_banner(quotes.current());
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match controller.save_transcript_to(&path) {
                                Ok(_) => {
                                    renderer.print_info(&format!("Transcript saved to {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to save transcript: {}", err)),
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&controller);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the webhook
                controller.set_draft(input);
                controller.send_draft(&mut renderer).await;
                if interrupted.load(Ordering::Relaxed) {
                    renderer.print_info("(Ctrl+C ignored while waiting for the reply)");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - drop any continued draft
                draft.clear();
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\n¡Hasta pronto!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats<W: animo::Webhook>(controller: &ConversationController<W>) {
    let stats = controller.stats();
    let config = controller.config();
    println!("    Session Statistics:");
    println!("      Session: {}", stats.session_id);
    println!(
        "      Messages: {} ({} from you, {} from the coach)",
        stats.message_count, stats.user_messages, stats.bot_messages
    );
    println!(
        "      Turns: {} replied / {} fallback / {} failed",
        stats.turns_replied, stats.turns_fallback, stats.turns_failed
    );
    println!("      Skipped sends: {}", stats.sends_skipped);
    match config.timeout {
        Some(timeout) => println!("      Timeout: {}s", timeout.as_secs()),
        None => println!("      Timeout: (none)"),
    }
    match config.transcript_path {
        Some(ref path) => println!("      Transcript file: {}", path.display()),
        None => println!("      Transcript file: (disabled)"),
    }
}
