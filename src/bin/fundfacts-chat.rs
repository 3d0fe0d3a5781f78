//! Interactive chat for the Facts-Only MF Assistant.
//!
//! This binary provides a REPL interface for asking factual questions about
//! mutual-fund scheme details. Every grounded answer is annotated with its
//! source citation; refusals carry an investor-education link.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the local development service
//! fundfacts-chat
//!
//! # Point at a deployed service
//! fundfacts-chat --base-url https://mf-facts.example.com
//!
//! # Auto-save the transcript after every answer
//! fundfacts-chat --transcript chat.json
//!
//! # Disable colors (useful for piping output)
//! fundfacts-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/examples` - List the suggested questions
//! - `/ask <n>` - Submit suggested question n
//! - `/health` - Check service liveness
//! - `/clear` - Clear conversation history
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::path::PathBuf;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use fundfacts::FundFacts;
use fundfacts::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, EXAMPLE_QUESTIONS, PlainTextRenderer,
    Renderer, SessionStats, help_text, parse_command,
};

/// Main entry point for the fundfacts-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("fundfacts-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = FundFacts::with_options(config.base_url.clone(), config.timeout)?;
    // The session owns one client; this clone serves the liveness and admin
    // commands outside the conversation path.
    let service = client.clone();
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    renderer.print_welcome(EXAMPLE_QUESTIONS);
    renderer.print_health(service.check_health().await);
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::Examples => {
                            print_examples(&mut renderer);
                        }
                        ChatCommand::Ask(n) => {
                            match EXAMPLE_QUESTIONS.get(n - 1) {
                                Some(question) => {
                                    renderer.print_user(question);
                                    session.send(question, &mut renderer).await;
                                }
                                None => renderer.print_error(&format!(
                                    "No suggested question {} (see /examples)",
                                    n
                                )),
                            }
                        }
                        ChatCommand::Health => {
                            renderer.print_health(service.check_health().await);
                        }
                        ChatCommand::Reindex => match service.reindex().await {
                            Ok(outcome) => renderer.print_info(&format!(
                                "{} ({} documents indexed)",
                                outcome.message, outcome.documents_indexed
                            )),
                            Err(err) => {
                                renderer.print_error(&format!("Reindex failed: {}", err))
                            }
                        },
                        ChatCommand::TranscriptPath(path) => {
                            session.set_transcript_path(Some(PathBuf::from(&path)));
                            renderer.print_info(&format!("Transcript auto-save set to {}", path));
                        }
                        ChatCommand::ClearTranscriptPath => {
                            session.set_transcript_path(None);
                            renderer.print_info("Transcript auto-save disabled.");
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match session.save_transcript_to(&path) {
                                Ok(_) => {
                                    renderer.print_info(&format!("Transcript saved to {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to save transcript: {}", err)),
                            }
                        }
                        ChatCommand::LoadTranscript(path) => {
                            match session.load_transcript_from(&path) {
                                Ok(_) => {
                                    renderer.print_info(&format!("Transcript loaded from {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to load transcript: {}", err)),
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session.stats());
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular question - send to the service
                session.send(line, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
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

fn print_examples(renderer: &mut dyn Renderer) {
    renderer.print_info("Suggested questions (/ask <n>):");
    for (i, question) in EXAMPLE_QUESTIONS.iter().enumerate() {
        renderer.print_info(&format!("  {}. {}", i + 1, question));
    }
}

fn print_stats(stats: &SessionStats) {
    println!("    Session Statistics:");
    println!("      Messages: {}", stats.message_count);
    println!(
        "      In flight: {}",
        if stats.in_flight { "yes" } else { "no" }
    );
    println!(
        "      Queries: {} ({} failed)",
        stats.request_count, stats.failure_count
    );
    match stats.base_url {
        Some(ref base_url) => println!("      Service: {}", base_url),
        None => println!("      Service: (default)"),
    }
    match stats.transcript_path {
        Some(ref path) => println!("      Transcript file: {}", path.display()),
        None => println!("      Transcript file: (disabled)"),
    }
}

fn print_config<B: fundfacts::QueryBackend>(session: &ChatSession<B>) {
    let config = session.config();
    println!("    Current Configuration:");
    match config.base_url {
        Some(ref base_url) => println!("      Base address: {}", base_url),
        None => println!("      Base address: (default)"),
    }
    match config.timeout {
        Some(timeout) => println!("      Timeout: {}s", timeout.as_secs()),
        None => println!("      Timeout: (none)"),
    }
    println!(
        "      Colors: {}",
        if config.use_color { "enabled" } else { "disabled" }
    );
    match config.transcript_path {
        Some(ref path) => println!("      Transcript file: {}", path.display()),
        None => println!("      Transcript file: (disabled)"),
    }
}
