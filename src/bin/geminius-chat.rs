//! Interactive chat application for conversing with Gemini.
//!
//! This binary provides a streaming REPL interface backed by the geminius
//! client library. Configuration comes from a TOML secrets file.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage, reading ./secrets.toml
//! geminius-chat
//!
//! # Point at a different secrets file
//! geminius-chat --secrets ~/.config/geminius/secrets.toml
//!
//! # Override the configured model or temperature for this run
//! geminius-chat --model gemini-2.5-pro --temperature 0.2
//!
//! # Disable colors (useful for piping output)
//! geminius-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/reset` - Discard the conversation and start over
//! - `/model <name>` - Start a new conversation with a different model
//! - `/temperature <t>` - Start a new conversation with a different temperature
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use geminius::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use geminius::{Config, Model, SharedClient};

/// Main entry point for the geminius-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("geminius-chat [OPTIONS]");

    // Configuration failures are terminal: print the instruction and stop.
    let config = match Config::load(args.secrets_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut chat_config = ChatConfig::from_config(&config);
    if let Some(model) = args.model {
        chat_config = chat_config.with_model(Model::from(model));
    }
    if let Some(temperature) = args.temperature {
        match temperature.parse::<f32>() {
            Ok(value) if value.is_finite() => {
                chat_config = chat_config.with_temperature(value);
            }
            _ => {
                eprintln!("--temperature must be a finite number, got {temperature}");
                std::process::exit(1);
            }
        }
    }
    if args.no_color {
        chat_config = chat_config.without_color();
    }
    let use_color = chat_config.use_color;

    let client = SharedClient::initialize(&config)?;
    let mut session = ChatSession::new(client, chat_config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Ctrl+C during a reply finishes the current turn, then exits.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Gemini Chat (model: {})", session.model());
    println!("Type /help for commands, /quit to exit\n");

    loop {
        interrupted.store(false, Ordering::Relaxed);

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
                        ChatCommand::Reset => {
                            session.reset();
                            renderer.print_info("Conversation reset.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Model(model_name) => {
                            session.reset_with_model(Model::from(model_name.clone()));
                            renderer.print_info(&format!(
                                "New conversation with model: {}",
                                model_name
                            ));
                        }
                        ChatCommand::Temperature(value) => {
                            session.reset_with_temperature(value);
                            renderer.print_info(&format!(
                                "New conversation with temperature {:.2}",
                                value
                            ));
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the API. An interrupted stream
                // keeps whatever text arrived as the final answer; only a
                // failure before streaming starts is reported.
                if let Err(e) = session.send_streaming(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }

                if interrupted.load(Ordering::Relaxed) {
                    println!("\nGoodbye!");
                    break;
                }
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

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Temperature: {:.2}", stats.temperature);
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Total tokens: {} prompt / {} reply ({} requests)",
        stats.total_prompt_tokens, stats.total_reply_tokens, stats.total_requests
    );
    if let Some(usage) = stats.last_turn_usage {
        println!(
            "      Last turn tokens: {} prompt / {} reply",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }
}
