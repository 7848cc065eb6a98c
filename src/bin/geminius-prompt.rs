//! Command-line tool for one-shot prompts against the Gemini API.
//!
//! This binary sends a single prompt, waits for the complete reply, and
//! prints it to stdout. It is the non-streaming counterpart of
//! `geminius-chat`, meant for scripting and quick checks.
//!
//! # Usage
//!
//! ```bash
//! # Prompt from the command line
//! geminius-prompt "Summarize the attached diff"
//!
//! # Prompt from stdin
//! cat prompt.txt | geminius-prompt
//!
//! # Override the configured model
//! geminius-prompt --model gemini-2.5-pro "Explain this error"
//!
//! # Include token usage on stderr
//! geminius-prompt --verbose "Hello"
//! ```

use std::io::Read;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use geminius::{
    Config, Content, GenerateContentRequest, GenerationConfig, Model, SharedClient,
};

/// Command-line arguments for the geminius-prompt tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Path to the TOML secrets file.
    #[arrrg(optional, "Path to the secrets file (default: secrets.toml)", "PATH")]
    secrets: Option<String>,

    /// Model override for this run.
    #[arrrg(optional, "Model to use instead of the configured one", "MODEL")]
    model: Option<String>,

    /// Temperature override for this run.
    #[arrrg(optional, "Temperature to use instead of the configured one", "TEMP")]
    temperature: Option<String>,

    /// Include token usage information on stderr.
    #[arrrg(flag, "Include token usage information")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line_relaxed("geminius-prompt [OPTIONS] [PROMPT]");

    let prompt = if free.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        free.join(" ")
    };
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("Error: Must supply a prompt as arguments or on stdin");
        std::process::exit(1);
    }

    let config = match Config::load(args.secrets.as_deref().unwrap_or("secrets.toml")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let model = match args.model {
        Some(name) => Model::from(name),
        None => config.model.clone(),
    };
    let temperature = match args.temperature {
        Some(raw) => match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                eprintln!("--temperature must be a finite number, got {raw}");
                std::process::exit(1);
            }
        },
        None => config.temperature,
    };

    let client = SharedClient::initialize(&config)?;
    let request = GenerateContentRequest::new(vec![Content::user(prompt)])
        .with_generation_config(GenerationConfig::with_temperature(temperature));
    let response = client.client().generate(&model, request).await?;

    if args.verbose
        && let Some(usage) = response.usage_metadata
    {
        eprintln!(
            "Model: {} | Tokens: {} prompt / {} reply / {} total",
            model,
            usage.prompt_token_count,
            usage.candidates_token_count,
            usage.total_token_count
        );
    }

    println!("{}", response.text());
    Ok(())
}
