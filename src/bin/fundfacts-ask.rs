//! One-shot question tool for the Facts-Only MF Assistant.
//!
//! This binary sends a single question to the query service and prints the
//! answer with its citation, suitable for scripting and smoke tests.
//!
//! # Usage
//!
//! ```bash
//! # Ask a question against the local development service
//! fundfacts-ask What is the minimum SIP amount?
//!
//! # Point at a deployed service
//! fundfacts-ask --base-url https://mf-facts.example.com What is the exit load?
//!
//! # Structured output for processing
//! fundfacts-ask --format json What is the minimum SIP amount?
//! ```

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use fundfacts::FundFacts;

/// Output format for displaying answers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum OutputFormat {
    /// Plain text format (default) - human-readable output.
    #[default]
    Text,
    /// JSON format - structured output suitable for parsing.
    Json,
    /// YAML format - structured output in YAML format.
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    /// Parse an output format from its string representation.
    ///
    /// Accepts "text", "json", "yaml", or "yml" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Invalid output format: {}. Valid options: text, json, yaml",
                s
            )),
        }
    }
}

/// Command-line arguments for the fundfacts-ask tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Base address of the query service.
    #[arrrg(
        optional,
        "Base address of the query service (default: http://localhost:8000)",
        "URL"
    )]
    base_url: Option<String>,

    /// Output format for the answer (text, json, yaml).
    #[arrrg(optional, "Output format: text, json, yaml", "FORMAT")]
    format: Option<String>,
}

/// Main entry point for the fundfacts-ask command-line tool.
///
/// Joins the positional arguments into one question, sends it to the query
/// service, and prints the settlement in the requested format. Exits with
/// code 1 when the query fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, words) = Args::from_command_line_relaxed("fundfacts-ask [OPTIONS] <QUESTION>...");

    if words.is_empty() {
        eprintln!("Error: Must specify a question");
        std::process::exit(1);
    }
    let question = words.join(" ");

    let client = FundFacts::new(args.base_url)?;
    let output_format = if let Some(format_str) = args.format {
        format_str
            .parse()
            .map_err(|e| format!("Invalid format: {}", e))?
    } else {
        OutputFormat::Text
    };

    match client.ask(&question).await {
        Ok(response) => match output_format {
            OutputFormat::Text => {
                println!("{}", response.answer);
                if response.is_refusal
                    && let Some(link) = &response.educational_link
                {
                    println!("Learn more about investor education: {}", link);
                }
                if response.has_citation() {
                    println!("Source: {}", response.source);
                    println!("Last updated from sources: {}", response.last_updated);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(&response)?);
            }
        },
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}
