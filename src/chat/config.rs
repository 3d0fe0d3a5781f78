//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

/// Command-line arguments for the fundfacts-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base address of the query service.
    #[arrrg(
        optional,
        "Base address of the query service (default: http://localhost:8000)",
        "URL"
    )]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: none)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Auto-save transcript path.
    #[arrrg(optional, "Auto-save the transcript to this file", "FILE")]
    pub transcript: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// The base address of the query service.
    ///
    /// `None` defers to the client's resolution order (environment
    /// variable, then the local development default).
    pub base_url: Option<String>,

    /// Optional per-request timeout.
    ///
    /// `None` (the default) matches the service contract: a request runs
    /// until it settles.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Path to persist transcripts automatically after each settlement.
    pub transcript_path: Option<PathBuf>,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base address: client resolution (env var, then localhost)
    /// - Timeout: none
    /// - Color: enabled
    /// - Transcript auto-save: disabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            use_color: true,
            transcript_path: None,
        }
    }

    /// Sets the base address of the query service.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Sets the transcript auto-save path.
    pub fn with_transcript_path(mut self, path: Option<PathBuf>) -> Self {
        self.transcript_path = path;
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
        ChatConfig {
            base_url: args.base_url,
            timeout: args.timeout.map(Duration::from_secs),
            use_color: !args.no_color,
            transcript_path: args.transcript.map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout, None);
        assert!(config.use_color);
        assert!(config.transcript_path.is_none());
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, None);
        assert_eq!(config.timeout, None);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://facts.example.com".to_string()),
            timeout: Some(30),
            transcript: Some("chat.json".to_string()),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(
            config.base_url,
            Some("http://facts.example.com".to_string())
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.transcript_path, Some(PathBuf::from("chat.json")));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://facts.example.com".to_string())
            .with_timeout(Some(Duration::from_secs(10)))
            .without_color()
            .with_transcript_path(Some(PathBuf::from("transcript.json")));

        assert_eq!(
            config.base_url,
            Some("http://facts.example.com".to_string())
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert!(!config.use_color);
        assert_eq!(
            config.transcript_path,
            Some(PathBuf::from("transcript.json"))
        );
    }
}
