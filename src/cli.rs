//! Command-line interface definition for Legalis
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for contract analysis, history and local accounts.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Legalis - plain-language risk audits of legal documents
///
/// Analyze contract text, documents or a company's published terms with a
/// Gemini model and keep a local history of the results.
#[derive(Parser, Debug, Clone)]
#[command(name = "legalis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Path of the local store (overrides config and LEGALIS_STORE_PATH)
    #[arg(long, global = true)]
    pub storage_path: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Legalis
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Analyze a contract, document or company's terms
    Analyze {
        #[command(flatten)]
        source: InputSource,

        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Browse past analyses
    History {
        /// History subcommand
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Manage the local account
    Auth {
        /// Account subcommand
        #[command(subcommand)]
        command: AuthCommand,
    },
}

/// What to analyze; exactly one source is required
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct InputSource {
    /// Contract text to analyze
    #[arg(short, long)]
    pub text: Option<String>,

    /// Website address or company name whose terms should be found
    #[arg(short, long)]
    pub url: Option<String>,

    /// Document to analyze (.pdf, .ppt, .pptx, .txt, .md)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Deep link carrying a `url` query parameter
    #[arg(long)]
    pub link: Option<String>,
}

/// History subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum HistoryCommand {
    /// List stored analyses, newest first
    List,

    /// Show one stored analysis
    Show {
        /// Analysis id or a prefix of at least four characters
        id: String,

        /// Print the result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Delete every stored analysis
    Clear,
}

/// Account subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AuthCommand {
    /// Create an account and log in
    Signup {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long, env = "LEGALIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long, env = "LEGALIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out
    Logout,

    /// Show the logged-in account
    Whoami,
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            json_logs: false,
            storage_path: None,
            command: Commands::History {
                command: HistoryCommand::List,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(!cli.json_logs);
        assert!(cli.storage_path.is_none());
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::List
            }
        ));
    }

    #[test]
    fn test_cli_parse_analyze_text() {
        let cli = Cli::try_parse_from(["legalis", "analyze", "--text", "The tenant pays."]);
        assert!(cli.is_ok());
        if let Commands::Analyze {
            source,
            model,
            json,
        } = cli.unwrap().command
        {
            assert_eq!(source.text, Some("The tenant pays.".to_string()));
            assert!(source.url.is_none());
            assert!(model.is_none());
            assert!(!json);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_cli_parse_analyze_file_with_model_and_json() {
        let cli = Cli::try_parse_from([
            "legalis",
            "analyze",
            "--file",
            "lease.pdf",
            "--model",
            "gemini-2.5-flash",
            "--json",
        ])
        .unwrap();
        if let Commands::Analyze {
            source,
            model,
            json,
        } = cli.command
        {
            assert_eq!(source.file, Some(PathBuf::from("lease.pdf")));
            assert_eq!(model, Some("gemini-2.5-flash".to_string()));
            assert!(json);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_cli_analyze_requires_exactly_one_source() {
        assert!(Cli::try_parse_from(["legalis", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "legalis",
            "analyze",
            "--text",
            "a",
            "--url",
            "example.com"
        ])
        .is_err());
    }

    #[test]
    fn test_cli_parse_analyze_link() {
        let cli =
            Cli::try_parse_from(["legalis", "analyze", "--link", "https://legalis.app/?url=x.com"])
                .unwrap();
        if let Commands::Analyze { source, .. } = cli.command {
            assert_eq!(source.link, Some("https://legalis.app/?url=x.com".to_string()));
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn test_cli_parse_history_show() {
        let cli = Cli::try_parse_from(["legalis", "history", "show", "abcd1234", "--json"]).unwrap();
        if let Commands::History {
            command: HistoryCommand::Show { id, json },
        } = cli.command
        {
            assert_eq!(id, "abcd1234");
            assert!(json);
        } else {
            panic!("Expected History Show command");
        }
    }

    #[test]
    fn test_cli_parse_history_clear() {
        let cli = Cli::try_parse_from(["legalis", "history", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommand::Clear
            }
        ));
    }

    #[test]
    fn test_cli_parse_auth_signup() {
        let cli = Cli::try_parse_from([
            "legalis",
            "auth",
            "signup",
            "--name",
            "Ada",
            "--email",
            "ada@example.com",
            "--password",
            "pw",
        ])
        .unwrap();
        if let Commands::Auth {
            command:
                AuthCommand::Signup {
                    name,
                    email,
                    password,
                },
        } = cli.command
        {
            assert_eq!(name, "Ada");
            assert_eq!(email, "ada@example.com");
            assert_eq!(password, "pw");
        } else {
            panic!("Expected Auth Signup command");
        }
    }

    #[test]
    fn test_cli_parse_auth_whoami_and_logout() {
        let cli = Cli::try_parse_from(["legalis", "auth", "whoami"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Auth {
                command: AuthCommand::Whoami
            }
        ));
        let cli = Cli::try_parse_from(["legalis", "auth", "logout"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Auth {
                command: AuthCommand::Logout
            }
        ));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "legalis",
            "history",
            "list",
            "--storage-path",
            "/tmp/store.db",
            "--verbose",
            "--json-logs",
        ])
        .unwrap();
        assert_eq!(cli.storage_path, Some("/tmp/store.db".to_string()));
        assert!(cli.verbose);
        assert!(cli.json_logs);
    }

    #[test]
    fn test_cli_parse_config_path() {
        let cli = Cli::try_parse_from(["legalis", "--config", "custom.yaml", "auth", "logout"])
            .unwrap();
        assert_eq!(cli.config, Some("custom.yaml".to_string()));
    }
}
