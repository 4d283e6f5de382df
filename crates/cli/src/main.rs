// copycheck CLI - reconcile reference copy against live pages

mod exit_codes;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use copycheck_acquire::AcquireError;
use copycheck_engine::Mode;

use exit_codes::{acquire_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use run::{cmd_extract, cmd_run, cmd_validate, RunArgs, API_KEY_ENV, ENDPOINT_ENV};

#[derive(Parser)]
#[command(name = "copycheck")]
#[command(about = "Check that approved reference copy appears on the live page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a page and reconcile it against a reference document
    #[command(after_help = "\
Examples:
  copycheck run deck.docx --url https://example.com --endpoint https://labeler.internal/label
  copycheck run deck.txt --url https://example.com --mode unstructured
  copycheck run deck.docx --labeled-text saved-page.txt
  copycheck run deck.docx --url https://example.com --json --output result.json
  copycheck run --config homepage.toml deck.docx --url https://example.com")]
    Run {
        /// Reference document (.docx or plain text, one line per element)
        reference: PathBuf,

        /// TOML config file (name, mode, report settings)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Page URL to fetch
        #[arg(long)]
        url: Option<String>,

        /// Comparison mode (overrides the config file)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Use pre-labeled page text from a file instead of fetch + label
        #[arg(long, value_name = "FILE")]
        labeled_text: Option<PathBuf>,

        /// Save the acquired page text for later --labeled-text reruns
        #[arg(long, value_name = "FILE")]
        save_page: Option<PathBuf>,

        /// Output JSON to stdout instead of the human report
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Labeling service endpoint URL
        #[arg(long, env = ENDPOINT_ENV)]
        endpoint: Option<String>,

        /// Labeling service API key
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,

        /// HTTP timeout in seconds (fetch and labeler)
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  copycheck validate homepage.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },

    /// Show the tagged lines a reference document produces
    #[command(after_help = "\
Examples:
  copycheck extract deck.docx
  copycheck extract deck.txt --mode unstructured")]
    Extract {
        /// Reference document (.docx or plain text)
        reference: PathBuf,

        /// Extraction mode
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Structured,
    Unstructured,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Structured => Mode::Structured,
            ModeArg::Unstructured => Mode::Unstructured,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            reference,
            config,
            url,
            mode,
            labeled_text,
            save_page,
            json,
            output,
            endpoint,
            api_key,
            timeout_secs,
        } => cmd_run(RunArgs {
            config,
            reference,
            url,
            mode,
            labeled_text,
            save_page,
            json,
            output,
            endpoint,
            api_key,
            timeout_secs,
        }),
        Commands::Validate { config } => cmd_validate(config),
        Commands::Extract { reference, mode } => cmd_extract(reference, mode),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Create error from an acquisition error with the proper exit code.
    pub fn acquire(err: AcquireError) -> Self {
        let hint = match &err {
            AcquireError::LabelAuth(_) => {
                Some(format!("check the --api-key flag or the {API_KEY_ENV} environment variable"))
            }
            AcquireError::Fetch(_) => {
                Some("is the URL reachable from this machine?".to_string())
            }
            _ => None,
        };
        Self { code: acquire_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_errors_map_to_registry_codes() {
        let err = CliError::acquire(AcquireError::Fetch("timeout".into()));
        assert_eq!(err.code, exit_codes::EXIT_FETCH_ERROR);
        assert!(err.hint.is_some());

        let err = CliError::acquire(AcquireError::LabelAuth("401".into()));
        assert_eq!(err.code, exit_codes::EXIT_LABEL_NOT_AUTH);

        let err = CliError::acquire(AcquireError::Parse("bad docx".into()));
        assert_eq!(err.code, exit_codes::EXIT_REFERENCE_PARSE);
    }

    #[test]
    fn cli_parses_a_run_invocation() {
        use clap::Parser;
        let cli = Cli::try_parse_from([
            "copycheck",
            "run",
            "deck.docx",
            "--url",
            "https://example.com",
            "--mode",
            "unstructured",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { reference, url, mode, json, .. } => {
                assert_eq!(reference, PathBuf::from("deck.docx"));
                assert_eq!(url.as_deref(), Some("https://example.com"));
                assert!(matches!(mode, Some(ModeArg::Unstructured)));
                assert!(json);
            }
            _ => panic!("expected run command"),
        }
    }
}
