//! `copycheck run` / `validate` / `extract` implementations.

use std::path::{Path, PathBuf};

use copycheck_acquire::labeler::resolve_api_key;
use copycheck_acquire::{
    read_reference_document, AcquireError, HttpLabeler, LabelText, PageClient,
};
use copycheck_engine::report::render_report;
use copycheck_engine::{EngineConfig, Mode, ValidationInput};

use crate::exit_codes::{acquire_exit_code, EXIT_CONFIG_INVALID, EXIT_MISMATCH};
use crate::{CliError, ModeArg};

/// Environment variables consulted when the matching flags are absent.
pub const ENDPOINT_ENV: &str = "COPYCHECK_LABELER_ENDPOINT";
pub const API_KEY_ENV: &str = "COPYCHECK_API_KEY";

pub struct RunArgs {
    pub config: Option<PathBuf>,
    pub reference: PathBuf,
    pub url: Option<String>,
    pub mode: Option<ModeArg>,
    pub labeled_text: Option<PathBuf>,
    pub save_page: Option<PathBuf>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(&args)?;

    // The reference document and the page are independent inputs; read the
    // document while the network round-trips happen.
    let (reference_lines, page_text) = std::thread::scope(|scope| {
        let reference = &args.reference;
        let handle = scope.spawn(move || read_reference_document(reference));
        let page = acquire_page_text(&args, config.mode);
        let lines = handle.join().unwrap_or_else(|_| {
            Err(AcquireError::Parse("reference reader thread panicked".into()))
        });
        (lines, page)
    });

    let reference_lines = reference_lines.map_err(CliError::acquire)?;
    let page_text = page_text?;

    if let Some(ref path) = args.save_page {
        std::fs::write(path, &page_text)
            .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("saved page text to {}", path.display());
    }

    let input = ValidationInput { reference_lines, page_text };
    let result = copycheck_engine::run(&config, &input);

    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if args.json {
        println!("{json_str}");
    } else {
        print!("{}", render_report(&result, &config.report));
    }

    let s = &result.summary;
    eprintln!(
        "{}: {} expected line(s) — {} matched, {} structural, {} content, {} plain, {} extra",
        config.name,
        s.total_expected,
        s.matched,
        s.structural_mismatches,
        s.content_mismatches,
        s.plain_mismatches,
        s.extra_actual,
    );

    if !s.pass {
        return Err(CliError {
            code: EXIT_MISMATCH,
            message: "mismatches found".to_string(),
            hint: None,
        });
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path).map_err(|e| CliError {
        code: EXIT_CONFIG_INVALID,
        message: format!("cannot read config: {e}"),
        hint: None,
    })?;

    match EngineConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' ({} mode, content truncated at {} chars)",
                config.name, config.mode, config.report.max_content_len,
            );
            Ok(())
        }
        Err(e) => Err(CliError {
            code: EXIT_CONFIG_INVALID,
            message: e.to_string(),
            hint: None,
        }),
    }
}

/// Print the tagged lines a reference document produces, one canonical
/// `[LABEL] content` rendering per line.
pub fn cmd_extract(reference: PathBuf, mode: Option<ModeArg>) -> Result<(), CliError> {
    let lines = read_reference_document(&reference).map_err(CliError::acquire)?;

    let tagged = match mode.map(Mode::from).unwrap_or_default() {
        Mode::Structured => copycheck_engine::extract::extract_expected(&lines),
        Mode::Unstructured => copycheck_engine::extract::paragraphs(&lines),
    };

    for line in &tagged {
        println!("{}", line.render());
    }
    eprintln!("{} line(s) extracted from {}", tagged.len(), reference.display());

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(args: &RunArgs) -> Result<EngineConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let config_str = std::fs::read_to_string(path).map_err(|e| CliError {
                code: EXIT_CONFIG_INVALID,
                message: format!("cannot read config: {e}"),
                hint: None,
            })?;
            EngineConfig::from_toml(&config_str).map_err(|e| CliError {
                code: EXIT_CONFIG_INVALID,
                message: e.to_string(),
                hint: None,
            })?
        }
        None => EngineConfig::adhoc(run_name(&args.reference), Mode::default()),
    };

    // The flag wins over the config file.
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    Ok(config)
}

/// Ad-hoc runs are named after the reference document.
fn run_name(reference: &Path) -> String {
    reference
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ad-hoc")
        .to_string()
}

/// Produce the page text the engine will compare against: a canned labeled
/// file, or a live fetch, labeled when the mode calls for it.
fn acquire_page_text(args: &RunArgs, mode: Mode) -> Result<String, CliError> {
    if let Some(ref path) = args.labeled_text {
        return std::fs::read_to_string(path).map_err(|e| {
            CliError::io(format!("cannot read {}: {e}", path.display()))
        });
    }

    let url = args.url.as_deref().ok_or_else(|| {
        CliError::args("either --url or --labeled-text is required")
    })?;

    let client = PageClient::new(args.timeout_secs).map_err(CliError::acquire)?;
    let visible = client.fetch_page(url).map_err(CliError::acquire)?;
    eprintln!("fetched {} ({} chars of visible text)", url, visible.chars().count());

    match mode {
        Mode::Unstructured => Ok(visible),
        Mode::Structured => {
            let endpoint = args
                .endpoint
                .clone()
                .or_else(|| std::env::var(ENDPOINT_ENV).ok())
                .ok_or_else(|| {
                    CliError::args(format!(
                        "structured mode needs a labeling service (use --endpoint or set {ENDPOINT_ENV})"
                    ))
                    .with_hint("or pass --labeled-text FILE to skip the service")
                })?;
            let api_key = resolve_api_key(args.api_key.clone(), API_KEY_ENV)
                .map_err(CliError::acquire)?;

            let labeler = HttpLabeler::new(&endpoint, &api_key, args.timeout_secs)
                .map_err(CliError::acquire)?;
            labeler.label_text(&visible).map_err(CliError::acquire)
        }
    }
}
