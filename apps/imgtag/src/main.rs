use std::{
    fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use session_core::{detect_clipboard, ClipboardCapability, CopyOutcome, MissingClipboard, Session};
use shared::domain::{MalformedDirective, MalformedPolicy};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

mod settings;

use settings::{load_settings, LoadedSettings, OutputFormat, Settings};

/// Convert Markdown image tags into 300px-wide HTML <img> tags.
#[derive(Parser, Debug)]
#[command(name = "imgtag", version, about)]
struct Cli {
    /// Markdown file to convert; reads stdin when omitted or "-".
    input: Option<PathBuf>,
    /// Copy the converted output to the system clipboard.
    ///
    /// On Linux (X11/Wayland) the copied text only outlives this process when a
    /// clipboard manager is running to take it over.
    #[arg(long)]
    copy: bool,
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// What to do with lines that start with "![" but are not well formed.
    #[arg(long, value_name = "passthrough|skip")]
    on_malformed: Option<MalformedPolicy>,
    /// Settings file (TOML); defaults to ./imgtag.toml, then the user config dir.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(format) = self.format {
            settings.output_format = format;
        }
        if let Some(policy) = self.on_malformed {
            settings.on_malformed = policy;
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    lines: &'a [String],
    malformed: &'a [MalformedDirective],
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let LoadedSettings {
        mut settings,
        source,
    } = load_settings(cli.config.as_deref())?;
    cli.apply_to(&mut settings);
    init_tracing(&settings.log_filter);
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "loaded settings file"),
        None => tracing::debug!("no settings file found; using defaults"),
    }

    let input = read_input(cli.input.as_deref())?;

    let clipboard: Box<dyn ClipboardCapability> = if cli.copy {
        detect_clipboard()
    } else {
        Box::new(MissingClipboard)
    };
    let mut session = Session::new(clipboard, Handle::current()).with_policy(settings.on_malformed);
    session.set_input(input);
    let malformed = session.submit();

    let rendered = render_output(settings.output_format, session.output(), &malformed)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .context("failed to write converted output")?;
    stdout.flush().context("failed to flush stdout")?;

    if settings.output_format == OutputFormat::Text {
        for warning in malformed_warnings(&malformed) {
            eprintln!("{warning}");
        }
    }

    if cli.copy {
        match session.request_copy() {
            CopyOutcome::Copied { chars } => eprintln!("Copied! ({chars} characters)"),
            CopyOutcome::Notice(notice) => eprintln!("{notice}"),
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file '{}'", path.display())),
        _ => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read input from stdin")?;
            Ok(raw)
        }
    }
}

/// One stderr line per malformed directive; the converter itself only logs at debug level.
fn malformed_warnings(malformed: &[MalformedDirective]) -> Vec<String> {
    malformed
        .iter()
        .map(|directive| {
            format!(
                "warning: line {}: {} ({})",
                directive.line_number, directive.line, directive.reason
            )
        })
        .collect()
}

fn render_output(
    format: OutputFormat,
    lines: &[String],
    malformed: &[MalformedDirective],
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut text = lines.join("\n");
            if !text.is_empty() {
                text.push('\n');
            }
            Ok(text)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&JsonReport { lines, malformed })
                .context("failed to encode JSON report")?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
