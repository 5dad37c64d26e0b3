//! CLI definition, session orchestration, and tracing setup.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use postmortems_core::Collector;
use postmortems_shared::SessionConfig;
use postmortems_store::{SessionIndex, WriteOutcome, load_store, write_store};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Record incident postmortems in a JSON store.
#[derive(Parser, Debug)]
#[command(
    name = "postmortems",
    version,
    about = "Interactively append incident postmortem records to a JSON store file.",
    long_about = None,
    disable_help_flag = true,
)]
pub(crate) struct Cli {
    /// JSON store file to load and append to.
    pub file: PathBuf,

    /// Print the merged store to stdout instead of writing the file.
    #[arg(long)]
    pub debug: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print help.
    #[arg(short = '?', long, action = clap::ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

impl From<&Cli> for SessionConfig {
    fn from(cli: &Cli) -> Self {
        SessionConfig::new(&cli.file, cli.debug)
    }
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr; stdout carries the prompts and the preview document.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "postmortems=warn",
        1 => "postmortems=info",
        2 => "postmortems=debug",
        _ => "postmortems=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Run an interactive session on the process's stdin/stdout/stderr.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = SessionConfig::from(&cli);
    let outcome = run_session(
        &config,
        io::stdin().lock(),
        io::stdout().lock(),
        io::stderr().lock(),
    )?;

    if let WriteOutcome::Written { path, bytes, added } = outcome {
        eprintln!("{}", written_summary(&path, bytes, added));
    }
    Ok(())
}

/// Summary line printed after the store file is rewritten.
fn written_summary(path: &Path, bytes: usize, added: usize) -> String {
    format!("{added} record(s) added to {} ({bytes} bytes)", path.display())
}

/// Load → index → collect → write, over arbitrary console streams.
pub(crate) fn run_session<R, W, E>(
    config: &SessionConfig,
    input: R,
    mut out: W,
    mut err: E,
) -> Result<WriteOutcome>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let store = load_store(&config.store_path)?;
    let index = SessionIndex::from_store(&store);

    info!(
        path = ?config.store_path,
        existing = store.len(),
        debug = config.debug,
        "starting session"
    );

    let (records, _index) =
        Collector::new(input, &mut out, &mut err).collect_records(index)?;

    Ok(write_store(config, store, records, &mut out)?)
}
