//! postmortems CLI: append incident postmortem records to a JSON store.
//!
//! Loads the store, prompts for new records until `quit`, then writes the
//! merged list back (or previews it with `--debug`).

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help, version, and bad arguments all print usage and stop.
            err.print()?;
            return Ok(());
        }
    };
    commands::init_tracing(&cli);
    commands::run(cli)
}
