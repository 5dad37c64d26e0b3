//! Merging new records into the store and writing it out.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use postmortems_shared::{
    OutputMode, PostmortemError, PreviewReason, Record, Result, SessionConfig, Store,
};
use tracing::info;

/// What happened to the merged store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The store file was rewritten.
    Written {
        path: PathBuf,
        bytes: usize,
        added: usize,
    },
    /// The JSON document went to the console instead.
    Previewed { reason: PreviewReason, added: usize },
}

/// Serialize a store as pretty-printed JSON.
pub fn render_store(store: &Store) -> Result<String> {
    serde_json::to_string_pretty(store).map_err(|e| PostmortemError::Serialize(e.to_string()))
}

/// Append `new_records` to `store` and emit the result.
///
/// In debug mode, or when the target exists but is not writable, the JSON is
/// printed to `console` and the file is left alone. Otherwise the file is
/// truncated and rewritten.
pub fn write_store<W: Write>(
    config: &SessionConfig,
    mut store: Store,
    new_records: Vec<Record>,
    console: &mut W,
) -> Result<WriteOutcome> {
    let added = new_records.len();
    store.append(new_records);
    let json = render_store(&store)?;

    match OutputMode::resolve(config) {
        OutputMode::Preview(reason) => {
            info!(?reason, records = store.len(), "previewing store");
            writeln!(console, "{json}")?;
            console.flush()?;
            Ok(WriteOutcome::Previewed { reason, added })
        }
        OutputMode::Write => {
            let path = &config.store_path;
            let mut file = File::create(path).map_err(|e| PostmortemError::write(path, e))?;
            writeln!(file, "{json}").map_err(|e| PostmortemError::write(path, e))?;
            let bytes = json.len() + 1;
            info!(?path, bytes, records = store.len(), "wrote store");
            Ok(WriteOutcome::Written {
                path: path.clone(),
                bytes,
                added,
            })
        }
    }
}
