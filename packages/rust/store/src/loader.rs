//! Store loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use postmortems_shared::{PostmortemError, Result, Store};
use tracing::{debug, info};

/// Load the store at `path`.
///
/// A file that cannot be opened, or one holding nothing but whitespace, is
/// an empty store. Malformed JSON is an error.
pub fn load_store(path: &Path) -> Result<Store> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(?path, error = %e, "store file not opened, starting empty");
            return Ok(Store::new());
        }
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| PostmortemError::io(path, e))?;

    if content.trim().is_empty() {
        debug!(?path, "store file is empty");
        return Ok(Store::new());
    }

    let store: Store = serde_json::from_str(&content).map_err(|e| {
        PostmortemError::parse(format!("failed to parse {}: {e}", path.display()))
    })?;

    info!(?path, records = store.len(), "loaded store");
    Ok(store)
}
