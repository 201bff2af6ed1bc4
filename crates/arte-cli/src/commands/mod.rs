pub mod character;
pub mod clock;
pub mod init;
pub mod log;
pub mod play;
pub mod roll;

use std::path::Path;

use tracing::debug;

use arte_core::{SessionStore, Snapshot};

/// Load a session store from a JSON snapshot file.
fn load_store(file: &Path) -> Result<SessionStore, String> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        format!(
            "cannot read {}: {e} (run 'arte init <name>' to create a session)",
            file.display()
        )
    })?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .map_err(|e| format!("{} is not a valid session file: {e}", file.display()))?;
    let store =
        SessionStore::restore(snapshot).map_err(|e| format!("cannot restore session: {e}"))?;
    debug!(file = %file.display(), rolls = store.roll_count(), "session loaded");
    Ok(store)
}

/// Write a session store back to its JSON snapshot file.
fn save_store(file: &Path, store: &SessionStore) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&store.snapshot())
        .map_err(|e| format!("cannot serialize session: {e}"))?;
    std::fs::write(file, json).map_err(|e| format!("cannot write {}: {e}", file.display()))?;
    debug!(file = %file.display(), "session saved");
    Ok(())
}
