//! Desktop integration helpers.

use std::process::Command;
use tracing::{info, warn};

/// Open the written artifact in the platform's spreadsheet application.
///
/// Fire-and-forget: the process is spawned and left alone, and a spawn
/// failure only logs a warning. The report write has already succeeded by
/// the time this runs, and a missing desktop app must not change that.
pub fn open_in_spreadsheet(path: &str) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open")
            .args(["-a", "Microsoft Excel"])
            .arg(path)
            .spawn()
    } else {
        Command::new("xdg-open").arg(path).spawn()
    };

    match result {
        Ok(_) => info!(%path, "Opened report in spreadsheet application"),
        Err(e) => warn!(%path, error = %e, "Could not open spreadsheet application"),
    }
}
