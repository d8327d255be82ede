//! Publishes the newest report where the static site reads it

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::info;

use crate::error::{FinderError, Result};
use crate::report::REPORT_PREFIX;

pub const DEFAULT_SITE_REPORT: &str = "web/public/data/latest-report.json";

/// Newest `airdrop-report-*.json` in `dir`. Names embed an ISO timestamp, so
/// the lexicographic maximum is the most recent.
pub fn find_latest_report(dir: &Path) -> Result<Option<PathBuf>> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<String> = None;
    for entry in std::fs::read_dir(dir).map_err(|e| FinderError::io(dir, e))? {
        let entry = entry.map_err(|e| FinderError::io(dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_report = name.starts_with(REPORT_PREFIX) && name.ends_with(".json");
        if is_report && latest.as_ref().map_or(true, |l| name > *l) {
            latest = Some(name);
        }
    }

    Ok(latest.map(|name| dir.join(name)))
}

/// Copy the newest report to `out`, or write an empty report when there is
/// none. Returns the copied source, if any.
pub fn publish_latest(reports_dir: &Path, out: &Path) -> Result<Option<PathBuf>> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FinderError::io(parent, e))?;
    }

    match find_latest_report(reports_dir)? {
        Some(latest) => {
            std::fs::copy(&latest, out).map_err(|e| FinderError::io(&latest, e))?;
            info!("Copied {} -> {}", latest.display(), out.display());
            Ok(Some(latest))
        }
        None => {
            let empty = json!({ "generatedAt": null, "meta": {}, "results": [] });
            let content =
                serde_json::to_string_pretty(&empty).map_err(|e| FinderError::json(out, e))?;
            std::fs::write(out, content).map_err(|e| FinderError::io(out, e))?;
            info!("No report found. Wrote empty {}", out.display());
            Ok(None)
        }
    }
}
