use anyhow::Result;
use std::path::PathBuf;

/// Resolve the session-storage folder (absolute path).
///
/// Order:
/// - `ONBOARD_SESSION_DIR` env override (operators and tests)
/// - platform-local data dir, e.g. `~/.local/share/onboard-wizard/session`
/// - temp-dir fallback so the feature still works on locked-down machines
pub fn resolve_session_folder() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ONBOARD_SESSION_DIR") {
        if !dir.trim().is_empty() {
            let path = PathBuf::from(dir.trim());
            std::fs::create_dir_all(&path)
                .map_err(|e| anyhow::anyhow!("Failed to create session folder: {}", e))?;
            return Ok(path);
        }
    }

    if let Some(base) = dirs::data_local_dir() {
        let path = base.join("onboard-wizard").join("session");
        std::fs::create_dir_all(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create session folder: {}", e))?;
        return Ok(path);
    }

    let path = std::env::temp_dir().join("onboard-wizard-session");
    std::fs::create_dir_all(&path)
        .map_err(|e| anyhow::anyhow!("Failed to create session folder: {}", e))?;
    Ok(path)
}

/// Resolve the log folder (absolute path). Same resolution order as the
/// session folder, with its own `ONBOARD_LOG_DIR` override.
pub fn resolve_log_folder() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ONBOARD_LOG_DIR") {
        if !dir.trim().is_empty() {
            let path = PathBuf::from(dir.trim());
            std::fs::create_dir_all(&path)
                .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
            return Ok(path);
        }
    }

    if let Some(base) = dirs::data_local_dir() {
        let path = base.join("onboard-wizard").join("logs");
        std::fs::create_dir_all(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
        return Ok(path);
    }

    let path = std::env::temp_dir().join("onboard-wizard-logs");
    std::fs::create_dir_all(&path)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder: {}", e))?;
    Ok(path)
}
