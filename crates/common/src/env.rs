//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding a file-backed SQLite store exists.
///
/// Accepts the raw connection string; non-SQLite URLs and in-memory stores are ignored.
pub async fn ensure_store_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    let Some(dir) = Path::new(file).parent().filter(|d| !d.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    warn!(dir = %dir.display(), "store directory missing; creating it");
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}

/// Extract the file path from a `sqlite:` connection string, if any.
pub fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        debug!("in-memory sqlite store; no directory to prepare");
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::sqlite_file_path;

    #[test]
    fn parses_file_urls() {
        assert_eq!(sqlite_file_path("sqlite://data/pestpro.db?mode=rwc"), Some("data/pestpro.db"));
        assert_eq!(sqlite_file_path("sqlite:pestpro.db"), Some("pestpro.db"));
    }

    #[test]
    fn ignores_memory_and_postgres() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/pestpro"), None);
    }
}
