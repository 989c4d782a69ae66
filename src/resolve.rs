//! Path resolution
//!
//! Locates the options file and the notes directory:
//! - options file: explicit path, then `ADOC_LOG_CONFIG`, then
//!   `<config dir>/adoc-log/config.yaml` when it exists
//! - notes directory: `dir` option with `~` expanded, created on demand

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::constants as C;
use crate::error::Result;

/// Default location of the options file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(C::CONFIG_DIR_NAME).join(C::CONFIG_FILENAME))
}

/// Pick the options file to load, if any
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: explicit argument
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    // Priority 2: environment variable (empty means unset)
    if let Some(path) = std::env::var_os(C::ENV_CONFIG).filter(|s| !s.is_empty()) {
        return Some(PathBuf::from(path));
    }

    // Priority 3: default location, only when present
    default_config_path().filter(|p| p.is_file())
}

/// Resolve the notes directory and make sure it exists.
///
/// A failed `create_dir_all` is only logged; the later file operation in
/// that directory reports the failure.
pub fn ensure_notes_dir(config: &Config) -> Result<PathBuf> {
    let dir = config.notes_dir()?;
    if !dir.is_dir() {
        match fs::create_dir_all(&dir) {
            Ok(()) => debug!(dir = %dir.display(), "Created notes directory"),
            Err(err) => debug!(dir = %dir.display(), %err, "Could not create notes directory"),
        }
    }
    Ok(dunce::canonicalize(&dir).unwrap_or(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_dir(dir: &Path) -> Config {
        Config {
            dir: dir.to_string_lossy().to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_ensure_notes_dir_creates_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b").join("logs");
        let config = config_with_dir(&target);

        let resolved = ensure_notes_dir(&config).unwrap();
        assert!(target.is_dir());
        assert!(resolved.is_dir());
        assert!(resolved.ends_with("a/b/logs"));
    }

    #[test]
    fn test_ensure_notes_dir_existing() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_with_dir(temp_dir.path());
        let resolved = ensure_notes_dir(&config).unwrap();
        assert_eq!(resolved, dunce::canonicalize(temp_dir.path()).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_notes_dir_failure_is_deferred() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file blocks directory creation below it
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let config = config_with_dir(&blocker.join("logs"));

        let resolved = ensure_notes_dir(&config).unwrap();
        assert!(!resolved.exists());
    }

    #[test]
    fn test_config_path_explicit_wins() {
        let explicit = PathBuf::from("/tmp/explicit.yaml");
        assert_eq!(config_path(Some(&explicit)), Some(explicit));
    }
}
