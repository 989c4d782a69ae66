//! Utility functions for path handling and time formatting

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::{Error, Result};

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().ok_or(Error::NoHomeDir);
    }
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

/// Format a time with a strftime-style pattern.
/// Invalid directives become an error instead of a panic.
pub fn format_time<Tz>(time: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    write!(out, "{}", time.format(pattern)).map_err(|_| Error::Pattern(pattern.to_string()))?;
    Ok(out)
}

/// Strip exactly one trailing occurrence of `suffix`
pub fn strip_suffix_once<'a>(value: &'a str, suffix: &str) -> &'a str {
    value.strip_suffix(suffix).unwrap_or(value)
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
