//! Configuration resolution
//!
//! User options arrive as a partial YAML mapping and are deep-merged over the
//! built-in defaults:
//! - mappings merge key by key, recursively
//! - any other user value replaces the default
//! - a null user value leaves the default in place
//! - unknown keys are merged and then ignored

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::constants as C;
use crate::error::Result;
use crate::util;

/// How a note is opened in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Replace the current buffer
    #[default]
    Edit,
    /// Open in a new tab
    Tabedit,
    /// Vertical split
    Vsplit,
    /// Horizontal split
    Split,
}

impl OpenMode {
    /// Ex command used to open a file in this mode
    pub fn ex_command(self) -> &'static str {
        match self {
            OpenMode::Edit => "edit",
            OpenMode::Tabedit => "tabedit",
            OpenMode::Vsplit => "vsplit",
            OpenMode::Split => "split",
        }
    }
}

/// Effective configuration, fixed until the next `setup`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Notes root (may start with `~`)
    pub dir: String,
    pub enable_default_mapping: bool,
    pub create_map: String,
    pub find_rg_map: String,
    pub find_file_map: String,
    /// Combined find trigger, bound to content search when non-empty
    pub find_map: String,
    pub filename_pattern: String,
    pub timestamp_pattern: String,
    pub header_template: String,
    pub open_cmd: OpenMode,
    /// Ask for a filename suffix before creating a note
    pub prompt_suffix: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: C::DEFAULT_NOTES_DIR.to_string(),
            enable_default_mapping: true,
            create_map: C::DEFAULT_CREATE_MAP.to_string(),
            find_rg_map: C::DEFAULT_FIND_RG_MAP.to_string(),
            find_file_map: C::DEFAULT_FIND_FILE_MAP.to_string(),
            find_map: String::new(),
            filename_pattern: C::DEFAULT_FILENAME_PATTERN.to_string(),
            timestamp_pattern: C::DEFAULT_TIMESTAMP_PATTERN.to_string(),
            header_template: C::DEFAULT_HEADER_TEMPLATE.to_string(),
            open_cmd: OpenMode::default(),
            prompt_suffix: true,
        }
    }
}

impl Config {
    /// Deep-merge user options over the defaults
    pub fn resolve(options: Value) -> Result<Self> {
        let mut merged = serde_yaml::to_value(Config::default())?;
        deep_merge(&mut merged, options);
        let config: Config = serde_yaml::from_value(merged)?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Notes directory with the home shorthand expanded
    pub fn notes_dir(&self) -> Result<PathBuf> {
        util::expand_home(&self.dir)
    }
}

/// Merge `overlay` into `base`, overlay values winning
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Command-line values layered over the options file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub dir: Option<String>,
    pub open_cmd: Option<OpenMode>,
    pub prompt_suffix: Option<bool>,
}

impl Overrides {
    /// Merge the set overrides into `options`.
    /// Options other than a mapping (or nothing) are a configuration error.
    pub fn apply(&self, options: Value) -> Result<Value> {
        let mut options = match options {
            Value::Null => Value::Mapping(Mapping::new()),
            Value::Mapping(map) => Value::Mapping(map),
            other => Value::Mapping(serde_yaml::from_value::<Mapping>(other)?),
        };

        let mut layer = Mapping::new();
        if let Some(dir) = &self.dir {
            layer.insert("dir".into(), dir.as_str().into());
        }
        if let Some(mode) = self.open_cmd {
            layer.insert("open_cmd".into(), serde_yaml::to_value(mode)?);
        }
        if let Some(prompt) = self.prompt_suffix {
            layer.insert("prompt_suffix".into(), prompt.into());
        }

        deep_merge(&mut options, Value::Mapping(layer));
        Ok(options)
    }
}

/// Read a partial options mapping from a YAML file.
/// An empty file yields no options.
pub fn load_options(path: &Path) -> Result<Value> {
    debug!(path = %path.display(), "Loading options file");
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(&content)?)
}
