//! Constants for adoc-log
//!
//! Default option values, file names and format strings shared across the
//! codebase.

// === File and Directory Names ===

/// Default notes directory (home shorthand is expanded on use)
pub const DEFAULT_NOTES_DIR: &str = "~/adoc-log";

/// Extension of every note file
pub const ADOC_EXTENSION: &str = ".adoc";

/// Directory under the user's config dir holding the config file
pub const CONFIG_DIR_NAME: &str = "adoc-log";

/// Config file name
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Environment variable pointing at an explicit config file
pub const ENV_CONFIG: &str = "ADOC_LOG_CONFIG";

// === Date and Time Format Strings ===

/// Default filename pattern (trailing extension is optional)
pub const DEFAULT_FILENAME_PATTERN: &str = "%Y%m%d-%H%M%S.adoc";

/// Default pattern for the `{timestamp}` placeholder
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the `{date}` placeholder: %Y-%m-%d
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// === Header Template ===

/// Default header written into new notes
pub const DEFAULT_HEADER_TEMPLATE: &str = "= Log {timestamp}\n:revdate: {date}\n\n";

// === Commands and Key Triggers ===

/// Name of the note creation command
pub const COMMAND_NAME: &str = "AdocLog";

/// Default trigger for note creation
pub const DEFAULT_CREATE_MAP: &str = "<leader>ac";

/// Default trigger for content search
pub const DEFAULT_FIND_RG_MAP: &str = "<leader>ag";

/// Default trigger for filename search
pub const DEFAULT_FIND_FILE_MAP: &str = "<leader>af";

// === Prompts and Messages ===

/// Label shown when asking for a filename suffix
pub const SUFFIX_PROMPT: &str = "Filename suffix: ";

/// Warning when no content search backend is installed
pub const WARN_NO_CONTENT_BACKEND: &str = "No content search backend found (install rg + fzf, or sk)";

/// Warning when no filename search backend is installed
pub const WARN_NO_FILES_BACKEND: &str = "No file search backend found (install fzf or sk)";

// === Finder Executables ===

/// Content-grep tool used by the first content tier
pub const RG: &str = "rg";

/// Fuzzy finder used by both first tiers
pub const FZF: &str = "fzf";

/// Fuzzy finder library used by both second tiers
pub const SK: &str = "sk";
