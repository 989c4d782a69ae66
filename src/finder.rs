//! Finder dispatch
//!
//! Each search kind has two backend tiers, checked in order:
//!
//! | kind    | tier 1                        | tier 2                     |
//! |---------|-------------------------------|----------------------------|
//! | content | `fzf` reloading `rg` per query | `sk` interactive grep      |
//! | files   | `fzf` over the directory       | `sk` over the directory    |
//!
//! The first available tier is launched inside the notes directory. When
//! neither is installed the user gets a single warning.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::host::{Cursor, Editor, Level};
use crate::resolve;

/// What to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Content,
    Files,
}

impl SearchKind {
    fn missing_message(self) -> &'static str {
        match self {
            SearchKind::Content => C::WARN_NO_CONTENT_BACKEND,
            SearchKind::Files => C::WARN_NO_FILES_BACKEND,
        }
    }
}

/// The closed set of finder backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// `rg` driven from `fzf`
    ContentGrepTool,
    /// `sk` interactive mode with preview
    FuzzyLiveGrep,
    /// `fzf` over file names
    FileListTool,
    /// `sk` over file names with preview
    FuzzyFindFiles,
    NoneAvailable,
}

impl Backend {
    /// Resolve the backend for `kind`; tier 1 wins when present
    pub fn resolve(kind: SearchKind, caps: &dyn Capabilities) -> Backend {
        let backend = match kind {
            SearchKind::Content if caps.has_executable(C::RG) && caps.has_executable(C::FZF) => {
                Backend::ContentGrepTool
            }
            SearchKind::Content if caps.has_executable(C::SK) => Backend::FuzzyLiveGrep,
            SearchKind::Files if caps.has_executable(C::FZF) => Backend::FileListTool,
            SearchKind::Files if caps.has_executable(C::SK) => Backend::FuzzyFindFiles,
            _ => Backend::NoneAvailable,
        };
        debug!(?kind, ?backend, "Resolved finder backend");
        backend
    }

    /// Program and arguments that run this backend
    pub fn command_line(self) -> Option<(&'static str, Vec<String>)> {
        let rg = "rg --column --line-number --no-heading --color=always --smart-case -- {q} || true";
        match self {
            Backend::ContentGrepTool => Some((
                C::FZF,
                vec![
                    "--ansi".into(),
                    "--disabled".into(),
                    "--delimiter".into(),
                    ":".into(),
                    "--bind".into(),
                    format!("start:reload:{}", rg),
                    "--bind".into(),
                    format!("change:reload:{}", rg),
                ],
            )),
            Backend::FuzzyLiveGrep => Some((
                C::SK,
                vec![
                    "--ansi".into(),
                    "--interactive".into(),
                    "--cmd".into(),
                    "grep -rnI --color=always -e \"{}\" .".into(),
                    "--delimiter".into(),
                    ":".into(),
                    "--preview".into(),
                    "cat {1}".into(),
                ],
            )),
            Backend::FileListTool => Some((C::FZF, Vec::new())),
            Backend::FuzzyFindFiles => Some((C::SK, vec!["--preview".into(), "cat {}".into()])),
            Backend::NoneAvailable => None,
        }
    }
}

/// Probes for installed tools
pub trait Capabilities {
    fn has_executable(&self, name: &str) -> bool;
}

/// Looks tools up on `PATH`
#[derive(Debug, Clone)]
pub struct PathCapabilities {
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl PathCapabilities {
    pub fn from_env() -> Self {
        Self::with_search_path(
            std::env::var_os("PATH"),
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        )
    }

    pub fn with_search_path(search_path: Option<OsString>, cwd: PathBuf) -> Self {
        Self { search_path, cwd }
    }
}

impl Capabilities for PathCapabilities {
    fn has_executable(&self, name: &str) -> bool {
        which::which_in(name, self.search_path.as_ref(), &self.cwd).is_ok()
    }
}

/// Runs a backend and returns the selected line, if any
pub trait Launcher {
    fn launch(&mut self, backend: Backend, dir: &Path) -> Result<Option<String>>;
}

/// Spawns the finder as a child process
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, backend: Backend, dir: &Path) -> Result<Option<String>> {
        let (program, args) = backend
            .command_line()
            .ok_or_else(|| Error::Finder("no backend to launch".to_string()))?;
        debug!(program, ?args, dir = %dir.display(), "Launching finder");

        let output = Command::new(program)
            .args(&args)
            .current_dir(dir)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .stdout(Stdio::piped())
            .output()
            .map_err(|err| Error::Finder(format!("failed to launch '{}': {}", program, err)))?;

        finder_result(program, output.status.code(), &output.stdout)
    }
}

/// Interpret a finder's exit code and stdout.
/// 0 yields the first non-empty line; 1 (no match) and 130 (aborted) yield
/// nothing; anything else, including death by signal, is an error.
pub fn finder_result(program: &str, code: Option<i32>, stdout: &[u8]) -> Result<Option<String>> {
    match code {
        Some(0) => {}
        Some(1) | Some(130) => return Ok(None),
        Some(code) => {
            return Err(Error::Finder(format!("'{}' exited with code {}", program, code)));
        }
        None => return Err(Error::Finder(format!("'{}' was terminated by a signal", program))),
    }

    let stdout = String::from_utf8_lossy(stdout);
    Ok(stdout
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(str::to_string))
}

/// A picked entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub path: PathBuf,
    pub line: Option<usize>,
}

/// Parse a finder output line relative to `dir`.
/// Content matches look like `path:line:...`, file matches are a bare path.
pub fn parse_selection(kind: SearchKind, line: &str, dir: &Path) -> Option<Selection> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }

    let (file, line_no) = match kind {
        SearchKind::Files => (line, None),
        SearchKind::Content => {
            let mut parts = line.splitn(3, ':');
            let file = parts.next()?;
            let line_no = parts.next().and_then(|n| n.parse::<usize>().ok());
            (file, line_no)
        }
    };

    let file = file.strip_prefix("./").unwrap_or(file);
    if file.is_empty() {
        return None;
    }
    Some(Selection {
        path: dir.join(file),
        line: line_no,
    })
}

/// Result of [`dispatch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A selection was opened in the editor
    Opened(PathBuf),
    /// The finder closed without a selection
    Dismissed,
    /// No backend installed; a warning was shown
    Unavailable,
}

/// Run the finder for `kind` over the notes directory
pub fn dispatch(
    kind: SearchKind,
    config: &Config,
    caps: &dyn Capabilities,
    launcher: &mut dyn Launcher,
    editor: &mut dyn Editor,
) -> Result<DispatchOutcome> {
    let dir = resolve::ensure_notes_dir(config)?;

    let backend = Backend::resolve(kind, caps);
    if backend == Backend::NoneAvailable {
        editor.notify(Level::Warn, kind.missing_message());
        return Ok(DispatchOutcome::Unavailable);
    }

    let selected = launcher.launch(backend, &dir)?;
    let Some(selection) = selected.and_then(|line| parse_selection(kind, &line, &dir)) else {
        debug!("Finder closed without selection");
        return Ok(DispatchOutcome::Dismissed);
    };

    let cursor = selection.line.map(Cursor::Line).unwrap_or(Cursor::Keep);
    debug!(path = %selection.path.display(), "Opening selection");
    editor.open(&selection.path, config.open_cmd, cursor)?;
    Ok(DispatchOutcome::Opened(selection.path))
}
