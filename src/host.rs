//! Editor collaborator
//!
//! Notes are opened, users are prompted and messages are shown through the
//! [`Editor`] trait. [`TerminalEditor`] implements it for a shell session:
//! it talks to a running Neovim when `$NVIM` is set and otherwise launches
//! `$VISUAL` / `$EDITOR` in the foreground.

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::config::OpenMode;
use crate::error::{Error, Result};
use crate::util;

/// Severity of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Answer to the filename suffix prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixInput {
    /// Text submitted by the user, possibly empty
    Submitted(String),
    /// The user dismissed the prompt
    Cancelled,
    /// No interactive input is possible
    Unavailable,
}

/// Where to place the cursor after opening a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Leave the editor's default position
    Keep,
    /// Last line of the buffer
    End,
    /// 1-based line number
    Line(usize),
}

/// The editor side of every operation
pub trait Editor {
    /// Ask the user for a line of input
    fn prompt(&mut self, label: &str) -> SuffixInput;

    /// Open `path` using `mode` and move the cursor
    fn open(&mut self, path: &Path, mode: OpenMode, cursor: Cursor) -> Result<()>;

    /// Show a message to the user
    fn notify(&mut self, level: Level, message: &str);
}

/// Editors that understand `+N` / `+` and ex commands
const VIM_FAMILY: &[&str] = &["vi", "vim", "nvim", "gvim", "mvim", "view"];

const FALLBACK_EDITOR: &str = "vi";

/// Terminal implementation of [`Editor`]
#[derive(Debug, Default)]
pub struct TerminalEditor {
    /// Socket of the Neovim instance we run inside, if any
    server: Option<String>,
    /// Editor command line for standalone mode
    editor: Option<String>,
}

impl TerminalEditor {
    /// Build from `$NVIM`, `$VISUAL` and `$EDITOR`
    pub fn from_env() -> Self {
        let non_empty = |name: &str| env::var(name).ok().filter(|s| !s.trim().is_empty());
        Self {
            server: non_empty("NVIM"),
            editor: non_empty("VISUAL").or_else(|| non_empty("EDITOR")),
        }
    }

    fn open_remote(&self, server: &str, path: &Path, mode: OpenMode, cursor: Cursor) -> Result<()> {
        let keys = remote_keys(path, mode, cursor);
        debug!(server, %keys, "Sending open request to Neovim");
        let status = Command::new("nvim")
            .args(["--server", server, "--remote-send", &keys])
            .status()?;
        if !status.success() {
            return Err(Error::Editor(format!("nvim --remote-send exited with {}", status)));
        }
        Ok(())
    }

    fn open_standalone(&self, path: &Path, cursor: Cursor) -> Result<()> {
        let editor = self.editor.as_deref().unwrap_or(FALLBACK_EDITOR);
        let (program, args) = editor_invocation(editor, path, cursor);
        debug!(%program, ?args, "Launching editor");
        let status = Command::new(&program).args(&args).status().map_err(|err| {
            Error::Editor(format!("failed to launch '{}': {}", program, err))
        })?;
        if !status.success() {
            return Err(Error::Editor(format!("'{}' exited with {}", program, status)));
        }
        Ok(())
    }
}

impl Editor for TerminalEditor {
    fn prompt(&mut self, label: &str) -> SuffixInput {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!("stdin is not a terminal, skipping prompt");
            return SuffixInput::Unavailable;
        }

        let mut stderr = io::stderr();
        if write!(stderr, "{}", label).and_then(|_| stderr.flush()).is_err() {
            return SuffixInput::Unavailable;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            // EOF (Ctrl-D) dismisses the prompt
            Ok(0) => SuffixInput::Cancelled,
            Ok(_) => SuffixInput::Submitted(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                debug!(%err, "Prompt read failed");
                SuffixInput::Unavailable
            }
        }
    }

    fn open(&mut self, path: &Path, mode: OpenMode, cursor: Cursor) -> Result<()> {
        match self.server.as_deref() {
            Some(server) => self.open_remote(server, path, mode, cursor),
            // A fresh editor has no window to split, so the mode does not apply
            None => self.open_standalone(path, cursor),
        }
    }

    fn notify(&mut self, level: Level, message: &str) {
        // The stderr line is the user-facing copy; tracing only records it
        debug!(?level, "{}", message);
        eprintln!("{}", notice_line(level, message));
    }
}

/// Text shown on stderr for a notification
pub fn notice_line(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        Level::Warn => format!("Warning: {}", message),
        Level::Error => format!("Error: {}", message),
    }
}

/// Keys sent to a running Neovim to open `path`
pub fn remote_keys(path: &Path, mode: OpenMode, cursor: Cursor) -> String {
    let motion = match cursor {
        Cursor::Keep => String::new(),
        Cursor::End => "G".to_string(),
        Cursor::Line(n) => format!("{}G", n),
    };
    format!(
        "<C-\\><C-N>:{} {}<CR>{}",
        mode.ex_command(),
        escape_ex_path(&util::display_path(path)),
        motion
    )
}

/// Program and arguments for a standalone editor launch
pub fn editor_invocation(editor: &str, path: &Path, cursor: Cursor) -> (String, Vec<String>) {
    let mut words = editor.split_whitespace().map(str::to_string);
    let program = words.next().unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    let mut args: Vec<String> = words.collect();

    if is_vim_family(&program) {
        match cursor {
            Cursor::Keep => {}
            Cursor::End => args.push("+".to_string()),
            Cursor::Line(n) => args.push(format!("+{}", n)),
        }
    }
    args.push(path.to_string_lossy().to_string());
    (program, args)
}

fn is_vim_family(program: &str) -> bool {
    Path::new(program)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|name| VIM_FAMILY.contains(&name))
        .unwrap_or(false)
}

/// Escape characters that are special in ex file arguments
fn escape_ex_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(c, ' ' | '\\' | '%' | '#' | '|' | '"') {
            out.push('\\');
        }
        if c == '<' {
            // Keep `<` literal inside --remote-send
            out.push_str("<lt>");
            continue;
        }
        out.push(c);
    }
    out
}
