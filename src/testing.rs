//! Test doubles for the editor, capability, launcher and clock seams

use std::cell::Cell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::config::{Config, OpenMode};
use crate::error::Result;
use crate::finder::{Backend, Capabilities, Launcher};
use crate::host::{Cursor, Editor, Level, SuffixInput};
use crate::note::Clock;

/// Default config rooted at `dir`
pub fn config_in(dir: &Path) -> Config {
    Config {
        dir: dir.to_string_lossy().to_string(),
        ..Config::default()
    }
}

/// Records every editor interaction
pub struct FakeEditor {
    answer: SuffixInput,
    pub prompts: usize,
    pub opened: Vec<(PathBuf, OpenMode, Cursor)>,
    pub notifications: Vec<(Level, String)>,
}

impl FakeEditor {
    fn answering(answer: SuffixInput) -> Self {
        Self {
            answer,
            prompts: 0,
            opened: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn submitting(text: &str) -> Self {
        Self::answering(SuffixInput::Submitted(text.to_string()))
    }

    pub fn cancelling() -> Self {
        Self::answering(SuffixInput::Cancelled)
    }

    pub fn unavailable() -> Self {
        Self::answering(SuffixInput::Unavailable)
    }
}

impl Editor for FakeEditor {
    fn prompt(&mut self, _label: &str) -> SuffixInput {
        self.prompts += 1;
        self.answer.clone()
    }

    fn open(&mut self, path: &Path, mode: OpenMode, cursor: Cursor) -> Result<()> {
        self.opened.push((path.to_path_buf(), mode, cursor));
        Ok(())
    }

    fn notify(&mut self, level: Level, message: &str) {
        self.notifications.push((level, message.to_string()));
    }
}

/// A fixed set of installed tools
pub struct FakeCapabilities {
    installed: HashSet<String>,
}

impl FakeCapabilities {
    pub fn with(tools: &[&str]) -> Self {
        Self {
            installed: tools.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Capabilities for FakeCapabilities {
    fn has_executable(&self, name: &str) -> bool {
        self.installed.contains(name)
    }
}

/// Returns a canned selection and records launches
pub struct FakeLauncher {
    selection: Option<String>,
    pub launched: Vec<(Backend, PathBuf)>,
}

impl FakeLauncher {
    pub fn selecting(selection: Option<&str>) -> Self {
        Self {
            selection: selection.map(str::to_string),
            launched: Vec::new(),
        }
    }
}

impl Launcher for FakeLauncher {
    fn launch(&mut self, backend: Backend, dir: &Path) -> Result<Option<String>> {
        self.launched.push((backend, dir.to_path_buf()));
        Ok(self.selection.clone())
    }
}

/// Yields the given times in order, repeating the last one
pub struct FixedClock {
    times: Vec<DateTime<Local>>,
    next: Cell<usize>,
}

impl FixedClock {
    pub fn time(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    pub fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        Self::sequence(vec![Self::time(y, mo, d, h, mi, s)])
    }

    pub fn sequence(times: Vec<DateTime<Local>>) -> Self {
        Self {
            times,
            next: Cell::new(0),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        let index = self.next.get().min(self.times.len() - 1);
        self.next.set(self.next.get() + 1);
        self.times[index]
    }
}
