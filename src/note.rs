//! Note creation
//!
//! Creating a note is split in two phases. [`PendingNote::prepare`] reads
//! the clock and computes the base filename and timestamp. Once the suffix
//! is known, [`PendingNote::with_suffix`] yields a [`NotePlan`] that writes
//! the header (only for a new file) before the note is opened.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::config::Config;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::host::{Cursor, Editor, SuffixInput};
use crate::resolve;
use crate::template;
use crate::util;

/// Source of the current wall-clock time
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Result of [`create_log`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new file was written and opened
    Created(PathBuf),
    /// The file already existed and was opened untouched
    Opened(PathBuf),
    /// The suffix prompt was dismissed, nothing happened
    Cancelled,
}

/// First phase: directory, timestamp and base filename are known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNote {
    pub dir: PathBuf,
    /// Filename without the `.adoc` extension
    pub base_name: String,
    pub timestamp: String,
}

impl PendingNote {
    /// Ensure the notes directory and compute names from one clock read
    pub fn prepare(config: &Config, clock: &dyn Clock) -> Result<Self> {
        let dir = resolve::ensure_notes_dir(config)?;
        let now = clock.now();
        let timestamp = util::format_time(&now, &config.timestamp_pattern)?;
        let filename = util::format_time(&now, &config.filename_pattern)?;
        let base_name = util::strip_suffix_once(&filename, C::ADOC_EXTENSION).to_string();

        Ok(Self {
            dir,
            base_name,
            timestamp,
        })
    }

    /// Second phase: fix the final path
    pub fn with_suffix(self, suffix: &str) -> NotePlan {
        let filename = format!("{}{}{}", self.base_name, suffix, C::ADOC_EXTENSION);
        NotePlan {
            path: self.dir.join(filename),
            timestamp: self.timestamp,
        }
    }
}

/// A note with its final path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePlan {
    pub path: PathBuf,
    pub timestamp: String,
}

impl NotePlan {
    /// Write the populated header if the file does not exist yet.
    /// Returns whether a file was created.
    ///
    /// `{date}` comes from a fresh clock read, not from the timestamp.
    pub fn write_header(&self, config: &Config, clock: &dyn Clock) -> Result<bool> {
        if self.path.exists() {
            debug!(path = %self.path.display(), "Note exists, keeping content");
            return Ok(false);
        }

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|source| Error::NoteOpen {
                path: self.path.clone(),
                source,
            })?;

        let date = util::format_time(&clock.now(), C::DATE_FORMAT)?;
        let header = template::populate(&config.header_template, &self.timestamp, &date);
        self.finish_header(file, &header)?;

        debug!(path = %self.path.display(), "Created note");
        Ok(true)
    }

    /// Write `header` into the freshly created file. A partial file is
    /// removed so the next attempt starts clean.
    fn finish_header<W: Write>(&self, mut writer: W, header: &str) -> Result<()> {
        let written = writer.write_all(header.as_bytes()).and_then(|_| writer.flush());
        if let Err(source) = written {
            drop(writer);
            if let Err(err) = fs::remove_file(&self.path) {
                debug!(%err, path = %self.path.display(), "Could not remove partial note");
            }
            return Err(Error::NoteWrite {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

/// Create (or reopen) the note for the current time and open it
pub fn create_log(config: &Config, editor: &mut dyn Editor, clock: &dyn Clock) -> Result<CreateOutcome> {
    let pending = PendingNote::prepare(config, clock)?;

    let suffix = if config.prompt_suffix {
        match editor.prompt(C::SUFFIX_PROMPT) {
            SuffixInput::Submitted(text) => text,
            SuffixInput::Cancelled => {
                debug!("Suffix prompt cancelled");
                return Ok(CreateOutcome::Cancelled);
            }
            SuffixInput::Unavailable => String::new(),
        }
    } else {
        String::new()
    };

    let plan = pending.with_suffix(&suffix);
    let created = plan.write_header(config, clock)?;
    editor.open(&plan.path, config.open_cmd, Cursor::End)?;

    Ok(if created {
        CreateOutcome::Created(plan.path)
    } else {
        CreateOutcome::Opened(plan.path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpenMode;
    use crate::testing::{config_in, FakeEditor, FixedClock};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_strips_extension() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);

        let mut config = config_in(temp_dir.path());
        config.filename_pattern = "%Y%m%d-%H%M%S.adoc".to_string();
        let pending = PendingNote::prepare(&config, &clock).unwrap();
        assert_eq!(pending.base_name, "20250101-120000");

        config.filename_pattern = "%Y%m%d-%H%M%S".to_string();
        let pending = PendingNote::prepare(&config, &clock).unwrap();
        assert_eq!(pending.base_name, "20250101-120000");

        let plan = pending.with_suffix("-standup");
        assert!(plan.path.ends_with("20250101-120000-standup.adoc"));
    }

    #[test]
    fn test_filename_has_single_extension() {
        let temp_dir = TempDir::new().unwrap();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut config = config_in(temp_dir.path());

        for pattern in ["%Y%m%d", "%Y%m%d.adoc"] {
            config.filename_pattern = pattern.to_string();
            let plan = PendingNote::prepare(&config, &clock).unwrap().with_suffix("");
            let name = plan.path.file_name().unwrap().to_string_lossy().to_string();
            assert_eq!(name, "20250101.adoc");
        }
    }

    #[test]
    fn test_create_log_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.filename_pattern = "%Y%m%d-%H%M%S".to_string();
        config.timestamp_pattern = "%Y%m%d-%H%M%S".to_string();
        config.header_template = "= Log {timestamp}\n:revdate: {date}\n\n".to_string();
        config.open_cmd = OpenMode::Tabedit;
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::submitting("");

        let outcome = create_log(&config, &mut editor, &clock).unwrap();

        let path = match outcome {
            CreateOutcome::Created(path) => path,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "= Log 20250101-120000\n:revdate: 2025-01-01\n\n"
        );
        assert_eq!(editor.opened, vec![(path, OpenMode::Tabedit, Cursor::End)]);
        assert_eq!(editor.prompts, 1);
    }

    #[test]
    fn test_create_log_twice_keeps_content() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::submitting("");

        let first = create_log(&config, &mut editor, &clock).unwrap();
        let path = match first {
            CreateOutcome::Created(path) => path,
            other => panic!("unexpected outcome: {:?}", other),
        };
        fs::write(&path, "edited by hand\n").unwrap();

        let second = create_log(&config, &mut editor, &clock).unwrap();
        assert_eq!(second, CreateOutcome::Opened(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited by hand\n");
        assert_eq!(editor.opened.len(), 2);
    }

    #[test]
    fn test_create_log_creates_missing_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let notes = temp_dir.path().join("deep").join("er").join("notes");
        let config = config_in(&notes);
        let clock = FixedClock::at(2025, 3, 4, 5, 6, 7);
        let mut editor = FakeEditor::unavailable();

        let outcome = create_log(&config, &mut editor, &clock).unwrap();
        assert!(notes.is_dir());
        assert!(matches!(outcome, CreateOutcome::Created(ref p) if p.exists()));
    }

    #[test]
    fn test_create_log_with_suffix() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.filename_pattern = "%Y%m%d".to_string();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::submitting("-retro");

        let outcome = create_log(&config, &mut editor, &clock).unwrap();
        let expected = dunce::canonicalize(temp_dir.path()).unwrap().join("20250101-retro.adoc");
        assert_eq!(outcome, CreateOutcome::Created(expected));
    }

    #[test]
    fn test_create_log_cancelled_touches_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let config = config_in(temp_dir.path());
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::cancelling();

        let outcome = create_log(&config, &mut editor, &clock).unwrap();
        assert_eq!(outcome, CreateOutcome::Cancelled);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
        assert!(editor.opened.is_empty());
    }

    #[test]
    fn test_create_log_without_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.prompt_suffix = false;
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::cancelling();

        let outcome = create_log(&config, &mut editor, &clock).unwrap();
        assert!(matches!(outcome, CreateOutcome::Created(_)));
        assert_eq!(editor.prompts, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_create_log_open_failure_names_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut config = config_in(&blocker.join("notes"));
        config.filename_pattern = "%Y%m%d".to_string();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let mut editor = FakeEditor::submitting("");

        let err = create_log(&config, &mut editor, &clock).unwrap_err();
        assert!(matches!(err, Error::NoteOpen { .. }));
        assert!(err.to_string().contains("20250101.adoc"));
        assert!(editor.opened.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_header_write_failure_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.filename_pattern = "%Y%m%d".to_string();
        config.header_template = "= Log {timestamp}\n".to_string();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        let plan = PendingNote::prepare(&config, &clock).unwrap().with_suffix("");
        // What create_new leaves behind before the header is written
        fs::write(&plan.path, "").unwrap();

        let err = plan.finish_header(FailingWriter, "= Log\n").unwrap_err();
        assert!(matches!(err, Error::NoteWrite { .. }));
        assert!(err.to_string().contains("20250101.adoc"));
        assert!(!plan.path.exists());

        // A retry is not mistaken for an existing note
        assert!(plan.write_header(&config, &clock).unwrap());
        assert!(fs::read_to_string(&plan.path).unwrap().starts_with("= Log 2025"));
    }

    #[test]
    fn test_date_uses_second_clock_read() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = config_in(temp_dir.path());
        config.header_template = "{timestamp}|{date}".to_string();
        config.timestamp_pattern = "%Y-%m-%d".to_string();
        // First read just before midnight, second just after
        let clock = FixedClock::sequence(vec![
            FixedClock::time(2024, 12, 31, 23, 59, 59),
            FixedClock::time(2025, 1, 1, 0, 0, 0),
        ]);

        let plan = PendingNote::prepare(&config, &clock).unwrap().with_suffix("");
        assert!(plan.write_header(&config, &clock).unwrap());
        assert_eq!(fs::read_to_string(&plan.path).unwrap(), "2024-12-31|2025-01-01");
    }
}
