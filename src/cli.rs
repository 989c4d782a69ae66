use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::OpenMode;
use crate::finder::SearchKind;

/// adoc-log - Timestamped AsciiDoc log notes
///
/// # Quick Reference
///
/// ```bash
/// adoc-log log                        # Create (or reopen) the note for now
/// adoc-log --no-prompt log            # Skip the filename suffix prompt
/// adoc-log grep                       # Live search note contents
/// adoc-log files                      # Fuzzy find note files
/// adoc-log press "<leader>ac"         # Run whatever a key trigger is bound to
/// adoc-log run AdocLog                # Run a registered command
/// adoc-log keys --json                # List bindings
/// adoc-log config                     # Print the effective configuration
/// adoc-log backend content            # Show which finder would run
/// ```
///
/// ## Configuration
///
/// Options are read from `--config`, `$ADOC_LOG_CONFIG`, or
/// `~/.config/adoc-log/config.yaml`, and merged over the defaults:
///
/// ```yaml
/// dir: ~/adoc-log
/// filename_pattern: "%Y%m%d-%H%M%S.adoc"
/// timestamp_pattern: "%Y-%m-%d %H:%M:%S"
/// header_template: "= Log {timestamp}\n:revdate: {date}\n\n"
/// open_cmd: edit            # edit | tabedit | vsplit | split
/// enable_default_mapping: true
/// create_map: "<leader>ac"
/// find_rg_map: "<leader>ag"
/// find_file_map: "<leader>af"
/// find_map: ""
/// prompt_suffix: true
/// ```
///
/// Inside a Neovim terminal (`$NVIM` set) notes open in that instance using
/// `open_cmd`; otherwise `$VISUAL` / `$EDITOR` is launched.
#[derive(Parser, Debug)]
#[command(name = "adoc-log")]
#[command(version)]
#[command(about = "Timestamped AsciiDoc log notes")]
pub struct Cli {
    /// Options file (default: $ADOC_LOG_CONFIG or ~/.config/adoc-log/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Notes directory, overrides the `dir` option
    #[arg(short, long, global = true, value_name = "PATH")]
    pub dir: Option<String>,

    /// How notes are opened, overrides the `open_cmd` option
    #[arg(long, global = true, value_enum)]
    pub open_cmd: Option<OpenModeArg>,

    /// Do not ask for a filename suffix
    #[arg(long, global = true)]
    pub no_prompt: bool,

    /// Output in JSON format
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or reopen the note for the current time
    #[command(alias = "new")]
    Log,

    /// Live search note contents
    #[command(alias = "rg")]
    Grep,

    /// Fuzzy find note files
    Files,

    /// Combined find (content search)
    Find,

    /// Run the action bound to a key trigger
    Press {
        /// Trigger string, e.g. "<leader>ac"
        trigger: String,
    },

    /// Run a registered command
    Run {
        /// Command name, e.g. AdocLog
        name: String,
    },

    /// List registered commands and key triggers
    #[command(alias = "ls")]
    Keys,

    /// Print the effective configuration
    Config,

    /// Show which finder backend would be used
    Backend {
        #[arg(value_enum)]
        kind: KindArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenModeArg {
    Edit,
    Tabedit,
    Vsplit,
    Split,
}

impl From<OpenModeArg> for OpenMode {
    fn from(arg: OpenModeArg) -> Self {
        match arg {
            OpenModeArg::Edit => OpenMode::Edit,
            OpenModeArg::Tabedit => OpenMode::Tabedit,
            OpenModeArg::Vsplit => OpenMode::Vsplit,
            OpenModeArg::Split => OpenMode::Split,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Content,
    Files,
}

impl From<KindArg> for SearchKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Content => SearchKind::Content,
            KindArg::Files => SearchKind::Files,
        }
    }
}
