pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod finder;
pub mod host;
pub mod note;
pub mod plugin;
pub mod resolve;
pub mod template;
pub mod util;

#[cfg(test)]
mod testing;

pub use cli::{Cli, Command};
pub use config::{Config, OpenMode, Overrides};
pub use error::{Error, Result};
pub use finder::{Backend, Capabilities, DispatchOutcome, Launcher, PathCapabilities, ProcessLauncher, SearchKind};
pub use host::{Editor, TerminalEditor};
pub use note::{Clock, CreateOutcome, SystemClock};
pub use plugin::{Action, Outcome, Plugin, Registry, Runtime};

/// Load the options file (if any), layer `overrides` on top and set up a plugin
pub fn load_plugin(config_file: Option<&std::path::Path>, overrides: &Overrides) -> Result<Plugin> {
    let options = match resolve::config_path(config_file) {
        Some(path) => config::load_options(&path)?,
        None => serde_yaml::Value::Null,
    };
    Plugin::new(overrides.apply(options)?)
}
