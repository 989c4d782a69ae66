//! Plugin state: effective configuration plus registered command and triggers

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use crate::config::Config;
use crate::constants as C;
use crate::error::{Error, Result};
use crate::finder::{self, Capabilities, DispatchOutcome, Launcher, SearchKind};
use crate::host::{Editor, Level};
use crate::note::{self, Clock, CreateOutcome};

/// Something a command or key trigger can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    CreateLog,
    FindContent,
    FindFiles,
}

/// Registered commands and key triggers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub commands: BTreeMap<String, Action>,
    pub keymaps: BTreeMap<String, Action>,
}

impl Registry {
    /// Build the bindings for `config`
    pub fn for_config(config: &Config) -> Self {
        let mut registry = Registry::default();
        registry.commands.insert(C::COMMAND_NAME.to_string(), Action::CreateLog);

        if config.enable_default_mapping {
            let triggers = [
                (&config.create_map, Action::CreateLog),
                (&config.find_rg_map, Action::FindContent),
                (&config.find_file_map, Action::FindFiles),
                (&config.find_map, Action::FindContent),
            ];
            for (trigger, action) in triggers {
                if trigger.is_empty() {
                    continue;
                }
                registry.keymaps.insert(trigger.clone(), action);
            }
        }
        registry
    }
}

/// Collaborators an action runs against
pub struct Runtime<'a> {
    pub editor: &'a mut dyn Editor,
    pub capabilities: &'a dyn Capabilities,
    pub launcher: &'a mut dyn Launcher,
    pub clock: &'a dyn Clock,
}

/// What an invoked action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Note(CreateOutcome),
    Finder(DispatchOutcome),
}

/// Configuration and bindings, replaced as a whole by [`Plugin::setup`]
#[derive(Debug, Clone, Default)]
pub struct Plugin {
    config: Config,
    registry: Registry,
}

impl Plugin {
    /// A plugin configured from `options`
    pub fn new(options: Value) -> Result<Self> {
        let mut plugin = Plugin::default();
        plugin.setup(options)?;
        Ok(plugin)
    }

    /// Resolve `options` over the defaults and rebuild every binding.
    /// On error the previous state is kept.
    pub fn setup(&mut self, options: Value) -> Result<()> {
        let config = Config::resolve(options)?;
        let registry = Registry::for_config(&config);
        debug!(
            commands = registry.commands.len(),
            keymaps = registry.keymaps.len(),
            "Plugin configured"
        );
        self.config = config;
        self.registry = registry;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run `action`; errors are also reported through the editor
    pub fn invoke(&self, action: Action, rt: &mut Runtime<'_>) -> Result<Outcome> {
        debug!(?action, "Invoking action");
        let result = match action {
            Action::CreateLog => note::create_log(&self.config, &mut *rt.editor, rt.clock).map(Outcome::Note),
            Action::FindContent => self.find(SearchKind::Content, rt).map(Outcome::Finder),
            Action::FindFiles => self.find(SearchKind::Files, rt).map(Outcome::Finder),
        };
        report(rt, result)
    }

    /// Run the action bound to a key trigger
    pub fn press(&self, trigger: &str, rt: &mut Runtime<'_>) -> Result<Outcome> {
        match self.registry.keymaps.get(trigger) {
            Some(&action) => self.invoke(action, rt),
            None => report(rt, Err(Error::UnknownTrigger(trigger.to_string()))),
        }
    }

    /// Run a registered command by name
    pub fn run_command(&self, name: &str, rt: &mut Runtime<'_>) -> Result<Outcome> {
        match self.registry.commands.get(name) {
            Some(&action) => self.invoke(action, rt),
            None => report(rt, Err(Error::UnknownCommand(name.to_string()))),
        }
    }

    fn find(&self, kind: SearchKind, rt: &mut Runtime<'_>) -> Result<DispatchOutcome> {
        finder::dispatch(kind, &self.config, rt.capabilities, &mut *rt.launcher, &mut *rt.editor)
    }
}

fn report<T>(rt: &mut Runtime<'_>, result: Result<T>) -> Result<T> {
    if let Err(ref err) = result {
        rt.editor.notify(Level::Error, &err.to_string());
    }
    result
}
