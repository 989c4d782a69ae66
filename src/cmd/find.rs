//! Finder command module

use adoc_log::{Action, Plugin, Result, Runtime};

pub fn run(plugin: &Plugin, rt: &mut Runtime<'_>, action: Action) -> Result<()> {
    let outcome = plugin.invoke(action, rt)?;
    super::log::print_outcome(&outcome);
    Ok(())
}
