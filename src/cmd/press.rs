//! Key trigger and named command dispatch

use adoc_log::{Plugin, Result, Runtime};

pub fn run(plugin: &Plugin, rt: &mut Runtime<'_>, trigger: &str) -> Result<()> {
    let outcome = plugin.press(trigger, rt)?;
    super::log::print_outcome(&outcome);
    Ok(())
}

pub fn run_command(plugin: &Plugin, rt: &mut Runtime<'_>, name: &str) -> Result<()> {
    let outcome = plugin.run_command(name, rt)?;
    super::log::print_outcome(&outcome);
    Ok(())
}
