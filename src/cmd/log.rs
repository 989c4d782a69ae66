//! Note creation command module

use adoc_log::{util, Action, CreateOutcome, Outcome, Plugin, Result, Runtime};

pub fn run(plugin: &Plugin, rt: &mut Runtime<'_>) -> Result<()> {
    let outcome = plugin.invoke(Action::CreateLog, rt)?;
    print_outcome(&outcome);
    Ok(())
}

/// Print the touched path for shell pipeline compatibility
pub fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Note(CreateOutcome::Created(path))
        | Outcome::Note(CreateOutcome::Opened(path))
        | Outcome::Finder(adoc_log::DispatchOutcome::Opened(path)) => {
            println!("{}", util::display_path(path));
        }
        _ => {}
    }
}
