use std::process::ExitCode;

use adoc_log::{
    host, Action, Cli, Command, Editor, Overrides, PathCapabilities, Plugin, ProcessLauncher, Runtime,
    SystemClock, TerminalEditor,
};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = Overrides {
        dir: cli.dir.clone(),
        open_cmd: cli.open_cmd.map(Into::into),
        prompt_suffix: cli.no_prompt.then_some(false),
    };

    let mut editor = TerminalEditor::from_env();
    let plugin = match adoc_log::load_plugin(cli.config.as_deref(), &overrides) {
        Ok(plugin) => plugin,
        Err(err) => return report(&mut editor, Err(err)),
    };
    let caps = PathCapabilities::from_env();

    match cli.command {
        Command::Keys => report(&mut editor, cmd::keys::run(&plugin, cli.json)),
        Command::Config => report(&mut editor, cmd::config::run(&plugin, cli.json)),
        Command::Backend { kind } => report(&mut editor, cmd::backend::run(&caps, kind.into(), cli.json)),
        action => run_action(&plugin, &mut editor, &caps, action),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env();
    let env_filter = match format!("adoc_log={}", filter).parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Run an editor action. Failures were already shown by the plugin.
fn run_action(plugin: &Plugin, editor: &mut TerminalEditor, caps: &PathCapabilities, command: Command) -> ExitCode {
    let mut launcher = ProcessLauncher;
    let clock = SystemClock;
    let mut rt = Runtime {
        editor,
        capabilities: caps,
        launcher: &mut launcher,
        clock: &clock,
    };

    let result = match command {
        Command::Log => cmd::log::run(plugin, &mut rt),
        Command::Grep | Command::Find => cmd::find::run(plugin, &mut rt, Action::FindContent),
        Command::Files => cmd::find::run(plugin, &mut rt, Action::FindFiles),
        Command::Press { trigger } => cmd::press::run(plugin, &mut rt, &trigger),
        Command::Run { name } => cmd::press::run_command(plugin, &mut rt, &name),
        Command::Keys | Command::Config | Command::Backend { .. } => Ok(()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn report(editor: &mut TerminalEditor, result: adoc_log::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            editor.notify(host::Level::Error, &err.to_string());
            ExitCode::FAILURE
        }
    }
}

mod cmd {
    pub mod backend;
    pub mod config;
    pub mod find;
    pub mod keys;
    pub mod log;
    pub mod press;
}
