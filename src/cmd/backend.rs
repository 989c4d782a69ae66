//! Backend resolution command module

use adoc_log::{Backend, Capabilities, Result, SearchKind};

pub fn run(caps: &dyn Capabilities, kind: SearchKind, json: bool) -> Result<()> {
    let backend = Backend::resolve(kind, caps);

    if json {
        println!("{}", serde_json::json!({ "kind": kind, "backend": backend }));
        return Ok(());
    }

    match backend.command_line() {
        Some((program, _)) => println!("{:?} ({})", backend, program),
        None => println!("{:?}", backend),
    }
    Ok(())
}
