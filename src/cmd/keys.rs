//! Binding listing command module

use adoc_log::{Plugin, Result};

pub fn run(plugin: &Plugin, json: bool) -> Result<()> {
    let registry = plugin.registry();

    if json {
        println!("{}", serde_json::to_string_pretty(registry)?);
        return Ok(());
    }

    println!("Commands:");
    for (name, action) in &registry.commands {
        println!("  :{:<12} {:?}", name, action);
    }

    println!("Key triggers:");
    if registry.keymaps.is_empty() {
        println!("  (none)");
    }
    for (trigger, action) in &registry.keymaps {
        println!("  {:<13} {:?}", trigger, action);
    }
    Ok(())
}
