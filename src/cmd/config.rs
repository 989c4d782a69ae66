//! Effective configuration command module

use adoc_log::{util, Plugin, Result};

pub fn run(plugin: &Plugin, json: bool) -> Result<()> {
    let config = plugin.config();

    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", serde_yaml::to_string(config)?);
        println!("# notes directory: {}", util::display_path(&config.notes_dir()?));
    }
    Ok(())
}
