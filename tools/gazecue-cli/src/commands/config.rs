//! Show or write the effective configuration.

use std::path::PathBuf;

use gazecue_common::config::AppConfig;

pub fn run(config: &AppConfig, path: Option<PathBuf>, write: bool) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if let Err(e) = config.pipeline.validate() {
        println!("\nWarning: {e}");
    }

    if write {
        match &path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        println!("\nConfiguration written.");
    }

    Ok(())
}
