// Configuration file commands

use anyhow::{bail, Context as _, Result};
use clap::Args;
use launchpad_sdk::create_example_config;

use super::utils::success;

#[derive(Args)]
pub struct InitConfigCmd {
    /// Where to write the file
    path: String,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub fn execute(cmd: &InitConfigCmd) -> Result<()> {
    if std::path::Path::new(&cmd.path).exists() && !cmd.force {
        bail!("{} already exists (use --force to overwrite)", cmd.path);
    }

    create_example_config(&cmd.path).with_context(|| format!("Failed to write {}", cmd.path))?;
    success(&format!("Example configuration written to {}", cmd.path));
    Ok(())
}
