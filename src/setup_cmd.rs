//! The `setup` command: the effective settings in setup-file form.

use anyhow::{Context, Result};
use tracing::info;

use koyomi::fileio::do_write;
use koyomi::KoyomiConfig;

use crate::cli::SetupArgs;

/// `key="value",` text of `config`, loadable with `--setup`.
fn setup_text(config: &KoyomiConfig) -> String {
    config.to_setup().savesetup()
}

pub fn run(config: &KoyomiConfig, args: SetupArgs) -> Result<()> {
    let text = setup_text(config);
    match &args.output {
        Some(path) => {
            do_write(path, text.lines())
                .with_context(|| format!("failed to write setup file: {}", path.display()))?;
            info!(path = %path.display(), "saved setup");
        }
        None => print!("{text}"),
    }
    Ok(())
}
