use std::path;

use anyhow::Context as _;

use crate::error::Result;

/// Create a starter site at PATH
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct InitArgs {
    /// Target directory
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) path: path::PathBuf,

    /// Overwrite existing files
    #[arg(short, long)]
    pub(crate) force: bool,
}

impl InitArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let created = brage::create_new_project(&self.path, self.force)
            .with_context(|| format!("Could not create a site in `{}`", self.path.display()))?;
        for file in &created {
            log::debug!("Created {}", file.display());
        }
        log::info!(
            "Created new site at {} ({} files)",
            self.path.display(),
            created.len()
        );

        Ok(())
    }
}
