use std::path;

use anyhow::Context as _;

use crate::args;
use crate::error::Result;

/// Build the site at PATH
#[derive(Clone, Debug, PartialEq, Eq, clap::Args)]
pub(crate) struct BuildArgs {
    /// Site directory
    #[arg(value_name = "PATH", default_value = ".")]
    pub(crate) path: path::PathBuf,

    /// Output directory [default: PATH/build]
    #[arg(short, long, value_name = "DIR")]
    pub(crate) output: Option<path::PathBuf>,

    /// Remove the output `assets` directory before copying assets
    #[arg(short, long)]
    pub(crate) clean: bool,
}

impl BuildArgs {
    pub(crate) fn run(&self) -> Result<()> {
        let mut config = brage::Config::with_source(args::source_dir(&self.path));
        if let Some(output) = &self.output {
            config.destination = output.clone();
        }
        config.clean_assets = self.clean;

        build(&config)?;
        log::info!("Build successful");

        Ok(())
    }
}

pub(crate) fn build(config: &brage::Config) -> Result<brage::BuildSummary> {
    log::info!("Loading site from {}", config.source.display());
    let site = brage::Site::load_with_config(config)
        .with_context(|| format!("Unable to load site from `{}`", config.source.display()))?;

    log::info!("Building site in {}", config.destination.display());
    let summary = brage::build(&site, config, &brage::LocalFileStore)
        .context("Unable to build site")?;
    log::info!(
        "Wrote {} pages, {} posts and {} redirects",
        summary.pages,
        summary.posts,
        summary.redirects
    );

    Ok(summary)
}
