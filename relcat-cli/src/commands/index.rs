//! `relcat index <data-dir>` — preview the index document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use relcat_core::{DottedNumericOrder, SemverOrder, VersionParser};
use relcat_renderer::IndexRenderer;
use relcat_sync::scan::rebuild_index;

use super::DocumentArgs;

/// Arguments for `relcat index`.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Data directory holding `<group>/<name>-<version>.tar.xz` archives.
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub document: DocumentArgs,
}

impl IndexArgs {
    pub fn run(self) -> Result<()> {
        let parser = VersionParser::new()?;
        let index = rebuild_index(&self.data_dir, &parser)
            .with_context(|| format!("failed to scan {}", self.data_dir.display()))?;
        let renderer = IndexRenderer::new(self.document.into())?;
        let doc = renderer
            .render(&index, &DottedNumericOrder, &SemverOrder)
            .context("failed to render index")?;
        print!("{doc}");
        Ok(())
    }
}
