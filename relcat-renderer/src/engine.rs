//! Tera rendering engine for the index document.
//!
//! # Output shape
//!
//! ```text
//! # <title>
//!
//! <intro>
//!
//!
//!
//! ## <prefix> <group>
//!
//! * [<version>](<group>/<name>-<version>.tar.xz)
//! ```
//!
//! Sections follow the group ordering, bullets the version ordering. Output
//! depends on nothing but the index, the settings and the two orderings.

use tera::Tera;

use relcat_core::{ReleaseIndex, VersionOrder};

use crate::context::{DocumentSettings, IndexContext};
use crate::error::RenderError;

const INDEX_TEMPLATE_NAME: &str = "index.md.tera";
const INDEX_TEMPLATE: &str = include_str!("templates/index.md.tera");

/// Renders a [`ReleaseIndex`] into the catalog document.
pub struct IndexRenderer {
    tera: Tera,
    settings: DocumentSettings,
}

impl IndexRenderer {
    pub fn new(settings: DocumentSettings) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { tera, settings })
    }

    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    /// Render the document for `index`.
    pub fn render(
        &self,
        index: &ReleaseIndex,
        group_order: &dyn VersionOrder,
        version_order: &dyn VersionOrder,
    ) -> Result<String, RenderError> {
        let ctx = IndexContext::build(index, &self.settings, group_order, version_order)?;
        self.render_context(&ctx)
    }

    /// Render a pre-built context.
    pub fn render_context(&self, ctx: &IndexContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(INDEX_TEMPLATE_NAME, &tera_ctx)?)
    }
}
