//! # relcat-renderer
//!
//! Tera-based renderer that turns a [`relcat_core::ReleaseIndex`] into the
//! catalog's human-readable index document.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use relcat_core::{DottedNumericOrder, ReleaseIndex, SemverOrder};
//! use relcat_renderer::{DocumentSettings, IndexRenderer};
//!
//! fn preview(index: &ReleaseIndex) {
//!     if let Ok(renderer) = IndexRenderer::new(DocumentSettings::default()) {
//!         if let Ok(doc) = renderer.render(index, &DottedNumericOrder, &SemverOrder) {
//!             print!("{doc}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{DocumentSettings, GroupCtx, IndexContext};
pub use engine::IndexRenderer;
pub use error::RenderError;
