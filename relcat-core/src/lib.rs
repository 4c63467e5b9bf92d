//! relcat core library: archive identity, filename parsing, the release
//! index and the version orderings used to render it.
//!
//! Public API surface:
//! - [`types`] — [`ArchiveRecord`] and [`ParseOutcome`]
//! - [`parser`] — [`VersionParser`]
//! - [`index`] — [`ReleaseIndex`]
//! - [`ordering`] — [`VersionOrder`], [`DottedNumericOrder`], [`SemverOrder`]
//! - [`error`] — [`CatalogError`]

pub mod error;
pub mod index;
pub mod ordering;
pub mod parser;
pub mod types;

pub use error::CatalogError;
pub use index::{Duplicate, IndexEntry, IndexGroup, ReleaseIndex};
pub use ordering::{DottedNumericOrder, SemverOrder, VersionOrder};
pub use parser::{VersionParser, ARCHIVE_EXTENSION};
pub use types::{ArchiveRecord, ParseOutcome};
