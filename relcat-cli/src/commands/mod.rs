pub mod index;
pub mod sync;

use clap::Args;
use relcat_renderer::DocumentSettings;

/// Presentation text shared by `sync` and `index`.
#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Title of the index document.
    #[arg(long, env = "RELCAT_TITLE", default_value = "python releases")]
    pub title: String,

    /// Intro line under the title.
    #[arg(long, env = "RELCAT_INTRO", default_value = "Prebuild python builds for ubuntu")]
    pub intro: String,

    /// Prefix of each section heading (empty for the bare group key).
    #[arg(long, env = "RELCAT_SECTION_PREFIX", default_value = "ubuntu")]
    pub section_prefix: String,
}

impl From<DocumentArgs> for DocumentSettings {
    fn from(args: DocumentArgs) -> Self {
        DocumentSettings {
            title: args.title,
            intro: args.intro,
            section_prefix: args.section_prefix,
        }
    }
}
