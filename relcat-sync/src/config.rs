//! Run configuration.

use std::path::PathBuf;

use relcat_renderer::DocumentSettings;

pub const DATA_DIR: &str = "data";
pub const CACHE_DIR: &str = ".cache";
pub const DEFAULT_BRANCH: &str = "release";
pub const DEFAULT_COMMIT_MESSAGE: &str = "updated files";
pub const DEFAULT_INDEX_FILE: &str = "README.md";

/// Author identity used for commits when running under CI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub name: String,
    pub email: String,
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            name: "Renovate Bot".to_string(),
            email: "bot@renovateapp.com".to_string(),
        }
    }
}

/// Everything a single sync run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root holding `data/` (the release checkout) and `.cache/` (incoming archives).
    pub workspace: PathBuf,
    /// Skip every push and log what would have been pushed.
    pub dry_run: bool,
    /// Configure [`RunConfig::identity`] on the checkout before committing.
    pub is_ci: bool,
    /// Remote the data checkout tracks, as `origin`.
    pub remote: Option<String>,
    /// Branch published releases live on.
    pub branch: String,
    pub identity: BotIdentity,
    pub commit_message: String,
    /// File name of the index document, relative to the data root.
    pub index_file: String,
    pub document: DocumentSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            dry_run: false,
            is_ci: false,
            remote: None,
            branch: DEFAULT_BRANCH.to_string(),
            identity: BotIdentity::default(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            document: DocumentSettings::default(),
        }
    }
}

impl RunConfig {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            ..Self::default()
        }
    }

    /// `<workspace>/data`
    pub fn data_dir(&self) -> PathBuf {
        self.workspace.join(DATA_DIR)
    }

    /// `<workspace>/.cache`
    pub fn cache_dir(&self) -> PathBuf {
        self.workspace.join(CACHE_DIR)
    }

    /// `<workspace>/data/<index_file>`
    pub fn index_path(&self) -> PathBuf {
        self.data_dir().join(&self.index_file)
    }
}
