//! Template context: the serializable rendering payload built from a
//! [`ReleaseIndex`].

use serde::{Deserialize, Serialize};

use relcat_core::{IndexEntry, ReleaseIndex, VersionOrder};

use crate::error::RenderError;

/// Fixed presentation text of the index document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSettings {
    /// Document title (rendered as `# <title>`).
    pub title: String,
    /// Intro line under the title.
    pub intro: String,
    /// Prefix of each section heading; `ubuntu` gives `## ubuntu 22.04`.
    /// Empty means the heading is the bare group key.
    pub section_prefix: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            title: "python releases".to_string(),
            intro: "Prebuild python builds for ubuntu".to_string(),
            section_prefix: "ubuntu".to_string(),
        }
    }
}

/// One `##` section.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCtx {
    pub key: String,
    pub heading: String,
    pub entries: Vec<IndexEntry>,
}

/// Full rendering payload.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub title: String,
    pub intro: String,
    pub groups: Vec<GroupCtx>,
}

impl IndexContext {
    /// Order the index with the given comparators and attach presentation text.
    pub fn build(
        index: &ReleaseIndex,
        settings: &DocumentSettings,
        group_order: &dyn VersionOrder,
        version_order: &dyn VersionOrder,
    ) -> Result<Self, RenderError> {
        let groups = index
            .ordered(group_order, version_order)?
            .into_iter()
            .map(|group| GroupCtx {
                heading: heading(&settings.section_prefix, &group.key),
                key: group.key,
                entries: group.entries,
            })
            .collect();

        Ok(Self {
            title: settings.title.clone(),
            intro: settings.intro.clone(),
            groups,
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}

fn heading(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix} {key}")
    }
}

#[cfg(test)]
mod tests {
    use relcat_core::{ArchiveRecord, DottedNumericOrder, SemverOrder};

    use super::*;

    #[test]
    fn headings_use_prefix() {
        assert_eq!(heading("ubuntu", "22.04"), "ubuntu 22.04");
        assert_eq!(heading("", "22.04"), "22.04");
    }

    #[test]
    fn context_carries_ordered_groups() {
        let index = ReleaseIndex::build([
            ArchiveRecord {
                group_key: "22.04".into(),
                version: "3.12.0".into(),
                canonical_name: "22.04/python-3.12.0.tar.xz".into(),
            },
            ArchiveRecord {
                group_key: "20.04".into(),
                version: "3.8.10".into(),
                canonical_name: "20.04/python-3.8.10.tar.xz".into(),
            },
        ]);
        let ctx = IndexContext::build(
            &index,
            &DocumentSettings::default(),
            &DottedNumericOrder,
            &SemverOrder,
        )
        .unwrap();
        assert_eq!(ctx.groups[0].heading, "ubuntu 20.04");
        assert_eq!(ctx.groups[1].entries[0].name, "22.04/python-3.12.0.tar.xz");
        assert!(ctx.to_tera_context().is_ok());
    }
}
