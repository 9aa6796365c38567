use std::{
    path::PathBuf,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

// ── Library categories ───────────────────────────────────────────────────────

/// Category vocabulary for bundled library skills.
///
/// Independent of the loader's category set; the two vocabularies are
/// versioned separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryCategory {
    Meta,
    Audit,
    Principles,
    Habits,
    Hot,
}

impl LibraryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meta => "meta",
            Self::Audit => "audit",
            Self::Principles => "principles",
            Self::Habits => "habits",
            Self::Hot => "hot",
        }
    }
}

impl std::fmt::Display for LibraryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meta" => Ok(Self::Meta),
            "audit" => Ok(Self::Audit),
            "principles" => Ok(Self::Principles),
            "habits" => Ok(Self::Habits),
            "hot" => Ok(Self::Hot),
            other => anyhow::bail!(
                "unknown library category '{other}' (expected meta, audit, principles, habits, or hot)"
            ),
        }
    }
}

/// Frontmatter fields the library reads from its bundled SKILL.md files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySkillMeta {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<LibraryCategory>,
}

// ── Installation ─────────────────────────────────────────────────────────────

/// Where an installed skill lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallLocation {
    /// `<cwd>/.skillet/skills/`
    Project,
    /// `<user data dir>/skillet/skills/`
    User,
}

/// Options for installing a library skill.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub location: Option<InstallLocation>,
    /// Working directory for project-level installs; defaults to the
    /// process working directory.
    pub cwd: Option<PathBuf>,
}

// ── Project templates ────────────────────────────────────────────────────────

/// One entry of a template's file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStructure {
    pub path: PathBuf,
    #[serde(default)]
    pub content: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A project scaffold: agent instructions, file layout, and the library
/// skills to install into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Contents written to the project's AGENTS.md.
    #[serde(default)]
    pub agents_md: String,
    #[serde(default)]
    pub structure: Vec<FileStructure>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            LibraryCategory::Meta,
            LibraryCategory::Audit,
            LibraryCategory::Principles,
            LibraryCategory::Habits,
            LibraryCategory::Hot,
        ] {
            assert_eq!(
                category.as_str().parse::<LibraryCategory>().unwrap(),
                category
            );
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!("testing".parse::<LibraryCategory>().is_err());
    }

    #[test]
    fn test_meta_deserializes_with_category() {
        let meta: LibrarySkillMeta =
            serde_yaml::from_str("name: tidy\ndescription: d\ncategory: habits\n").unwrap();
        assert_eq!(meta.category, Some(LibraryCategory::Habits));
    }
}
