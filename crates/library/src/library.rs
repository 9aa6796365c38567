use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::types::{InstallLocation, InstallOptions, LibraryCategory, LibrarySkillMeta};

/// A skill loaded from the bundled library.
#[derive(Debug, Clone)]
pub struct LibrarySkill {
    pub meta: LibrarySkillMeta,
    pub body: String,
    pub path: PathBuf,
}

/// A directory of bundled skills, one folder per skill.
pub struct SkillsLibrary {
    root: PathBuf,
}

impl SkillsLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load one bundled skill by name.
    pub async fn load_skill(&self, name: &str) -> anyhow::Result<LibrarySkill> {
        let skill_dir = self.root.join(name);
        let skill_md = skill_dir.join("SKILL.md");
        let content = tokio::fs::read_to_string(&skill_md)
            .await
            .with_context(|| {
                format!(
                    "skill '{name}' not found in library at {}",
                    self.root.display()
                )
            })?;
        parse_library_skill(&content, &skill_dir)
    }

    /// List bundled skills, optionally filtered by library category.
    ///
    /// Malformed entries are skipped with a warning; a missing library root
    /// yields an empty list.
    pub async fn list_skills(
        &self,
        category: Option<LibraryCategory>,
    ) -> anyhow::Result<Vec<LibrarySkill>> {
        let mut skills = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(_) => return Ok(skills),
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let skill_dir = entry.path();
            if !skill_dir.is_dir() {
                continue;
            }
            let content = match tokio::fs::read_to_string(skill_dir.join("SKILL.md")).await {
                Ok(content) => content,
                Err(_) => continue,
            };
            match parse_library_skill(&content, &skill_dir) {
                Ok(skill) => {
                    if category.is_none() || skill.meta.category == category {
                        skills.push(skill);
                    }
                },
                Err(e) => {
                    tracing::warn!(?skill_dir, %e, "skipping malformed library skill");
                },
            }
        }

        Ok(skills)
    }

    /// Copy a bundled skill into a project or the user-level skills
    /// directory. Returns the installed path.
    pub async fn install_skill(
        &self,
        name: &str,
        options: &InstallOptions,
    ) -> anyhow::Result<PathBuf> {
        let skill = self.load_skill(name).await?;
        let dest = resolve_skills_dir(options)?.join(name);

        if dest.exists() {
            anyhow::bail!("skill '{}' already installed at {}", name, dest.display());
        }

        copy_dir(&skill.path, &dest).await?;
        tracing::info!(%name, dest = %dest.display(), "installed library skill");
        Ok(dest)
    }
}

/// Parse a bundled SKILL.md with the library's metadata schema.
fn parse_library_skill(content: &str, skill_dir: &Path) -> anyhow::Result<LibrarySkill> {
    let (raw_frontmatter, body) = skillet_loader::parse::split_frontmatter(content)
        .map_err(|reason| anyhow::anyhow!("{} in {}", reason, skill_dir.display()))?;

    let meta: LibrarySkillMeta = serde_yaml::from_str(&raw_frontmatter)
        .with_context(|| format!("invalid frontmatter in {}", skill_dir.display()))?;

    if meta.name.trim().is_empty() {
        anyhow::bail!("missing name in frontmatter in {}", skill_dir.display());
    }

    Ok(LibrarySkill {
        meta,
        body,
        path: skill_dir.to_path_buf(),
    })
}

/// Resolve the destination skills directory for an install.
fn resolve_skills_dir(options: &InstallOptions) -> anyhow::Result<PathBuf> {
    match options.location.unwrap_or(InstallLocation::Project) {
        InstallLocation::Project => {
            let cwd = match &options.cwd {
                Some(cwd) => cwd.clone(),
                None => std::env::current_dir()?,
            };
            Ok(cwd.join(".skillet/skills"))
        },
        InstallLocation::User => {
            let dirs = directories::ProjectDirs::from("", "", "skillet")
                .context("could not determine user data directory")?;
            Ok(dirs.data_dir().join("skills"))
        },
    }
}

/// Recursively copy a skill directory. Symlinks are skipped.
pub(crate) async fn copy_dir(src: &Path, dest: &Path) -> anyhow::Result<()> {
    for entry in walkdir::WalkDir::new(src) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.path_is_symlink() {
            tracing::warn!(path = ?entry.path(), "skipping symlink during skill copy");
            continue;
        }
        if entry.file_type().is_dir() {
            tokio::fs::create_dir_all(&target).await?;
        } else {
            if let Some(parent) = target.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::copy(entry.path(), &target).await?;
        }
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, crate::types::LibraryCategory};

    fn write_library_skill(root: &Path, name: &str, category: &str) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("SKILL.md"),
            format!("---\nname: {name}\ndescription: demo\ncategory: {category}\n---\nBody.\n"),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn test_load_and_list() {
        let tmp = tempfile::tempdir().unwrap();
        write_library_skill(tmp.path(), "tidy", "habits");
        write_library_skill(tmp.path(), "review", "audit");

        let library = SkillsLibrary::new(tmp.path());
        let skill = library.load_skill("tidy").await.unwrap();
        assert_eq!(skill.meta.name, "tidy");
        assert!(skill.body.contains("Body."));

        let all = library.list_skills(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let audits = library
            .list_skills(Some(LibraryCategory::Audit))
            .await
            .unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].meta.name, "review");
    }

    #[tokio::test]
    async fn test_load_missing_skill_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let library = SkillsLibrary::new(tmp.path());
        assert!(library.load_skill("nope").await.is_err());
    }

    #[tokio::test]
    async fn test_list_missing_root_is_empty() {
        let library = SkillsLibrary::new("/nonexistent/library");
        assert!(library.list_skills(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_install_copies_supporting_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        write_library_skill(&root, "tidy", "habits");
        std::fs::create_dir_all(root.join("tidy/extras")).unwrap();
        std::fs::write(root.join("tidy/extras/notes.md"), "notes").unwrap();

        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();

        let library = SkillsLibrary::new(&root);
        let options = InstallOptions {
            location: Some(InstallLocation::Project),
            cwd: Some(project.clone()),
        };
        let dest = library.install_skill("tidy", &options).await.unwrap();

        assert_eq!(dest, project.join(".skillet/skills/tidy"));
        assert!(dest.join("SKILL.md").is_file());
        assert!(dest.join("extras/notes.md").is_file());
    }

    #[tokio::test]
    async fn test_install_twice_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("library");
        write_library_skill(&root, "tidy", "habits");
        let project = tmp.path().join("project");
        std::fs::create_dir_all(&project).unwrap();

        let library = SkillsLibrary::new(&root);
        let options = InstallOptions {
            location: Some(InstallLocation::Project),
            cwd: Some(project),
        };
        library.install_skill("tidy", &options).await.unwrap();
        assert!(library.install_skill("tidy", &options).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_library_skill_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_library_skill(tmp.path(), "good", "meta");
        let bad = tmp.path().join("bad");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("SKILL.md"), "no frontmatter").unwrap();

        let library = SkillsLibrary::new(tmp.path());
        let skills = library.list_skills(None).await.unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].meta.name, "good");
    }
}
