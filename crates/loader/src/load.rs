use std::path::{Path, PathBuf};

use crate::{error::Result, parse, types::Skill};

/// How deep below the root to search for nested skill directories.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Options for loading skills from a directory tree.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub max_depth: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Load one skill from its directory: strict metadata parse plus the full
/// markdown body and the list of supporting files.
pub async fn load_skill(skill_dir: &Path) -> Result<Skill> {
    let skill_md = skill_dir.join("SKILL.md");
    let content = tokio::fs::read_to_string(&skill_md).await?;
    let metadata = parse::parse_metadata(&content, skill_dir)?;
    let (_, body) = parse::split_frontmatter(&content)
        .map_err(|reason| crate::error::Error::malformed(&skill_md, reason))?;
    let supporting_files = collect_supporting_files(skill_dir);

    Ok(Skill {
        metadata,
        body,
        path: skill_dir.to_path_buf(),
        supporting_files,
    })
}

/// Load every skill found up to `max_depth` below `root`.
///
/// Entries whose SKILL.md cannot be read or parsed are skipped with a
/// warning; a missing root yields an empty list.
pub async fn load_skills(root: &Path, options: LoadOptions) -> Vec<Skill> {
    let mut skills = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .max_depth(options.max_depth)
        .into_iter()
        .flatten()
    {
        if entry.file_type().is_file() && entry.file_name() == "SKILL.md" {
            let Some(skill_dir) = entry.path().parent() else {
                continue;
            };
            match load_skill(skill_dir).await {
                Ok(skill) => skills.push(skill),
                Err(e) => {
                    tracing::warn!(?skill_dir, %e, "skipping unloadable skill");
                },
            }
        }
    }

    skills
}

/// Files shipped alongside SKILL.md, as sorted paths relative to the skill
/// directory.
fn collect_supporting_files(skill_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(skill_dir)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file() && e.file_name() != "SKILL.md")
        .filter_map(|e| {
            e.path()
                .strip_prefix(skill_dir)
                .ok()
                .map(Path::to_path_buf)
        })
        .collect();
    files.sort();
    files
}
