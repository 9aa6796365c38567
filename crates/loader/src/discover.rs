use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{parse, triggers, types::SkillTriggerInfo};

/// Discovers skill trigger records from a filesystem location.
#[async_trait]
pub trait SkillDiscoverer: Send + Sync {
    /// Scan for skills and return their trigger records.
    ///
    /// Discovery never fails: a missing or unreadable root yields an empty
    /// result, and per-skill problems degrade to "not a skill".
    async fn discover(&self) -> Vec<SkillTriggerInfo>;
}

/// Default filesystem-based skill discoverer.
///
/// Scans the immediate children of one skills directory. Each child
/// directory containing a parseable `SKILL.md` contributes one record, in
/// the order the host returns directory entries.
pub struct FsSkillDiscoverer {
    skills_dir: PathBuf,
}

impl FsSkillDiscoverer {
    pub fn new(skills_dir: impl Into<PathBuf>) -> Self {
        Self {
            skills_dir: skills_dir.into(),
        }
    }

    /// Default skills directory for a working directory.
    pub fn default_dir(cwd: &Path) -> PathBuf {
        cwd.join(".skillet/skills")
    }
}

#[async_trait]
impl SkillDiscoverer for FsSkillDiscoverer {
    async fn discover(&self) -> Vec<SkillTriggerInfo> {
        let mut skills = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.skills_dir).await {
            Ok(entries) => entries,
            Err(_) => return skills,
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let skill_dir = entry.path();
            if !skill_dir.is_dir() {
                continue;
            }
            let skill_md = skill_dir.join("SKILL.md");
            let content = match tokio::fs::read_to_string(&skill_md).await {
                Ok(content) => content,
                // Missing or unreadable definition: not a skill.
                Err(_) => continue,
            };
            match parse::parse_definition(&content, &skill_md) {
                Ok(def) => {
                    let trigger_patterns = triggers::extract_triggers(&def.body);
                    skills.push(SkillTriggerInfo {
                        skill_name: def.name,
                        description: def.description,
                        trigger_patterns,
                    });
                },
                Err(e) => {
                    tracing::warn!(?skill_dir, %e, "skipping malformed SKILL.md");
                },
            }
        }

        skills
    }
}
