use std::path::Path;

use anyhow::Context;

use crate::{
    library::SkillsLibrary,
    types::{EntryKind, InstallLocation, InstallOptions, ProjectTemplate},
};

impl SkillsLibrary {
    /// Materialize a project template at `target`: file structure, AGENTS.md,
    /// and the template's skills installed under `.skillet/skills/`.
    pub async fn create_project(
        &self,
        template: &ProjectTemplate,
        target: &Path,
    ) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(target)
            .await
            .with_context(|| format!("could not create project at {}", target.display()))?;

        for entry in &template.structure {
            let path = target.join(&entry.path);
            match entry.kind {
                EntryKind::Directory => {
                    tokio::fs::create_dir_all(&path).await?;
                },
                EntryKind::File => {
                    if let Some(parent) = path.parent() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                    tokio::fs::write(&path, &entry.content).await?;
                },
            }
        }

        if !template.agents_md.is_empty() {
            tokio::fs::write(target.join("AGENTS.md"), &template.agents_md).await?;
        }

        tokio::fs::create_dir_all(target.join(".skillet/skills")).await?;
        self.install_into(&template.skills, target).await?;

        tracing::info!(
            template = %template.name,
            target = %target.display(),
            "created project"
        );
        Ok(())
    }

    /// Install additional library skills into an existing project.
    pub async fn extend_project(&self, skills: &[String], cwd: &Path) -> anyhow::Result<()> {
        if !cwd.is_dir() {
            anyhow::bail!("project directory does not exist: {}", cwd.display());
        }
        self.install_into(skills, cwd).await
    }

    async fn install_into(&self, skills: &[String], project: &Path) -> anyhow::Result<()> {
        let options = InstallOptions {
            location: Some(InstallLocation::Project),
            cwd: Some(project.to_path_buf()),
        };
        for name in skills {
            self.install_skill(name, &options)
                .await
                .with_context(|| format!("could not install skill '{name}'"))?;
        }
        Ok(())
    }
}

/// Built-in minimal template: an AGENTS.md scaffold and an empty skills
/// directory.
pub fn starter_template() -> ProjectTemplate {
    ProjectTemplate {
        name: "starter".to_string(),
        description: "Minimal agent-ready project".to_string(),
        skills: Vec::new(),
        agents_md: concat!(
            "# Agent Instructions\n",
            "\n",
            "Skills for this project live in `.skillet/skills/`. Run\n",
            "`skillet evaluate` to compile the activation prompt.\n",
        )
        .to_string(),
        structure: Vec::new(),
    }
}
