use std::path::PathBuf;

use {
    anyhow::Context,
    clap::Subcommand,
    skillet_library::{
        SkillsLibrary,
        project::starter_template,
        types::{InstallLocation, InstallOptions, LibraryCategory},
    },
};

#[derive(Subcommand)]
pub enum SkillAction {
    /// List bundled library skills.
    List {
        /// Filter by library category (meta, audit, principles, habits, hot).
        #[arg(long)]
        category: Option<LibraryCategory>,
    },
    /// Show a bundled skill's metadata and instructions.
    Info {
        /// Skill name.
        name: String,
    },
    /// Install a bundled skill into the current project.
    Install {
        /// Skill name.
        name: String,
        /// Install into the user-level skills directory instead.
        #[arg(long, default_value_t = false)]
        user: bool,
    },
    /// Create a new project from a template.
    Init {
        /// Target directory for the new project.
        target: PathBuf,
        /// Template name.
        #[arg(long, default_value = "starter")]
        template: String,
    },
    /// Install additional library skills into the current project.
    Extend {
        /// Skill names.
        #[arg(required = true)]
        skills: Vec<String>,
    },
}

pub async fn handle_skills(
    library_dir: Option<PathBuf>,
    action: SkillAction,
) -> anyhow::Result<()> {
    let root = match library_dir {
        Some(dir) => dir,
        None => default_library_dir()?,
    };
    let library = SkillsLibrary::new(root);

    match action {
        SkillAction::List { category } => {
            let skills = library.list_skills(category).await?;
            if skills.is_empty() {
                println!("No skills found.");
            } else {
                for skill in &skills {
                    let category = skill
                        .meta
                        .category
                        .map(|c| c.to_string())
                        .unwrap_or_default();
                    println!("  {} — {} [{}]", skill.meta.name, skill.meta.description, category);
                }
            }
        },
        SkillAction::Info { name } => {
            let skill = library.load_skill(&name).await?;
            println!("Name:        {}", skill.meta.name);
            println!("Description: {}", skill.meta.description);
            if let Some(category) = skill.meta.category {
                println!("Category:    {category}");
            }
            println!("Path:        {}", skill.path.display());
            println!("\n{}", skill.body);
        },
        SkillAction::Install { name, user } => {
            let options = InstallOptions {
                location: Some(if user {
                    InstallLocation::User
                } else {
                    InstallLocation::Project
                }),
                cwd: None,
            };
            let dest = library.install_skill(&name, &options).await?;
            println!("Installed skill '{}' to {}", name, dest.display());
        },
        SkillAction::Init { target, template } => {
            let template = match template.as_str() {
                "starter" => starter_template(),
                other => anyhow::bail!("unknown template '{other}'"),
            };
            library.create_project(&template, &target).await?;
            println!(
                "Created project '{}' at {}",
                template.name,
                target.display()
            );
        },
        SkillAction::Extend { skills } => {
            let cwd = std::env::current_dir()?;
            library.extend_project(&skills, &cwd).await?;
            println!("Installed {} skill(s) into {}", skills.len(), cwd.display());
        },
    }

    Ok(())
}

fn default_library_dir() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "skillet")
        .context("could not determine user data directory")?;
    Ok(dirs.data_dir().join("library"))
}
