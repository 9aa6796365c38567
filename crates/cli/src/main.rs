mod library_commands;

use {
    clap::{Parser, Subcommand},
    skillet_loader::{
        discover::{FsSkillDiscoverer, SkillDiscoverer},
        prompt::{EvaluateResult, compile_evaluation_prompt},
    },
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "skillet", about = "Skillet — skill library and activation prompt compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the skill activation prompt from installed skills.
    Evaluate {
        /// Working directory used to resolve the default skills directory.
        #[arg(long)]
        cwd: Option<std::path::PathBuf>,
        /// Skills directory to scan (overrides <cwd>/.skillet/skills).
        #[arg(long, env = "SKILLET_SKILLS_DIR")]
        skills_dir: Option<std::path::PathBuf>,
        /// Print the skills and prompt as a JSON payload.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Bundled skill library management.
    Skills {
        /// Library root directory (overrides the user data dir default).
        #[arg(long, global = true, env = "SKILLET_LIBRARY_DIR")]
        library: Option<std::path::PathBuf>,
        #[command(subcommand)]
        action: library_commands::SkillAction,
    },
}

/// Initialise tracing on stderr so the rendered prompt owns stdout.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "skillet starting");

    match cli.command {
        Commands::Evaluate {
            cwd,
            skills_dir,
            json,
        } => handle_evaluate(cwd, skills_dir, json).await,
        Commands::Skills { library, action } => {
            library_commands::handle_skills(library, action).await
        },
    }
}

async fn handle_evaluate(
    cwd: Option<std::path::PathBuf>,
    skills_dir: Option<std::path::PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let cwd = match cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let skills_dir = skills_dir.unwrap_or_else(|| FsSkillDiscoverer::default_dir(&cwd));

    let discoverer = FsSkillDiscoverer::new(skills_dir);
    let skills = discoverer.discover().await;
    let prompt = compile_evaluation_prompt(&skills);

    if json {
        let result = EvaluateResult { skills, prompt };
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{prompt}");
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, clap::CommandFactory};

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_args_parse() {
        let cli = Cli::parse_from(["skillet", "evaluate", "--skills-dir", "/tmp/skills", "--json"]);
        match cli.command {
            Commands::Evaluate {
                skills_dir, json, ..
            } => {
                assert_eq!(skills_dir.as_deref(), Some(std::path::Path::new("/tmp/skills")));
                assert!(json);
            },
            _ => panic!("expected evaluate command"),
        }
    }
}
