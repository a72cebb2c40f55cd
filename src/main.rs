//! Resume matcher: score resumes against job descriptions

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::Config;
use resume_matcher::error::{Result, ResumeMatchError};
use resume_matcher::input::{InputManager, ResumeParser};
use resume_matcher::output::{save_report_to_file, suggest_filename, MatchReport, ReportGenerator};
use resume_matcher::processing::catalog::{RoleKeywordTable, SkillCatalog};
use resume_matcher::processing::scorer::ScoreComposer;
use resume_matcher::processing::skill_extractor::SkillExtractor;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            skills,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, DOCUMENT_EXTENSIONS)
                .map_err(|e| ResumeMatchError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, DOCUMENT_EXTENSIONS)
                .map_err(|e| ResumeMatchError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatchError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let resume_text = input_manager.extract_text(&resume).await?;
            let job_text = input_manager.extract_text(&job).await?;
            info!(
                "Loaded resume ({} chars) and job description ({} chars)",
                resume_text.chars().count(),
                job_text.chars().count()
            );

            let composer = ScoreComposer::from_config(&config)?;
            let explicit_skills = (!skills.is_empty()).then_some(skills.as_slice());
            let result = composer.compute_score(&resume_text, &job_text, explicit_skills)?;

            let report = MatchReport::new(
                result,
                resume.display().to_string(),
                job.display().to_string(),
                composer.weights(),
            );

            let mut output_config = config.output.clone();
            output_config.color_output &= save.is_none();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);
            let rendered = generator.generate(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = path.unwrap_or_else(|| {
                        PathBuf::from(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                    });
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Parse { resume, json } => {
            cli::validate_file_extension(&resume, DOCUMENT_EXTENSIONS)
                .map_err(|e| ResumeMatchError::InvalidInput(format!("Resume file: {}", e)))?;

            let bytes = InputManager::new().read_bytes(&resume).await?;
            let catalog = Arc::new(SkillCatalog::from_config(&config.catalog)?);
            let parser = ResumeParser::new(SkillExtractor::new(catalog)?);
            let parsed = parser.parse_bytes(&bytes, resume.file_name().and_then(|n| n.to_str()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                println!("Name:    {}", parsed.name.as_deref().unwrap_or("(not found)"));
                println!("Emails:  {}", join_or_none(&parsed.emails));
                println!("Phones:  {}", join_or_none(&parsed.phones));
                println!("Skills:  {}", join_or_none(&parsed.skills));
                println!("\nSummary:\n{}", parsed.snippet);
            }
        }

        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            info!("Starting HTTP service on {}", config.bind_address());
            resume_matcher::server::serve(config).await?;
        }

        Commands::Catalog { roles } => {
            if roles {
                let table = RoleKeywordTable::builtin();
                println!("Role keywords ({} roles, first listed wins ties):\n", table.len());
                for role in table.roles() {
                    println!("{}: {}", role.label, role.keywords.join(", "));
                }
            } else {
                let catalog = SkillCatalog::from_config(&config.catalog)?;
                println!("Skills ({}):", catalog.skill_count());
                for skill in catalog.canonical_skills() {
                    println!("  {}", skill);
                }
                println!("\nSynonyms ({}):", catalog.synonyms().len());
                for (alias, canonical) in catalog.synonyms() {
                    println!("  {} -> {}", alias, canonical);
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration: {}\n", config_path.display());
                print!("{}", toml::to_string_pretty(&config).map_err(|e| {
                    ResumeMatchError::Configuration(format!("Failed to render config: {}", e))
                })?);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
