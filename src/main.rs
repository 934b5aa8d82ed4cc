//! Role matcher: scores resumes against fixed healthcare and customer service role profiles

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use log::{error, info, warn};
use resume_role_matcher::cli::{Cli, Commands, ConfigAction};
use resume_role_matcher::config::{Config, OutputFormat};
use resume_role_matcher::output::{save_report_to_file, suggest_filename, BatchReport, ReportGenerator};
use resume_role_matcher::processing::analyzer::{AnalysisEngine, BatchAnalysis};
use resume_role_matcher::processing::roles::{Dimension, RoleCategory, RoleProfile, RoleRegistry};
use std::path::PathBuf;
use std::process;

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

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            files,
            name,
            output,
            save,
            detailed,
        } => {
            let format = output.unwrap_or(config.output.format);
            let detailed = detailed || config.output.detailed;

            let mut batch = analyze_files(&config, &files).await?;

            if let Some(name) = name {
                if files.len() == 1 {
                    if let Some(analysis) = batch.analyses.first_mut() {
                        analysis.document = std::mem::take(&mut analysis.document).with_name(name);
                    }
                } else {
                    warn!("--name is ignored when more than one file is given");
                }
            }

            let report = BatchReport::build(&batch);
            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true);
            let rendered = generator.generate_report(&report, format)?;
            println!("{}", rendered);

            if let Some(path) = save {
                let path = if path.is_dir() {
                    path.join(suggest_filename(format, true))
                } else {
                    path
                };
                let content = if format == OutputFormat::Console {
                    ReportGenerator::with_options(false, detailed, true).generate_report(&report, format)?
                } else {
                    rendered
                };
                save_report_to_file(&content, &path)?;
                info!("Report saved to {}", path.display());
            }
        }

        Commands::Rank { role, files, output } => {
            let format = output.unwrap_or(config.output.format);
            let batch = analyze_files(&config, &files).await?;

            let report = BatchReport::build(&batch);
            let summary = report
                .role(role)
                .with_context(|| format!("No summary produced for {}", role))?;
            let generator = ReportGenerator::with_options(config.output.color_output, true, true);
            println!("{}", generator.generate_role_ranking(summary, format)?);
        }

        Commands::Roles { role } => {
            let registry = RoleRegistry::standard()?;
            let roles: Vec<RoleCategory> = match role {
                Some(role) => vec![role],
                None => registry.all_roles().to_vec(),
            };
            for role in roles {
                print_profile(registry.get(role));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration file: {}\n", config_path.display());
                println!("Extraction:");
                println!("  Max experience entries: {}", config.extraction.max_experience_entries);
                println!("  Max education entries: {}", config.extraction.max_education_entries);
                println!("  Max name length: {}", config.extraction.max_name_length);
                println!("  Skill vocabulary: {} phrases", config.extraction.skill_vocabulary.len());
                println!("\nInput:");
                println!("  Cache: {}", config.input.enable_cache);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
                println!("  Progress: {}", config.output.show_progress);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

/// Analyze every file; an error only when nothing could be analyzed
async fn analyze_files(config: &Config, files: &[PathBuf]) -> anyhow::Result<BatchAnalysis> {
    let mut engine = AnalysisEngine::new(config).context("Failed to initialise role profiles")?;

    info!("Analyzing {} document(s)", files.len());
    let batch = engine.analyze_batch(files).await;

    if batch.analyses.is_empty() {
        for failure in &batch.failures {
            error!("{}: {}", failure.source, failure.error);
        }
        anyhow::bail!("No documents could be analyzed ({})", batch.summary());
    }

    Ok(batch)
}

fn print_profile(profile: &RoleProfile) {
    println!("{}", profile.role.name().bold());
    for dimension in Dimension::ALL {
        println!(
            "  {:<15} {:>3.0}%  {}",
            format!("{}:", dimension),
            profile.weights.get(dimension) * 100.0,
            profile.keywords(dimension).join(", ")
        );
    }
    println!();
}
