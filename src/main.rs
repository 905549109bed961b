//! Job recommender: rank job listings for a student and explain skill gaps

use anyhow::Context;
use clap::Parser;
use job_recommender::cli::{self, Cli, Commands, ConfigAction};
use job_recommender::input::manager::DatasetManager;
use job_recommender::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use job_recommender::output::report::RecommendationReport;
use job_recommender::processing::columns::ResolvedColumns;
use job_recommender::processing::dataset::{Dataset, Datasets};
use job_recommender::processing::record::{Category, StudentProfile};
use job_recommender::{Config, RecommendationEngine};
use log::{error, info, warn};
use std::process;
use std::time::Instant;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config) {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn run_command(command: Commands, mut config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Recommend {
            name,
            degree,
            cgpa,
            location,
            role,
            skills,
            expected_salary,
            domestic,
            foreign,
            market,
            strategy,
            top,
            output,
            save,
            detailed,
        } => {
            let start_time = Instant::now();

            for (category, path) in [
                (Category::Domestic, domestic),
                (Category::Foreign, foreign),
                (Category::Market, market),
            ] {
                if let Some(path) = path {
                    cli::validate_file_extension(&path, &["csv", "tsv"])
                        .map_err(anyhow::Error::msg)
                        .with_context(|| format!("{} dataset", category))?;
                    config.data.set_path(category, path);
                }
            }

            if let Some(strategy) = strategy {
                config.scoring.domestic_strategy = cli::parse_strategy(&strategy).map_err(anyhow::Error::msg)?;
            }
            if let Some(top) = top {
                config.scoring.top_n = top;
            }
            config.validate().context("Invalid recommendation settings")?;
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let student = StudentProfile::new(name)
                .with_degree(degree)
                .with_cgpa(cgpa)
                .with_location(location)
                .with_role(role)
                .with_skills_text(&skills)
                .with_expected_salary(expected_salary);

            let missing = student.missing_inputs();
            if !missing.is_empty() {
                warn!("Student profile is missing: {}", missing.join(", "));
            }

            info!("Loading job datasets");
            let mut manager = DatasetManager::new();
            let datasets = Datasets::load(&config.data, &config.columns, &mut manager)
                .context("Failed to load job datasets")?;

            let engine = RecommendationEngine::from_config(&config.scoring, &config.weights);
            let strategy_name = engine
                .strategy(Category::Domestic)
                .map(|s| s.name().to_string())
                .unwrap_or_default();

            let result = engine
                .recommend(&student, &datasets)
                .context("Recommendation failed")?;

            let processing_time_ms = start_time.elapsed().as_millis() as u64;
            let report = RecommendationReport::new(student, result, &datasets, strategy_name, processing_time_ms);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
            );
            let content = generator
                .generate_report(&report, &output_format)
                .context("Failed to format report")?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &report.student.name, true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("💾 Report saved to: {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Inspect { file, category } => {
            let category = cli::parse_category(&category).map_err(anyhow::Error::msg)?;
            cli::validate_file_extension(&file, &["csv", "tsv"]).map_err(anyhow::Error::msg)?;

            let mut manager = DatasetManager::new();
            let table = manager
                .load_table(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let aliases = config.columns.for_category(category);
            let resolved = ResolvedColumns::resolve(aliases, &table.column_set());

            println!("📄 {} ({} rows, {} columns)\n", table.source(), table.len(), table.headers().len());
            println!("Resolved columns for {}:", category);
            for (field, column) in resolved.iter() {
                println!("  {:<20} {}", field.as_str(), column.unwrap_or("(missing)"));
            }

            let dataset = Dataset::from_table(category, table, aliases);
            println!(
                "\nRecords: {} | Degraded rows: {}",
                dataset.records().len(),
                dataset.degraded_rows()
            );
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
                println!("⚙️  Current Configuration\n");
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}
