//! CLI interface for the job recommender

use crate::config::OutputFormat;
use crate::processing::record::Category;
use crate::processing::scoring::StrategyKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-recommender")]
#[command(about = "Recommend jobs to students from tabular job datasets")]
#[command(long_about = "Score and rank domestic, foreign and market job listings against a student profile, and explain which skills are matched or missing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend jobs for a student profile
    Recommend {
        /// Student name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Degree, e.g. "B.Tech"
        #[arg(long, default_value = "")]
        degree: String,

        /// CGPA or percentage marks
        #[arg(long, default_value_t = 0.0)]
        cgpa: f64,

        /// Preferred location
        #[arg(short, long, default_value = "")]
        location: String,

        /// Preferred role
        #[arg(short, long, default_value = "")]
        role: String,

        /// Comma separated skills
        #[arg(short, long, default_value = "")]
        skills: String,

        /// Expected salary, in the dataset's unit
        #[arg(long, default_value_t = 0.0)]
        expected_salary: f64,

        /// Override the domestic dataset path
        #[arg(long)]
        domestic: Option<PathBuf>,

        /// Override the foreign dataset path
        #[arg(long)]
        foreign: Option<PathBuf>,

        /// Override the market dataset path
        #[arg(long)]
        market: Option<PathBuf>,

        /// Domestic scoring strategy: weighted, skills-academic, skill-count
        #[arg(long)]
        strategy: Option<String>,

        /// Number of domestic recommendations to show (at least 1)
        #[arg(short, long, value_parser = parse_top)]
        top: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Show factor breakdowns and dataset details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show how a dataset file's columns resolve to the job schema
    Inspect {
        /// Path to a CSV or TSV dataset
        file: PathBuf,

        /// Dataset category: domestic, foreign, market
        #[arg(long, default_value = "domestic")]
        category: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

pub fn parse_category(category: &str) -> Result<Category, String> {
    Category::parse(category)
        .ok_or_else(|| format!("Invalid category: {}. Supported: domestic, foreign, market", category))
}

pub fn parse_strategy(strategy: &str) -> Result<StrategyKind, String> {
    StrategyKind::parse(strategy).ok_or_else(|| {
        format!(
            "Invalid strategy: {}. Supported: weighted, skills-academic, skill-count",
            strategy
        )
    })
}

/// Parse a recommendation count, rejecting zero as `Config::validate` does
pub fn parse_top(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(0) => Err("top must be at least 1".to_string()),
        Ok(top) => Ok(top),
        Err(_) => Err(format!("Invalid count: {}", value)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_strategy_and_category() {
        assert_eq!(parse_strategy("skills-academic"), Ok(StrategyKind::SkillsAcademic));
        assert_eq!(parse_category("Foreign"), Ok(Category::Foreign));
        assert!(parse_category("remote").is_err());
    }

    #[test]
    fn test_zero_top_rejected() {
        assert_eq!(parse_top("3"), Ok(3));
        assert!(parse_top("0").is_err());
        assert!(parse_top("many").is_err());

        let parsed = Cli::try_parse_from(["job-recommender", "recommend", "--top", "0"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("jobs.CSV"), &["csv", "tsv"]).is_ok());
        assert!(validate_file_extension(Path::new("jobs.xlsx"), &["csv", "tsv"]).is_err());
        assert!(validate_file_extension(Path::new("jobs"), &["csv"]).is_err());
    }

    #[test]
    fn test_recommend_arguments() {
        let cli = Cli::try_parse_from([
            "job-recommender",
            "recommend",
            "--name",
            "Asha",
            "--skills",
            "python, sql",
            "--cgpa",
            "8.2",
            "--top",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend { name, skills, cgpa, top, .. } => {
                assert_eq!(name, "Asha");
                assert_eq!(skills, "python, sql");
                assert_eq!(cgpa, 8.2);
                assert_eq!(top, Some(3));
            }
            _ => panic!("expected recommend command"),
        }
    }
}
