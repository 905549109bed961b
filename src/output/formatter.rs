//! Output formatters for recommendation reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::RecommendationReport;
use crate::processing::ranker::RankedJob;
use crate::processing::record::Category;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting recommendation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn quality_label(score: f64) -> (&'static str, Color) {
    match score {
        s if s >= 80.0 => ("STRONG", Color::Green),
        s if s >= 60.0 => ("GOOD", Color::BrightGreen),
        s if s >= 40.0 => ("FAIR", Color::Yellow),
        _ => ("WEAK", Color::Red),
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn format_salary(salary: Option<f64>) -> String {
    salary.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = quality_label(score);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_job(&self, output: &mut String, rank: usize, job: &RankedJob) {
        output.push_str(&format!(
            "  {}. {} {:.1} {}\n",
            rank,
            self.colorize(&job.record.title(), Color::Cyan),
            job.score,
            self.format_score_badge(job.score)
        ));
        output.push_str(&format!(
            "     Location: {} | Salary: {} | Degree: {}\n",
            or_unknown(job.record.location.as_deref()),
            format_salary(job.record.salary),
            or_unknown(job.record.degree_requirement.as_deref())
        ));

        if self.detailed {
            let factors: Vec<String> = job
                .breakdown
                .factors
                .iter()
                .map(|f| format!("{} {:.1}", f.factor, f.points))
                .collect();
            output.push_str(&format!("     Factors: {}\n", factors.join(", ")));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("🎯 JOB RECOMMENDATIONS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms | Strategy: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms,
            report.metadata.strategy
        ));
        if !report.student.name.is_empty() {
            output.push_str(&format!("Hi {}, here are your matches.\n", report.student.name));
        }

        output.push_str(&self.format_header("Top Domestic Matches", 2));
        if result.ranked_domestic.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No domestic matches found", Color::Yellow)));
        }
        for (i, job) in result.ranked_domestic.iter().enumerate() {
            self.format_job(&mut output, i + 1, job);
        }

        output.push_str(&self.format_header("Best Match per Dataset", 2));
        for category in Category::ALL {
            match result.best(category) {
                Some(job) => output.push_str(&format!(
                    "  • {}: {} ({:.1})\n",
                    category,
                    job.record.title(),
                    job.score
                )),
                None => output.push_str(&format!("  • {}: {}\n", category, self.colorize("no match", Color::Yellow))),
            }
        }

        if let Some(category) = result.explained_category {
            output.push_str(&self.format_header(&format!("Skill Fit ({} best match)", category), 3));
            if !result.matched_skills.is_empty() {
                let matched: Vec<&str> = result.matched_skills.iter().map(|s| s.as_str()).collect();
                output.push_str(&format!("  ✅ Matched: {}\n", self.colorize(&matched.join(", "), Color::Green)));
            }
            if !result.missing_skills.is_empty() {
                output.push_str(&format!(
                    "  📚 Skills to learn: {}\n",
                    self.colorize(&result.missing_skills.join(", "), Color::Yellow)
                ));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Datasets", 3));
            for dataset in &report.metadata.datasets {
                output.push_str(&format!(
                    "  • {} ({}): {} records, {} degraded\n",
                    dataset.category, dataset.source, dataset.records, dataset.degraded_rows
                ));
                if !dataset.missing_fields.is_empty() {
                    let missing: Vec<&str> = dataset.missing_fields.iter().map(|f| f.as_str()).collect();
                    output.push_str(&format!("    Missing columns: {}\n", missing.join(", ")));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RecommendationReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str("# 🎯 Job Recommendations\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms | **Strategy:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.strategy
            ));
        }

        if !report.student.name.is_empty() {
            output.push_str(&format!("**Student:** {}\n\n", report.student.name));
        }

        output.push_str("## Top Domestic Matches\n\n");
        if result.ranked_domestic.is_empty() {
            output.push_str("_No domestic matches found._\n\n");
        } else {
            output.push_str("| # | Role | Company | Location | Salary | Score |\n");
            output.push_str("|---|------|---------|----------|--------|-------|\n");
            for (i, job) in result.ranked_domestic.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {:.1} |\n",
                    i + 1,
                    Self::escape(or_unknown(job.record.role.as_deref())),
                    Self::escape(or_unknown(job.record.company.as_deref())),
                    Self::escape(or_unknown(job.record.location.as_deref())),
                    format_salary(job.record.salary),
                    job.score
                ));
            }
            output.push('\n');
        }

        output.push_str("## Best Match per Dataset\n\n");
        for category in Category::ALL {
            match result.best(category) {
                Some(job) => output.push_str(&format!("- **{}:** {} ({:.1})\n", category, job.record.title(), job.score)),
                None => output.push_str(&format!("- **{}:** no match\n", category)),
            }
        }
        output.push('\n');

        if result.explained_category.is_some() {
            output.push_str("## Skill Fit\n\n");
            let matched: Vec<&str> = result.matched_skills.iter().map(|s| s.as_str()).collect();
            output.push_str(&format!("- **Matched:** {}\n", if matched.is_empty() { "-".to_string() } else { matched.join(", ") }));
            output.push_str(&format!(
                "- **Skills to learn:** {}\n",
                if result.missing_skills.is_empty() { "-".to_string() } else { result.missing_skills.join(", ") }
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &RecommendationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, student_name: &str, timestamp: bool) -> String {
    let base_name = if student_name.trim().is_empty() {
        "student".to_string()
    } else {
        student_name.trim().to_lowercase().replace(char::is_whitespace, "_")
    };

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_recommendations{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_recommendations{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_recommendations{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::dataset::{Dataset, Datasets};
    use crate::processing::engine::recommend;
    use crate::processing::record::{JobRecord, StudentProfile};
    use crate::processing::skills::extract;

    fn sample_report() -> RecommendationReport {
        let jobs = vec![JobRecord::new(Category::Domestic)
            .with_role("Data Analyst")
            .with_company("Acme | Labs")
            .with_location("Mumbai")
            .with_salary(6.0)
            .with_skills(extract(Some("python, sql, tableau")))];
        let datasets = Datasets::new().with(Dataset::from_records(Category::Domestic, jobs));
        let student = StudentProfile::new("Asha Rao")
            .with_skills_text("python")
            .with_location("Mumbai");

        let result = recommend(&student, &datasets).unwrap();
        RecommendationReport::new(student, result, &datasets, "weighted", 3)
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("Hi Asha Rao"));
        assert!(output.contains("Data Analyst @ Acme | Labs"));
        assert!(output.contains("Skills to learn: sql, tableau"));
        assert!(output.contains("foreign: no match"));
        assert!(output.contains("Factors: degree 0.0"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["result"]["ranked_domestic"][0]["record"]["role"], "Data Analyst");
        assert_eq!(value["result"]["missing_skills"][0], "sql");
        assert!(value["result"]["best_per_category"]["foreign"].is_null());
        assert_eq!(value["metadata"]["strategy"], "weighted");
    }

    #[test]
    fn test_markdown_output_escapes_tables() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("| 1 | Data Analyst | Acme \\| Labs | Mumbai | 6.00 |"));
        assert!(output.contains("- **Matched:** python"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "Asha Rao", false),
            "asha_rao_recommendations.json"
        );
        assert_eq!(suggest_filename(&OutputFormat::Markdown, " ", false), "student_recommendations.md");
    }
}
