//! Output formatters: console, JSON and Markdown renderings of a batch report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use crate::processing::matcher::RoleMatch;
use crate::processing::reasoning::ScoreBand;
use crate::processing::roles::Dimension;
use anyhow::Context;
use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use std::fmt::Write;
use std::path::Path;

/// Renders a batch report, or the ranking for a single role
pub trait OutputFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String>;
    fn format_role_ranking(&self, summary: &RoleSummary) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colours
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Excellent => Color::Green,
        ScoreBand::Strong => Color::Blue,
        ScoreBand::Moderate => Color::Yellow,
        ScoreBand::Limited => Color::BrightBlack,
    }
}

fn timestamp(generated_at: &DateTime<Utc>) -> String {
    generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
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

    fn format_score(&self, score: u8) -> String {
        let band = ScoreBand::from_score(score);
        let text = format!("{:>3}% [{}]", score, band.label());
        if self.use_colors {
            text.color(band_color(band)).bold().to_string()
        } else {
            text
        }
    }

    fn format_match(&self, output: &mut String, role_match: &RoleMatch) -> Result<()> {
        writeln!(output, "    {:<20} {}", role_match.role.name(), self.format_score(role_match.score))?;
        writeln!(output, "      {}", role_match.reasoning)?;

        if self.detailed {
            for dimension in Dimension::ALL {
                let matched = role_match.matched(dimension);
                if !matched.is_empty() {
                    writeln!(
                        output,
                        "      {} {}",
                        self.colorize(&format!("{}:", dimension), Color::Cyan),
                        matched.join(", ")
                    )?;
                }
            }
        }
        Ok(())
    }

    fn format_ranking_lines(&self, output: &mut String, summary: &RoleSummary) -> Result<()> {
        for entry in &summary.ranking {
            writeln!(
                output,
                "    {}. {:<28} {}  (experience {}, skills {}, certifications {})",
                entry.rank,
                entry.display_name,
                self.format_score(entry.score),
                entry.experience_matches,
                entry.skills_matches,
                entry.certification_matches
            )?;
        }
        Ok(())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ROLE MATCHING", 1));
        writeln!(
            output,
            "Generated: {} | {} of {} document(s) analyzed, {} failed",
            timestamp(&report.generated_at),
            report.succeeded,
            report.attempted,
            report.failed()
        )?;

        if !report.documents.is_empty() {
            output.push_str(&self.format_header("Candidates", 2));
            for document in &report.documents {
                writeln!(
                    output,
                    "  {}. {} {}",
                    document.position + 1,
                    self.colorize(&document.display_name, Color::White),
                    self.colorize(&format!("({})", document.source), Color::BrightBlack)
                )?;
                if let Some(email) = &document.email {
                    writeln!(output, "    Email: {}", email)?;
                }
                if let Some(phone) = &document.phone {
                    writeln!(output, "    Phone: {}", phone)?;
                }
                for role_match in &document.matches {
                    self.format_match(&mut output, role_match)?;
                }
                output.push('\n');
            }

            output.push_str(&self.format_header("Best Candidate Per Role", 2));
            for summary in &report.roles {
                if let Some(best) = &summary.best {
                    writeln!(
                        output,
                        "  {:<20} {} {}",
                        summary.role.name(),
                        best.display_name,
                        self.format_score(best.score)
                    )?;
                    for reason in &best.reasons {
                        writeln!(output, "    • {}", reason)?;
                    }
                    if self.detailed {
                        self.format_ranking_lines(&mut output, summary)?;
                    }
                }
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Failed Documents", 2));
            for failure in &report.failures {
                writeln!(
                    output,
                    "  {} {}: {}",
                    self.colorize("✗", Color::Red),
                    failure.source,
                    failure.error
                )?;
            }
        }

        Ok(output)
    }

    fn format_role_ranking(&self, summary: &RoleSummary) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("Ranking for {}", summary.role.name()), 1));

        let Some(best) = &summary.best else {
            output.push_str("No documents were analyzed.\n");
            return Ok(output);
        };

        self.format_ranking_lines(&mut output, summary)?;

        output.push_str(&self.format_header(&format!("Best candidate: {}", best.display_name), 2));
        for reason in &best.reasons {
            writeln!(output, "  • {}", reason)?;
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

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_role_ranking(&self, summary: &RoleSummary) -> Result<String> {
        self.to_json(summary)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match ScoreBand::from_score(score) {
            ScoreBand::Excellent => "🟢 Excellent",
            ScoreBand::Strong => "🔵 Strong",
            ScoreBand::Moderate => "🟡 Moderate",
            ScoreBand::Limited => "⚪ Limited",
        }
    }

    fn ranking_table(output: &mut String, summary: &RoleSummary) -> Result<()> {
        output.push_str("| Rank | Candidate | Score | Experience | Skills | Certifications |\n");
        output.push_str("|------|-----------|-------|------------|--------|----------------|\n");
        for entry in &summary.ranking {
            writeln!(
                output,
                "| {} | {} | {}% | {} | {} | {} |",
                entry.rank,
                entry.display_name,
                entry.score,
                entry.experience_matches,
                entry.skills_matches,
                entry.certification_matches
            )?;
        }
        output.push('\n');
        Ok(())
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &BatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Role Matching Report\n\n");

        if self.include_metadata {
            writeln!(
                output,
                "**Generated:** {} | **Analyzed:** {} of {} | **Failed:** {}\n",
                timestamp(&report.generated_at),
                report.succeeded,
                report.attempted,
                report.failed()
            )?;
        }

        output.push_str("## Best Candidate Per Role\n\n");
        output.push_str("| Role | Candidate | Score | Band |\n");
        output.push_str("|------|-----------|-------|------|\n");
        for summary in &report.roles {
            match &summary.best {
                Some(best) => writeln!(
                    output,
                    "| {} | {} | {}% | {} |",
                    summary.role.name(),
                    best.display_name,
                    best.score,
                    Self::markdown_score_badge(best.score)
                )?,
                None => writeln!(output, "| {} | n/a | - | - |", summary.role.name())?,
            }
        }
        output.push('\n');

        for summary in &report.roles {
            if let Some(best) = &summary.best {
                writeln!(output, "### {}\n", summary.role.name())?;
                for reason in &best.reasons {
                    writeln!(output, "- {}", reason)?;
                }
                output.push('\n');
                if self.detailed {
                    Self::ranking_table(&mut output, summary)?;
                }
            }
        }

        if !report.documents.is_empty() {
            output.push_str("## Candidates\n\n");
        }
        for document in &report.documents {
            writeln!(output, "### {}. {}\n", document.position + 1, document.display_name)?;
            writeln!(output, "**Source:** `{}`", document.source)?;
            if let Some(email) = &document.email {
                writeln!(output, "**Email:** {}", email)?;
            }
            if let Some(phone) = &document.phone {
                writeln!(output, "**Phone:** {}", phone)?;
            }
            output.push('\n');

            output.push_str("| Role | Score | Reasoning |\n");
            output.push_str("|------|-------|-----------|\n");
            for role_match in &document.matches {
                writeln!(
                    output,
                    "| {} | {}% | {} |",
                    role_match.role.name(),
                    role_match.score,
                    role_match.reasoning
                )?;
            }
            output.push('\n');

            if self.detailed {
                for role_match in &document.matches {
                    writeln!(output, "**{} keywords**\n", role_match.role.name())?;
                    for dimension in Dimension::ALL {
                        let matched = role_match.matched(dimension);
                        if !matched.is_empty() {
                            writeln!(output, "- {}: {}", dimension, matched.join(", "))?;
                        }
                    }
                    output.push('\n');
                }
            }
        }

        if !report.failures.is_empty() {
            output.push_str("## Failed Documents\n\n");
            for failure in &report.failures {
                writeln!(output, "- `{}`: {}", failure.source, failure.error)?;
            }
            output.push('\n');
        }

        Ok(output)
    }

    fn format_role_ranking(&self, summary: &RoleSummary) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "# Ranking for {}\n", summary.role.name())?;

        let Some(best) = &summary.best else {
            output.push_str("No documents were analyzed.\n");
            return Ok(output);
        };

        Self::ranking_table(&mut output, summary)?;

        writeln!(
            output,
            "## Best candidate: {} ({}%, {})\n",
            best.display_name,
            best.score,
            Self::markdown_score_badge(best.score)
        )?;
        for reason in &best.reasons {
            writeln!(output, "- {}", reason)?;
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true, detailed),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &BatchReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_role_ranking(&self, summary: &RoleSummary, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_role_ranking(summary)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(file_path, content).with_context(|| format!("Failed to write report to {}", file_path.display()))?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("role_match_report{}.{}", timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::analyzer::{AnalysisEngine, BatchAnalysis, FailedDocument};
    use crate::processing::roles::RoleCategory;
    use tempfile::TempDir;

    fn report() -> BatchReport {
        let engine = AnalysisEngine::new(&Config::default()).unwrap();
        let batch = BatchAnalysis {
            attempted: 2,
            analyses: vec![engine.analyze_text(
                "rn.txt",
                "Jordan Park\njordan.park@example.com\nRegistered Nurse, ICU\nACLS, BLS\nBSN",
            )],
            failures: vec![FailedDocument {
                source: "photo.png".to_string(),
                error: "File format not supported: photo.png".to_string(),
            }],
        };
        BatchReport::build(&batch)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&report()).unwrap();
        assert!(output.contains("RESUME ROLE MATCHING"));
        assert!(output.contains("1 of 2 document(s) analyzed, 1 failed"));
        assert!(output.contains("Jordan Park"));
        assert!(output.contains("jordan.park@example.com"));
        assert!(output.contains("Failed Documents"));
        assert!(output.contains("photo.png"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_report() {
        let report = report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["attempted"], 2);
        assert_eq!(parsed["roles"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["documents"][0]["matches"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["roles"][3]["role"], "RNs");
    }

    #[test]
    fn test_markdown_role_ranking() {
        let report = report();
        let summary = report.role(RoleCategory::RegisteredNurses).unwrap();
        let output = MarkdownFormatter::new(true, false).format_role_ranking(summary).unwrap();
        assert!(output.starts_with("# Ranking for RNs"));
        assert!(output.contains("| 1 | Jordan Park |"));
        assert!(output.contains("## Best candidate: Jordan Park"));
    }

    #[test]
    fn test_empty_role_ranking() {
        let report = BatchReport::build(&BatchAnalysis::default());
        let summary = report.role(RoleCategory::NursePractitioners).unwrap();
        let output = ConsoleFormatter::new(false, false).format_role_ranking(summary).unwrap();
        assert!(output.contains("No documents were analyzed."));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true);
        assert_eq!(generator.formatter(OutputFormat::Json).supports_format(), OutputFormat::Json);
        assert_eq!(
            generator.formatter(OutputFormat::Markdown).supports_format(),
            OutputFormat::Markdown
        );
        let markdown = generator.generate_report(&report(), OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Resume Role Matching Report"));
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("report.md");
        save_report_to_file("# Report\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report\n");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, false), "role_match_report.json");
        assert_eq!(suggest_filename(OutputFormat::Console, false), "role_match_report.txt");
        let stamped = suggest_filename(OutputFormat::Markdown, true);
        assert!(stamped.starts_with("role_match_report_") && stamped.ends_with(".md"));
    }
}
