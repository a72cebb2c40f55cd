//! Output formatters: console, JSON and Markdown

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeMatchError};
use crate::output::report::{MatchReport, Verdict};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a match report
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colours and skill listings
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that dispatches to the formatter for a format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
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
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict_badge(&self, verdict: Verdict) -> String {
        let color = match verdict {
            Verdict::Excellent => Color::Green,
            Verdict::Good => Color::BrightGreen,
            Verdict::Fair => Color::Yellow,
            Verdict::Poor => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", verdict.label().color(color).bold())
        } else {
            format!("[{}]", verdict.label())
        }
    }

    fn format_skill_list(&self, title: &str, skills: &[String], color: Color) -> String {
        let mut output = self.format_header(title, 3);
        if skills.is_empty() {
            output.push_str("  (none)\n");
        } else {
            for skill in skills {
                output.push_str(&format!("  • {}\n", self.colorize(skill, color)));
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH REPORT", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.metadata.resume_source, report.metadata.job_source
        ));
        output.push_str(&format!(
            "Generated: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Final Score: {:.2}/100 {}\n",
            result.final_score,
            self.format_verdict_badge(report.summary.verdict)
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(report.summary.verdict.description(), Color::Cyan)
        ));
        output.push_str(&format!("Detected Role: {}\n", self.colorize(&result.role, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("  Skill Score:      {:.2}\n", result.skill_score));
        output.push_str(&format!(
            "  Similarity Score: {:.2} (raw {:.4})\n",
            result.jd_similarity_score, result.similarity_raw
        ));
        output.push_str(&format!(
            "  Skill Coverage:   {:.1}% ({} matched, {} missing)\n",
            report.summary.coverage_percentage,
            result.matched_skills.len(),
            result.missing_skills.len()
        ));

        if !report.summary.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &report.summary.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        if !report.summary.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Improvement Areas", 3));
            for area in &report.summary.improvement_areas {
                output.push_str(&format!("  • {}\n", self.colorize(area, Color::Yellow)));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Skill Details", 2));
            output.push_str(&self.format_skill_list("Matched Job Skills", &result.matched_skills, Color::Green));
            output.push_str(&self.format_skill_list("Missing Skills", &result.missing_skills, Color::Red));
            output.push_str(&self.format_skill_list("Extra Resume Skills", &result.extra_skills, Color::BrightBlack));
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
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_badge(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Excellent => "🟢",
            Verdict::Good => "🔵",
            Verdict::Fair => "🟡",
            Verdict::Poor => "🔴",
        }
    }

    fn skill_line(skills: &[String]) -> String {
        if skills.is_empty() {
            "_none_".to_string()
        } else {
            skills.iter().map(|s| format!("`{}`", s)).collect::<Vec<_>>().join(", ")
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let result = &report.result;
        let mut content = String::new();

        content.push_str("# Resume Match Report\n\n");
        content.push_str(&format!(
            "**Final Score:** {:.2}/100 {} {}\n\n",
            result.final_score,
            Self::markdown_badge(report.summary.verdict),
            report.summary.verdict.label()
        ));
        content.push_str(&format!("**Verdict:** {}\n\n", report.summary.verdict.description()));
        content.push_str(&format!("**Detected Role:** {}\n\n", result.role));

        content.push_str("## Score Breakdown\n\n");
        content.push_str("| Component | Score |\n|-----------|-------|\n");
        content.push_str(&format!("| Skill coverage | {:.2} |\n", result.skill_score));
        content.push_str(&format!("| Text similarity | {:.2} |\n", result.jd_similarity_score));
        content.push_str(&format!("| Raw similarity | {:.4} |\n\n", result.similarity_raw));

        content.push_str("## Skills\n\n");
        content.push_str(&format!("- **Matched:** {}\n", Self::skill_line(&result.matched_skills)));
        content.push_str(&format!("- **Missing:** {}\n", Self::skill_line(&result.missing_skills)));
        content.push_str(&format!("- **Extra on resume:** {}\n\n", Self::skill_line(&result.extra_skills)));

        if !report.summary.strengths.is_empty() {
            content.push_str("## Strengths\n\n");
            for strength in &report.summary.strengths {
                content.push_str(&format!("- {}\n", strength));
            }
            content.push('\n');
        }

        if !report.summary.improvement_areas.is_empty() {
            content.push_str("## Improvement Areas\n\n");
            for area in &report.summary.improvement_areas {
                content.push_str(&format!("- {}\n", area));
            }
            content.push('\n');
        }

        if self.include_metadata {
            let meta = &report.metadata;
            content.push_str("---\n\n");
            content.push_str(&format!(
                "_Generated {} by resume-matcher v{} from `{}` and `{}`_\n",
                meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                meta.matcher_version,
                meta.resume_source,
                meta.job_source
            ));
        }

        Ok(content)
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

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, config.pretty_json, true)
    }

    pub fn generate(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
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
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content).map_err(|e| {
        ResumeMatchError::OutputFormatting(format!("Failed to write {}: {}", file_path.display(), e))
    })
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}
