//! Report structures wrapping a match result for presentation

use crate::config::ScoringConfig;
use crate::processing::scorer::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored resume/job pair plus everything the formatters print around it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Headline verdict and the notes derived from the skill sets
    pub summary: ReportSummary,

    /// The raw scoring output
    pub result: MatchResult,

    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub verdict: Verdict,

    /// Share of job skills the resume covers, in percent
    pub coverage_percentage: f64,

    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub matcher_version: String,
    pub weights: ScoringConfig,
}

/// Verdict bands over the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Verdict {
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= 80.0 {
            Verdict::Excellent
        } else if final_score >= 60.0 {
            Verdict::Good
        } else if final_score >= 40.0 {
            Verdict::Fair
        } else {
            Verdict::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Excellent => "EXCELLENT",
            Verdict::Good => "GOOD",
            Verdict::Fair => "FAIR",
            Verdict::Poor => "POOR",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Strong match for this role",
            Verdict::Good => "Good match with a few gaps",
            Verdict::Fair => "Partial match; several required skills are missing",
            Verdict::Poor => "Weak match for this role",
        }
    }
}

impl MatchReport {
    pub fn new(
        result: MatchResult,
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        weights: &ScoringConfig,
    ) -> Self {
        let summary = Self::create_summary(&result);

        Self {
            summary,
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                resume_source: resume_source.into(),
                job_source: job_source.into(),
                matcher_version: env!("CARGO_PKG_VERSION").to_string(),
                weights: weights.clone(),
            },
        }
    }

    fn create_summary(result: &MatchResult) -> ReportSummary {
        let mut strengths = Vec::new();
        let mut improvement_areas = Vec::new();

        if !result.matched_skills.is_empty() {
            strengths.push(format!(
                "Covers {} of {} job skills: {}",
                result.matched_skills.len(),
                result.matched_skills.len() + result.missing_skills.len(),
                result.matched_skills.join(", ")
            ));
        }
        if result.similarity_raw >= 0.5 {
            strengths.push("Wording closely follows the job description".to_string());
        }

        if !result.missing_skills.is_empty() {
            improvement_areas.push(format!(
                "Add evidence for: {}",
                result.missing_skills.join(", ")
            ));
        }
        if result.matched_skills.is_empty() && result.missing_skills.is_empty() {
            improvement_areas
                .push("The job description names no recognised skills; score relies on wording only".to_string());
        } else if result.similarity_raw < 0.2 {
            improvement_areas.push("Mirror more of the job description's terminology".to_string());
        }

        ReportSummary {
            verdict: Verdict::from_score(result.final_score),
            coverage_percentage: (result.coverage() * 1000.0).round() / 10.0,
            strengths,
            improvement_areas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(final_score: f64, matched: &[&str], missing: &[&str], similarity_raw: f64) -> MatchResult {
        MatchResult {
            final_score,
            skill_score: 0.0,
            jd_similarity_score: 0.0,
            similarity_raw,
            matched_skills: matched.iter().map(|s| s.to_string()).collect(),
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            extra_skills: Vec::new(),
            role: "Backend".to_string(),
        }
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(Verdict::from_score(100.0), Verdict::Excellent);
        assert_eq!(Verdict::from_score(80.0), Verdict::Excellent);
        assert_eq!(Verdict::from_score(79.99), Verdict::Good);
        assert_eq!(Verdict::from_score(60.0), Verdict::Good);
        assert_eq!(Verdict::from_score(40.0), Verdict::Fair);
        assert_eq!(Verdict::from_score(39.9), Verdict::Poor);
        assert_eq!(Verdict::from_score(0.0), Verdict::Poor);
    }

    #[test]
    fn test_summary_notes() {
        let report = MatchReport::new(
            result(62.5, &["docker", "python"], &["aws"], 0.1),
            "resume.pdf",
            "job.txt",
            &ScoringConfig::default(),
        );

        assert_eq!(report.summary.verdict, Verdict::Good);
        assert_eq!(report.summary.coverage_percentage, 66.7);
        assert_eq!(report.summary.strengths.len(), 1);
        assert!(report.summary.strengths[0].contains("2 of 3"));
        assert_eq!(report.summary.improvement_areas[0], "Add evidence for: aws");
        assert_eq!(report.summary.improvement_areas.len(), 2);
        assert_eq!(report.metadata.resume_source, "resume.pdf");
    }

    #[test]
    fn test_summary_without_job_skills() {
        let report = MatchReport::new(result(30.0, &[], &[], 0.6), "a", "b", &ScoringConfig::default());
        assert_eq!(report.summary.coverage_percentage, 0.0);
        assert_eq!(report.summary.strengths.len(), 1);
        assert!(report.summary.improvement_areas[0].contains("no recognised skills"));
    }
}
