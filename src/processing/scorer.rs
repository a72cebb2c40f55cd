//! Score composition: skill coverage, text similarity and JD quality guards
//!
//! The composer is stateless between calls. Everything it reads is immutable
//! after construction, so one instance can be shared by any number of request
//! handlers.

use crate::config::{Config, ScoringConfig};
use crate::error::{Result, ResumeMatchError};
use crate::processing::catalog::{RoleKeywordTable, SkillCatalog};
use crate::processing::role_classifier::RoleClassifier;
use crate::processing::similarity::{SimilarityEstimator, TfIdfSimilarity};
use crate::processing::skill_extractor::SkillExtractor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Role reported for job descriptions with no usable content.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// JDs shorter than this with no detected skills cannot be scored.
const MIN_SCORABLE_JD_CHARS: usize = 10;

/// Read-only reference data and collaborators, built once at start-up.
#[derive(Clone)]
pub struct MatchContext {
    pub catalog: Arc<SkillCatalog>,
    pub roles: Arc<RoleKeywordTable>,
    pub similarity: Arc<dyn SimilarityEstimator>,
}

/// Outcome of one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Overall match, 0 to 100
    pub final_score: f64,
    pub skill_score: f64,
    pub jd_similarity_score: f64,
    pub similarity_raw: f64,
    #[serde(rename = "matched_jd_skills")]
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(rename = "resume_extra_skills")]
    pub extra_skills: Vec<String>,
    pub role: String,
}

/// Wire shape of a scoring call: either a full result or `{ "error": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreResponse {
    Match(MatchResult),
    Error { error: String },
}

pub struct ScoreComposer {
    extractor: SkillExtractor,
    classifier: RoleClassifier,
    similarity: Arc<dyn SimilarityEstimator>,
    weights: ScoringConfig,
}

impl MatchContext {
    pub fn builtin() -> Self {
        Self {
            catalog: Arc::new(SkillCatalog::builtin()),
            roles: Arc::new(RoleKeywordTable::builtin()),
            similarity: Arc::new(TfIdfSimilarity::new()),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            catalog: Arc::new(SkillCatalog::from_config(&config.catalog)?),
            ..Self::builtin()
        })
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn SimilarityEstimator>) -> Self {
        self.similarity = similarity;
        self
    }
}

impl MatchResult {
    /// All-zero verdict for a job description that carries no signal.
    fn degenerate(extra_skills: Vec<String>) -> Self {
        Self {
            final_score: 0.0,
            skill_score: 0.0,
            jd_similarity_score: 0.0,
            similarity_raw: 0.0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            extra_skills,
            role: UNKNOWN_ROLE.to_string(),
        }
    }

    pub fn coverage(&self) -> f64 {
        let jd_total = self.matched_skills.len() + self.missing_skills.len();
        if jd_total == 0 {
            0.0
        } else {
            self.matched_skills.len() as f64 / jd_total as f64
        }
    }
}

impl From<Result<MatchResult>> for ScoreResponse {
    fn from(result: Result<MatchResult>) -> Self {
        match result {
            Ok(result) => ScoreResponse::Match(result),
            Err(e) => ScoreResponse::Error {
                error: e.to_string(),
            },
        }
    }
}

impl ScoreComposer {
    pub fn new(context: MatchContext, weights: ScoringConfig) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            extractor: SkillExtractor::new(context.catalog)?,
            classifier: RoleClassifier::new(context.roles)?,
            similarity: context.similarity,
            weights,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(MatchContext::from_config(config)?, config.scoring.clone())
    }

    /// Score a resume against a job description.
    ///
    /// `explicit_skills`, when non-empty, replaces skill detection on the
    /// resume text. Empty input after trimming is a
    /// [`ResumeMatchError::MissingInput`] error.
    pub fn compute_score(
        &self,
        resume_text: &str,
        jd_text: &str,
        explicit_skills: Option<&[String]>,
    ) -> Result<MatchResult> {
        let resume_text = resume_text.trim();
        let jd_text = jd_text.trim();
        if resume_text.is_empty() || jd_text.is_empty() {
            return Err(ResumeMatchError::MissingInput);
        }

        let resume_skills = match explicit_skills.map(SkillExtractor::normalize_skills) {
            Some(skills) if !skills.is_empty() => skills,
            _ => self.extractor.extract_skills(resume_text),
        };
        let jd_skills = self.extractor.extract_skills(jd_text);

        let matched = sorted(jd_skills.intersection(&resume_skills));
        let missing = sorted(jd_skills.difference(&resume_skills));
        let extra = sorted(resume_skills.difference(&jd_skills));

        let jd_chars = jd_text.chars().count();
        if jd_chars < MIN_SCORABLE_JD_CHARS && jd_skills.is_empty() {
            log::debug!("Job description has {} chars and no skills; returning zero score", jd_chars);
            return Ok(MatchResult::degenerate(extra));
        }

        let coverage = if jd_skills.is_empty() {
            0.0
        } else {
            matched.len() as f64 / jd_skills.len() as f64
        };
        let mut skill_score = coverage * self.weights.skill_weight;

        let similarity = self.estimate_similarity(resume_text, jd_text);

        let length_factor = length_multiplier(jd_chars);
        let density_factor = skill_density_multiplier(jd_skills.len());
        let quality = length_factor * 0.4 + density_factor * 0.6;

        let mut jd_score = if jd_skills.is_empty() {
            if similarity < self.weights.similarity_gate {
                0.0
            } else {
                similarity * self.weights.similarity_only_weight
            }
        } else {
            similarity * self.weights.similarity_weight
        };

        skill_score *= quality;
        jd_score *= length_factor;

        let final_score = round_to(skill_score + jd_score, 2).min(100.0);
        let role = self.classifier.detect_role(jd_text);

        log::debug!(
            "coverage={:.3} similarity={:.4} length={} density={} quality={:.3} final={}",
            coverage,
            similarity,
            length_factor,
            density_factor,
            quality,
            final_score
        );

        Ok(MatchResult {
            final_score,
            skill_score: round_to(skill_score, 2),
            jd_similarity_score: round_to(jd_score, 2),
            similarity_raw: round_to(similarity, 4),
            matched_skills: matched,
            missing_skills: missing,
            extra_skills: extra,
            role,
        })
    }

    /// Similarity clamped to [0, 1]; estimator failures count as 0.0.
    fn estimate_similarity(&self, resume_text: &str, jd_text: &str) -> f64 {
        match self.similarity.estimate(resume_text, jd_text) {
            Ok(score) if score.is_finite() => score.clamp(0.0, 1.0),
            Ok(score) => {
                log::debug!("{} produced non-finite score {}; using 0.0", self.similarity.name(), score);
                0.0
            }
            Err(e) => {
                log::debug!("{} unavailable: {}; using 0.0", self.similarity.name(), e);
                0.0
            }
        }
    }

    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        self.extractor.extract_skills(text)
    }

    pub fn weights(&self) -> &ScoringConfig {
        &self.weights
    }
}

/// Discount for short job descriptions, by character count.
pub fn length_multiplier(jd_chars: usize) -> f64 {
    match jd_chars {
        0..=49 => 0.2,
        50..=199 => 0.5,
        200..=599 => 0.85,
        _ => 1.0,
    }
}

/// Discount for job descriptions that name few skills.
pub fn skill_density_multiplier(jd_skill_count: usize) -> f64 {
    match jd_skill_count {
        0 => 0.0,
        1 => 0.35,
        2 => 0.65,
        3 | 4 => 0.9,
        _ => 1.0,
    }
}

/// Half-to-even rounding, so an exact .5 at the last place goes to the even digit.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round_ties_even() / factor
}

fn sorted<'a>(skills: impl Iterator<Item = &'a String>) -> Vec<String> {
    // BTreeSet iteration is already ordered
    skills.cloned().collect()
}
