//! Job description role detection from keyword hit counts

use crate::error::{Result, ResumeMatchError};
use crate::processing::catalog::RoleKeywordTable;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;
use std::sync::Arc;

/// Label for job descriptions too short to classify.
pub const UNDEFINED_ROLE: &str = "Undefined Role";
/// Fallback for short job descriptions that match no role keyword.
pub const GENERAL_ROLE: &str = "General";
/// Fallback for longer job descriptions that match no role keyword.
pub const GENERAL_PROFESSIONAL_ROLE: &str = "General Professional";

const MIN_CLASSIFIABLE_CHARS: usize = 40;
const DETAILED_JD_CHARS: usize = 300;

/// Picks the role whose keywords appear most often in a job description.
///
/// Keywords match as case-insensitive substrings. On a tie the role listed
/// first in the table wins.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    table: Arc<RoleKeywordTable>,
    matcher: AhoCorasick,
    /// Pattern ids per role, in table order.
    role_patterns: Vec<Vec<usize>>,
}

impl RoleClassifier {
    pub fn new(table: Arc<RoleKeywordTable>) -> Result<Self> {
        // Roles may share keywords; each distinct keyword becomes one pattern.
        let mut keywords: Vec<String> = Vec::new();
        let mut role_patterns = Vec::with_capacity(table.len());

        for role in table.roles() {
            let ids = role
                .keywords
                .iter()
                .map(|keyword| match keywords.iter().position(|k| k == keyword) {
                    Some(id) => id,
                    None => {
                        keywords.push(keyword.clone());
                        keywords.len() - 1
                    }
                })
                .collect();
            role_patterns.push(ids);
        }

        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&keywords)
            .map_err(|e| ResumeMatchError::Catalog(format!("Failed to build role matcher: {}", e)))?;

        Ok(Self {
            table,
            matcher,
            role_patterns,
        })
    }

    pub fn detect_role(&self, jd_text: &str) -> String {
        let jd_text = jd_text.trim();
        let length = jd_text.chars().count();

        if length < MIN_CLASSIFIABLE_CHARS {
            return UNDEFINED_ROLE.to_string();
        }

        let present = self.present_keywords(jd_text);

        let mut best: Option<(usize, usize)> = None;
        for (index, ids) in self.role_patterns.iter().enumerate() {
            let hits = ids.iter().filter(|id| present.contains(id)).count();
            // Strictly greater: earlier roles keep ties.
            if hits > best.map_or(0, |(_, best_hits)| best_hits) {
                best = Some((index, hits));
            }
        }

        match best {
            Some((index, hits)) => {
                log::debug!(
                    "Detected role '{}' with {} keyword hits",
                    self.table.roles()[index].label,
                    hits
                );
                self.table.roles()[index].label.clone()
            }
            None if length < DETAILED_JD_CHARS => GENERAL_ROLE.to_string(),
            None => GENERAL_PROFESSIONAL_ROLE.to_string(),
        }
    }

    /// Ids of every keyword occurring anywhere in the text, overlaps included.
    fn present_keywords(&self, text: &str) -> HashSet<usize> {
        let lowered = text.to_lowercase();
        self.matcher
            .find_overlapping_iter(&lowered)
            .map(|m| m.pattern().as_usize())
            .collect()
    }
}
