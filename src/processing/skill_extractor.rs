//! Boundary-safe skill detection over free text

use crate::error::{Result, ResumeMatchError};
use crate::processing::catalog::SkillCatalog;
use regex::RegexSet;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Characters that may delimit a skill token, besides start and end of text.
const SEPARATOR_CLASS: &str = r"[\s,./;:()\[\]]";

/// Scans text for every canonical skill and synonym in a [`SkillCatalog`].
///
/// All patterns are compiled once into a single `RegexSet`, so a scan checks
/// every entry independently in one pass over the text.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    patterns: RegexSet,
    /// Canonical skill for each pattern index.
    targets: Vec<String>,
}

impl SkillExtractor {
    pub fn new(catalog: Arc<SkillCatalog>) -> Result<Self> {
        let mut sources = Vec::with_capacity(catalog.skill_count() + catalog.synonyms().len());
        let mut targets = Vec::with_capacity(sources.capacity());

        for skill in catalog.canonical_skills() {
            sources.push(bounded_pattern(skill));
            targets.push(skill.clone());
        }
        for (alias, canonical) in catalog.synonyms() {
            sources.push(bounded_pattern(alias));
            targets.push(canonical.clone());
        }

        let patterns = RegexSet::new(&sources)
            .map_err(|e| ResumeMatchError::Catalog(format!("Failed to build skill patterns: {}", e)))?;

        Ok(Self { patterns, targets })
    }

    /// Canonical skills mentioned in `text`.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        if text.trim().is_empty() {
            return BTreeSet::new();
        }

        let lowered = text.to_lowercase();
        self.patterns
            .matches(&lowered)
            .into_iter()
            .map(|index| self.targets[index].clone())
            .collect()
    }

    /// Normalize a caller-supplied skill list: trimmed, lower-cased, blanks dropped.
    pub fn normalize_skills<I, S>(skills: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn bounded_pattern(term: &str) -> String {
    format!(
        "(?:^|{sep}){term}(?:$|{sep})",
        sep = SEPARATOR_CLASS,
        term = regex::escape(term)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(SkillCatalog::builtin())).unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_extraction() {
        let skills = extractor().extract_skills("I have experience with Python, Docker and AWS.");
        assert_eq!(skills, set(&["aws", "docker", "python"]));
    }

    #[test]
    fn test_short_skills_need_boundaries() {
        let skills = extractor().extract_skills("I use car and scala");
        assert!(!skills.contains("c"));
        assert!(!skills.contains("r"));
    }

    #[test]
    fn test_symbol_skills_are_literal() {
        let skills = extractor().extract_skills("Skilled in C++ and C#.");
        assert!(skills.contains("c++"));
        assert!(skills.contains("c#"));
        assert!(!skills.contains("c"));
    }

    #[test]
    fn test_dot_prefixed_skill() {
        let skills = extractor().extract_skills("Built services on .NET and ASP.NET");
        assert!(skills.contains(".net"));
        assert!(skills.contains("asp.net"));
    }

    #[test]
    fn test_single_letter_skill_alone() {
        let skills = extractor().extract_skills("Statistics in R, systems in C");
        assert!(skills.contains("r"));
        assert!(skills.contains("c"));
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let skills = extractor().extract_skills("Deployed on k8s with Node.js and ReactJS (Amazon Web Services)");
        // "." is a separator, so the "js" in "node.js" also counts as javascript
        assert_eq!(skills, set(&["aws", "javascript", "kubernetes", "node", "react"]));
    }

    #[test]
    fn test_separators() {
        let skills = extractor().extract_skills("[rust];go:(kafka)/redis");
        assert_eq!(skills, set(&["go", "kafka", "redis", "rust"]));
    }

    #[test]
    fn test_hyphen_is_not_a_separator() {
        let skills = extractor().extract_skills("pre-python post-docker");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_multi_word_skills() {
        let skills = extractor().extract_skills("Machine Learning and\nComputer Vision, plus CI/CD");
        assert_eq!(skills, set(&["ci/cd", "computer vision", "machine learning"]));
    }

    #[test]
    fn test_empty_text() {
        assert!(extractor().extract_skills("").is_empty());
        assert!(extractor().extract_skills("   \n").is_empty());
    }

    #[test]
    fn test_normalize_skills() {
        let skills = SkillExtractor::normalize_skills(vec![" Python ", "AWS", "", "python"]);
        assert_eq!(skills, set(&["aws", "python"]));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = SkillCatalog::new(["elixir", "phoenix"], [("ex", "elixir")]).unwrap();
        let extractor = SkillExtractor::new(Arc::new(catalog)).unwrap();
        assert_eq!(extractor.extract_skills("ex and Phoenix"), set(&["elixir", "phoenix"]));
    }
}
