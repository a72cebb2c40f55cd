//! Skill catalog and role keyword table
//!
//! Static reference data shared by the skill extractor, the role classifier
//! and the score composer. Both tables are validated once at construction and
//! never mutated afterwards, so they can be shared across threads behind an
//! `Arc` without synchronisation.

use crate::config::CatalogConfig;
use crate::error::{Result, ResumeMatchError};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Canonical skill names plus alias -> canonical synonyms.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCatalog {
    canonical_skills: BTreeSet<String>,
    synonyms: BTreeMap<String, String>,
}

/// One role label with the keywords that indicate it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleProfile {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered role table. Order matters: the classifier breaks ties in favour of
/// the role listed first.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleKeywordTable {
    roles: Vec<RoleProfile>,
}

impl SkillCatalog {
    /// Build a catalog, lower-casing every entry.
    ///
    /// Fails if a synonym points at a skill that is not canonical.
    pub fn new<S, A, C>(skills: S, synonyms: impl IntoIterator<Item = (A, C)>) -> Result<Self>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let canonical_skills: BTreeSet<String> = skills
            .into_iter()
            .map(|s| normalize_entry(s.as_ref()))
            .filter(|s| !s.is_empty())
            .collect();

        let mut catalog = Self {
            canonical_skills,
            synonyms: BTreeMap::new(),
        };
        catalog.insert_synonyms(synonyms)?;
        Ok(catalog)
    }

    /// The built-in catalog covering languages, frameworks, data, cloud,
    /// mobile, security and common tooling.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_SKILLS.iter(), DEFAULT_SYNONYMS.iter().copied())
            .expect("built-in synonyms reference only built-in skills")
    }

    /// Built-in catalog extended with the user's configured entries.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut catalog = Self::builtin();
        for skill in &config.extra_skills {
            let skill = normalize_entry(skill);
            if !skill.is_empty() {
                catalog.canonical_skills.insert(skill);
            }
        }
        catalog.insert_synonyms(config.extra_synonyms.iter())?;
        Ok(catalog)
    }

    fn insert_synonyms<A, C>(&mut self, synonyms: impl IntoIterator<Item = (A, C)>) -> Result<()>
    where
        A: AsRef<str>,
        C: AsRef<str>,
    {
        for (alias, canonical) in synonyms {
            let alias = normalize_entry(alias.as_ref());
            let canonical = normalize_entry(canonical.as_ref());
            if alias.is_empty() {
                return Err(ResumeMatchError::Catalog(format!(
                    "empty synonym for '{}'",
                    canonical
                )));
            }
            if !self.canonical_skills.contains(&canonical) {
                return Err(ResumeMatchError::Catalog(format!(
                    "synonym '{}' maps to unknown skill '{}'",
                    alias, canonical
                )));
            }
            self.synonyms.insert(alias, canonical);
        }
        Ok(())
    }

    pub fn canonical_skills(&self) -> &BTreeSet<String> {
        &self.canonical_skills
    }

    pub fn synonyms(&self) -> &BTreeMap<String, String> {
        &self.synonyms
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.canonical_skills.contains(skill)
    }

    /// Resolve a canonical name or alias to its canonical form.
    pub fn canonicalize(&self, term: &str) -> Option<&str> {
        let term = normalize_entry(term);
        if let Some(skill) = self.canonical_skills.get(&term) {
            return Some(skill.as_str());
        }
        self.synonyms.get(&term).map(String::as_str)
    }

    pub fn skill_count(&self) -> usize {
        self.canonical_skills.len()
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoleKeywordTable {
    /// Fails on duplicate role labels or roles without keywords.
    pub fn new(roles: Vec<RoleProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(roles.len());

        for role in roles {
            if !seen.insert(role.label.clone()) {
                return Err(ResumeMatchError::Catalog(format!(
                    "duplicate role label '{}'",
                    role.label
                )));
            }

            // Ordered set: keep first occurrence, drop repeats.
            let mut keyword_seen = HashSet::new();
            let keywords: Vec<String> = role
                .keywords
                .iter()
                .map(|k| normalize_entry(k))
                .filter(|k| !k.is_empty() && keyword_seen.insert(k.clone()))
                .collect();

            if keywords.is_empty() {
                return Err(ResumeMatchError::Catalog(format!(
                    "role '{}' has no keywords",
                    role.label
                )));
            }

            normalized.push(RoleProfile {
                label: role.label,
                keywords,
            });
        }

        Ok(Self { roles: normalized })
    }

    pub fn builtin() -> Self {
        let roles = DEFAULT_ROLES
            .iter()
            .map(|(label, keywords)| RoleProfile {
                label: label.to_string(),
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self::new(roles).expect("built-in role labels are unique")
    }

    pub fn roles(&self) -> &[RoleProfile] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleKeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_entry(entry: &str) -> String {
    entry.trim().to_lowercase()
}

const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "c", "c++", "c#", "javascript", "typescript",
    "go", "rust", "kotlin", "swift", "ruby", "php", "r",

    // Frontend
    "html", "css", "sass", "less", "tailwind", "bootstrap",
    "react", "nextjs", "vue", "angular", "svelte", "jquery",

    // Backend / APIs
    "node", "express", "django", "flask", "spring", "fastapi",
    "laravel", ".net", "asp.net", "graphql", "rest api",

    // Databases
    "mysql", "postgresql", "sqlite", "mongodb", "redis", "oracle",
    "sql server", "firebase",

    // Cloud / DevOps
    "aws", "azure", "gcp",
    "docker", "kubernetes", "terraform", "ansible",
    "jenkins", "github actions", "gitlab ci",
    "ci/cd", "devops",

    // OS / scripting
    "linux", "bash", "powershell",

    // Data / ML / AI
    "machine learning", "deep learning", "nlp", "computer vision",
    "data analysis", "pandas", "numpy", "scikit-learn",
    "tensorflow", "pytorch",

    // BI / analytics
    "tableau", "power bi", "excel",

    // Messaging / streaming
    "kafka", "rabbitmq",

    // Mobile
    "android", "ios", "flutter", "react native", "swiftui",

    // Blockchain / Web3
    "blockchain", "solidity", "hyperledger", "web3",

    // Security
    "cybersecurity", "penetration testing", "network security",

    // Tooling
    "git", "github", "gitlab", "jira", "confluence",
];

const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("nodejs", "node"),
    ("node.js", "node"),
    ("react.js", "react"),
    ("reactjs", "react"),
    ("vue.js", "vue"),
    ("next.js", "nextjs"),
    ("asp.net core", "asp.net"),
    ("rest", "rest api"),
    ("restful api", "rest api"),
    ("ml", "machine learning"),
    ("dl", "deep learning"),
    ("cv", "computer vision"),
    ("sqlserver", "sql server"),
    ("ms sql", "sql server"),
    ("amazon web services", "aws"),
    ("amazon aws", "aws"),
    ("microsoft azure", "azure"),
    ("google cloud", "gcp"),
    ("gcloud", "gcp"),
    ("k8s", "kubernetes"),
    ("ci cd", "ci/cd"),
    ("ci-cd", "ci/cd"),
    ("ci_cd", "ci/cd"),
    ("gitlab-ci", "gitlab ci"),
    ("jenkins ci", "jenkins"),
    ("rn", "react native"),
    ("expo", "react native"),
    ("offensive security", "cybersecurity"),
    ("pentesting", "penetration testing"),
    ("pen testing", "penetration testing"),
    ("hyper ledger", "hyperledger"),
    ("web 3", "web3"),
];

const DEFAULT_ROLES: &[(&str, &[&str])] = &[
    (
        "Frontend Developer",
        &[
            "frontend", "front-end", "ui developer", "react", "angular", "vue",
            "html", "css", "javascript", "typescript", "spa",
        ],
    ),
    (
        "Backend Developer",
        &[
            "backend", "back-end", "api developer", "microservices", "spring",
            "django", "flask", "node", "express", "database",
        ],
    ),
    (
        "Full-Stack Developer",
        &[
            "fullstack", "full-stack", "full stack", "frontend and backend",
            "mern", "mean", "lamp",
        ],
    ),
    (
        "Data Scientist / ML Engineer",
        &[
            "data scientist", "ml engineer", "machine learning", "deep learning",
            "nlp", "computer vision", "analytics", "data analysis",
        ],
    ),
    (
        "DevOps / Cloud Engineer",
        &[
            "devops", "cloud engineer", "site reliability", "sre",
            "kubernetes", "docker", "terraform", "ci/cd", "infrastructure",
        ],
    ),
    (
        "Cybersecurity Engineer",
        &[
            "security engineer", "cybersecurity", "penetration testing",
            "pen tester", "infosec", "appsec", "network security",
        ],
    ),
    (
        "Blockchain Developer",
        &["blockchain", "solidity", "web3", "smart contract", "defi"],
    ),
    (
        "Mobile Developer",
        &["android", "ios", "mobile app", "flutter", "react native", "swiftui"],
    ),
    (
        "Software Engineer",
        &[
            "software engineer", "software developer", "sde", "swe",
            "backend", "frontend", "fullstack",
        ],
    ),
];
