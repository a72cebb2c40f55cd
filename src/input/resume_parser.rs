//! Resume field extraction: text, name, contacts, skills and a summary snippet

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_by_type;
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::text_processor::TextProcessor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SNIPPET_CHARS: usize = 600;
const NAME_SCAN_LINES: usize = 10;

/// Fields pulled out of an uploaded resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    /// Canonical skills, sorted
    pub skills: Vec<String>,
    pub snippet: String,
    pub full_text: String,
}

pub struct ResumeParser {
    extractor: SkillExtractor,
    processor: TextProcessor,
    email_regex: Regex,
    phone_regex: Regex,
    summary_regex: Regex,
}

impl ResumeParser {
    pub fn new(extractor: SkillExtractor) -> Self {
        let email_regex = Regex::new(r"[a-zA-Z0-9+._%-]+@[a-zA-Z0-9._%-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?\d[\d\s\-()]{7,}\d").expect("Invalid phone regex");

        let summary_regex = Regex::new(r"(?is)(?:summary|profile|objective|about me)[\s:]+(.{50,500})")
            .expect("Invalid summary regex");

        Self {
            extractor,
            processor: TextProcessor::new(),
            email_regex,
            phone_regex,
            summary_regex,
        }
    }

    /// Parse an uploaded document. The type comes from the file name, or from
    /// the PDF magic bytes when the name is missing or unhelpful.
    pub fn parse_bytes(&self, bytes: &[u8], file_name: Option<&str>) -> Result<ParsedResume> {
        let file_type = match file_name.map(FileType::from_path) {
            Some(FileType::Unknown) | None => FileType::sniff(bytes),
            Some(file_type) => file_type,
        };

        if file_type == FileType::Unknown {
            return Err(ResumeMatchError::UnsupportedFormat(format!(
                "cannot parse '{}': expected a .pdf, .txt or .md resume",
                file_name.unwrap_or("upload")
            )));
        }

        let text = extract_by_type(file_type, bytes)?;
        Ok(self.parse_text(&text))
    }

    pub fn parse_text(&self, text: &str) -> ParsedResume {
        let full_text = self.processor.normalize(text);
        let (emails, phones) = self.extract_contacts(&full_text);

        ParsedResume {
            name: self.extract_name(&full_text),
            emails,
            phones,
            skills: self.extractor.extract_skills(&full_text).into_iter().collect(),
            snippet: self.extract_snippet(&full_text),
            full_text,
        }
    }

    /// Best-effort candidate name from the top of the document: a short line
    /// of capitalised words with no digits or addresses.
    pub fn extract_name(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(NAME_SCAN_LINES)
            .find(|line| looks_like_name(line))
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Emails and phone numbers, de-duplicated in order of appearance.
    /// Phones are reduced to digits and `+` and must carry 10 to 14 digits.
    pub fn extract_contacts(&self, text: &str) -> (Vec<String>, Vec<String>) {
        let emails = dedup_in_order(self.email_regex.find_iter(text).map(|m| m.as_str().to_string()));

        let phones = dedup_in_order(self.phone_regex.find_iter(text).filter_map(|m| {
            let cleaned: String = m
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            let digits = cleaned.chars().filter(char::is_ascii_digit).count();
            (10..=14).contains(&digits).then_some(cleaned)
        }));

        (emails, phones)
    }

    /// Summary paragraph if the resume has one, otherwise its first
    /// substantial lines.
    pub fn extract_snippet(&self, text: &str) -> String {
        if let Some(summary) = self.summary_regex.captures(text).and_then(|c| c.get(1)) {
            let flattened = summary.as_str().trim().replace('\n', " ");
            return truncate_chars(&flattened, SNIPPET_CHARS);
        }

        let long_lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > 40)
            .take(3)
            .collect();

        if long_lines.is_empty() {
            truncate_chars(text, SNIPPET_CHARS).replace('\r', " ").trim().to_string()
        } else {
            truncate_chars(&long_lines.join(" "), SNIPPET_CHARS)
        }
    }
}

const NON_NAME_WORDS: &[&str] = &[
    "resume", "curriculum", "vitae", "summary", "profile", "objective", "experience",
    "education", "skills", "contact", "projects", "engineer", "developer", "manager",
    "analyst", "designer", "scientist", "consultant", "intern",
];

fn looks_like_name(line: &str) -> bool {
    if line.contains('@') || line.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if !(2..=4).contains(&words.len()) {
        return false;
    }

    words.iter().all(|word| {
        let starts_upper = word.chars().next().is_some_and(char::is_uppercase);
        let name_chars = word
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.'));
        let lowered = word.to_lowercase();
        let lowered = lowered.trim_end_matches('.');
        starts_upper && name_chars && !NON_NAME_WORDS.contains(&lowered)
    })
}

fn dedup_in_order(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(item.clone())).collect()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
