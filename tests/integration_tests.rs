//! Integration tests for the resume matcher

use resume_matcher::config::Config;
use resume_matcher::input::manager::InputManager;
use resume_matcher::input::resume_parser::ResumeParser;
use resume_matcher::output::{MatchReport, ReportGenerator};
use resume_matcher::processing::scorer::{MatchContext, ScoreComposer};
use resume_matcher::processing::skill_extractor::SkillExtractor;
use resume_matcher::{ResumeMatchError, ScoreResponse};
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ResumeMatchError::InvalidInput(_))));
}

#[tokio::test]
async fn test_score_fixture_files() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let composer = ScoreComposer::from_config(&Config::default()).unwrap();
    let result = composer.compute_score(&resume, &job, None).unwrap();

    assert_eq!(result.missing_skills, vec!["graphql", "kubernetes", "rest api"]);
    assert_eq!(result.extra_skills, vec!["git"]);
    assert!(result.matched_skills.contains(&"react".to_string()));
    assert!(result.matched_skills.contains(&"node".to_string()));
    assert_eq!(result.matched_skills.len(), 9);

    assert!(result.skill_score <= 75.0);
    assert!(result.jd_similarity_score <= 50.0);
    assert!(result.final_score > 0.0 && result.final_score <= 100.0);
    assert!((0.0..=1.0).contains(&result.similarity_raw));
    assert!(!result.role.is_empty());

    // Same inputs, same bytes out
    let again = composer.compute_score(&resume, &job, None).unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        serde_json::to_string(&again).unwrap()
    );
}

#[tokio::test]
async fn test_txt_and_markdown_resumes_agree_on_skills() {
    let mut manager = InputManager::new();
    let txt = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let md = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    let composer = ScoreComposer::from_config(&Config::default()).unwrap();
    assert_eq!(composer.extract_skills(&txt), composer.extract_skills(&md));
}

#[tokio::test]
async fn test_parse_then_score_with_parsed_skills() {
    let bytes = InputManager::new()
        .read_bytes(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let context = MatchContext::builtin();
    let parser = ResumeParser::new(SkillExtractor::new(context.catalog.clone()).unwrap());
    let parsed = parser.parse_bytes(&bytes, Some("sample_resume.txt")).unwrap();

    assert_eq!(parsed.name.as_deref(), Some("John Doe"));
    assert_eq!(parsed.emails, vec!["john.doe@example.com"]);
    assert_eq!(parsed.phones, vec!["+14155550134"]);
    assert!(parsed.snippet.starts_with("Full-stack software engineer"));

    let job = std::fs::read_to_string("tests/fixtures/sample_job.txt").unwrap();
    let composer = ScoreComposer::new(context, Config::default().scoring).unwrap();

    let from_text = composer.compute_score(&parsed.full_text, &job, None).unwrap();
    let from_skills = composer
        .compute_score(&parsed.full_text, &job, Some(parsed.skills.as_slice()))
        .unwrap();
    assert_eq!(from_text, from_skills);
}

#[test]
fn test_missing_input_wire_shape() {
    let composer = ScoreComposer::from_config(&Config::default()).unwrap();
    let response = ScoreResponse::from(composer.compute_score("", "Rust developer", None));

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "error": "Resume or JD missing" })
    );
}

#[test]
fn test_report_rendering_end_to_end() {
    let config = Config::default();
    let composer = ScoreComposer::from_config(&config).unwrap();
    let result = composer
        .compute_score(
            "Python developer with Docker and AWS",
            "Hiring a Python engineer who knows AWS and Terraform",
            None,
        )
        .unwrap();

    let report = MatchReport::new(result, "resume.txt", "job.txt", composer.weights());
    let generator = ReportGenerator::with_options(false, true, true, false);

    let console = generator
        .generate(&report, &resume_matcher::config::OutputFormat::Console)
        .unwrap();
    assert!(console.contains("Missing Skills"));
    assert!(console.contains("terraform"));

    let markdown = generator
        .generate(&report, &resume_matcher::config::OutputFormat::Markdown)
        .unwrap();
    assert!(markdown.contains("- **Missing:** `terraform`"));
}
