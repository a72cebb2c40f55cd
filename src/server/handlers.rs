use crate::input::resume_parser::ParsedResume;
use crate::processing::scorer::MatchResult;
use crate::server::errors::AppError;
use crate::server::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    Json,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Body of `POST /score`. Absent fields are treated as empty so that a
/// partial request gets the missing-input error rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub jd: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub parsed: ParsedResume,
}

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "running",
        "message": "Resume matcher API is live"
    }))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-matcher"
    }))
}

/// POST /score
///
/// Body rejections (bad JSON, wrong field types) are reported through
/// [`AppError`] so every 4xx carries the same `{"error": ...}` shape.
pub async fn score_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<MatchResult>, AppError> {
    let Json(req) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let resume = req.resume.unwrap_or_default();
    let jd = req.jd.unwrap_or_default();

    let result = state
        .composer
        .compute_score(&resume, &jd, req.skills.as_deref())?;

    info!("{}", score_summary(&resume, &jd, &result));
    Ok(Json(result))
}

fn score_summary(resume: &str, jd: &str, result: &MatchResult) -> String {
    format!(
        "Scored resume ({} chars) against JD ({} chars): {} [{}]",
        resume.chars().count(),
        jd.chars().count(),
        result.final_score,
        result.role
    )
}

/// POST /upload-resume
pub async fn upload_resume_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        info!(
            "Parsing uploaded resume {} ({} bytes)",
            filename.as_deref().unwrap_or("<unnamed>"),
            bytes.len()
        );

        // PDF extraction is CPU-bound
        let parser = state.parser.clone();
        let name = filename.clone();
        let parsed = tokio::task::spawn_blocking(move || parser.parse_bytes(&bytes, name.as_deref()))
            .await
            .map_err(anyhow::Error::from)??;

        return Ok(Json(UploadResponse { filename, parsed }));
    }

    Err(AppError::BadRequest("multipart field 'file' is required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::scorer::ScoreComposer;

    #[test]
    fn test_score_summary_counts_chars() {
        let resume = "Développeur Python à Zürich";
        let jd = "Ingénieur Python recherché, expérience Docker";
        let result = ScoreComposer::from_config(&Config::default())
            .unwrap()
            .compute_score(resume, jd, None)
            .unwrap();

        let summary = score_summary(resume, jd, &result);
        assert!(summary.starts_with("Scored resume (27 chars) against JD (45 chars): "));
        assert!(summary.ends_with(&format!("[{}]", result.role)));
    }
}
