use crate::config::Config;
use crate::error::Result;
use crate::input::resume_parser::ResumeParser;
use crate::processing::scorer::{MatchContext, ScoreComposer};
use crate::processing::skill_extractor::SkillExtractor;
use std::sync::Arc;

/// Shared state injected into all route handlers via Axum extractors.
/// Everything behind the `Arc`s is read-only after start-up.
#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<ScoreComposer>,
    pub parser: Arc<ResumeParser>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_context(MatchContext::from_config(&config)?, config)
    }

    /// Build state around an explicit context, e.g. one with a custom
    /// similarity estimator.
    pub fn with_context(context: MatchContext, config: Config) -> Result<Self> {
        let parser = ResumeParser::new(SkillExtractor::new(context.catalog.clone())?);
        let composer = ScoreComposer::new(context, config.scoring.clone())?;

        Ok(Self {
            composer: Arc::new(composer),
            parser: Arc::new(parser),
            config: Arc::new(config),
        })
    }
}
