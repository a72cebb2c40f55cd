//! Scoring core: catalog data, text processing, skill extraction,
//! similarity, role detection and score composition

pub mod catalog;
pub mod role_classifier;
pub mod scorer;
pub mod similarity;
pub mod skill_extractor;
pub mod text_processor;
