//! Shared helpers for tests that run against the shipped `config/` tree.

#![allow(dead_code)]

use std::path::PathBuf;

use assess_core::{Answer, CategoryId, FrameworkId, QuestionId, RecommendationId};
use assess_schema::Registry;

/// The repository's `config/` directory.
pub fn config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config")
}

pub fn registry() -> Registry {
    Registry::load_dir(&config_dir()).expect("shipped configuration must load")
}

pub fn fw(id: &str) -> FrameworkId {
    FrameworkId::new(id).unwrap()
}

pub fn q(id: &str) -> QuestionId {
    QuestionId::new(id).unwrap()
}

pub fn cat(id: &str) -> CategoryId {
    CategoryId::new(id).unwrap()
}

pub fn rec(id: &str) -> RecommendationId {
    RecommendationId::new(id).unwrap()
}

pub fn answer(question: &str, category: &str, level: u8) -> Answer {
    Answer::new(question, category, level).unwrap()
}
