//! `assess frameworks`: list configured frameworks.

use anyhow::Result;
use serde::Serialize;

use assess_core::FrameworkId;
use assess_schema::TierCounts;

use crate::AssessContext;

/// One framework row.
#[derive(Debug, Serialize)]
pub struct FrameworkSummary {
    pub id: FrameworkId,
    pub label_key: String,
    pub categories: usize,
    pub questions: TierCounts,
    pub recommendations: usize,
    pub quick_check_questions: usize,
    pub classification_rules: usize,
    /// Entity profile attributes the classification rules read, in first-seen order.
    pub profile_attributes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FrameworkListing {
    pub config_digest: String,
    pub frameworks: Vec<FrameworkSummary>,
}

pub fn list_frameworks(ctx: &AssessContext) -> Result<FrameworkListing> {
    let frameworks = ctx
        .registry
        .frameworks()
        .iter()
        .map(|fw| {
            let mut questions = TierCounts::default();
            for category in &fw.categories {
                let counts = category.totals_by_tier();
                questions.core += counts.core;
                questions.advanced += counts.advanced;
            }
            let mut profile_attributes: Vec<String> = Vec::new();
            for name in fw.classification.iter().flat_map(|r| r.when.attributes()) {
                if !profile_attributes.iter().any(|a| a == name) {
                    profile_attributes.push(name.to_string());
                }
            }
            FrameworkSummary {
                id: fw.id.clone(),
                label_key: fw.label_key.clone(),
                categories: fw.categories.len(),
                questions,
                recommendations: fw.recommendations.len(),
                quick_check_questions: fw.quick_check.len(),
                classification_rules: fw.classification.len(),
                profile_attributes,
            }
        })
        .collect();
    Ok(FrameworkListing {
        config_digest: ctx.registry.digest()?.to_string(),
        frameworks,
    })
}

pub fn run_frameworks(ctx: &AssessContext) -> Result<u8> {
    crate::emit(&list_frameworks(ctx)?)?;
    Ok(0)
}
