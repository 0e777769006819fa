//! # Score Subcommands
//!
//! `assess score` scores the stored answers for a framework and can attach
//! a remediation roadmap. `assess quick-check` scores a quick-check answer
//! file. Both print an [`AssessmentReport`] stamped with the generation time
//! and the configuration digest, so a saved report identifies the tables
//! that produced it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use assess_core::{FrameworkId, QuickAnswer, Tier};
use assess_engine::{build_roadmap, score, score_quick_check, AnswerSource, OverallScore, Roadmap};
use assess_schema::parser::load_typed;

use crate::AssessContext;

/// Arguments for `assess score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Framework to score.
    pub framework: String,

    /// Restrict scoring to one question tier (core or advanced).
    #[arg(long)]
    pub tier: Option<Tier>,

    /// Include the phased remediation roadmap.
    #[arg(long)]
    pub roadmap: bool,
}

/// Arguments for `assess quick-check`.
#[derive(Args, Debug)]
pub struct QuickCheckArgs {
    /// Framework whose quick-check battery was answered.
    pub framework: String,

    /// JSON or YAML list of `{question_id, response}` entries.
    #[arg(long, value_name = "FILE")]
    pub answers_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentMode {
    Full,
    QuickCheck,
}

/// Printed result of a scoring run.
#[derive(Debug, Serialize)]
pub struct AssessmentReport {
    pub framework: FrameworkId,
    pub mode: AssessmentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub generated_at: DateTime<Utc>,
    pub config_digest: String,
    pub score: OverallScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roadmap: Option<Roadmap>,
}

pub fn score_report(ctx: &AssessContext, args: &ScoreArgs) -> Result<AssessmentReport> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    let schema = ctx.registry.framework(&framework)?;
    let answers = ctx
        .store
        .load_answers(&framework)
        .with_context(|| format!("failed to load answers for {framework}"))?;
    let overall = score(schema, &answers, args.tier)?;
    let roadmap = args
        .roadmap
        .then(|| build_roadmap(&overall.category_scores, &schema.recommendations));

    Ok(AssessmentReport {
        framework,
        mode: AssessmentMode::Full,
        tier: args.tier,
        generated_at: Utc::now(),
        config_digest: ctx.registry.digest()?.to_string(),
        score: overall,
        roadmap,
    })
}

pub fn quick_check_report(ctx: &AssessContext, args: &QuickCheckArgs) -> Result<AssessmentReport> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    let schema = ctx.registry.framework(&framework)?;
    let answers: Vec<QuickAnswer> = load_typed(&args.answers_file)
        .with_context(|| format!("failed to read {}", args.answers_file.display()))?;
    let overall = score_quick_check(schema, &answers)?;

    Ok(AssessmentReport {
        framework,
        mode: AssessmentMode::QuickCheck,
        tier: None,
        generated_at: Utc::now(),
        config_digest: ctx.registry.digest()?.to_string(),
        score: overall,
        roadmap: None,
    })
}

pub fn run_score(ctx: &AssessContext, args: &ScoreArgs) -> Result<u8> {
    let report = score_report(ctx, args)?;
    tracing::info!(
        framework = %report.framework,
        percentage = report.score.percentage,
        severity = %report.score.severity,
        "assessment scored"
    );
    crate::emit(&report)?;
    Ok(0)
}

pub fn run_quick_check(ctx: &AssessContext, args: &QuickCheckArgs) -> Result<u8> {
    crate::emit(&quick_check_report(ctx, args)?)?;
    Ok(0)
}
