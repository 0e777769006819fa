//! `assess classify`: legal category for an entity profile.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use assess_core::{EntityProfile, FrameworkId};
use assess_engine::{classify, ClassificationResult};
use assess_schema::parser::load_typed;

use crate::AssessContext;

/// Arguments for `assess classify`.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Framework to classify under.
    pub framework: String,

    /// Entity profile (YAML or JSON object of attributes).
    #[arg(long, value_name = "FILE")]
    pub profile: PathBuf,
}

pub fn classify_profile(ctx: &AssessContext, args: &ClassifyArgs) -> Result<ClassificationResult> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    let profile: EntityProfile = load_typed(&args.profile)
        .with_context(|| format!("failed to read profile {}", args.profile.display()))?;
    Ok(classify(&ctx.registry, &framework, &profile)?)
}

pub fn run_classify(ctx: &AssessContext, args: &ClassifyArgs) -> Result<u8> {
    let result = classify_profile(ctx, args)?;
    tracing::info!(framework = %result.framework, category = %result.outcome.category, "classified");
    crate::emit(&result)?;
    Ok(0)
}
