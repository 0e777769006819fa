//! `assess overlaps`, `assess synergies`, `assess also-covered`.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use assess_core::{FrameworkId, RecommendationId};
use assess_engine::{also_covered_by, find_synergies, overlaps_for, related_recommendations, RelatedRecommendation};
use assess_schema::OverlapMapping;

use crate::AssessContext;

#[derive(Args, Debug)]
pub struct OverlapsArgs {
    /// Framework to list overlaps for.
    pub framework: String,
}

#[derive(Args, Debug)]
pub struct SynergiesArgs {
    /// Frameworks the user has completed.
    #[arg(required = true, num_args = 1..)]
    pub frameworks: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AlsoCoveredArgs {
    /// Framework the recommendation belongs to.
    pub framework: String,

    /// Recommendation identifier.
    pub recommendation: String,
}

/// Output of `assess also-covered`.
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub framework: FrameworkId,
    pub recommendation: RecommendationId,
    pub also_covered_by: Vec<FrameworkId>,
    pub related: Vec<RelatedRecommendation>,
}

/// One row of `assess overlaps`, seen from the requested framework.
#[derive(Debug, Serialize)]
pub struct OverlapRow<'c> {
    pub partner: &'c FrameworkId,
    pub overlap_percent: u8,
    pub shared_measures: &'c [String],
}

pub fn overlaps<'c>(ctx: &'c AssessContext, args: &OverlapsArgs) -> Result<Vec<OverlapRow<'c>>> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    Ok(overlaps_for(&ctx.registry, &framework)?
        .into_iter()
        .filter_map(|m| {
            Some(OverlapRow {
                partner: m.other_side(&framework)?,
                overlap_percent: m.overlap_percent,
                shared_measures: &m.shared_measures,
            })
        })
        .collect())
}

pub fn synergies<'c>(ctx: &'c AssessContext, args: &SynergiesArgs) -> Result<Vec<&'c OverlapMapping>> {
    let completed = args
        .frameworks
        .iter()
        .map(|f| FrameworkId::new(f.as_str()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(find_synergies(&ctx.registry, &completed)?)
}

pub fn coverage(ctx: &AssessContext, args: &AlsoCoveredArgs) -> Result<CoverageReport> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    let recommendation = RecommendationId::new(args.recommendation.as_str())?;
    Ok(CoverageReport {
        also_covered_by: also_covered_by(&ctx.registry, &recommendation, &framework)?,
        related: related_recommendations(&ctx.registry, &recommendation, &framework)?,
        framework,
        recommendation,
    })
}

pub fn run_overlaps(ctx: &AssessContext, args: &OverlapsArgs) -> Result<u8> {
    crate::emit(&overlaps(ctx, args)?)?;
    Ok(0)
}

pub fn run_synergies(ctx: &AssessContext, args: &SynergiesArgs) -> Result<u8> {
    crate::emit(&synergies(ctx, args)?)?;
    Ok(0)
}

pub fn run_also_covered(ctx: &AssessContext, args: &AlsoCoveredArgs) -> Result<u8> {
    crate::emit(&coverage(ctx, args)?)?;
    Ok(0)
}
