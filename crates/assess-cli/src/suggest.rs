//! `assess suggest`: pre-filled answers from equivalent questions in other
//! frameworks.

use anyhow::Result;
use clap::Args;

use assess_core::{CategoryId, FrameworkId, QuestionId};
use assess_engine::{EquivalenceService, SuggestedAnswer};

use crate::AssessContext;

/// Arguments for `assess suggest`.
#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("scope").required(true).args(["question", "category"])))]
pub struct SuggestArgs {
    /// Framework being assessed.
    pub framework: String,

    /// Suggest for one question.
    #[arg(long)]
    pub question: Option<String>,

    /// Suggest for every question in a category.
    #[arg(long)]
    pub category: Option<String>,
}

pub fn suggestions(ctx: &AssessContext, args: &SuggestArgs) -> Result<Vec<SuggestedAnswer>> {
    let framework = FrameworkId::new(args.framework.as_str())?;
    let service = EquivalenceService::new(&ctx.registry);
    match (&args.question, &args.category) {
        (Some(question), _) => {
            let question = QuestionId::new(question.as_str())?;
            Ok(service
                .suggest(&framework, &question, &ctx.store)?
                .into_iter()
                .collect())
        }
        (None, Some(category)) => {
            let category = CategoryId::new(category.as_str())?;
            Ok(service.suggest_for_category(&framework, &category, &ctx.store)?)
        }
        (None, None) => anyhow::bail!("either --question or --category is required"),
    }
}

pub fn run_suggest(ctx: &AssessContext, args: &SuggestArgs) -> Result<u8> {
    let found = suggestions(ctx, args)?;
    tracing::info!(suggestions = found.len(), "equivalence lookup complete");
    crate::emit(&found)?;
    Ok(0)
}
