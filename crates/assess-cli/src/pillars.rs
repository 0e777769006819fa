//! `assess pillars`: composite pillar scores from the answer store.

use anyhow::Result;

use assess_engine::{pillar_scores, AnsweredScores, PillarScore};

use crate::AssessContext;

pub fn compute_pillars(ctx: &AssessContext) -> Result<Vec<PillarScore>> {
    let scores = AnsweredScores::new(&ctx.registry, &ctx.store);
    Ok(pillar_scores(ctx.registry.pillars(), &scores)?)
}

pub fn run_pillars(ctx: &AssessContext) -> Result<u8> {
    let pillars = compute_pillars(ctx)?;
    if pillars.is_empty() {
        tracing::warn!(config = %ctx.config_dir.display(), "no pillars configured");
    }
    crate::emit(&pillars)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::context;
    use assess_core::{Answer, FrameworkId, Severity};

    #[test]
    fn pillar_without_answers_has_no_score() {
        let (_dir, ctx) = context();
        let pillars = compute_pillars(&ctx).unwrap();
        assert_eq!(pillars.len(), 1);
        assert_eq!(pillars[0].score, None);
        assert_eq!(pillars[0].severity, None);
    }

    #[test]
    fn pillar_uses_stored_answers() {
        let (_dir, ctx) = context();
        ctx.store
            .save_answers(
                &FrameworkId::new("dora").unwrap(),
                &[Answer::new("dora-ac-1", "access-control", 3).unwrap()],
            )
            .unwrap();
        let pillars = compute_pillars(&ctx).unwrap();
        assert_eq!(pillars[0].score, Some(100.0));
        assert_eq!(pillars[0].severity, Some(Severity::Green));
        assert_eq!(pillars[0].missing, vec![FrameworkId::new("nis2").unwrap()]);
    }
}
