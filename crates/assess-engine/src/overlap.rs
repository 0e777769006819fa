//! # Topic Overlap & Recommendation Mapping
//!
//! Static lookups over the overlap table and the recommendation topics:
//! which frameworks overlap with a given one, which other frameworks a
//! recommendation also covers, and which overlaps a set of completed
//! assessments already unlocks.

use serde::{Deserialize, Serialize};

use assess_core::{AssessError, ConfigurationError, FrameworkId, RecommendationId, ValidationError};
use assess_schema::{OverlapMapping, Registry};

/// A recommendation in some framework that shares a topic with another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedRecommendation {
    pub framework: FrameworkId,
    pub recommendation: RecommendationId,
    /// Label key of the first topic linking the two.
    pub topic: String,
}

fn require_recommendation(
    registry: &Registry,
    recommendation: &RecommendationId,
    framework: &FrameworkId,
) -> Result<(), AssessError> {
    if registry.framework(framework)?.recommendation(recommendation).is_none() {
        return Err(ValidationError::UnknownRecommendation {
            framework: framework.to_string(),
            recommendation: recommendation.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Every overlap mapping with `framework` on either side, in table order.
pub fn overlaps_for<'r>(
    registry: &'r Registry,
    framework: &FrameworkId,
) -> Result<Vec<&'r OverlapMapping>, ConfigurationError> {
    registry.framework(framework)?;
    Ok(registry
        .overlaps()
        .iter()
        .filter(|m| m.involves(framework))
        .collect())
}

/// Other frameworks with at least one recommendation in any topic that
/// lists `recommendation` under `framework`. Deduplicated, first-seen order.
pub fn also_covered_by(
    registry: &Registry,
    recommendation: &RecommendationId,
    framework: &FrameworkId,
) -> Result<Vec<FrameworkId>, AssessError> {
    require_recommendation(registry, recommendation, framework)?;
    let mut out: Vec<FrameworkId> = Vec::new();
    for topic in registry
        .recommendation_topics()
        .iter()
        .filter(|t| t.contains(framework, recommendation))
    {
        for member in &topic.members {
            if &member.framework != framework
                && !member.recommendations.is_empty()
                && !out.contains(&member.framework)
            {
                out.push(member.framework.clone());
            }
        }
    }
    Ok(out)
}

/// Every `(framework, recommendation)` pair sharing a topic with
/// `recommendation` in `framework`, excluding the pair itself. Used to mark
/// equivalent recommendations complete in other frameworks.
pub fn related_recommendations(
    registry: &Registry,
    recommendation: &RecommendationId,
    framework: &FrameworkId,
) -> Result<Vec<RelatedRecommendation>, AssessError> {
    require_recommendation(registry, recommendation, framework)?;
    let mut out: Vec<RelatedRecommendation> = Vec::new();
    for topic in registry
        .recommendation_topics()
        .iter()
        .filter(|t| t.contains(framework, recommendation))
    {
        for member in &topic.members {
            for rec in &member.recommendations {
                let is_self = &member.framework == framework && rec == recommendation;
                let seen = out
                    .iter()
                    .any(|r| r.framework == member.framework && &r.recommendation == rec);
                if !is_self && !seen {
                    out.push(RelatedRecommendation {
                        framework: member.framework.clone(),
                        recommendation: rec.clone(),
                        topic: topic.topic.clone(),
                    });
                }
            }
        }
    }
    Ok(out)
}

/// Overlaps whose two sides are both in `completed`, highest
/// `overlap_percent` first. Ties keep table order.
pub fn find_synergies<'r>(
    registry: &'r Registry,
    completed: &[FrameworkId],
) -> Result<Vec<&'r OverlapMapping>, ConfigurationError> {
    for framework in completed {
        registry.framework(framework)?;
    }
    let mut out: Vec<&OverlapMapping> = registry
        .overlaps()
        .iter()
        .filter(|m| completed.contains(&m.framework_a) && completed.contains(&m.framework_b))
        .collect();
    out.sort_by(|a, b| b.overlap_percent.cmp(&a.overlap_percent));
    tracing::debug!(completed = completed.len(), synergies = out.len(), "synergies found");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fw, registry};

    fn rec(id: &str) -> RecommendationId {
        RecommendationId::new(id).unwrap()
    }

    fn pairs(mappings: &[&OverlapMapping]) -> Vec<(String, String)> {
        mappings
            .iter()
            .map(|m| (m.framework_a.to_string(), m.framework_b.to_string()))
            .collect()
    }

    #[test]
    fn overlaps_match_either_side() {
        let reg = registry();
        // nis2 is framework_b in the first mapping and framework_a in the second.
        let found = overlaps_for(&reg, &fw("nis2")).unwrap();
        assert_eq!(
            pairs(&found),
            vec![("gdpr".into(), "nis2".into()), ("nis2".into(), "dora".into())]
        );
        assert_eq!(overlaps_for(&reg, &fw("dora")).unwrap().len(), 2);
    }

    #[test]
    fn overlaps_for_unknown_framework_is_configuration_error() {
        assert_eq!(
            overlaps_for(&registry(), &fw("pci")).unwrap_err(),
            ConfigurationError::UnknownFramework("pci".into())
        );
    }

    #[test]
    fn also_covered_by_unions_topics_in_first_seen_order() {
        // nis2-rec-mfa is in topic.mfa (dora, gdpr) and topic.policy (dora).
        let reg = registry();
        let others = also_covered_by(&reg, &rec("nis2-rec-mfa"), &fw("nis2")).unwrap();
        assert_eq!(others, vec![fw("dora"), fw("gdpr")]);
    }

    #[test]
    fn also_covered_by_without_topic_is_empty() {
        let reg = registry();
        assert!(also_covered_by(&reg, &rec("nis2-rec-pam"), &fw("nis2")).unwrap().is_empty());
    }

    #[test]
    fn also_covered_by_requires_recommendation_in_framework() {
        let reg = registry();
        let err = also_covered_by(&reg, &rec("dora-rec-mfa"), &fw("nis2")).unwrap_err();
        assert!(err.is_validation());
        let err = also_covered_by(&reg, &rec("x"), &fw("pci")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn related_recommendations_excludes_self_and_dedupes() {
        let reg = registry();
        let related = related_recommendations(&reg, &rec("nis2-rec-mfa"), &fw("nis2")).unwrap();
        let flat: Vec<(&str, &str, &str)> = related
            .iter()
            .map(|r| (r.framework.as_str(), r.recommendation.as_str(), r.topic.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("dora", "dora-rec-mfa", "topic.mfa"),
                ("gdpr", "gdpr-rec-mfa", "topic.mfa"),
                ("nis2", "nis2-rec-policy", "topic.policy"),
            ]
        );
    }

    #[test]
    fn synergies_require_both_sides_and_sort_descending() {
        let reg = registry();
        let all = find_synergies(&reg, &[fw("gdpr"), fw("dora"), fw("nis2")]).unwrap();
        let percents: Vec<u8> = all.iter().map(|m| m.overlap_percent).collect();
        assert_eq!(percents, vec![70, 40, 30]);

        let two = find_synergies(&reg, &[fw("nis2"), fw("gdpr")]).unwrap();
        assert_eq!(pairs(&two), vec![("gdpr".into(), "nis2".into())]);

        assert!(find_synergies(&reg, &[fw("nis2")]).unwrap().is_empty());
        assert!(find_synergies(&reg, &[]).unwrap().is_empty());
        assert!(find_synergies(&reg, &[fw("pci")]).is_err());
    }
}
