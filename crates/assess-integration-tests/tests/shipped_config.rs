//! # Shipped Configuration
//!
//! The tables under `config/` load, validate and hash deterministically.

mod common;

use assess_core::Tier;
use assess_schema::Registry;
use common::{fw, registry};

#[test]
fn all_frameworks_load_in_file_name_order() {
    let registry = registry();
    let ids: Vec<&str> = registry.frameworks().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["dora", "gdpr", "iso27001", "nis2", "tisax"]);
}

#[test]
fn tier_totals_per_framework() {
    let registry = registry();
    let expected = [
        ("nis2", 10, 6),
        ("dora", 8, 5),
        ("gdpr", 8, 4),
        ("iso27001", 9, 5),
        ("tisax", 5, 2),
    ];
    for (id, core, advanced) in expected {
        let schema = registry.framework(&fw(id)).unwrap();
        let totals = schema
            .categories
            .iter()
            .fold((0, 0), |(c, a), category| {
                let t = category.totals_by_tier();
                (c + t.core, a + t.advanced)
            });
        assert_eq!(totals, (core, advanced), "{id}");
        assert_eq!(schema.question_count(), core + advanced, "{id}");
    }
}

#[test]
fn every_framework_has_a_fallback_rule_last() {
    let registry = registry();
    for schema in registry.frameworks() {
        let last = schema.classification.last().expect("rule table is non-empty");
        assert!(last.when.is_always(), "{} must end with `always`", schema.id);
        assert!(
            schema.classification[..schema.classification.len() - 1]
                .iter()
                .all(|r| !r.when.is_always()),
            "{} has an unreachable rule",
            schema.id
        );
    }
}

#[test]
fn every_category_has_quick_check_or_recommendations() {
    let registry = registry();
    for schema in registry.frameworks() {
        for category in &schema.categories {
            let has_rec = schema.recommendations.iter().any(|r| r.category_id == category.id);
            assert!(has_rec, "{}/{} has no recommendation", schema.id, category.id);
        }
        assert!(!schema.quick_check.is_empty(), "{} has no quick check", schema.id);
    }
}

#[test]
fn every_pair_of_frameworks_has_one_overlap() {
    let registry = registry();
    let n = registry.frameworks().len();
    assert_eq!(registry.overlaps().len(), n * (n - 1) / 2);
    for mapping in registry.overlaps() {
        assert!(mapping.overlap_percent <= 100);
        assert_ne!(mapping.framework_a, mapping.framework_b);
    }
}

#[test]
fn topics_span_at_least_two_frameworks() {
    let registry = registry();
    for topic in registry.equivalence_topics() {
        assert!(topic.members.len() >= 2, "{}", topic.topic);
    }
    for topic in registry.recommendation_topics() {
        assert!(topic.members.len() >= 2, "{}", topic.topic);
    }
}

#[test]
fn pillars_reference_configured_frameworks() {
    let registry = registry();
    let ids: Vec<&str> = registry.pillars().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["cyber-resilience", "data-protection", "supply-chain"]);
    for pillar in registry.pillars() {
        for framework in pillar.unique_frameworks() {
            assert!(registry.contains(framework));
        }
    }
}

#[test]
fn digest_is_stable_across_loads() {
    let a = registry().digest().unwrap();
    let b = registry().digest().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_hex().len(), 64);
}

#[test]
fn rebuilt_registry_has_same_digest() {
    let loaded = registry();
    let rebuilt = Registry::build(loaded.config().clone()).unwrap();
    assert_eq!(loaded.digest().unwrap(), rebuilt.digest().unwrap());
}

#[test]
fn tier_filter_partitions_questions() {
    let registry = registry();
    for schema in registry.frameworks() {
        for category in &schema.categories {
            let core = category.questions_in(Some(Tier::Core)).count();
            let advanced = category.questions_in(Some(Tier::Advanced)).count();
            let all = category.questions_in(None).count();
            assert_eq!(core + advanced, all);
        }
    }
}
