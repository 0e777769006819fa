//! Shared fixture registry for unit tests.

use assess_core::{Answer, FrameworkId};
use assess_schema::{FrameworkSchema, Registry, RegistryConfig, TopicTables};

const NIS2: &str = r#"
id: nis2
label_key: framework.nis2
categories:
  - id: governance
    label_key: cat.governance
    questions:
      - { id: nis2-gov-1, tier: core, label_key: q.nis2.gov1 }
      - { id: nis2-gov-2, tier: core, label_key: q.nis2.gov2 }
      - { id: nis2-gov-3, tier: advanced, label_key: q.nis2.gov3 }
  - id: access-control
    label_key: cat.access_control
    questions:
      - { id: nis2-ac-1, tier: core, label_key: q.nis2.ac1 }
      - { id: nis2-ac-2, tier: core, label_key: q.nis2.ac2 }
      - { id: nis2-ac-3, tier: core, label_key: q.nis2.ac3 }
recommendations:
  - { id: nis2-rec-policy, category_id: governance, priority: high, effort: quick, legal_reference: "Art. 20", label_key: rec.policy }
  - { id: nis2-rec-board, category_id: governance, priority: medium, effort: strategic, legal_reference: "Art. 20(2)", label_key: rec.board }
  - { id: nis2-rec-mfa, category_id: access-control, priority: high, effort: quick, legal_reference: "Art. 21(2)(j)", label_key: rec.mfa }
  - { id: nis2-rec-pam, category_id: access-control, priority: low, effort: medium, legal_reference: "Art. 21(2)(i)", label_key: rec.pam }
quick_check:
  - { id: nis2-qc-1, category_id: governance, label_key: qc.nis2.1 }
  - { id: nis2-qc-2, category_id: access-control, label_key: qc.nis2.2 }
  - { id: nis2-qc-3, category_id: access-control, label_key: qc.nis2.3 }
classification:
  - id: micro-exempt
    when: { flag: micro_enterprise }
    outcome: { category: not_in_scope, legal_reference: "Art. 2(1)", reason_key: nis2.reason.micro }
  - id: essential-large
    when:
      all:
        - one_of: { attribute: sector, values: [energy, transport] }
        - at_least: { attribute: employees, value: 250 }
    outcome: { category: essential, legal_reference: "Art. 3(1)(a)", reason_key: nis2.reason.essential_large }
  - id: important-medium
    when:
      all:
        - one_of: { attribute: sector, values: [energy, transport] }
        - at_least: { attribute: employees, value: 50 }
    outcome:
      category: important
      legal_reference: "Art. 3(2)"
      reason_key: nis2.reason.important_medium
      simplified_requirements: [nis2.simplified.reporting]
      proportionality_note: nis2.note.proportionality
  - id: not-in-scope
    when: always
    outcome: { category: not_in_scope, legal_reference: "Art. 2", reason_key: nis2.reason.default }
"#;

const DORA: &str = r#"
id: dora
label_key: framework.dora
categories:
  - id: ict-risk
    label_key: cat.ict_risk
    questions:
      - { id: dora-ict-1, tier: core, label_key: q.dora.ict1 }
      - { id: dora-ict-2, tier: advanced, label_key: q.dora.ict2 }
  - id: access-control
    label_key: cat.access_control
    questions:
      - { id: dora-ac-1, tier: core, label_key: q.dora.ac1 }
recommendations:
  - { id: dora-rec-mfa, category_id: access-control, priority: high, effort: quick, legal_reference: "Art. 9(4)(d)", label_key: rec.mfa }
classification:
  - id: financial-entity
    when: { flag: financial_entity }
    outcome: { category: in_scope, legal_reference: "Art. 2(1)", reason_key: dora.reason.financial }
  - id: not-in-scope
    when: always
    outcome: { category: not_in_scope, legal_reference: "Art. 2", reason_key: dora.reason.default }
"#;

const GDPR: &str = r#"
id: gdpr
label_key: framework.gdpr
categories:
  - id: privacy
    label_key: cat.privacy
    questions:
      - { id: gdpr-p-1, tier: core, label_key: q.gdpr.p1 }
  - id: security
    label_key: cat.security
    questions:
      - { id: gdpr-sec-1, tier: core, label_key: q.gdpr.sec1 }
recommendations:
  - { id: gdpr-rec-mfa, category_id: security, priority: medium, effort: quick, legal_reference: "Art. 32", label_key: rec.mfa }
classification:
  - id: applies
    when: always
    outcome: { category: controller, legal_reference: "Art. 3", reason_key: gdpr.reason.default }
"#;

const TOPICS: &str = r#"
equivalence:
  - topic: topic.access_approx
    confidence: approximate
    members:
      - { framework: nis2, questions: [nis2-ac-1, nis2-ac-2] }
      - { framework: gdpr, questions: [gdpr-sec-1] }
  - topic: topic.mfa
    confidence: exact
    members:
      - { framework: nis2, questions: [nis2-ac-2] }
      - { framework: dora, questions: [dora-ac-1] }
      - { framework: gdpr, questions: [gdpr-sec-1] }
  - topic: topic.governance
    confidence: high
    members:
      - { framework: nis2, questions: [nis2-gov-1] }
      - { framework: dora, questions: [dora-ict-1] }
recommendations:
  - topic: topic.mfa
    members:
      - { framework: nis2, recommendations: [nis2-rec-mfa] }
      - { framework: dora, recommendations: [dora-rec-mfa] }
      - { framework: gdpr, recommendations: [gdpr-rec-mfa] }
  - topic: topic.policy
    members:
      - { framework: nis2, recommendations: [nis2-rec-policy, nis2-rec-mfa] }
      - { framework: dora, recommendations: [dora-rec-mfa] }
"#;

const OVERLAPS: &str = r#"
- { framework_a: gdpr, framework_b: nis2, overlap_percent: 40, shared_measures: [measure.access_control] }
- { framework_a: nis2, framework_b: dora, overlap_percent: 70, shared_measures: [measure.incident_response, measure.access_control] }
- { framework_a: dora, framework_b: gdpr, overlap_percent: 30 }
"#;

pub(crate) fn framework(yaml: &str) -> FrameworkSchema {
    serde_yaml::from_str(yaml).unwrap()
}

pub(crate) fn config() -> RegistryConfig {
    RegistryConfig {
        frameworks: vec![framework(NIS2), framework(DORA), framework(GDPR)],
        topics: serde_yaml::from_str::<TopicTables>(TOPICS).unwrap(),
        overlaps: serde_yaml::from_str(OVERLAPS).unwrap(),
        pillars: Vec::new(),
    }
}

pub(crate) fn registry() -> Registry {
    Registry::build(config()).unwrap()
}

pub(crate) fn fw(id: &str) -> FrameworkId {
    FrameworkId::new(id).unwrap()
}

pub(crate) fn answer(question: &str, category: &str, level: u8) -> Answer {
    Answer::new(question, category, level).unwrap()
}
