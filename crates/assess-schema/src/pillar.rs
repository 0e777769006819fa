//! Pillars group frameworks into coarser composite domains.

use serde::{Deserialize, Serialize};

use assess_core::{FrameworkId, PillarId};

/// A sub-area of a pillar fed by one or more frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarComponent {
    /// Component identifier, unique within the pillar.
    pub id: String,
    /// Label key for the component name.
    pub label_key: String,
    /// Frameworks whose overall scores feed this component.
    pub frameworks: Vec<FrameworkId>,
}

/// A composite domain score over several frameworks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillar {
    /// Pillar identifier.
    pub id: PillarId,
    /// Label key for the pillar name.
    pub label_key: String,
    /// Components in display order.
    pub components: Vec<PillarComponent>,
}

impl Pillar {
    /// Every framework referenced by any component, once each, in
    /// first-seen order.
    pub fn unique_frameworks(&self) -> Vec<&FrameworkId> {
        let mut out: Vec<&FrameworkId> = Vec::new();
        for fw in self.components.iter().flat_map(|c| c.frameworks.iter()) {
            if !out.contains(&fw) {
                out.push(fw);
            }
        }
        out
    }
}

/// Contents of `pillars.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarTable {
    /// Pillars in display order.
    #[serde(default)]
    pub pillars: Vec<Pillar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_frameworks_dedupes_across_components() {
        let fw = |s: &str| FrameworkId::new(s).unwrap();
        let pillar = Pillar {
            id: PillarId::new("resilience").unwrap(),
            label_key: "pillar.resilience".into(),
            components: vec![
                PillarComponent {
                    id: "cyber".into(),
                    label_key: "component.cyber".into(),
                    frameworks: vec![fw("nis2"), fw("dora")],
                },
                PillarComponent {
                    id: "isms".into(),
                    label_key: "component.isms".into(),
                    frameworks: vec![fw("iso27001"), fw("nis2")],
                },
            ],
        };
        let ids: Vec<&str> = pillar.unique_frameworks().iter().map(|f| f.as_str()).collect();
        assert_eq!(ids, vec!["nis2", "dora", "iso27001"]);
    }
}
