// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Question Registry
//
// Canonical question ids, their stakeholder sections, and the evaluator
// bound to each id. Ids without an evaluator answer through the stub.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::evaluators;
use crate::prompts::prompt_for;
use crate::types::{
    AnswerContext, Answerability, Evaluator, Implementation, QuestionAnswer, QuestionDefinition, Verdict,
};

// ─── Sections ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub prefix: char,
    pub section: &'static str,
    pub stakeholder: &'static str,
    pub count: usize,
}

pub const SECTIONS: [SectionSpec; 9] = [
    SectionSpec { prefix: 'A', section: "A Core", stakeholder: "All viewers", count: 12 },
    SectionSpec { prefix: 'B', section: "B Builders", stakeholder: "Builders / protocol designers", count: 18 },
    SectionSpec {
        prefix: 'C',
        section: "C Governance",
        stakeholder: "Onocoy governance / DAO / foundation",
        count: 18,
    },
    SectionSpec { prefix: 'D', section: "D Providers", stakeholder: "Providers / miners", count: 12 },
    SectionSpec { prefix: 'E', section: "E Users", stakeholder: "Users / rovers / enterprise buyers", count: 8 },
    SectionSpec { prefix: 'F', section: "F Researchers", stakeholder: "Researchers / thesis readers", count: 14 },
    SectionSpec {
        prefix: 'G',
        section: "G Comparative",
        stakeholder: "Comparative DePIN analysts / community",
        count: 8,
    },
    SectionSpec { prefix: 'H', section: "H Token", stakeholder: "Token holders / treasury-risk readers", count: 10 },
    SectionSpec {
        prefix: 'M',
        section: "I Onocoy Inputs",
        stakeholder: "Onocoy governance / DAO / foundation",
        count: 3,
    },
];

/// Questions no model capability can answer until new telemetry exists.
const KNOWN_GAP_IDS: [&str; 3] = ["M1", "M2", "M3"];

const STUB_GAP_SUMMARY: &str = "No model capability exists yet for this question.";
const STUB_PARTIAL_SUMMARY: &str = "Model has partial support, but no deterministic evaluator is registered yet.";

pub fn is_known_gap_question(id: &str) -> bool {
    KNOWN_GAP_IDS.contains(&id)
}

/// `A1..A12, B1..B18, ..., M1..M3` in section order.
pub fn canonical_ids() -> Vec<String> {
    SECTIONS
        .iter()
        .flat_map(|spec| (1..=spec.count).map(move |n| format!("{}{}", spec.prefix, n)))
        .collect()
}

pub fn section_for(id: &str) -> SectionSpec {
    let prefix = id.chars().next().map_or('?', |c| c.to_ascii_uppercase());
    SECTIONS
        .iter()
        .copied()
        .find(|spec| spec.prefix == prefix)
        .unwrap_or(SectionSpec {
            prefix,
            section: "Unknown",
            stakeholder: "Unknown stakeholder",
            count: 0,
        })
}

/// Placeholder answer for a registered id without an evaluator.
pub fn stub_answer(id: &str) -> QuestionAnswer {
    let base = QuestionAnswer::base(id).panel(
        "dashboard_acceptance_answers_snapshot_latest.tsv",
        "Acceptance checklist row",
    );
    if is_known_gap_question(id) {
        base.graded(Answerability::N, Verdict::InsufficientData)
            .summary(STUB_GAP_SUMMARY)
    } else {
        base.summary(STUB_PARTIAL_SUMMARY)
    }
}

// ─── Definitions ────────────────────────────────────────────────────────────

impl QuestionDefinition {
    pub fn new(id: &str, evaluator: Option<Evaluator>) -> Self {
        let spec = section_for(id);
        Self {
            id: id.to_string(),
            section: spec.section,
            stakeholder: spec.stakeholder,
            prompt: prompt_for(id),
            evaluator,
        }
    }

    pub fn implementation(&self) -> Implementation {
        match self.evaluator {
            Some(_) => Implementation::Implemented,
            None => Implementation::Stub,
        }
    }

    /// Runs the bound evaluator, or the stub when none is registered.
    pub fn evaluate(&self, ctx: &AnswerContext) -> QuestionAnswer {
        match self.evaluator {
            Some(evaluate) => evaluate(ctx),
            None => stub_answer(&self.id),
        }
    }
}

/// Serializable view of a definition, without its evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    pub id: String,
    pub section: &'static str,
    pub stakeholder: &'static str,
    pub prompt: String,
    pub implementation: Implementation,
}

impl From<&QuestionDefinition> for CatalogueEntry {
    fn from(definition: &QuestionDefinition) -> Self {
        Self {
            id: definition.id.clone(),
            section: definition.section,
            stakeholder: definition.stakeholder,
            prompt: definition.prompt.clone(),
            implementation: definition.implementation(),
        }
    }
}

// ─── Registry ───────────────────────────────────────────────────────────────

/// Question definitions keyed by id, remembering insertion order.
#[derive(Debug, Clone, Default)]
pub struct QuestionRegistry {
    definitions: HashMap<String, QuestionDefinition>,
    order: Vec<String>,
}

impl QuestionRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every canonical id bound to its evaluator, or to the stub.
    pub fn standard() -> Self {
        let implemented: HashMap<&str, Evaluator> = evaluators::implemented().collect();
        let mut registry = Self::empty();
        for id in canonical_ids() {
            let evaluator = implemented.get(id.as_str()).copied();
            registry.insert(QuestionDefinition::new(&id, evaluator));
        }
        registry
    }

    /// Adds or replaces a definition. Replacing keeps the original position.
    pub fn insert(&mut self, definition: QuestionDefinition) {
        if !self.definitions.contains_key(&definition.id) {
            self.order.push(definition.id.clone());
        }
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn remove(&mut self, id: &str) -> Option<QuestionDefinition> {
        let removed = self.definitions.remove(id)?;
        self.order.retain(|known| known != id);
        Some(removed)
    }

    pub fn get(&self, id: &str) -> Option<&QuestionDefinition> {
        self.definitions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &QuestionDefinition> {
        self.order.iter().filter_map(|id| self.definitions.get(id))
    }

    pub fn catalogue(&self) -> Vec<CatalogueEntry> {
        self.definitions().map(CatalogueEntry::from).collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Shared standard registry, built on first use.
pub fn standard_registry() -> &'static QuestionRegistry {
    static REGISTRY: OnceLock<QuestionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(QuestionRegistry::standard)
}
