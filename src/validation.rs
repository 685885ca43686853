// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Registry Validation

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::registry::{canonical_ids, QuestionRegistry};

/// Registry drift against the canonical id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCoverage {
    pub valid: bool,
    /// Canonical ids with no definition, in canonical order.
    pub missing: Vec<String>,
    /// Registered ids outside the canonical list, in registration order.
    pub unexpected: Vec<String>,
}

pub fn validate_registry_coverage(registry: &QuestionRegistry) -> RegistryCoverage {
    let expected = canonical_ids();
    let known: HashSet<&str> = expected.iter().map(String::as_str).collect();

    let missing: Vec<String> = expected
        .iter()
        .filter(|id| !registry.contains(id))
        .cloned()
        .collect();
    let unexpected: Vec<String> = registry
        .ids()
        .filter(|id| !known.contains(id))
        .map(str::to_string)
        .collect();

    RegistryCoverage {
        valid: missing.is_empty() && unexpected.is_empty(),
        missing,
        unexpected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::standard_registry;
    use crate::types::QuestionDefinition;

    #[test]
    fn standard_registry_is_complete() {
        let coverage = validate_registry_coverage(standard_registry());
        assert!(coverage.valid);
        assert!(coverage.missing.is_empty());
        assert!(coverage.unexpected.is_empty());
    }

    #[test]
    fn drift_is_reported_both_ways() {
        let mut registry = QuestionRegistry::standard();
        registry.remove("C7");
        registry.insert(QuestionDefinition::new("Z1", None));

        let coverage = validate_registry_coverage(&registry);
        assert!(!coverage.valid);
        assert_eq!(coverage.missing, vec!["C7".to_string()]);
        assert_eq!(coverage.unexpected, vec!["Z1".to_string()]);
    }
}
