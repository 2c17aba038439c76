//! Verification results

use serde::Serialize;
use std::fmt;
use tracing::{error, trace};

/// Graph-wide invariant checked by the verifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Invariant {
    // Graph core
    NullObject,
    InvalidRegionHasNoValues,
    HasValueEndpoints,
    PointsToEndpoints,
    FieldConsistency,
    HasValueConsistency,
    PointsToConsistency,

    // C language layer
    PartitionDisjointness,
    PartitionCompleteness,
    NullObjectPlacement,
    GlobalNamespace,
    StackNamespace,
}

impl Invariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NullObject => "null object",
            Self::InvalidRegionHasNoValues => "invalid regions have no values",
            Self::HasValueEndpoints => "has-value edge endpoints",
            Self::PointsToEndpoints => "points-to edge endpoints",
            Self::FieldConsistency => "field consistency",
            Self::HasValueConsistency => "has-value edge consistency",
            Self::PointsToConsistency => "points-to edge consistency",
            Self::PartitionDisjointness => "partition disjointness",
            Self::PartitionCompleteness => "partition completeness",
            Self::NullObjectPlacement => "null object placement",
            Self::GlobalNamespace => "global namespace",
            Self::StackNamespace => "stack namespace",
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed invariant instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub invariant: Invariant,
    pub message: String,
}

/// Outcome of a verifier run.
///
/// Every check runs; the graph is consistent iff no violation was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    violations: Vec<Violation>,
}

impl VerificationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one check, logging it
    pub(crate) fn record(&mut self, invariant: Invariant, failures: Vec<String>) {
        if failures.is_empty() {
            trace!("Checking SMG consistency: {}: OK", invariant);
            return;
        }

        trace!("Checking SMG consistency: {}: FAILED", invariant);
        for message in failures {
            error!("SMG inconsistent ({}): {}", invariant, message);
            self.violations.push(Violation { invariant, message });
        }
    }

    pub fn merge(&mut self, other: VerificationReport) {
        self.violations.extend(other.violations);
    }

    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn has_violation(&self, invariant: Invariant) -> bool {
        self.violations.iter().any(|v| v.invariant == invariant)
    }

    /// Failed invariants, each listed once, in check order
    pub fn failed_invariants(&self) -> Vec<Invariant> {
        let mut failed: Vec<Invariant> = Vec::new();
        for violation in &self.violations {
            if !failed.contains(&violation.invariant) {
                failed.push(violation.invariant);
            }
        }
        failed
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_consistent() {
            return f.write_str("consistent");
        }
        let messages: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.invariant, v.message))
            .collect();
        f.write_str(&messages.join("; "))
    }
}
