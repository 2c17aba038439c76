//! Entailment status of a join

use serde::Serialize;
use std::fmt;

/// How the join result relates to its two inputs.
///
/// `Equal` is the bottom of the lattice and `Incomparable` the top;
/// `LeftEntail` and `RightEntail` are incomparable with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    Equal,
    LeftEntail,
    RightEntail,
    Incomparable,
}

impl JoinStatus {
    /// Least upper bound of `self` and `other`
    pub fn update(self, other: JoinStatus) -> JoinStatus {
        match (self, other) {
            (JoinStatus::Equal, status) | (status, JoinStatus::Equal) => status,
            (left, right) if left == right => left,
            _ => JoinStatus::Incomparable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JoinStatus::Equal => "equal",
            JoinStatus::LeftEntail => "left entail",
            JoinStatus::RightEntail => "right entail",
            JoinStatus::Incomparable => "incomparable",
        }
    }
}

impl Default for JoinStatus {
    fn default() -> Self {
        JoinStatus::Equal
    }
}

impl fmt::Display for JoinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
