//! Common types used throughout the gift exchange

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Display name identifying a participant within one exchange
pub type ParticipantName = String;

/// Unique identifier for stored exchanges
pub type ExchangeId = Uuid;

/// An ordered giver → receiver relation
///
/// Used both for assignment entries and for forbidden pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    pub giver: ParticipantName,
    pub receiver: ParticipantName,
}

impl Pair {
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }

    /// Whether the giver would be gifting themselves
    pub fn is_self_pair(&self) -> bool {
        self.giver == self.receiver
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", self.giver, self.receiver)
    }
}

/// Complete giver → receiver assignment for one exchange
///
/// Pairs are kept in participant input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    pairs: Vec<Pair>,
}

impl Assignment {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    /// Receiver assigned to the given giver, if any
    pub fn receiver_of(&self, giver: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.giver == giver)
            .map(|pair| pair.receiver.as_str())
    }

    /// Giver → receiver lookup table
    pub fn as_map(&self) -> HashMap<&str, &str> {
        self.pairs
            .iter()
            .map(|pair| (pair.giver.as_str(), pair.receiver.as_str()))
            .collect()
    }

    pub fn into_pairs(self) -> Vec<Pair> {
        self.pairs
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Outcome of a matching run
///
/// A degraded assignment is still a self-match-free permutation but may
/// contain forbidden pairs, so it is kept apart from `Success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// A random permutation satisfied every constraint
    Success {
        assignment: Assignment,
        /// Attempt (1-based) that produced the assignment
        attempts: u32,
    },
    /// The attempt budget ran out and the rotation fallback was used
    Degraded {
        assignment: Assignment,
        attempts: u32,
    },
}

impl MatchOutcome {
    pub fn assignment(&self) -> &Assignment {
        match self {
            MatchOutcome::Success { assignment, .. } => assignment,
            MatchOutcome::Degraded { assignment, .. } => assignment,
        }
    }

    pub fn into_assignment(self) -> Assignment {
        match self {
            MatchOutcome::Success { assignment, .. } => assignment,
            MatchOutcome::Degraded { assignment, .. } => assignment,
        }
    }

    pub fn attempts(&self) -> u32 {
        match self {
            MatchOutcome::Success { attempts, .. } | MatchOutcome::Degraded { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, MatchOutcome::Degraded { .. })
    }

    /// Label used for logging and metrics
    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Success { .. } => "success",
            MatchOutcome::Degraded { .. } => "degraded",
        }
    }
}

impl std::fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_assignment() -> Assignment {
        Assignment::new(vec![
            Pair::new("Alice", "Bob"),
            Pair::new("Bob", "Charlie"),
            Pair::new("Charlie", "Alice"),
        ])
    }

    #[test]
    fn test_receiver_lookup() {
        let assignment = sample_assignment();
        assert_eq!(assignment.receiver_of("Bob"), Some("Charlie"));
        assert_eq!(assignment.receiver_of("bob"), None);
        assert_eq!(assignment.as_map().get("Charlie"), Some(&"Alice"));
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = MatchOutcome::Degraded {
            assignment: sample_assignment(),
            attempts: 1000,
        };
        assert!(outcome.is_degraded());
        assert_eq!(outcome.attempts(), 1000);
        assert_eq!(outcome.to_string(), "degraded");
        assert_eq!(outcome.into_assignment().len(), 3);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = MatchOutcome::Success {
            assignment: Assignment::new(vec![Pair::new("A", "B"), Pair::new("B", "A")]),
            attempts: 2,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["assignment"][0]["giver"], "A");
    }
}
