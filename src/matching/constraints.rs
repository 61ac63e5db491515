//! Forbidden giver → receiver relations

use crate::types::{Pair, ParticipantName};
use std::collections::{HashMap, HashSet};

/// Set of forbidden giver → receiver pairs
///
/// Duplicates are inert. Lookups are indexed by giver so checking a candidate
/// pair does not allocate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    forbidden: HashMap<ParticipantName, HashSet<ParticipantName>>,
    len: usize,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a forbidden pair, returning false if it was already present
    pub fn insert(&mut self, pair: Pair) -> bool {
        let inserted = self
            .forbidden
            .entry(pair.giver)
            .or_default()
            .insert(pair.receiver);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Whether `giver` is forbidden from gifting `receiver`
    pub fn forbids(&self, giver: &str, receiver: &str) -> bool {
        self.forbidden
            .get(giver)
            .is_some_and(|receivers| receivers.contains(receiver))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forbidden.iter().flat_map(|(giver, receivers)| {
            receivers
                .iter()
                .map(move |receiver| (giver.as_str(), receiver.as_str()))
        })
    }

    /// Copy of this set keeping only pairs between two distinct known participants
    ///
    /// Returns the restricted set and the number of entries dropped.
    pub fn restricted_to(&self, participants: &[ParticipantName]) -> (ConstraintSet, usize) {
        let known: HashSet<&str> = participants.iter().map(String::as_str).collect();
        let mut restricted = ConstraintSet::new();
        let mut ignored = 0;

        for (giver, receiver) in self.iter() {
            if giver != receiver && known.contains(giver) && known.contains(receiver) {
                restricted.insert(Pair::new(giver, receiver));
            } else {
                ignored += 1;
            }
        }

        (restricted, ignored)
    }
}

impl FromIterator<Pair> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        let mut set = ConstraintSet::new();
        for pair in iter {
            set.insert(pair);
        }
        set
    }
}

impl<G, R> FromIterator<(G, R)> for ConstraintSet
where
    G: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (G, R)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(giver, receiver)| Pair::new(giver, receiver))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<ParticipantName> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicates_are_inert() {
        let mut set = ConstraintSet::new();
        assert!(set.insert(Pair::new("Alice", "Bob")));
        assert!(!set.insert(Pair::new("Alice", "Bob")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_forbids_is_directional() {
        let set: ConstraintSet = [("Alice", "Bob")].into_iter().collect();
        assert!(set.forbids("Alice", "Bob"));
        assert!(!set.forbids("Bob", "Alice"));
        assert!(!set.forbids("alice", "Bob"));
    }

    #[test]
    fn test_restricted_to_drops_unknown_and_self_pairs() {
        let set: ConstraintSet = [
            ("Alice", "Bob"),
            ("Alice", "Zed"),
            ("Yan", "Bob"),
            ("Charlie", "Charlie"),
        ]
        .into_iter()
        .collect();

        let (restricted, ignored) = set.restricted_to(&names(&["Alice", "Bob", "Charlie"]));

        assert_eq!(ignored, 3);
        assert_eq!(restricted.len(), 1);
        assert!(restricted.forbids("Alice", "Bob"));
    }

    #[test]
    fn test_iter_yields_every_pair() {
        let set: ConstraintSet = [("A", "B"), ("A", "C"), ("B", "C")].into_iter().collect();
        let mut pairs: Vec<_> = set.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("A", "B"), ("A", "C"), ("B", "C")]);
    }
}
