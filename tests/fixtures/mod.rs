//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use wichteln::exchange::{GroupRequest, IllegalPair};
use wichteln::matching::ConstraintSet;
use wichteln::types::{Assignment, ParticipantName};

/// Participant names from string literals
pub fn names(list: &[&str]) -> Vec<ParticipantName> {
    list.iter().map(|s| s.to_string()).collect()
}

/// `count` generated participant names
pub fn numbered(count: usize) -> Vec<ParticipantName> {
    (0..count).map(|i| format!("Participant{}", i)).collect()
}

/// Constraint set from (giver, receiver) literals
pub fn constraints(pairs: &[(&str, &str)]) -> ConstraintSet {
    pairs.iter().copied().collect()
}

/// Seeded generator for reproducible runs
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Group request with the given members and forbidden pairs
pub fn group_request(
    identifier: &str,
    participants: &[&str],
    pairs: &[(&str, &str)],
) -> GroupRequest {
    GroupRequest {
        identifier: identifier.to_string(),
        participants: participants.iter().map(|s| s.to_string()).collect(),
        illegal_pairs: pairs
            .iter()
            .map(|(giver, receiver)| IllegalPair::new(*giver, *receiver))
            .collect(),
        description: None,
    }
}

/// Assert the permutation and no-self-match invariants
pub fn assert_derangement(assignment: &Assignment, participants: &[ParticipantName]) {
    let expected: HashSet<&str> = participants.iter().map(String::as_str).collect();
    let givers: Vec<&str> = assignment.iter().map(|p| p.giver.as_str()).collect();
    let receivers: Vec<&str> = assignment.iter().map(|p| p.receiver.as_str()).collect();

    assert_eq!(givers.len(), participants.len(), "one pair per participant");
    assert_eq!(givers.iter().copied().collect::<HashSet<_>>(), expected);
    assert_eq!(receivers.iter().copied().collect::<HashSet<_>>(), expected);
    assert_eq!(
        receivers.iter().collect::<HashSet<_>>().len(),
        receivers.len(),
        "receivers must be unique"
    );

    for pair in assignment {
        assert_ne!(pair.giver, pair.receiver, "{} gifts themselves", pair.giver);
    }
}
