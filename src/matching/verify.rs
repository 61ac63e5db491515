//! Assignment invariant checks

use super::constraints::ConstraintSet;
use crate::error::ExchangeError;
use crate::types::{Assignment, Pair, ParticipantName};
use std::collections::HashSet;

/// Check that an assignment is a constraint-respecting derangement of `participants`
///
/// Every participant must give exactly once and receive exactly once, nobody
/// may gift themselves, and no pair may be forbidden. The first failure found
/// is reported.
pub fn verify_assignment(
    assignment: &Assignment,
    participants: &[ParticipantName],
    constraints: &ConstraintSet,
) -> Result<(), ExchangeError> {
    verify_permutation(assignment, participants)?;

    if let Some(pair) = constraint_violations(assignment, constraints).first() {
        return Err(ExchangeError::InvalidAssignment {
            reason: format!("constraint violated - {} cannot gift to {}", pair.giver, pair.receiver),
        });
    }

    Ok(())
}

/// Check the permutation and no-self-match invariants only
///
/// These are the guarantees a degraded assignment still carries.
pub fn verify_permutation(
    assignment: &Assignment,
    participants: &[ParticipantName],
) -> Result<(), ExchangeError> {
    let expected: HashSet<&str> = participants.iter().map(String::as_str).collect();

    if assignment.len() != participants.len() {
        return Err(ExchangeError::InvalidAssignment {
            reason: format!(
                "expected {} pairs, found {}",
                participants.len(),
                assignment.len()
            ),
        });
    }

    let mut givers = HashSet::with_capacity(assignment.len());
    let mut receivers = HashSet::with_capacity(assignment.len());

    for pair in assignment {
        if !expected.contains(pair.giver.as_str()) || !givers.insert(pair.giver.as_str()) {
            return Err(ExchangeError::InvalidAssignment {
                reason: format!("{} is not a giver exactly once", pair.giver),
            });
        }
        if !expected.contains(pair.receiver.as_str()) || !receivers.insert(pair.receiver.as_str())
        {
            return Err(ExchangeError::InvalidAssignment {
                reason: format!("{} is not a receiver exactly once", pair.receiver),
            });
        }
        if pair.is_self_pair() {
            return Err(ExchangeError::InvalidAssignment {
                reason: format!("participant {} cannot gift themselves", pair.giver),
            });
        }
    }

    Ok(())
}

/// Pairs of the assignment that the constraint set forbids
pub fn constraint_violations<'a>(
    assignment: &'a Assignment,
    constraints: &ConstraintSet,
) -> Vec<&'a Pair> {
    assignment
        .iter()
        .filter(|pair| constraints.forbids(&pair.giver, &pair.receiver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participants() -> Vec<ParticipantName> {
        vec!["Alice".into(), "Bob".into(), "Charlie".into()]
    }

    fn cycle() -> Assignment {
        Assignment::new(vec![
            Pair::new("Alice", "Bob"),
            Pair::new("Bob", "Charlie"),
            Pair::new("Charlie", "Alice"),
        ])
    }

    #[test]
    fn test_valid_cycle_passes() {
        assert!(verify_assignment(&cycle(), &participants(), &ConstraintSet::new()).is_ok());
    }

    #[test]
    fn test_self_match_rejected() {
        let assignment = Assignment::new(vec![
            Pair::new("Alice", "Alice"),
            Pair::new("Bob", "Charlie"),
            Pair::new("Charlie", "Bob"),
        ]);
        let err = verify_permutation(&assignment, &participants()).unwrap_err();
        assert!(err.to_string().contains("cannot gift themselves"));
    }

    #[test]
    fn test_duplicate_receiver_rejected() {
        let assignment = Assignment::new(vec![
            Pair::new("Alice", "Bob"),
            Pair::new("Bob", "Alice"),
            Pair::new("Charlie", "Alice"),
        ]);
        let err = verify_permutation(&assignment, &participants()).unwrap_err();
        assert!(err.to_string().contains("Alice is not a receiver exactly once"));
    }

    #[test]
    fn test_missing_giver_rejected() {
        let assignment = Assignment::new(vec![Pair::new("Alice", "Bob"), Pair::new("Bob", "Alice")]);
        assert!(verify_permutation(&assignment, &participants()).is_err());
    }

    #[test]
    fn test_constraint_violation_reported() {
        let constraints: ConstraintSet = [("Bob", "Charlie")].into_iter().collect();
        let err = verify_assignment(&cycle(), &participants(), &constraints).unwrap_err();
        assert_eq!(
            err,
            ExchangeError::InvalidAssignment {
                reason: "constraint violated - Bob cannot gift to Charlie".to_string()
            }
        );

        let assignment = cycle();
        let violations = constraint_violations(&assignment, &constraints);
        assert_eq!(violations, vec![&Pair::new("Bob", "Charlie")]);
    }
}
