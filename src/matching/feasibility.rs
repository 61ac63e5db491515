//! Feasibility pre-check for constrained exchanges
//!
//! The matcher only ever searches for a bounded number of attempts and then
//! falls back to a rotation. Callers that would rather refuse an impossible
//! exchange up front can ask here first: an assignment exists exactly when the
//! bipartite graph of allowed giver → receiver edges has a perfect matching.

use super::constraints::ConstraintSet;
use super::engine::distinct_participants;
use crate::error::ExchangeError;
use crate::types::ParticipantName;

/// Result of a feasibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    /// At least one constraint-respecting derangement exists
    Feasible,
    /// No valid assignment exists; `unmatched` could not be given a receiver
    Infeasible { unmatched: ParticipantName },
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Decide whether any valid assignment exists (augmenting path search)
pub fn check_feasibility(
    participants: &[ParticipantName],
    constraints: &ConstraintSet,
) -> Result<Feasibility, ExchangeError> {
    let participants = distinct_participants(participants);
    let participants: &[ParticipantName] = &participants;
    let n = participants.len();
    if n < 2 {
        return Err(ExchangeError::InsufficientParticipants { count: n });
    }

    let allowed: Vec<Vec<usize>> = participants
        .iter()
        .enumerate()
        .map(|(giver_idx, giver)| {
            participants
                .iter()
                .enumerate()
                .filter(|(receiver_idx, receiver)| {
                    *receiver_idx != giver_idx && !constraints.forbids(giver, receiver)
                })
                .map(|(receiver_idx, _)| receiver_idx)
                .collect()
        })
        .collect();

    let mut giver_of: Vec<Option<usize>> = vec![None; n];

    for giver in 0..n {
        let mut visited = vec![false; n];
        if !augment(giver, &allowed, &mut giver_of, &mut visited) {
            return Ok(Feasibility::Infeasible {
                unmatched: participants[giver].clone(),
            });
        }
    }

    Ok(Feasibility::Feasible)
}

/// One giver on the current augmenting path and the next edge it will try
struct Frame {
    giver: usize,
    next: usize,
}

/// Find an augmenting path from `root`, flipping it into `giver_of` on success
///
/// The path can be as long as the group, so the search keeps its own stack
/// instead of recursing.
fn augment(
    root: usize,
    allowed: &[Vec<usize>],
    giver_of: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    let mut stack = vec![Frame {
        giver: root,
        next: 0,
    }];
    // path[i] is the receiver stack[i] is trying to take
    let mut path: Vec<usize> = Vec::new();

    while let Some(frame) = stack.last_mut() {
        let edges = &allowed[frame.giver];
        if frame.next == edges.len() {
            stack.pop();
            path.pop();
            continue;
        }

        let receiver = edges[frame.next];
        frame.next += 1;
        if visited[receiver] {
            continue;
        }
        visited[receiver] = true;
        path.push(receiver);

        match giver_of[receiver] {
            Some(current) => stack.push(Frame {
                giver: current,
                next: 0,
            }),
            None => {
                for (frame, &receiver) in stack.iter().zip(&path) {
                    giver_of[receiver] = Some(frame.giver);
                }
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<ParticipantName> {
        (0..count).map(|i| format!("P{}", i)).collect()
    }

    #[test]
    fn test_unconstrained_groups_are_feasible() {
        for count in 2..8 {
            assert_eq!(
                check_feasibility(&names(count), &ConstraintSet::new()).unwrap(),
                Feasibility::Feasible
            );
        }
    }

    #[test]
    fn test_blocked_pair_of_two_is_infeasible() {
        let participants = vec!["Alice".to_string(), "Bob".to_string()];
        let constraints: ConstraintSet = [("Alice", "Bob")].into_iter().collect();

        let result = check_feasibility(&participants, &constraints).unwrap();
        assert_eq!(
            result,
            Feasibility::Infeasible {
                unmatched: "Alice".to_string()
            }
        );
    }

    #[test]
    fn test_participant_forbidden_from_everyone() {
        let participants = vec!["P0".to_string(), "P1".to_string(), "P2".to_string()];
        let constraints: ConstraintSet = [("P0", "P1"), ("P0", "P2")].into_iter().collect();

        let result = check_feasibility(&participants, &constraints).unwrap();
        assert!(!result.is_feasible());
    }

    #[test]
    fn test_receiver_nobody_may_gift_is_infeasible() {
        let participants = names(4);
        let constraints: ConstraintSet = [("P0", "P3"), ("P1", "P3"), ("P2", "P3")]
            .into_iter()
            .collect();

        assert!(!check_feasibility(&participants, &constraints)
            .unwrap()
            .is_feasible());
    }

    #[test]
    fn test_dense_but_solvable_constraints() {
        // Only the cycle P0→P1→P2→P3→P0 survives
        let participants = names(4);
        let constraints: ConstraintSet = [
            ("P0", "P2"),
            ("P0", "P3"),
            ("P1", "P0"),
            ("P1", "P3"),
            ("P2", "P0"),
            ("P2", "P1"),
            ("P3", "P1"),
            ("P3", "P2"),
        ]
        .into_iter()
        .collect();

        assert!(check_feasibility(&participants, &constraints)
            .unwrap()
            .is_feasible());
    }

    #[test]
    fn test_long_augmenting_chain() {
        // Giver i may take i+1 or i+2; the last giver may only take P1, which
        // forces every earlier giver to shift along by one
        let n = 60;
        let participants = names(n);
        let allowed = |giver: usize, receiver: usize| {
            if giver == n - 1 {
                receiver == 1
            } else {
                receiver == (giver + 1) % n || receiver == (giver + 2) % n
            }
        };
        let constraints: ConstraintSet = (0..n)
            .flat_map(|g| (0..n).map(move |r| (g, r)))
            .filter(|&(g, r)| g != r && !allowed(g, r))
            .map(|(g, r)| (participants[g].clone(), participants[r].clone()))
            .collect();

        assert!(check_feasibility(&participants, &constraints)
            .unwrap()
            .is_feasible());
    }

    #[test]
    fn test_repeated_names_count_once() {
        let participants = vec!["Alice".to_string(), "Alice".to_string()];
        assert_eq!(
            check_feasibility(&participants, &ConstraintSet::new()),
            Err(ExchangeError::InsufficientParticipants { count: 1 })
        );
    }

    #[test]
    fn test_too_few_participants() {
        assert_eq!(
            check_feasibility(&names(1), &ConstraintSet::new()),
            Err(ExchangeError::InsufficientParticipants { count: 1 })
        );
    }
}
