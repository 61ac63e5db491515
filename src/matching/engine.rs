//! Randomized gift assignment
//!
//! The search draws uniformly random permutations of the participants and
//! keeps the first one with no self-gifting and no forbidden pair. When the
//! attempt budget runs out it falls back to rotating the participant list by
//! one position, which never self-matches for two or more participants but
//! may break constraints. That fallback is reported as `MatchOutcome::Degraded`.

use super::constraints::ConstraintSet;
use super::verify::{verify_assignment, verify_permutation};
use crate::error::ExchangeError;
use crate::types::{Assignment, MatchOutcome, Pair, ParticipantName};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::borrow::Cow;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Default number of random permutations tried before falling back
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Configuration for the randomized matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Number of random permutations tried before using the rotation fallback
    pub max_attempts: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl MatcherConfig {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> Result<(), ExchangeError> {
        if self.max_attempts == 0 {
            return Err(ExchangeError::ConfigurationError {
                message: "max_attempts must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Trait for gift assignment algorithms
pub trait GiftMatcher: Send + Sync {
    /// Assign every participant exactly one receiver
    ///
    /// Fails only with `InsufficientParticipants`. Names are identities: a
    /// repeated name is one participant, so fewer than two distinct names is
    /// insufficient. Constraints that name an unknown participant, or forbid
    /// someone from gifting themselves, are ignored.
    fn assign(
        &self,
        participants: &[ParticipantName],
        constraints: &ConstraintSet,
        rng: &mut dyn RngCore,
    ) -> Result<MatchOutcome, ExchangeError>;
}

/// Rejection sampling over random permutations with a rotation fallback
#[derive(Debug, Clone, Default)]
pub struct RandomRestartMatcher {
    config: MatcherConfig,
}

impl RandomRestartMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self, ExchangeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }
}

impl GiftMatcher for RandomRestartMatcher {
    fn assign(
        &self,
        participants: &[ParticipantName],
        constraints: &ConstraintSet,
        rng: &mut dyn RngCore,
    ) -> Result<MatchOutcome, ExchangeError> {
        let participants = distinct_participants(participants);
        let participants: &[ParticipantName] = &participants;
        let n = participants.len();
        if n < 2 {
            return Err(ExchangeError::InsufficientParticipants { count: n });
        }

        let (constraints, ignored) = constraints.restricted_to(participants);
        if ignored > 0 {
            debug!(
                ignored,
                "Ignoring constraints on unknown participants or self-pairs"
            );
        }

        let mut receivers: Vec<&ParticipantName> = participants.iter().collect();

        for attempt in 1..=self.config.max_attempts {
            receivers.shuffle(&mut *rng);

            if is_acceptable(participants, &receivers, &constraints) {
                let assignment = pair_up(participants, receivers.iter().copied());
                debug_assert!(verify_assignment(&assignment, participants, &constraints).is_ok());

                debug!(
                    participants = n,
                    constraints = constraints.len(),
                    attempt,
                    "Found constraint-satisfying assignment"
                );
                return Ok(MatchOutcome::Success {
                    assignment,
                    attempts: attempt,
                });
            }
        }

        let assignment = rotation(participants);
        debug_assert!(verify_permutation(&assignment, participants).is_ok());

        warn!(
            participants = n,
            constraints = constraints.len(),
            attempts = self.config.max_attempts,
            "Attempt budget exhausted, using rotation fallback"
        );
        Ok(MatchOutcome::Degraded {
            assignment,
            attempts: self.config.max_attempts,
        })
    }
}

/// Participants with repeated names collapsed to their first occurrence
pub(crate) fn distinct_participants(
    participants: &[ParticipantName],
) -> Cow<'_, [ParticipantName]> {
    let mut seen = HashSet::with_capacity(participants.len());
    if participants.iter().all(|name| seen.insert(name.as_str())) {
        return Cow::Borrowed(participants);
    }

    seen.clear();
    let unique: Vec<ParticipantName> = participants
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect();
    debug!(
        duplicates = participants.len() - unique.len(),
        "Ignoring repeated participant names"
    );
    Cow::Owned(unique)
}

fn is_acceptable(
    givers: &[ParticipantName],
    receivers: &[&ParticipantName],
    constraints: &ConstraintSet,
) -> bool {
    givers
        .iter()
        .zip(receivers)
        .all(|(giver, receiver)| giver != *receiver && !constraints.forbids(giver, receiver))
}

fn pair_up<'a>(
    givers: &[ParticipantName],
    receivers: impl Iterator<Item = &'a ParticipantName>,
) -> Assignment {
    Assignment::new(
        givers
            .iter()
            .zip(receivers)
            .map(|(giver, receiver)| Pair::new(giver.clone(), receiver.clone()))
            .collect(),
    )
}

/// Participant `i` gifts participant `(i + 1) mod n`
fn rotation(participants: &[ParticipantName]) -> Assignment {
    pair_up(
        participants,
        participants.iter().cycle().skip(1).take(participants.len()),
    )
}
