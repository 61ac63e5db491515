//! Group request validation
//!
//! Requests arrive with free-form names. Validation trims them, rejects
//! duplicates and malformed forbidden pairs, and resolves every pair to the
//! participant spelling used in the request so the case-sensitive matcher sees
//! consistent identities.

use crate::config::ExchangeSettings;
use crate::error::ExchangeError;
use crate::identifier::validate_identifier;
use crate::matching::ConstraintSet;
use crate::types::{Pair, ParticipantName};
use crate::utils::{normalise_name, participant_code_capacity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A forbidden giver → receiver pair as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllegalPair {
    pub giver: String,
    pub receiver: String,
}

impl IllegalPair {
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

/// Request to create a new exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRequest {
    pub identifier: String,
    pub participants: Vec<String>,
    #[serde(default, alias = "illegalPairs")]
    pub illegal_pairs: Vec<IllegalPair>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A request that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedGroup {
    pub identifier: String,
    pub participants: Vec<ParticipantName>,
    pub constraints: ConstraintSet,
    pub description: Option<String>,
}

impl GroupRequest {
    /// Validate the request and resolve its forbidden pairs
    pub fn validate(&self, settings: &ExchangeSettings) -> Result<ValidatedGroup, ExchangeError> {
        let identifier = self.validate_identifier(settings)?;
        let participants = self.validate_participants(settings)?;
        let constraints = self.resolve_illegal_pairs(&participants)?;
        let description = self.validate_description(settings)?;

        Ok(ValidatedGroup {
            identifier,
            participants,
            constraints,
            description,
        })
    }

    fn validate_identifier(&self, settings: &ExchangeSettings) -> Result<String, ExchangeError> {
        let identifier = self.identifier.trim();
        let length = identifier.chars().count();

        if length < settings.min_identifier_length || length > settings.max_identifier_length {
            return Err(ExchangeError::InvalidIdentifier {
                identifier: identifier.to_string(),
                reason: format!(
                    "must be between {} and {} characters",
                    settings.min_identifier_length, settings.max_identifier_length
                ),
            });
        }
        validate_identifier(identifier)?;

        Ok(identifier.to_string())
    }

    fn validate_participants(
        &self,
        settings: &ExchangeSettings,
    ) -> Result<Vec<ParticipantName>, ExchangeError> {
        if self.participants.len() < 2 {
            return Err(ExchangeError::InsufficientParticipants {
                count: self.participants.len(),
            });
        }

        let max = participant_code_capacity(settings.code_length);
        if self.participants.len() > max {
            return Err(ExchangeError::TooManyParticipants {
                count: self.participants.len(),
                max,
                code_length: settings.code_length,
            });
        }

        let mut seen = HashSet::with_capacity(self.participants.len());
        let mut names = Vec::with_capacity(self.participants.len());

        for raw in &self.participants {
            let name = raw.trim();
            if name.is_empty() {
                return Err(ExchangeError::EmptyParticipantName);
            }
            if !seen.insert(normalise_name(name)) {
                return Err(ExchangeError::DuplicateParticipant {
                    name: name.to_string(),
                });
            }
            names.push(name.to_string());
        }

        Ok(names)
    }

    fn resolve_illegal_pairs(
        &self,
        participants: &[ParticipantName],
    ) -> Result<ConstraintSet, ExchangeError> {
        let by_key: HashMap<String, &ParticipantName> = participants
            .iter()
            .map(|name| (normalise_name(name), name))
            .collect();

        let mut constraints = ConstraintSet::new();
        for pair in &self.illegal_pairs {
            let giver_key = normalise_name(&pair.giver);
            let receiver_key = normalise_name(&pair.receiver);

            if giver_key.is_empty() || receiver_key.is_empty() {
                return Err(ExchangeError::EmptyParticipantName);
            }
            if giver_key == receiver_key {
                return Err(ExchangeError::SelfExclusion {
                    name: pair.giver.trim().to_string(),
                });
            }

            match (by_key.get(&giver_key), by_key.get(&receiver_key)) {
                (Some(giver), Some(receiver)) => {
                    constraints.insert(Pair::new(giver.as_str(), receiver.as_str()));
                }
                _ => {
                    return Err(ExchangeError::UnknownParticipant {
                        giver: pair.giver.trim().to_string(),
                        receiver: pair.receiver.trim().to_string(),
                    });
                }
            }
        }

        Ok(constraints)
    }

    fn validate_description(
        &self,
        settings: &ExchangeSettings,
    ) -> Result<Option<String>, ExchangeError> {
        let Some(description) = self.description.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if description.is_empty() {
            return Ok(None);
        }
        if description.chars().count() > settings.max_description_length {
            return Err(ExchangeError::InvalidDescription {
                reason: format!(
                    "must be at most {} characters",
                    settings.max_description_length
                ),
            });
        }
        Ok(Some(description.to_string()))
    }
}
