//! Stored exchanges and participant lookups

use crate::error::ExchangeError;
use crate::types::{Assignment, ExchangeId, ParticipantName};
use crate::utils::normalise_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A participant of a stored exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    pub name: ParticipantName,
    /// Code the participant uses to look up their recipient
    pub code: String,
}

/// A completed exchange with its assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: ExchangeId,
    pub identifier: String,
    pub description: Option<String>,
    pub participants: Vec<ParticipantRecord>,
    pub assignment: Assignment,
    /// Whether the assignment came from the rotation fallback
    pub degraded: bool,
    pub constraint_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Answer to "whom does this participant gift?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub identifier: String,
    pub participant_name: ParticipantName,
    pub recipient_name: ParticipantName,
}

/// Public view of an exchange without the assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSummary {
    pub identifier: String,
    pub participant_count: usize,
    pub illegal_pair_count: usize,
    pub degraded: bool,
}

impl Exchange {
    /// Find a participant by name, ignoring case and surrounding whitespace
    pub fn participant(&self, name: &str) -> Option<&ParticipantRecord> {
        let key = normalise_name(name);
        self.participants
            .iter()
            .find(|participant| normalise_name(&participant.name) == key)
    }

    /// Find a participant by their code
    pub fn participant_by_code(&self, code: &str) -> Option<&ParticipantRecord> {
        let code = code.trim();
        self.participants
            .iter()
            .find(|participant| participant.code.eq_ignore_ascii_case(code))
    }

    /// Reveal the recipient of the named participant
    pub fn reveal(&self, name: &str) -> Result<Reveal, ExchangeError> {
        let participant = self
            .participant(name)
            .ok_or_else(|| ExchangeError::ParticipantNotFound {
                name: name.trim().to_string(),
            })?;
        self.reveal_for(participant)
    }

    /// Reveal the recipient of the participant holding `code`
    pub fn reveal_by_code(&self, code: &str) -> Result<Reveal, ExchangeError> {
        let participant =
            self.participant_by_code(code)
                .ok_or_else(|| ExchangeError::ParticipantNotFound {
                    name: code.trim().to_string(),
                })?;
        self.reveal_for(participant)
    }

    fn reveal_for(&self, participant: &ParticipantRecord) -> Result<Reveal, ExchangeError> {
        let recipient = self.assignment.receiver_of(&participant.name).ok_or_else(|| {
            ExchangeError::InternalError {
                message: format!("no assignment stored for {}", participant.name),
            }
        })?;

        Ok(Reveal {
            identifier: self.identifier.clone(),
            participant_name: participant.name.clone(),
            recipient_name: recipient.to_string(),
        })
    }

    pub fn summary(&self) -> ExchangeSummary {
        ExchangeSummary {
            identifier: self.identifier.clone(),
            participant_count: self.participants.len(),
            illegal_pair_count: self.constraint_count,
            degraded: self.degraded,
        }
    }
}
