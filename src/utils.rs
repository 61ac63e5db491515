//! Utility functions for the gift exchange

use crate::error::ExchangeError;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Default length of participant codes
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Generate a new unique exchange ID
pub fn generate_exchange_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Key used for case-insensitive name and identifier comparisons
pub fn normalise_name(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Generate a random uppercase code participants use to identify themselves
pub fn generate_participant_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.gen_range(b'A'..=b'Z')))
        .collect()
}

/// Number of distinct codes of the given length, saturating at `usize::MAX`
pub fn participant_code_capacity(length: usize) -> usize {
    u32::try_from(length)
        .ok()
        .and_then(|length| 26usize.checked_pow(length))
        .unwrap_or(usize::MAX)
}

/// Generate `count` codes that are distinct within one exchange
pub fn generate_participant_codes<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    length: usize,
) -> Result<Vec<String>, ExchangeError> {
    let max = participant_code_capacity(length);
    if count > max {
        return Err(ExchangeError::TooManyParticipants {
            count,
            max,
            code_length: length,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    let mut codes = Vec::with_capacity(count);
    while codes.len() < count {
        let code = generate_participant_code(&mut *rng, length);
        if seen.insert(code.clone()) {
            codes.push(code);
        }
    }

    Ok(codes)
}
