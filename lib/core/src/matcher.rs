use crate::embedding::Embedding;
use crate::error::{Error, Result};
use crate::record::PersonRecord;

/// Default distance threshold, tuned to the embedding space of the
/// extraction model. Lower values are stricter.
pub const DEFAULT_THRESHOLD: f32 = 0.6;

/// Euclidean distance between two embeddings.
#[inline]
#[must_use]
pub fn distance(a: &Embedding, b: &Embedding) -> f32 {
    a.euclidean_distance(b)
}

/// Whether two embeddings belong to the same person under `threshold`.
///
/// A distance exactly equal to the threshold counts as a match.
#[inline]
#[must_use]
pub fn is_same_person(a: &Embedding, b: &Embedding, threshold: f32) -> bool {
    distance(a, b) <= threshold
}

/// Outcome of a one-to-many identification.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matched: bool,
    pub record: Option<PersonRecord>,
    pub distance: Option<f32>,
}

impl MatchOutcome {
    fn hit(record: PersonRecord, distance: f32) -> Self {
        Self {
            matched: true,
            record: Some(record),
            distance: Some(distance),
        }
    }

    fn miss() -> Self {
        Self {
            matched: false,
            record: None,
            distance: None,
        }
    }
}

/// Scan `records` in insertion order and return the first one within
/// `threshold` of `probe`.
///
/// The scan stops at the first qualifying record rather than searching for
/// the globally closest one, so with a lenient threshold an earlier weak
/// match shadows a later exact one. An empty registry is an error, so
/// callers can report "nothing enrolled" instead of "no match".
pub fn identify(
    probe: &Embedding,
    records: &[PersonRecord],
    threshold: f32,
) -> Result<MatchOutcome> {
    if records.is_empty() {
        return Err(Error::EmptyRegistry);
    }

    for record in records {
        let d = distance(probe, &record.embedding);
        if d <= threshold {
            return Ok(MatchOutcome::hit(record.clone(), d));
        }
    }

    Ok(MatchOutcome::miss())
}
