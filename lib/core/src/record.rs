use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;

/// Identifier assigned to a record at registration time.
///
/// Ids are sequence numbers within a single registry: they reflect
/// insertion order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An enrolled person: identity fields plus the embedding captured at
/// registration time.
///
/// Records are immutable after creation and nothing deduplicates the
/// `(name, external_id)` pair, so the same person may be enrolled more
/// than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub external_id: String,
    pub embedding: Embedding,
    pub created_at: DateTime<Utc>,
}

impl PersonRecord {
    #[must_use]
    pub fn new(name: &str, external_id: &str, embedding: Embedding) -> Self {
        Self {
            name: name.to_string(),
            external_id: external_id.to_string(),
            embedding,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_timestamped() {
        let before = Utc::now();
        let record = PersonRecord::new("Alice", "40123", Embedding::new(vec![0.0; 4]));
        let after = Utc::now();

        assert_eq!(record.name, "Alice");
        assert_eq!(record.external_id, "40123");
        assert!(record.created_at >= before && record.created_at <= after);
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId(7).to_string(), "7");
    }

    #[test]
    fn test_record_ids_order_by_sequence() {
        assert!(RecordId(0) < RecordId(1));
        assert!(RecordId(9) < RecordId(10));
    }
}
