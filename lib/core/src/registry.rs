use parking_lot::RwLock;

use crate::embedding::Embedding;
use crate::error::{Error, Result};
use crate::record::{PersonRecord, RecordId};

/// Append-only store of enrolled person records.
///
/// Implementations are shared across request handlers behind an
/// `Arc<dyn Registry>`. Appends must be atomic with respect to each other,
/// ids must reflect commit order, and reads must only ever observe fully
/// committed records.
pub trait Registry: Send + Sync {
    /// Append a new record and return its id.
    ///
    /// Duplicate `(name, external_id)` pairs are allowed; every call
    /// produces a new record. Fails with [`Error::MalformedEmbedding`] when
    /// the embedding length does not match [`Registry::dimension`].
    fn register(&self, name: &str, external_id: &str, embedding: Embedding) -> Result<RecordId>;

    /// Snapshot of all records in insertion order.
    ///
    /// Appends committed after the snapshot was taken do not show up in it.
    fn list_all(&self) -> Result<Vec<PersonRecord>>;

    /// Number of enrolled records.
    fn count(&self) -> Result<usize>;

    /// Embedding length this registry accepts.
    fn dimension(&self) -> usize;
}

/// Volatile registry backed by a vector of records.
///
/// This is the default backend: contents are lost on restart.
pub struct InMemoryRegistry {
    dimension: usize,
    records: RwLock<Vec<PersonRecord>>,
}

impl InMemoryRegistry {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: RwLock::new(Vec::new()),
        }
    }
}

impl Registry for InMemoryRegistry {
    fn register(&self, name: &str, external_id: &str, embedding: Embedding) -> Result<RecordId> {
        if embedding.dim() != self.dimension {
            return Err(Error::MalformedEmbedding {
                expected: self.dimension,
                actual: embedding.dim(),
            });
        }

        let record = PersonRecord::new(name, external_id, embedding);
        let mut records = self.records.write();
        records.push(record);
        Ok(RecordId(records.len() as u64 - 1))
    }

    fn list_all(&self) -> Result<Vec<PersonRecord>> {
        Ok(self.records.read().clone())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
