use std::sync::Arc;

use crate::embedding::Embedding;
use crate::error::{Error, Result};
use crate::extractor::{FaceExtractor, FaceImage};
use crate::matcher::{self, MatchOutcome};
use crate::record::{PersonRecord, RecordId};
use crate::registry::Registry;

/// One entry of a batch registration: identity fields plus the decoded
/// image the embedding is extracted from.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub name: String,
    pub external_id: String,
    pub image: FaceImage,
}

/// Orchestrates the extractor, registry and matching engine behind the
/// boundary layer's operations.
pub struct RecognitionService {
    registry: Arc<dyn Registry>,
    extractor: Arc<dyn FaceExtractor>,
    threshold: f32,
}

impl RecognitionService {
    #[must_use]
    pub fn new(
        registry: Arc<dyn Registry>,
        extractor: Arc<dyn FaceExtractor>,
        threshold: f32,
    ) -> Self {
        Self {
            registry,
            extractor,
            threshold,
        }
    }

    #[inline]
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Append a single pre-extracted embedding to the registry.
    pub fn register(&self, name: &str, external_id: &str, embedding: Embedding) -> Result<RecordId> {
        self.registry.register(name, external_id, embedding)
    }

    /// Extract an embedding from `image` and register it.
    pub async fn enroll(&self, name: &str, external_id: &str, image: &FaceImage) -> Result<RecordId> {
        let embedding = self.extractor.extract(image).await?;
        self.registry.register(name, external_id, embedding)
    }

    /// Register a batch of entries in order.
    ///
    /// The first entry whose extraction or registration fails aborts the
    /// batch: earlier entries stay committed, later entries are never
    /// attempted, and the error names the failing entry.
    pub async fn register_batch(&self, entries: &[BatchEntry]) -> Result<Vec<RecordId>> {
        let mut registered = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match self.enroll(&entry.name, &entry.external_id, &entry.image).await {
                Ok(id) => registered.push(id),
                Err(source) => {
                    return Err(Error::BatchAborted {
                        index,
                        name: entry.name.clone(),
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(registered)
    }

    /// Find the first enrolled record within the threshold of `probe`.
    ///
    /// Runs against a snapshot of the registry, so records registered
    /// concurrently may or may not be considered.
    pub fn identify(&self, probe: &Embedding) -> Result<MatchOutcome> {
        let records = self.registry.list_all()?;
        matcher::identify(probe, &records, self.threshold)
    }

    /// Extract an embedding from `image` and identify it.
    pub async fn identify_image(&self, image: &FaceImage) -> Result<MatchOutcome> {
        let probe = self.extractor.extract(image).await?;
        self.identify(&probe)
    }

    /// Whether two embeddings belong to the same person.
    #[must_use]
    pub fn compare(&self, a: &Embedding, b: &Embedding) -> bool {
        matcher::is_same_person(a, b, self.threshold)
    }

    /// Extract embeddings from both images and compare them. Fails as a
    /// whole when either extraction fails.
    pub async fn compare_images(&self, a: &FaceImage, b: &FaceImage) -> Result<bool> {
        let embedding_a = self.extractor.extract(a).await?;
        let embedding_b = self.extractor.extract(b).await?;
        Ok(self.compare(&embedding_a, &embedding_b))
    }

    /// Snapshot of all enrolled records in insertion order.
    pub fn enrolled(&self) -> Result<Vec<PersonRecord>> {
        self.registry.list_all()
    }

    /// Number of enrolled records.
    pub fn count(&self) -> Result<usize> {
        self.registry.count()
    }
}
