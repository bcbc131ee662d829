use serde::{Deserialize, Serialize};

/// A fixed-length face embedding produced by the extraction model.
///
/// Embeddings are immutable once produced. Two embeddings are only
/// comparable when they have the same length; the matching engine treats a
/// length mismatch as an integration bug, not a recoverable condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Number of components in the embedding.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Euclidean (L2) distance to another embedding.
    ///
    /// Identical embeddings are at distance zero and the measure is
    /// symmetric. Panics when the embeddings have different lengths.
    #[inline]
    #[must_use]
    pub fn euclidean_distance(&self, other: &Embedding) -> f32 {
        assert_eq!(
            self.dim(),
            other.dim(),
            "embeddings of different lengths are not comparable"
        );
        l2_distance_scalar(&self.data, &other.data)
    }
}

/// Scalar L2 distance with two accumulators for better pipelining.
#[inline]
fn l2_distance_scalar(a: &[f32], b: &[f32]) -> f32 {
    let mut sum0 = 0.0f32;
    let mut sum1 = 0.0f32;

    // Process 8 elements at a time with two accumulators
    let chunks = a.chunks_exact(8);
    let remainder = chunks.remainder();
    let b_chunks = b.chunks_exact(8);

    for (a_chunk, b_chunk) in chunks.zip(b_chunks) {
        let d0 = a_chunk[0] - b_chunk[0];
        let d1 = a_chunk[1] - b_chunk[1];
        let d2 = a_chunk[2] - b_chunk[2];
        let d3 = a_chunk[3] - b_chunk[3];
        sum0 += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;

        let d4 = a_chunk[4] - b_chunk[4];
        let d5 = a_chunk[5] - b_chunk[5];
        let d6 = a_chunk[6] - b_chunk[6];
        let d7 = a_chunk[7] - b_chunk[7];
        sum1 += d4 * d4 + d5 * d5 + d6 * d6 + d7 * d7;
    }

    // Handle remainder
    for i in (a.len() - remainder.len())..a.len() {
        let d = a[i] - b[i];
        sum0 += d * d;
    }

    (sum0 + sum1).sqrt()
}
