use async_trait::async_trait;

use crate::embedding::Embedding;
use crate::error::Result;

/// A decoded image as tightly packed 8-bit RGB pixels, row-major.
///
/// The buffer invariant `pixels.len() == width * height * 3` is enforced at
/// construction, so downstream code never has to re-check it.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FaceImage {
    /// Build an image from raw RGB pixels, or `None` when the buffer does
    /// not match the dimensions.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        let expected = u64::from(width) * u64::from(height) * 3;
        if pixels.len() as u64 != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Produces a fixed-length embedding for the first face found in an image.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait FaceExtractor: Send + Sync {
    /// Embedding of the first face in `image`.
    ///
    /// Fails with [`Error::NoFaceDetected`](crate::Error::NoFaceDetected)
    /// when the model reports zero faces.
    async fn extract(&self, image: &FaceImage) -> Result<Embedding>;

    /// Length of the embeddings this extractor produces.
    fn embedding_dim(&self) -> usize;
}
