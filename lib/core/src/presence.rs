use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::extractor::{FaceExtractor, FaceImage};
use crate::matcher;

/// Result code of a presence verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceCode {
    Authenticated,
    NotAuthenticated,
}

impl PresenceCode {
    /// Numeric wire code: 0 means authenticated, 1 means not.
    #[inline]
    #[must_use]
    pub fn as_code(self) -> u8 {
        match self {
            PresenceCode::Authenticated => 0,
            PresenceCode::NotAuthenticated => 1,
        }
    }

    /// Human-readable message paired with the code.
    #[inline]
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            PresenceCode::Authenticated => "authenticated",
            PresenceCode::NotAuthenticated => "not authenticated",
        }
    }
}

/// Outcome of a presence verification, including how long the whole
/// extract-and-compare sequence took.
#[derive(Debug, Clone)]
pub struct PresenceReport {
    pub code: PresenceCode,
    pub elapsed: Duration,
}

impl PresenceReport {
    #[inline]
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.code == PresenceCode::Authenticated
    }
}

/// Verifies that two images show the same person.
pub struct PresenceVerifier {
    extractor: Arc<dyn FaceExtractor>,
    threshold: f32,
}

impl PresenceVerifier {
    #[must_use]
    pub fn new(extractor: Arc<dyn FaceExtractor>, threshold: f32) -> Self {
        Self {
            extractor,
            threshold,
        }
    }

    /// Extract an embedding from each image and compare them.
    ///
    /// Fails as a whole when either extraction fails; there is no
    /// one-sided report. Elapsed time covers both extractions and the
    /// comparison, measured on a monotonic clock.
    pub async fn verify(&self, subject: &FaceImage, reference: &FaceImage) -> Result<PresenceReport> {
        let started = Instant::now();

        let subject_embedding = self.extractor.extract(subject).await?;
        let reference_embedding = self.extractor.extract(reference).await?;

        let code = if matcher::is_same_person(&subject_embedding, &reference_embedding, self.threshold)
        {
            PresenceCode::Authenticated
        } else {
            PresenceCode::NotAuthenticated
        };

        Ok(PresenceReport {
            code,
            elapsed: started.elapsed(),
        })
    }
}
