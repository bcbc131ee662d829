use std::time::Duration;

use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use facematch_core::{Embedding, Error, FaceExtractor, FaceImage, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ExtractionResponse {
    embedding: Vec<f32>,
}

/// Client for a face-embedding inference service.
///
/// The service takes a PNG-encoded image and answers with the embedding of
/// the first face it detects: `{"embedding": [...]}` on success, HTTP 422
/// when the image contains no face.
pub struct RemoteExtractor {
    client: Client,
    base_url: String,
    dimension: usize,
    timeout: Duration,
}

impl RemoteExtractor {
    #[must_use]
    pub fn new(base_url: &str, dimension: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            dimension,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the default per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl FaceExtractor for RemoteExtractor {
    async fn extract(&self, image: &FaceImage) -> Result<Embedding> {
        let body = encode_png(image)?;
        let url = format!("{}/embeddings", self.base_url);

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "image/png")
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::ExtractorUnavailable(e.to_string()))?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::UNPROCESSABLE_ENTITY => return Err(Error::NoFaceDetected),
            status => {
                let text = resp.text().await.unwrap_or_default();
                return Err(Error::ExtractorUnavailable(format!("HTTP {status}: {text}")));
            }
        }

        let parsed: ExtractionResponse = resp
            .json()
            .await
            .map_err(|e| Error::ExtractorUnavailable(e.to_string()))?;

        if parsed.embedding.len() != self.dimension {
            return Err(Error::MalformedEmbedding {
                expected: self.dimension,
                actual: parsed.embedding.len(),
            });
        }

        Ok(Embedding::new(parsed.embedding))
    }

    fn embedding_dim(&self) -> usize {
        self.dimension
    }
}

/// PNG-encode a pixel buffer for the wire.
fn encode_png(image: &FaceImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(
            image.pixels(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| Error::ExtractorUnavailable(format!("failed to encode image: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let pixels = vec![
            255, 0, 0, 0, 255, 0, //
            0, 0, 255, 10, 20, 30,
        ];
        let face = FaceImage::from_raw(2, 2, pixels.clone()).unwrap();

        let png = encode_png(&face).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let extractor = RemoteExtractor::new("http://localhost:8191/", 128);
        assert_eq!(extractor.base_url, "http://localhost:8191");
        assert_eq!(extractor.embedding_dim(), 128);
    }

    #[tokio::test]
    async fn test_unreachable_service_reports_extractor_unavailable() {
        // Nothing listens on this port; the connection itself fails.
        let extractor = RemoteExtractor::new("http://127.0.0.1:1", 128)
            .with_timeout(Duration::from_millis(250));
        let face = FaceImage::from_raw(1, 1, vec![0, 0, 0]).unwrap();

        let err = extractor.extract(&face).await.unwrap_err();
        assert!(matches!(err, Error::ExtractorUnavailable(_)));
    }
}
