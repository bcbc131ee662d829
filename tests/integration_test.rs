// Integration tests for facematch
use std::sync::Arc;

use facematch_core::{
    BatchEntry, Embedding, Error, FaceExtractor, FaceImage, InMemoryRegistry, PresenceVerifier,
    RecognitionService, Registry, DEFAULT_THRESHOLD,
};
use facematch_storage::DiskRegistry;

/// Test extractor: the first pixel's red channel selects a basis vector,
/// an all-white pixel means "no face detected".
struct PixelProbe {
    dim: usize,
}

#[async_trait::async_trait]
impl FaceExtractor for PixelProbe {
    async fn extract(&self, image: &FaceImage) -> facematch_core::Result<Embedding> {
        let first = image.pixels().first().copied().unwrap_or(0);
        if first == 255 {
            return Err(Error::NoFaceDetected);
        }
        let mut data = vec![0.0; self.dim];
        data[first as usize % self.dim] = 1.0;
        Ok(Embedding::new(data))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

fn face(red: u8) -> FaceImage {
    FaceImage::from_raw(1, 1, vec![red, 0, 0]).unwrap()
}

fn entry(name: &str, external_id: &str, red: u8) -> BatchEntry {
    BatchEntry {
        name: name.to_string(),
        external_id: external_id.to_string(),
        image: face(red),
    }
}

fn memory_service(dim: usize) -> RecognitionService {
    RecognitionService::new(
        Arc::new(InMemoryRegistry::new(dim)),
        Arc::new(PixelProbe { dim }),
        DEFAULT_THRESHOLD,
    )
}

#[tokio::test]
async fn test_register_then_identify() {
    let service = memory_service(8);

    service
        .register_batch(&[entry("Alice", "40123", 1), entry("Bob", "999", 2)])
        .await
        .unwrap();

    let outcome = service.identify_image(&face(2)).await.unwrap();
    assert!(outcome.matched);
    let record = outcome.record.unwrap();
    assert_eq!(record.name, "Bob");
    assert_eq!(record.external_id, "999");
    assert_eq!(outcome.distance, Some(0.0));
}

#[tokio::test]
async fn test_identify_with_empty_registry_is_distinguished() {
    let service = memory_service(8);
    let err = service.identify_image(&face(1)).await.unwrap_err();
    assert!(matches!(err, Error::EmptyRegistry));
}

#[tokio::test]
async fn test_batch_abort_keeps_earlier_entries_and_skips_later_ones() {
    let service = memory_service(8);

    let err = service
        .register_batch(&[
            entry("Alice", "1", 1),
            entry("Broken", "2", 255),
            entry("Carol", "3", 3),
        ])
        .await
        .unwrap_err();

    match err {
        Error::BatchAborted { index, name, source } => {
            assert_eq!(index, 1);
            assert_eq!(name, "Broken");
            assert!(matches!(*source, Error::NoFaceDetected));
        }
        other => panic!("unexpected error: {other}"),
    }

    let names: Vec<String> = service
        .enrolled()
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Alice"]);
}

#[tokio::test]
async fn test_presence_verification_end_to_end() {
    let verifier = PresenceVerifier::new(Arc::new(PixelProbe { dim: 8 }), DEFAULT_THRESHOLD);

    let same = verifier.verify(&face(1), &face(1)).await.unwrap();
    assert_eq!(same.code.as_code(), 0);
    assert_eq!(same.code.message(), "authenticated");
    assert!(same.elapsed.as_secs_f64() >= 0.0);

    let different = verifier.verify(&face(1), &face(2)).await.unwrap();
    assert_eq!(different.code.as_code(), 1);
    assert_eq!(different.code.message(), "not authenticated");
}

#[tokio::test]
async fn test_compare_images_end_to_end() {
    let service = memory_service(8);
    assert!(service.compare_images(&face(4), &face(4)).await.unwrap());
    assert!(!service.compare_images(&face(4), &face(5)).await.unwrap());
}

#[test]
fn test_concurrent_registration_in_memory() {
    let registry = Arc::new(InMemoryRegistry::new(4));
    let mut handles = Vec::new();

    for t in 0..8 {
        let registry = registry.clone();
        handles.push(std::thread::spawn(move || {
            for i in 0..25 {
                let id = format!("{t}-{i}");
                registry
                    .register("worker", &id, Embedding::new(vec![0.5; 4]))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let records = registry.list_all().unwrap();
    assert_eq!(records.len(), 200);

    let mut ids: Vec<String> = records.into_iter().map(|r| r.external_id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_disk_registry_survives_restart() {
    // Use a unique temp directory for each test to avoid LMDB conflicts
    let temp_dir = tempfile::tempdir().unwrap();

    {
        let registry = DiskRegistry::open(temp_dir.path(), 4).unwrap();
        registry
            .register("Alice", "1", Embedding::new(vec![0.1; 4]))
            .unwrap();
        registry
            .register("Bob", "2", Embedding::new(vec![0.2; 4]))
            .unwrap();
        // Drop to close the LMDB environment (simulates shutdown)
    }

    let registry = DiskRegistry::open(temp_dir.path(), 4).unwrap();
    let records = registry.list_all().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[0].embedding, Embedding::new(vec![0.1; 4]));
    assert_eq!(records[1].name, "Bob");
}

#[test]
fn test_disk_registry_pins_dimension_across_restart() {
    let temp_dir = tempfile::tempdir().unwrap();

    {
        DiskRegistry::open(temp_dir.path(), 4).unwrap();
    }

    let err = DiskRegistry::open(temp_dir.path(), 16).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[tokio::test]
async fn test_full_service_on_disk_registry() {
    let temp_dir = tempfile::tempdir().unwrap();
    let service = RecognitionService::new(
        Arc::new(DiskRegistry::open(temp_dir.path(), 8).unwrap()),
        Arc::new(PixelProbe { dim: 8 }),
        DEFAULT_THRESHOLD,
    );

    service
        .register_batch(&[entry("Alice", "1", 1), entry("Bob", "2", 2)])
        .await
        .unwrap();

    let outcome = service.identify_image(&face(1)).await.unwrap();
    assert!(outcome.matched);
    assert_eq!(outcome.record.unwrap().name, "Alice");
}

#[tokio::test]
async fn test_first_match_wins_across_duplicate_enrollments() {
    let service = memory_service(8);

    // The same face enrolled twice under different names: the earlier
    // registration is the one identify reports.
    service
        .register_batch(&[entry("First", "1", 6), entry("Second", "2", 6)])
        .await
        .unwrap();

    let outcome = service.identify_image(&face(6)).await.unwrap();
    assert_eq!(outcome.record.unwrap().name, "First");
}
