//! # facematch
//!
//! A face-embedding identity registry and matching service.
//!
//! facematch stores fixed-length face embeddings keyed to a person and
//! decides whether two embeddings belong to the same person (1:1 compare)
//! or which enrolled person, if any, a probe embedding matches (1:N
//! identify). Embedding extraction itself runs in an external inference
//! service; this crate consumes it through a trait.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install facematch
//! facematch --http-port 8080 --extractor-url http://localhost:8191
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use facematch::prelude::*;
//!
//! // Enroll a person in a volatile registry
//! let registry = InMemoryRegistry::new(4);
//! let embedding = Embedding::new(vec![1.0, 0.0, 0.0, 0.0]);
//! registry.register("Bob", "999", embedding.clone()).unwrap();
//!
//! // Identify a probe against everything enrolled
//! let records = registry.list_all().unwrap();
//! let outcome = matcher::identify(&embedding, &records, DEFAULT_THRESHOLD).unwrap();
//! assert!(outcome.matched);
//! ```
//!
//! ## Crate Structure
//!
//! facematch is composed of several crates:
//!
//! - [`facematch-core`](https://docs.rs/facematch-core) - Embeddings, registry, matching engine, presence verification
//! - [`facematch-extract`](https://docs.rs/facematch-extract) - Client for the embedding extraction service
//! - [`facematch-storage`](https://docs.rs/facematch-storage) - LMDB-backed persistent registry
//! - [`facematch-api`](https://docs.rs/facematch-api) - REST API
//!
//! ## Features
//!
//! - **Batch Enrollment**: Ordered registration with abort-on-first-failure
//! - **1:N Identification**: First-match scan in insertion order
//! - **Presence Verification**: Two-image same-person check with timing
//! - **Pluggable Registry**: In-memory or LMDB-backed persistence
//! - **Remote Extraction**: Embeddings come from an external inference service

// Re-export core types
pub use facematch_core::{
    matcher, BatchEntry, Embedding, Error, FaceExtractor, FaceImage, InMemoryRegistry,
    MatchOutcome, PersonRecord, PresenceCode, PresenceReport, PresenceVerifier,
    RecognitionService, RecordId, Registry, Result, DEFAULT_THRESHOLD,
};

// Re-export the extraction client
pub use facematch_extract::RemoteExtractor;

// Re-export storage
pub use facematch_storage::DiskRegistry;

// Re-export API
pub use facematch_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        matcher, BatchEntry, DiskRegistry, Embedding, Error, FaceExtractor, FaceImage,
        InMemoryRegistry, MatchOutcome, PersonRecord, PresenceCode, PresenceReport,
        PresenceVerifier, RecognitionService, RecordId, Registry, RemoteExtractor, RestApi,
        Result, DEFAULT_THRESHOLD,
    };
}
