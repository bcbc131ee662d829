//! # facematch Core
//!
//! Core library for the facematch identity service.
//!
//! This crate provides the fundamental data structures and operations:
//!
//! - [`Embedding`] - Fixed-length face embedding with L2 distance
//! - [`PersonRecord`] - An enrolled identity with its embedding
//! - [`Registry`] - Append-only store of enrolled records
//! - [`matcher`] - One-to-one and one-to-many matching
//! - [`RecognitionService`] - Extractor + registry + matcher orchestration
//! - [`PresenceVerifier`] - Two-image presence verification
//!
//! ## Example
//!
//! ```rust
//! use facematch_core::{matcher, Embedding, InMemoryRegistry, Registry, DEFAULT_THRESHOLD};
//!
//! // Enroll a person
//! let registry = InMemoryRegistry::new(4);
//! let embedding = Embedding::new(vec![0.1, 0.2, 0.3, 0.4]);
//! registry.register("Alice", "40123", embedding.clone()).unwrap();
//!
//! // Identify a probe against everything enrolled
//! let records = registry.list_all().unwrap();
//! let outcome = matcher::identify(&embedding, &records, DEFAULT_THRESHOLD).unwrap();
//! assert!(outcome.matched);
//! ```

pub mod embedding;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod presence;
pub mod record;
pub mod registry;
pub mod service;

pub use embedding::Embedding;
pub use error::{Error, Result};
pub use extractor::{FaceExtractor, FaceImage};
pub use matcher::{distance, identify, is_same_person, MatchOutcome, DEFAULT_THRESHOLD};
pub use presence::{PresenceCode, PresenceReport, PresenceVerifier};
pub use record::{PersonRecord, RecordId};
pub use registry::{InMemoryRegistry, Registry};
pub use service::{BatchEntry, RecognitionService};
