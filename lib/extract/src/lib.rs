//! # facematch Extract
//!
//! HTTP client for the face-embedding inference service. Implements the
//! core [`FaceExtractor`](facematch_core::FaceExtractor) trait so the rest
//! of the system never sees the wire protocol.

pub mod remote;

pub use remote::RemoteExtractor;
