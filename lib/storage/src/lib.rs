//! # facematch Storage
//!
//! Persistent registry backend for the facematch identity service.
//!
//! Enrollment is append-only, so the layout stays simple: one LMDB table of
//! bincode-encoded records keyed by big-endian sequence number, plus a meta
//! table that pins the embedding dimension the registry was created with.

pub mod disk;

pub use disk::DiskRegistry;
