//! # facematch API
//!
//! HTTP boundary for the facematch identity service: batch registration,
//! one-to-many identification, pairwise comparison and presence
//! verification, all over JSON with permissive CORS.

pub mod rest;

pub use rest::RestApi;
