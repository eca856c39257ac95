//! # ReadSphere Core
//!
//! Core data structures and types for the ReadSphere platform.
//!
//! This crate provides the fundamental building blocks shared across the
//! ReadSphere services: the book catalog model, user ratings, and the
//! platform error type.
//!
//! ## Modules
//!
//! - `models`: Domain models for books and ratings
//! - `error`: Error types and handling

pub mod error;
pub mod models;

// Re-export commonly used types
pub use error::ReadSphereError;
pub use models::{Book, Rating};

/// Result type alias for ReadSphere operations
pub type Result<T> = std::result::Result<T, ReadSphereError>;
