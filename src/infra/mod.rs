//! Infrastructure layer for cross-cutting concerns.
//!
//! Provides foundational infrastructure including:
//! - Configuration files and validation
//! - Error handling and result types

pub mod config;
pub mod error;
