//! Adapter layer modules for external system integration.
//!
//! Provides:
//! - The `CryptoBackend` trait describing the primitive capabilities consumed
//!   by the service layer
//! - The OpenSSL implementation of that trait

pub mod backend;
pub mod openssl_backend;

pub use backend::CryptoBackend;
pub use openssl_backend::{OpenSslBackend, OpenSslRsaKey};
