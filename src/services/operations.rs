//! `CryptoOperations` entry point.
//!
//! The operations themselves live in the `digest`, `cipher` and `rsa` service
//! modules as separate `impl` blocks; this module holds the struct and the
//! defaults it applies when a caller does not choose.

use crate::adapters::backend::CryptoBackend;
use crate::adapters::openssl_backend::OpenSslBackend;
use crate::domain::crypto::{DigestAlgorithm, DEFAULT_RSA_BITS};
use crate::domain::format::KeyFormat;

/// Iteration count used by the passphrase key generators by default.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 2048;

/// Values applied when an operation is called without an explicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDefaults {
    /// Digest used by `sign` and `verify`.
    pub digest: DigestAlgorithm,
    /// Iterations used by `*_passphrase_keygen_default`.
    pub pbkdf2_iterations: u32,
    /// Modulus size used by `rsa_keygen_default`.
    pub rsa_bits: u32,
    /// Serialization used by `rsa_keygen_default`.
    pub key_format: KeyFormat,
}

impl Default for OperationDefaults {
    fn default() -> Self {
        Self {
            digest: DigestAlgorithm::Sha256,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            rsa_bits: DEFAULT_RSA_BITS,
            key_format: KeyFormat::Pem,
        }
    }
}

/// Digest, cipher and RSA operations over `ByteBuffer` values.
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct CryptoOperations<B: CryptoBackend = OpenSslBackend> {
    pub(crate) backend: B,
    pub(crate) defaults: OperationDefaults,
}

impl CryptoOperations<OpenSslBackend> {
    /// Operations backed by OpenSSL with built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: CryptoBackend> CryptoOperations<B> {
    /// Operations over a specific backend.
    #[must_use]
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            defaults: OperationDefaults::default(),
        }
    }

    /// Replace the defaults, typically with values loaded from configuration.
    #[must_use]
    pub fn with_defaults(mut self, defaults: OperationDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &OperationDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
