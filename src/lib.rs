//! Secure Bytes Library
//!
//! A byte-oriented value type for moving cryptographic material between
//! human-oriented representations (hex, big integers, base64) and raw bytes,
//! with digest, symmetric cipher and RSA operations attached.
//!
//! ```no_run
//! use secure_bytes::{Base64Options, ByteBuffer, CryptoOperations};
//!
//! # fn main() -> secure_bytes::SecureBytesResult<()> {
//! let data = ByteBuffer::from("Hello World!");
//! assert_eq!(data.to_hex(), "48656c6c6f20576f726c6421");
//! assert_eq!(data.to_base64(&Base64Options::standard()), "SGVsbG8gV29ybGQh\n");
//!
//! let ops = CryptoOperations::new();
//! let digest = ops.digest(&data, "sha256")?;
//! println!("{digest}");
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod domain;
pub mod infra;
pub mod services;


// Re-export commonly used items at crate root
pub use adapters::{CryptoBackend, OpenSslBackend};
pub use domain::bytes::ByteBuffer;
pub use domain::crypto::{
    resolve, supported_identifiers, CipherKey, DigestAlgorithm, DigestBytes, DigestIdentifier,
    KeyRole, RsaKeyPair, SymmetricCipher,
};
pub use domain::format::{Base64Options, DataFormat, KeyFormat};
pub use infra::config::{ConfigManager, SecureBytesConfiguration};
pub use infra::error::{SecureBytesError, SecureBytesResult};
pub use services::codec::{decode, decode_with, encode, EMPTY_INTEGER_SENTINEL};
pub use services::{CryptoOperations, OperationDefaults};
