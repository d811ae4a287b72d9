//! Foundational cryptographic domain types.
//!
//! Provides strongly-typed wrappers for cryptographic identifiers and artifacts:
//! - Digest algorithms, identifier resolution and size-checked digest values
//! - Symmetric cipher names, directions and key/IV pairs
//! - RSA key roles and serialized key pairs
//!
//! These types carry no primitive implementations; the adapter layer supplies
//! those and the service layer composes the two.

mod cipher;
mod digest_bytes;
mod hash;
mod key;

pub use cipher::{CipherDirection, CipherKey, SymmetricCipher};
pub use digest_bytes::{DigestBytes, DigestBytesError};
pub use hash::{resolve, supported_identifiers, DigestAlgorithm, DigestIdentifier};
pub use key::{KeyRole, RsaKeyPair, DEFAULT_RSA_BITS, MIN_RSA_BITS, PKCS1_PADDING_OVERHEAD};
