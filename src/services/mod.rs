//! Service layer module root.
//! Contains the format codec and the cryptographic operations built on the
//! backend adapters.

pub mod cipher;
pub mod codec;
pub mod digest;
pub mod operations;
pub mod rsa;

pub use codec::{decode, decode_with, encode, BASE64_LINE_WIDTH, EMPTY_INTEGER_SENTINEL};
pub use operations::{CryptoOperations, OperationDefaults, DEFAULT_PBKDF2_ITERATIONS};
