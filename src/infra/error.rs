//! Error types for byte conversion and cryptographic operations.
//! Error handling types and result definitions shared by every layer.

use thiserror::Error;

/// Result type for secure byte operations
pub type SecureBytesResult<T> = Result<T, SecureBytesError>;

/// Comprehensive error types for codec, resolver and crypto operations
#[derive(Error, Debug, miette::Diagnostic)]
pub enum SecureBytesError {
    #[error("Invalid encoding: {0}")]
    #[diagnostic(code(secure_bytes::invalid_encoding))]
    InvalidEncoding(String),

    #[error("Invalid argument: {0}")]
    #[diagnostic(code(secure_bytes::invalid_argument))]
    InvalidArgument(String),

    #[error("Unsupported algorithm: {0}")]
    #[diagnostic(
        code(secure_bytes::unsupported_algorithm),
        help("run `secure-bytes digests` or `secure-bytes ciphers` to list recognised names")
    )]
    UnsupportedAlgorithm(String),

    #[error("Message too long: {length} bytes (maximum {max} for this key)")]
    #[diagnostic(code(secure_bytes::message_too_long))]
    MessageTooLong { length: usize, max: usize },

    #[error("Key parse failure: {0}")]
    #[diagnostic(code(secure_bytes::key_parse_failure))]
    KeyParseFailure(String),

    #[error("Cryptographic error: {0}")]
    #[diagnostic(code(secure_bytes::crypto))]
    CryptographicError(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(secure_bytes::config))]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<openssl::error::ErrorStack> for SecureBytesError {
    fn from(error: openssl::error::ErrorStack) -> Self {
        SecureBytesError::CryptographicError(error.to_string())
    }
}

impl From<base64::DecodeError> for SecureBytesError {
    fn from(error: base64::DecodeError) -> Self {
        SecureBytesError::InvalidEncoding(format!("base64: {error}"))
    }
}

impl From<hex::FromHexError> for SecureBytesError {
    fn from(error: hex::FromHexError) -> Self {
        SecureBytesError::InvalidEncoding(format!("hex: {error}"))
    }
}

impl From<std::io::Error> for SecureBytesError {
    fn from(error: std::io::Error) -> Self {
        SecureBytesError::IoError(error.to_string())
    }
}
