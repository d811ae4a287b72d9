//! Configuration management infrastructure.
//!
//! This module provides configuration file support, letting users persist the
//! defaults applied by `CryptoOperations` (digest for signing, PBKDF2 iteration
//! count, RSA key size and format) and their preferred base64 layout.

use crate::domain::crypto::{DigestAlgorithm, MIN_RSA_BITS};
use crate::domain::format::{Base64Options, KeyFormat};
use crate::infra::error::{SecureBytesError, SecureBytesResult};
use crate::services::operations::{OperationDefaults, DEFAULT_PBKDF2_ITERATIONS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration with all operation preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecureBytesConfiguration {
    /// Digest used for signing and verification when none is given
    pub default_digest: String,

    /// PBKDF2 iteration count for passphrase key generation
    pub pbkdf2_iterations: u32,

    /// RSA modulus size in bits for key generation
    pub rsa_key_bits: u32,

    /// RSA key serialization (pem or der)
    pub key_format: String,

    /// Base64 output preferences
    #[serde(default)]
    pub base64: Base64Options,
}

impl Default for SecureBytesConfiguration {
    fn default() -> Self {
        Self {
            default_digest: DigestAlgorithm::default().name().to_string(),
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            rsa_key_bits: crate::domain::crypto::DEFAULT_RSA_BITS,
            key_format: KeyFormat::default().as_str().to_string(),
            base64: Base64Options::default(),
        }
    }
}

impl SecureBytesConfiguration {
    /// Validate and convert into the defaults used by `CryptoOperations`.
    pub fn operation_defaults(&self) -> SecureBytesResult<OperationDefaults> {
        let digest = self.default_digest.parse::<DigestAlgorithm>().map_err(|_| {
            SecureBytesError::ConfigurationError(format!(
                "Invalid digest algorithm: {}",
                self.default_digest
            ))
        })?;

        let key_format = self.key_format.parse::<KeyFormat>().map_err(|_| {
            SecureBytesError::ConfigurationError(format!("Invalid key format: {}", self.key_format))
        })?;

        if self.pbkdf2_iterations == 0 {
            return Err(SecureBytesError::ConfigurationError(
                "PBKDF2 iterations must be greater than 0".to_string(),
            ));
        }

        if self.rsa_key_bits < MIN_RSA_BITS {
            return Err(SecureBytesError::ConfigurationError(format!(
                "RSA key bits must be at least {MIN_RSA_BITS}, got {}",
                self.rsa_key_bits
            )));
        }

        Ok(OperationDefaults {
            digest,
            pbkdf2_iterations: self.pbkdf2_iterations,
            rsa_bits: self.rsa_key_bits,
            key_format,
        })
    }
}

/// Configuration manager for handling config files
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new configuration manager with default path
    pub fn new() -> SecureBytesResult<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Create a configuration manager with custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> SecureBytesResult<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Ok(config_dir.join("secure-bytes").join("config.toml"))
        } else {
            // Fallback to current directory
            Ok(PathBuf::from("secure-bytes-config.toml"))
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create_default(&self) -> SecureBytesResult<SecureBytesConfiguration> {
        if self.config_path.exists() {
            self.load()
        } else {
            log::info!(
                "Configuration file not found, creating default: {}",
                self.config_path.display()
            );
            let default_config = SecureBytesConfiguration::default();
            self.save(&default_config)?;
            Ok(default_config)
        }
    }

    /// Load configuration from file
    pub fn load(&self) -> SecureBytesResult<SecureBytesConfiguration> {
        log::info!("Loading configuration from: {}", self.config_path.display());

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            SecureBytesError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let config: SecureBytesConfiguration = toml::from_str(&content).map_err(|e| {
            SecureBytesError::ConfigurationError(format!("Failed to parse config file: {e}"))
        })?;

        config.operation_defaults()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, config: &SecureBytesConfiguration) -> SecureBytesResult<()> {
        log::info!("Saving configuration to: {}", self.config_path.display());

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SecureBytesError::ConfigurationError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| {
            SecureBytesError::ConfigurationError(format!("Failed to serialize config: {e}"))
        })?;

        fs::write(&self.config_path, content).map_err(|e| {
            SecureBytesError::ConfigurationError(format!(
                "Failed to write config file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        log::info!("Configuration saved successfully");
        Ok(())
    }

    /// Update a specific configuration value
    pub fn update_value(&self, key: &str, value: &str) -> SecureBytesResult<()> {
        let mut config = self.load_or_create_default()?;

        match key {
            "default_digest" => {
                let algorithm = value.parse::<DigestAlgorithm>().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!(
                        "Invalid digest algorithm: {value}"
                    ))
                })?;
                config.default_digest = algorithm.name().to_string();
            }
            "pbkdf2_iterations" => {
                config.pbkdf2_iterations = value.parse().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!(
                        "Invalid iteration count: {value}"
                    ))
                })?;
            }
            "rsa_key_bits" => {
                config.rsa_key_bits = value.parse().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!("Invalid key size: {value}"))
                })?;
            }
            "key_format" => {
                let format = value.parse::<KeyFormat>().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!("Invalid key format: {value}"))
                })?;
                config.key_format = format.as_str().to_string();
            }
            "base64.url_safe" => {
                config.base64.url_safe = value.parse().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            "base64.strip_line_breaks" => {
                config.base64.strip_line_breaks = value.parse().map_err(|_| {
                    SecureBytesError::ConfigurationError(format!("Invalid boolean value: {value}"))
                })?;
            }
            _ => {
                return Err(SecureBytesError::ConfigurationError(format!(
                    "Unknown configuration key: {key}"
                )));
            }
        }

        config.operation_defaults()?;
        self.save(&config)
    }

    /// Get the configuration file path
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Export configuration as a portable format
    pub fn export_config(&self, format: ExportFormat) -> SecureBytesResult<String> {
        let config = self.load()?;

        match format {
            ExportFormat::Toml => toml::to_string_pretty(&config).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("TOML export failed: {e}"))
            }),
            ExportFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("JSON export failed: {e}"))
            }),
            ExportFormat::Yaml => serde_yaml::to_string(&config).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("YAML export failed: {e}"))
            }),
        }
    }

    /// Import configuration from a string
    pub fn import_config(&self, content: &str, format: ExportFormat) -> SecureBytesResult<()> {
        let config: SecureBytesConfiguration = match format {
            ExportFormat::Toml => toml::from_str(content).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("TOML import failed: {e}"))
            })?,
            ExportFormat::Json => serde_json::from_str(content).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("JSON import failed: {e}"))
            })?,
            ExportFormat::Yaml => serde_yaml::from_str(content).map_err(|e| {
                SecureBytesError::ConfigurationError(format!("YAML import failed: {e}"))
            })?,
        };

        config.operation_defaults()?;
        self.save(&config)
    }
}

/// Configuration export/import formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Json,
    Yaml,
}
