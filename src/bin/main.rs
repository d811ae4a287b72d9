//! Secure Bytes CLI
//!
//! Command-line front end for converting data between representations,
//! computing digests and generating keys.

use clap::{Parser, Subcommand, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use secure_bytes::{
    decode_with, encode, infra::config::ExportFormat, supported_identifiers, Base64Options, ByteBuffer,
    ConfigManager, CryptoOperations, DataFormat, KeyFormat, SecureBytesConfiguration,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "secure-bytes")]
#[command(about = "Convert, digest and protect byte strings")]
#[command(long_about = "
Secure Bytes - byte string conversion and cryptography utility

EXAMPLES:
    # Hex to base64
    secure-bytes convert --from hex --to base64 48656c6c6f

    # SHA-384 of a decimal integer
    secure-bytes digest -a sha384 --from int 22405534230753928650781647905

    # Generate a DER key pair
    secure-bytes rsa-keygen --bits 2048 --format der --private-out key.der --public-out pub.der

FORMATS:
    raw, hex, int, base64, base64url

Use '-' as INPUT to read standard input.

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert data from one representation to another
    Convert {
        /// Input representation
        #[arg(long, default_value = "raw")]
        from: DataFormat,

        /// Output representation
        #[arg(long, default_value = "hex")]
        to: DataFormat,

        /// Use the url-safe base64 alphabet
        #[arg(long)]
        url_safe: bool,

        /// Do not wrap base64 output
        #[arg(long)]
        no_break: bool,

        /// Input data
        #[arg(value_name = "INPUT")]
        input: String,
    },

    /// Compute a message digest
    Digest {
        /// Digest algorithm (defaults to the configured digest)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Input representation
        #[arg(long, default_value = "raw")]
        from: DataFormat,

        /// Output representation
        #[arg(long, default_value = "hex")]
        to: DataFormat,

        /// Input data
        #[arg(value_name = "INPUT")]
        input: String,
    },

    /// List supported digest identifiers
    Digests,

    /// List supported symmetric ciphers
    Ciphers,

    /// Generate an RSA key pair
    RsaKeygen {
        /// Modulus size in bits (defaults to the configured size)
        #[arg(short, long)]
        bits: Option<u32>,

        /// Key serialization (defaults to the configured format)
        #[arg(short, long)]
        format: Option<KeyFormat>,

        /// Write the private key here instead of standard output
        #[arg(long, value_name = "FILE")]
        private_out: Option<PathBuf>,

        /// Write the public key here instead of standard output
        #[arg(long, value_name = "FILE")]
        public_out: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
    },

    /// Print the configuration file path
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[derive(ValueEnum, Clone)]
enum ExportFormatArg {
    Toml,
    Json,
    Yaml,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Toml => ExportFormat::Toml,
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Yaml => ExportFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            from,
            to,
            url_safe,
            no_break,
            input,
        } => {
            let config = load_configuration()?;
            let options = Base64Options {
                url_safe: url_safe || config.base64.url_safe,
                strip_line_breaks: no_break || config.base64.strip_line_breaks,
            };
            let data = read_input(from, &input, &options)?;
            print_output(to, &data, &options)?;
        }

        Commands::Digest {
            algorithm,
            from,
            to,
            input,
        } => {
            let ops = operations()?;
            let data = read_input(from, &input, &Base64Options::standard())?;
            let digest = match algorithm {
                Some(name) => ops.digest(&data, name.as_str()),
                None => ops.digest(&data, ops.defaults().digest),
            }
            .into_diagnostic()?;
            print_output(to, &digest, &Base64Options::standard().no_break())?;
        }

        Commands::Digests => {
            for name in supported_identifiers() {
                println!("{name}");
            }
        }

        Commands::Ciphers => {
            for name in CryptoOperations::new().supported_ciphers() {
                println!("{name}");
            }
        }

        Commands::RsaKeygen {
            bits,
            format,
            private_out,
            public_out,
        } => {
            let ops = operations()?;
            let bits = bits.unwrap_or(ops.defaults().rsa_bits);
            let format = format.unwrap_or(ops.defaults().key_format);
            let (private_key, public_key) = ops.rsa_keygen(bits, format).into_diagnostic()?.into_parts();

            write_key(&private_key, format, private_out.as_ref())?;
            write_key(&public_key, format, public_out.as_ref())?;
        }

        Commands::Config(config_cmd) => {
            handle_config_command(config_cmd)?;
        }
    }

    Ok(())
}

fn handle_config_command(config_cmd: ConfigCommands) -> Result<()> {
    let config_manager = ConfigManager::new().into_diagnostic()?;

    match config_cmd {
        ConfigCommands::Show { format } => {
            config_manager.load_or_create_default().into_diagnostic()?;
            let content = config_manager
                .export_config(format.into())
                .into_diagnostic()?;
            println!("{content}");
        }

        ConfigCommands::Path => {
            println!("{}", config_manager.config_path().display());
        }

        ConfigCommands::Set { key, value } => {
            config_manager
                .update_value(&key, &value)
                .into_diagnostic()?;
            println!("Configuration updated: {key} = {value}");
        }
    }

    Ok(())
}

/// Configuration from the default location, or built-in defaults if none was saved.
fn load_configuration() -> Result<SecureBytesConfiguration> {
    let config_manager = ConfigManager::new().into_diagnostic()?;
    if config_manager.config_path().exists() {
        config_manager
            .load()
            .into_diagnostic()
            .context("Failed to load configuration")
    } else {
        Ok(SecureBytesConfiguration::default())
    }
}

fn operations() -> Result<CryptoOperations> {
    let defaults = load_configuration()?
        .operation_defaults()
        .into_diagnostic()?;
    Ok(CryptoOperations::new().with_defaults(defaults))
}

fn read_input(format: DataFormat, input: &str, options: &Base64Options) -> Result<ByteBuffer> {
    let bytes = if input == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .into_diagnostic()
            .context("Failed to read standard input")?;
        buffer
    } else {
        input.as_bytes().to_vec()
    };

    decode_with(format, bytes, options)
        .into_diagnostic()
        .with_context(|| format!("Failed to decode input as {format}"))
}

fn print_output(format: DataFormat, data: &ByteBuffer, options: &Base64Options) -> Result<()> {
    let text = encode(format, data, options).into_diagnostic()?;
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
    Ok(())
}

fn write_key(key: &ByteBuffer, format: KeyFormat, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, key.as_slice())
                .into_diagnostic()
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {format} key to {}", path.display());
        }
        None => match format {
            KeyFormat::Pem => print_output(DataFormat::Raw, key, &Base64Options::standard())?,
            // DER is binary; show it as base64 on a terminal.
            KeyFormat::Der => print_output(DataFormat::Base64, key, &Base64Options::standard())?,
        },
    }
    Ok(())
}
