//! Configuration for the images server.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Command-line flags. Every flag overrides the matching config key.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "images-server", version, about = "Serves dataset images and collects classification results")]
pub struct Cli {
    /// Interface to listen on.
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,
    /// TCP port to listen on.
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,
    /// CSV file holding the dataset images.
    #[arg(long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,
    /// CSV file that `POST /export` writes to.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
    /// Configuration file (default: images-server.toml, if present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Main configuration structure for the images server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bytes read from a response source per chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: NonZeroUsize,
    /// How long a `POST /result` request may take to arrive, body included.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Largest request body accepted by `POST /result`.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            chunk_size: default_chunk_size(),
            read_timeout_secs: default_read_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_chunk_size() -> NonZeroUsize {
    NonZeroUsize::new(1024).unwrap_or(NonZeroUsize::MIN)
}
fn default_read_timeout() -> u64 {
    30
}
fn default_max_body_bytes() -> usize {
    4096
}
fn default_dataset_path() -> PathBuf {
    PathBuf::from("test.csv")
}
fn default_export_path() -> PathBuf {
    PathBuf::from("output.csv")
}
fn default_log_level() -> String {
    "info".to_string()
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}

impl Config {
    /// Load configuration from file, environment variables and flags.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Command-line flags
    /// 2. Environment variables (IMAGES__SECTION__KEY format)
    /// 3. The `--config` file, or images-server.toml if present
    /// 4. Built-in defaults
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name("images-server").required(false),
        };

        let config = ConfigLoader::builder()
            // Set defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("server.chunk_size", default_chunk_size().get() as i64)?
            .set_default("server.read_timeout_secs", default_read_timeout() as i64)?
            .set_default("server.max_body_bytes", default_max_body_bytes() as i64)?
            .set_default("dataset.path", default_dataset_path().to_string_lossy().into_owned())?
            .set_default("export.path", default_export_path().to_string_lossy().into_owned())?
            .set_default("logging.level", default_log_level())?
            .add_source(file)
            // Override with environment variables (IMAGES__SECTION__KEY format)
            .add_source(
                Environment::with_prefix("IMAGES")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("dataset.path", path_value(&cli.dataset))?
            .set_override_option("export.path", path_value(&cli.export))?
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_server_config() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "localhost");
        assert_eq!(server.port, 8000);
        assert_eq!(server.chunk_size.get(), 1024);
        assert_eq!(server.bind_addr(), "localhost:8000");
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = config_file("[server]\nhost = \"0.0.0.0\"\nport = 9000\nchunk_size = 512\n");
        let cli = Cli {
            port: Some(9100),
            dataset: Some(PathBuf::from("/data/digits.csv")),
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };

        let config = Config::load(&cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.chunk_size.get(), 512);
        assert_eq!(config.dataset.path, PathBuf::from("/data/digits.csv"));
        assert_eq!(config.export.path, PathBuf::from("output.csv"));
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let file = config_file("[server]\nchunk_size = 0\n");
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..Cli::default()
        };
        assert!(Config::load(&cli).is_err());
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/images-server.toml")),
            ..Cli::default()
        };
        assert!(Config::load(&cli).is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["images-server", "--host", "127.0.0.1", "-p", "8080"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(cli.port, Some(8080));
        assert!(Cli::try_parse_from(["images-server", "--port", "http"]).is_err());
    }
}
