//! Process-wide configuration (`swatch.toml`).
//!
//! ```toml
//! [backend]
//! kind = "bucket"
//! bucket = "my-colors"
//! key = "colors.xlsx"
//! token_env = "SWATCH_BUCKET_TOKEN"
//!
//! [lookup]
//! enabled = true
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::backends::{bucket, Backend, BucketBackend, LocalBackend};
use crate::lookup::{self, ColorLookup};

pub const DEFAULT_CONFIG_FILE: &str = "swatch.toml";

fn default_path() -> PathBuf {
	PathBuf::from("colors.xlsx")
}

fn default_key() -> String {
	"colors.xlsx".to_string()
}

fn default_endpoint() -> String {
	bucket::DEFAULT_ENDPOINT.to_string()
}

fn default_bucket_timeout() -> u64 {
	bucket::DEFAULT_TIMEOUT.as_secs()
}

fn default_base_url() -> String {
	lookup::DEFAULT_BASE_URL.to_string()
}

fn default_lookup_timeout() -> u64 {
	lookup::DEFAULT_TIMEOUT.as_secs()
}

fn default_true() -> bool {
	true
}

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("could not read config file {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config file {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("environment variable {0} holding the bucket token is not set")]
	MissingToken(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	#[serde(default)]
	pub backend: BackendConfig,
	#[serde(default)]
	pub lookup: LookupConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendConfig {
	Local {
		#[serde(default = "default_path")]
		path: PathBuf,
	},
	Bucket {
		bucket: String,
		#[serde(default = "default_key")]
		key: String,
		#[serde(default = "default_endpoint")]
		endpoint: String,
		/// Name of the environment variable holding a bearer token.
		#[serde(default)]
		token_env: Option<String>,
		#[serde(default = "default_bucket_timeout")]
		timeout_secs: u64,
	},
}

impl Default for BackendConfig {
	fn default() -> Self {
		BackendConfig::Local { path: default_path() }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupConfig {
	#[serde(default = "default_true")]
	pub enabled: bool,
	#[serde(default = "default_base_url")]
	pub base_url: String,
	#[serde(default = "default_lookup_timeout")]
	pub timeout_secs: u64,
}

impl Default for LookupConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			base_url: default_base_url(),
			timeout_secs: default_lookup_timeout(),
		}
	}
}

impl Config {
	pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(s)
	}

	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
		Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
	}

	/// Loads `explicit` if given, else `swatch.toml` in the working directory if it
	/// exists, else the defaults.
	pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
		if let Some(path) = explicit {
			return Self::load(path);
		}

		let default_file = Path::new(DEFAULT_CONFIG_FILE);
		if default_file.is_file() {
			debug!("using {DEFAULT_CONFIG_FILE}");
			return Self::load(default_file);
		}

		debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
		Ok(Self::default())
	}

	/// Builds the configured backend. Bucket credentials are read from the environment
	/// here, once.
	pub fn open_backend(&self) -> Result<Box<dyn Backend>, ConfigError> {
		match &self.backend {
			BackendConfig::Local { path } => Ok(Box::new(LocalBackend::new(path.clone()))),
			BackendConfig::Bucket { bucket, key, endpoint, token_env, timeout_secs } => {
				let mut backend = BucketBackend::new(endpoint.as_str(), bucket.as_str(), key.as_str())
					.with_timeout(Duration::from_secs(*timeout_secs));
				if let Some(var) = token_env {
					let token = env::var(var).map_err(|_| ConfigError::MissingToken(var.clone()))?;
					backend = backend.with_token(token);
				}
				Ok(Box::new(backend))
			}
		}
	}

	pub fn lookup_client(&self) -> Option<ColorLookup> {
		if !self.lookup.enabled {
			return None;
		}
		Some(ColorLookup::new(self.lookup.base_url.as_str(), Duration::from_secs(self.lookup.timeout_secs)))
	}
}
