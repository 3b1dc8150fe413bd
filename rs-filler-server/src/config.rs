use std::env;
use std::path::PathBuf;

use log::warn;

use rs_filler_core::io::normalize_folder;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Where the service listens and where it looks for word files.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	pub data_dir: PathBuf,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_owned(),
			port: DEFAULT_PORT,
			data_dir: normalize_folder(DEFAULT_DATA_DIR),
		}
	}
}

impl ServerConfig {
	/// Reads `FILLER_HOST`, `FILLER_PORT` and `FILLER_DATA_DIR`.
	///
	/// Unset variables keep their default. An unparsable port is logged and
	/// replaced by the default.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
		let mut config = Self::default();
		if let Some(host) = lookup("FILLER_HOST") {
			config.host = host;
		}
		if let Some(port) = lookup("FILLER_PORT") {
			match port.parse() {
				Ok(port) => config.port = port,
				Err(_) => warn!("FILLER_PORT is not a port number: {:?}, using {}", port, DEFAULT_PORT),
			}
		}
		if let Some(dir) = lookup("FILLER_DATA_DIR") {
			config.data_dir = normalize_folder(&dir);
		}
		config
	}

	pub fn address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}
}
