use serde_derive::Deserialize;
use std::str::FromStr;
use std::path::Path;
use std::fs::read_to_string;
use tracing::Level;

use crate::CliError;

/// Defaults for the subcommands, read from a TOML file.
///
/// ```toml
/// field_bits = 16
/// shares = 7
/// threshold = 4
/// log_level = "debug"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Conf {
	pub field_bits: u32,
	pub shares: u32,
	pub threshold: u32,
	pub log_level: String,
}

impl Default for Conf {
	fn default() -> Self {
		Self {
			field_bits: 8,
			shares: 5,
			threshold: 3,
			log_level: "info".to_owned(),
		}
	}
}

impl Conf {
	pub fn parse(content: &str) -> Result<Self, CliError> {
		Ok(toml::from_str(content)?)
	}

	pub fn level(&self) -> Result<Level, CliError> {
		Level::from_str(&self.log_level).map_err(|_| CliError::LogLevel(self.log_level.clone()))
	}
}

/// Takes the path of the config file, which is how structopt hands it over.
impl FromStr for Conf {
	type Err = CliError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let path = Path::new(s);
		let content = read_to_string(path).map_err(|source| CliError::ConfigRead { path: path.to_path_buf(), source })?;
		Conf::parse(&content)
	}
}
