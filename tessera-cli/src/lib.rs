use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use rand::Rng;
use structopt::StructOpt;
use thiserror::Error;

use tessera_lib::field::ElementSource;
use tessera_lib::sharing::{Share, SharingAlgorithm};
use tessera_lib::ShamirSecretSharing;

use crate::config::Conf;

pub mod config;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("malformed share {0:?}, expected index:value")]
	MalformedShare(String),
	#[error("malformed secret, expected a decimal or 0x-prefixed integer")]
	MalformedSecret,
	#[error("could not read config file {}: {source}", .path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Config(#[from] toml::de::Error),
	#[error("invalid log level {0:?}")]
	LogLevel(String),
}

/// A share on the command line, written `index:value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShareArg(pub Share);

impl FromStr for ShareArg {
	type Err = CliError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let malformed = || CliError::MalformedShare(s.to_owned());
		let (index, value) = s.split_once(':').ok_or_else(malformed)?;
		let index = index.trim().parse().map_err(|_| malformed())?;
		let value = value.trim().parse().map_err(|_| malformed())?;
		Ok(ShareArg(Share::new(index, value)))
	}
}

impl fmt::Display for ShareArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.0.index, self.0.value)
	}
}

pub fn parse_secret(input: &str) -> Result<u32, CliError> {
	let input = input.trim();
	let parsed = match input.strip_prefix("0x") {
		Some(hex) => u32::from_str_radix(hex, 16),
		None => input.parse(),
	};
	parsed.map_err(|_| CliError::MalformedSecret)
}

/// Sharing parameters; anything left out falls back to the config file.
#[derive(Debug, Clone, Default, StructOpt)]
pub struct Params {
	/// Number of bits of the field GF(2^p), 1 to 32
	#[structopt(short = "p", long)]
	pub field_bits: Option<u32>,
	/// Number of shares to produce
	#[structopt(short = "n", long)]
	pub shares: Option<u32>,
	/// Number of shares needed to recover the secret
	#[structopt(short = "k", long)]
	pub threshold: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
	pub field_bits: u32,
	pub shares: u32,
	pub threshold: u32,
}

impl Params {
	pub fn resolve(&self, conf: &Conf) -> Settings {
		Settings {
			field_bits: self.field_bits.unwrap_or(conf.field_bits),
			shares: self.shares.unwrap_or(conf.shares),
			threshold: self.threshold.unwrap_or(conf.threshold),
		}
	}
}

pub fn split<S: ElementSource>(sharer: &mut ShamirSecretSharing<S>, secret: u32, settings: &Settings) -> anyhow::Result<Vec<Share>> {
	let shares = sharer
		.share(secret, settings.shares, settings.threshold)
		.with_context(|| format!("splitting into {} shares with threshold {}", settings.shares, settings.threshold))?;
	Ok(shares.to_vec())
}

pub fn combine(field_bits: u32, shares: &[Share]) -> anyhow::Result<u32> {
	let sharer = ShamirSecretSharing::from_field_size(field_bits)?;
	let secret = sharer
		.reconstruct(shares)
		.with_context(|| format!("recovering from {} shares", shares.len()))?;
	Ok(secret)
}

#[derive(Debug, Clone)]
pub struct DemoReport {
	pub secret: u32,
	pub threshold: u32,
	pub used: Vec<Share>,
	pub guess: u32,
}

impl DemoReport {
	pub fn succeeded(&self) -> bool {
		self.guess == self.secret
	}

	pub fn summary(&self) -> String {
		let used = self.used.len();
		let shares: Vec<String> = self.used.iter().map(|s| ShareArg(*s).to_string()).collect();
		let mut lines = Vec::new();
		if self.succeeded() {
			lines.push(format!("Success! The secret was {} and was recovered from {}.", self.secret, shares.join(" ")));
			if used < self.threshold as usize {
				lines.push(format!("You needed {} shares, but you had {}. So you just got lucky.", self.threshold, used));
			} else if used > self.threshold as usize {
				lines.push(format!("You needed {} shares, but you had {}. That was more than necessary.", self.threshold, used));
			}
		} else {
			lines.push(format!("Fail. The secret was {}, but {} was recovered from {}.", self.secret, self.guess, shares.join(" ")));
			lines.push(format!("You needed {} shares, but you had {}.", self.threshold, used));
		}
		lines.join("\n")
	}
}

/// Splits a random secret and recovers it from `used` randomly picked shares.
pub fn demo<S: ElementSource, R: Rng>(sharer: &mut ShamirSecretSharing<S>, rng: &mut R, settings: &Settings, used: u32) -> anyhow::Result<DemoReport> {
	if used == 0 || used > settings.shares {
		bail!("can only use between 1 and {} shares, not {}", settings.shares, used);
	}
	let secret = sharer.field().random_element(rng);
	let shares = sharer.share(secret, settings.shares, settings.threshold)?;

	let picked: Vec<u32> = rand::seq::index::sample(rng, settings.shares as usize, used as usize)
		.into_iter()
		.map(|i| i as u32 + 1)
		.collect();
	tracing::info!(?picked, "recovering from randomly chosen shares");
	let used = shares.select(&picked)?;
	let guess = sharer.reconstruct(&used)?;
	Ok(DemoReport {
		secret,
		threshold: settings.threshold,
		used,
		guess,
	})
}

#[cfg(test)]
mod cli_test {
	use crate::config::Conf;
	use crate::{combine, demo, parse_secret, split, CliError, Params, Settings, ShareArg};
	use rand::rngs::StdRng;
	use rand::SeedableRng;
	use tessera_lib::field::GaloisField;
	use tessera_lib::sharing::Share;
	use tessera_lib::ShamirSecretSharing;

	fn seeded(bits: u32) -> ShamirSecretSharing<StdRng> {
		ShamirSecretSharing::new(GaloisField::new(bits).unwrap(), StdRng::seed_from_u64(21))
	}

	#[test]
	fn share_arguments() {
		assert_eq!("2:17".parse::<ShareArg>().unwrap(), ShareArg(Share::new(2, 17)));
		assert_eq!(" 4 : 9 ".parse::<ShareArg>().unwrap(), ShareArg(Share::new(4, 9)));
		assert_eq!(ShareArg(Share::new(5, 255)).to_string(), "5:255");
		for bad in ["217", "2:", ":3", "a:b", "-1:3"].iter() {
			assert!(matches!(bad.parse::<ShareArg>(), Err(CliError::MalformedShare(_))), "{}", bad);
		}
	}

	#[test]
	fn secrets() {
		assert_eq!(parse_secret("200\n").unwrap(), 200);
		assert_eq!(parse_secret("0xff").unwrap(), 255);
		assert!(matches!(parse_secret("twelve"), Err(CliError::MalformedSecret)));
	}

	#[test]
	fn flags_override_config() {
		let conf = Conf::parse("shares = 9\nthreshold = 4").unwrap();
		let params = Params { field_bits: Some(16), shares: None, threshold: Some(2) };
		assert_eq!(params.resolve(&conf), Settings { field_bits: 16, shares: 9, threshold: 2 });
		assert_eq!(Params::default().resolve(&Conf::default()), Settings { field_bits: 8, shares: 5, threshold: 3 });
	}

	#[test]
	fn split_then_combine() {
		let settings = Settings { field_bits: 8, shares: 5, threshold: 3 };
		let shares = split(&mut seeded(8), 200, &settings).unwrap();
		assert_eq!(shares.len(), 5);
		let quorum = [shares[1], shares[3], shares[4]];
		assert_eq!(combine(8, &quorum).unwrap(), 200);
		assert!(combine(8, &[Share::new(2, 10), Share::new(2, 17)]).is_err());
		assert!(split(&mut seeded(8), 300, &settings).is_err());
	}

	#[test]
	fn demo_reports() {
		let settings = Settings { field_bits: 16, shares: 6, threshold: 4 };
		let mut sharer = seeded(16);
		let mut rng = StdRng::seed_from_u64(3);

		let exact = demo(&mut sharer, &mut rng, &settings, 4).unwrap();
		assert!(exact.succeeded());
		assert_eq!(exact.used.len(), 4);
		assert!(exact.summary().starts_with("Success!"));

		let more = demo(&mut sharer, &mut rng, &settings, 6).unwrap();
		assert!(more.succeeded());
		assert!(more.summary().contains("more than necessary"));

		let fewer = demo(&mut sharer, &mut rng, &settings, 2).unwrap();
		assert!(fewer.summary().contains("You needed 4 shares, but you had 2."));

		assert!(demo(&mut sharer, &mut rng, &settings, 7).is_err());
		assert!(demo(&mut sharer, &mut rng, &settings, 0).is_err());
	}
}
