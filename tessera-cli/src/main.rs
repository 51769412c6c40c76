use dialoguer::Password;
use structopt::StructOpt;
use tracing::Level;

use tessera_cli::config::Conf;
use tessera_cli::{combine, demo, parse_secret, split, Params, ShareArg};
use tessera_lib::sharing::Share;
use tessera_lib::ShamirSecretSharing;

#[derive(Debug, StructOpt)]
#[structopt(name = "Tessera", about = "Split a secret into shares over GF(2^p) and recover it from a quorum.", version = "0.1.0")]
struct Opt {
	/// Path to config file
	///
	/// TOML file with defaults for field_bits, shares, threshold and log_level.
	#[structopt(long, short)]
	config: Option<Conf>,

	/// Log at debug level regardless of the config file
	#[structopt(long, short)]
	verbose: bool,

	#[structopt(subcommand)]
	cmd: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
	/// Splits a secret and prints one index:value line per share
	Split {
		/// The secret, decimal or 0x-prefixed. Prompted for if left out.
		#[structopt(long, short)]
		secret: Option<String>,
		#[structopt(flatten)]
		params: Params,
	},
	/// Recovers a secret from shares given as index:value
	Combine {
		/// Number of bits of the field GF(2^p) the shares live in
		#[structopt(short = "p", long)]
		field_bits: Option<u32>,
		#[structopt(required = true)]
		shares: Vec<ShareArg>,
	},
	/// Splits a random secret and tries to recover it from randomly chosen shares
	Demo {
		#[structopt(flatten)]
		params: Params,
		/// How many shares to recover from, defaults to the threshold
		#[structopt(long, short)]
		used: Option<u32>,
	},
}

fn main() -> anyhow::Result<()> {
	let opt = Opt::from_args();
	let conf = opt.config.clone().unwrap_or_default();

	let level = if opt.verbose { Level::DEBUG } else { conf.level()? };
	let collector = tracing_subscriber::fmt()
		.with_max_level(level)
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(collector)?;

	match opt.cmd {
		Command::Split { secret, params } => {
			let settings = params.resolve(&conf);
			let secret = match secret {
				Some(s) => parse_secret(&s)?,
				None => parse_secret(&Password::new().with_prompt("Secret").interact()?)?,
			};
			let mut sharer = ShamirSecretSharing::from_field_size(settings.field_bits)?;
			for share in split(&mut sharer, secret, &settings)? {
				println!("{}", ShareArg(share));
			}
		}
		Command::Combine { field_bits, shares } => {
			let shares: Vec<Share> = shares.into_iter().map(|s| s.0).collect();
			let secret = combine(field_bits.unwrap_or(conf.field_bits), &shares)?;
			println!("{}", secret);
		}
		Command::Demo { params, used } => {
			let settings = params.resolve(&conf);
			let mut sharer = ShamirSecretSharing::from_field_size(settings.field_bits)?;
			let used = used.unwrap_or(settings.threshold);
			let report = demo(&mut sharer, &mut rand::thread_rng(), &settings, used)?;
			tracing::debug!(succeeded = report.succeeded(), "demo finished");
			println!("{}", report.summary());
		}
	}
	Ok(())
}
