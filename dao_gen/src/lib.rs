//! Connects to a PostgreSQL database and generates typed model structs and query helpers for its tables
//!
//! The generated code depends on [`dao_gen_core`] at runtime.
//!
//! ```no_run
//! use dao_gen::{run, GenConfig, Mode, Opt};
//! use structopt::StructOpt;
//!
//! fn main() -> anyhow::Result<()> {
//! 	let opt = Opt::from_args();
//! 	let config = GenConfig {
//! 		mode: Mode::WITHOUT_CONTEXT | Mode::WITH_DEFAULT_QUERY,
//! 		..GenConfig::default()
//! 	};
//! 	run(&opt, config, |g| {
//! 		let user = g.generate_model("user", &[])?;
//! 		g.apply_basic(vec![user]);
//! 		Ok(())
//! 	})?;
//! 	Ok(())
//! }
//! ```

pub mod ast_convert;
pub mod config;
pub mod connection;
pub mod error;
pub mod generator;
pub mod model;
mod pg_select_types;
pub mod sql_tree;

pub use config::{ConfigError, Settings};
pub use connection::GenClient;
pub use error::{GenError, GenResult};
pub use generator::{GenConfig, GeneratedFile, Generator, Mode};
pub use model::{FieldOpt, NamingStrategy, TableModel};

use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "dao_gen")]
/// Generates model structs and query helpers for PostgreSQL tables
pub struct Opt {
	/// Directory searched for the config file, may be repeated. Searched in order
	#[structopt(long = "config-dir", default_value = "../config/", parse(from_os_str), number_of_values = 1)]
	pub config_dirs: Vec<PathBuf>,

	/// Config file name without extension, `.yaml` and `.yml` are tried
	#[structopt(long = "config-name", default_value = "config")]
	pub config_name: String,

	/// Config key holding the connection string
	#[structopt(long = "dsn-key", default_value = "DSN_LOCAL")]
	pub dsn_key: String,

	/// Write generated code as is instead of running it through rustfmt
	#[structopt(long = "no-format")]
	pub no_format: bool,

	/// Activate debug logging
	#[structopt(short, long)]
	pub debug: bool,
}

impl Opt {
	/// Sets up env_logger, `RUST_LOG` overrides the default level
	pub fn init_logger(&self) {
		let level = if self.debug { "debug" } else { "info" };
		let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).try_init();
	}
}

/// Loads the config, connects, lets `register` pick the models and writes them
///
/// Nothing is generated and `register` is not called unless both the config and the connection succeed
pub fn run<F>(opt: &Opt, mut config: GenConfig, register: F) -> GenResult<Vec<PathBuf>>
where
	F: FnOnce(&mut Generator) -> GenResult<()>,
{
	let settings = Settings::load(&opt.config_name, &opt.config_dirs)?;
	log::debug!("loaded {}", settings.path().display());
	let dsn = settings.get_string(&opt.dsn_key)?;
	let client = GenClient::connect(&dsn)?;

	if opt.no_format {
		config.format = false;
	}
	let mut generator = Generator::new(config);
	generator.use_db(client);
	register(&mut generator)?;
	generator.execute()
}

/// Runs `value` through rustfmt, returning it unchanged if rustfmt is missing or fails
pub fn format_rust(value: &str) -> String {
	use std::{
		io::Write,
		process::{Command, Stdio},
	};
	let mut proc = match Command::new("rustfmt")
		.arg("--emit=stdout")
		.arg("--edition=2021")
		.args(["--config", "hard_tabs=true"])
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
	{
		Ok(proc) => proc,
		Err(e) => {
			log::warn!("failed to spawn rustfmt, output is unformatted: {}", e);
			return value.to_string();
		},
	};
	if let Some(stdin) = proc.stdin.as_mut() {
		if let Err(e) = stdin.write_all(value.as_bytes()) {
			log::warn!("failed to write to rustfmt: {}", e);
		}
	}
	match proc.wait_with_output() {
		Ok(output) => {
			if !output.stderr.is_empty() {
				log::warn!("{}", String::from_utf8_lossy(&output.stderr));
			}
			if output.status.success() {
				match String::from_utf8(output.stdout) {
					Ok(formatted) => return formatted,
					Err(e) => log::warn!("rustfmt output is not utf-8: {}", e),
				}
			} else {
				log::warn!("rustfmt exited with {:?}", output.status.code());
			}
		},
		Err(e) => {
			log::warn!("failed waiting on rustfmt: {}", e);
		},
	}
	value.to_string()
}
