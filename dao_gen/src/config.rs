//! YAML configuration lookup
//!
//! A config file `<name>.yaml` (or `.yml`) is searched for in a list of directories, first match wins.
//! Keys are matched case-insensitively and dotted keys (`database.dsn`) walk nested mappings.
use std::{
	fs,
	path::{Path, PathBuf},
};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const EXTENSIONS: [&str; 2] = ["yaml", "yml"];

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("config file `{name}` not found in {searched:?}")]
	NotFound { name: String, searched: Vec<PathBuf> },
	#[error("failed to read config file `{path}`: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config file `{path}`: {source}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},
	#[error("config file `{0}` is not a mapping")]
	NotAMapping(PathBuf),
	#[error("config key `{0}` not set")]
	MissingKey(String),
	#[error("config key `{0}` is not a string, number or boolean")]
	NotAScalar(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
	path: PathBuf,
	values: Mapping,
}

impl Settings {
	/// Loads `<name>.yaml`/`<name>.yml` from the first of `search_paths` that has one
	pub fn load<P: AsRef<Path>>(name: &str, search_paths: &[P]) -> Result<Self, ConfigError> {
		let mut searched = Vec::new();
		for dir in search_paths {
			for ext in EXTENSIONS.iter() {
				let path = dir.as_ref().join(format!("{}.{}", name, ext));
				if path.is_file() {
					return Self::from_file(path);
				}
				searched.push(path);
			}
		}
		Err(ConfigError::NotFound {
			name: name.to_owned(),
			searched,
		})
	}

	pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
		let text = match fs::read_to_string(&path) {
			Ok(text) => text,
			Err(source) => return Err(ConfigError::Read { path, source }),
		};
		Self::parse(&text, path)
	}

	/// An empty document, or any root other than a mapping, is [`ConfigError::NotAMapping`]
	fn parse(text: &str, path: PathBuf) -> Result<Self, ConfigError> {
		if text.trim().is_empty() {
			return Err(ConfigError::NotAMapping(path));
		}
		let value: Value = match serde_yaml::from_str(text) {
			Ok(value) => value,
			Err(source) => return Err(ConfigError::Parse { path, source }),
		};
		match value {
			Value::Mapping(values) => {
				log::debug!("using config file {}", path.display());
				Ok(Settings { path, values })
			},
			_ => Err(ConfigError::NotAMapping(path)),
		}
	}

	/// the file the settings were read from
	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		let mut current = &self.values;
		let mut parts = key.split('.').peekable();
		while let Some(part) = parts.next() {
			let found = lookup(current, part)?;
			if parts.peek().is_none() {
				return Some(found);
			}
			current = found.as_mapping()?;
		}
		None
	}

	/// Scalars are returned as their string form, a missing key is an error
	pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
		match self.get(key) {
			None | Some(Value::Null) => Err(ConfigError::MissingKey(key.to_owned())),
			Some(Value::String(s)) => Ok(s.clone()),
			Some(Value::Number(n)) => Ok(n.to_string()),
			Some(Value::Bool(b)) => Ok(b.to_string()),
			Some(_) => Err(ConfigError::NotAScalar(key.to_owned())),
		}
	}
}

fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
	map.iter()
		.find(|(k, _)| k.as_str().map_or(false, |k| k.eq_ignore_ascii_case(key)))
		.map(|(_, v)| v)
}
