use std::path::PathBuf;

use dao_gen_core::SqlError;
use thiserror::Error;

use super::config::ConfigError;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Error, Debug)]
pub enum GenError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("failed to connect to database: {0}")]
	Connect(#[source] SqlError),
	#[error(transparent)]
	Sql(#[from] SqlError),
	#[error("no database connection, call use_db before generating models")]
	NoDatabase,
	#[error("table `{0}` not found")]
	TableNotFound(String),
	#[error("table `{table}` has no column `{column}`")]
	UnknownColumn { table: String, column: String },
	#[error("model `{model}` has more than one field named `{field}`")]
	DuplicateField { model: String, field: String },
	#[error("tables `{first}` and `{second}` both map to module `{module}`, rename one with generate_model_as")]
	DuplicateModule { module: String, first: String, second: String },
	#[error("more than one generated file would be written to `{0}`")]
	FileCollision(PathBuf),
	#[error("`{0}` can't be turned into a Rust identifier")]
	InvalidIdent(String),
	#[error("invalid Rust type `{ty}` for column `{column}`: {source}")]
	InvalidType {
		ty: String,
		column: String,
		#[source]
		source: syn::Error,
	},
	#[error("failed to write `{path}`: {source}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}
