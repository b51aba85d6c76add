use thiserror::Error;

use super::SqlError;

/// Errors returned by generated query helpers
#[derive(Error, Debug)]
pub enum DaoError {
	#[error(transparent)]
	Sql(#[from] SqlError),
	/// update and delete refuse to touch every row of a table
	#[error("refusing to {0} without a WHERE clause")]
	MissingWhereClause(&'static str),
	#[error("update called without any assignments")]
	EmptyUpdate,
}
