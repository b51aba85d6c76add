#![forbid(unsafe_code)]
//! Helper types and functions for code generated by dao_gen
//!
//! Provides the [`TryFromRow`] trait which converts from a [`tokio_postgres::Row`] and the [`Model`] trait implemented by every generated model.
//!
//! The query side is built from typed column handles ([`field::Field`]) that produce [`Condition`]s, [`Order`]s and [`Assignment`]s,
//! which a [`QueryBuilder`] renders into SQL with `$n` placeholders.
//!
//! Reexports [`tokio_postgres::Error`] as SqlError and [`tokio_postgres::Row`]

//reexports
pub use dao_gen_derive::*;
pub use postgres_types::{FromSql, ToSql};
pub use tokio_postgres::{self, row::Row, Error as SqlError};

#[cfg(feature = "sync")]
pub use postgres;
#[cfg(feature = "chrono")]
pub use chrono;
#[cfg(feature = "rust_decimal")]
pub use rust_decimal;
#[cfg(feature = "serde_json")]
pub use serde_json;
#[cfg(feature = "uuid")]
pub use uuid;

/// Implementation of `TryFromRow` for various types
mod try_from_row;
pub use try_from_row::TryFromRow;

pub mod field;

mod condition;
pub use condition::{CompareOp, Condition, Order};

mod builder;
pub use builder::{insert_sql, select_sql, Assignment, QueryBuilder, Sql};

mod error;
pub use error::DaoError;

/// A boxed query parameter owned by a [`Condition`] or [`Assignment`]
pub type Param = Box<dyn ToSql + Sync + Send>;

/// Implemented by every generated model struct
pub trait Model: TryFromRow {
	/// name of the table the model maps
	const TABLE_NAME: &'static str;
	/// every mapped column, in table order
	const COLUMNS: &'static [&'static str];
	/// primary key columns, empty if the table has none
	const PRIMARY_KEY: &'static [&'static str];
}

/// Quotes an SQL identifier, doubling any embedded quote
pub fn quote_ident(name: &str) -> String {
	let mut ret = String::with_capacity(name.len() + 2);
	ret.push('"');
	for c in name.chars() {
		if c == '"' {
			ret.push('"');
		}
		ret.push(c);
	}
	ret.push('"');
	ret
}
