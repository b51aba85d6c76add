//! Typed column handles
//!
//! A generated `<Model>Query` holds one [`Field`] per column. `T` is the Rust type of the column's values (without the `Option` of nullable columns),
//! so `query.name.eq("bob".to_owned())` only compiles for text columns.
use std::{fmt, marker::PhantomData};

use super::{
	condition::{CompareOp, Condition, Order},
	quote_ident,
	Assignment,
	Param,
	ToSql,
};

/// A column of a table, rendered as `"table"."column"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
	pub table: &'static str,
	pub name: &'static str,
}

impl Column {
	pub const fn new(table: &'static str, name: &'static str) -> Self {
		Column { table, name }
	}

	/// `"table"."column"`
	pub fn qualified(&self) -> String {
		format!("{}.{}", quote_ident(self.table), quote_ident(self.name))
	}
}

impl fmt::Display for Column {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.qualified())
	}
}

pub struct Field<T> {
	column: Column,
	_marker: PhantomData<fn() -> T>,
}

// manual impls so Field<T> is Copy without requiring T: Copy
impl<T> Clone for Field<T> {
	fn clone(&self) -> Self {
		*self
	}
}
impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Field").field(&self.column).finish()
	}
}

impl<T> Field<T> {
	pub const fn new(table: &'static str, name: &'static str) -> Self {
		Field {
			column: Column::new(table, name),
			_marker: PhantomData,
		}
	}

	pub fn column(&self) -> Column {
		self.column
	}

	pub fn name(&self) -> &'static str {
		self.column.name
	}

	pub fn is_null(&self) -> Condition {
		Condition::Null { column: self.column, negated: false }
	}

	pub fn is_not_null(&self) -> Condition {
		Condition::Null { column: self.column, negated: true }
	}

	pub fn asc(&self) -> Order {
		Order::asc(self.column)
	}

	pub fn desc(&self) -> Order {
		Order::desc(self.column)
	}

	/// `SET column = NULL`
	pub fn null(&self) -> Assignment {
		Assignment::new(self.column.name, None)
	}
}

impl<T: ToSql + Sync + Send + 'static> Field<T> {
	fn compare(&self, op: CompareOp, value: T) -> Condition {
		Condition::Compare {
			column: self.column,
			op,
			value: Box::new(value),
		}
	}

	pub fn eq(&self, value: T) -> Condition {
		self.compare(CompareOp::Eq, value)
	}

	pub fn neq(&self, value: T) -> Condition {
		self.compare(CompareOp::Neq, value)
	}

	pub fn gt(&self, value: T) -> Condition {
		self.compare(CompareOp::Gt, value)
	}

	pub fn gte(&self, value: T) -> Condition {
		self.compare(CompareOp::Gte, value)
	}

	pub fn lt(&self, value: T) -> Condition {
		self.compare(CompareOp::Lt, value)
	}

	pub fn lte(&self, value: T) -> Condition {
		self.compare(CompareOp::Lte, value)
	}

	pub fn in_<I: IntoIterator<Item = T>>(&self, values: I) -> Condition {
		Condition::In {
			column: self.column,
			values: values.into_iter().map(|v| -> Param { Box::new(v) }).collect(),
			negated: false,
		}
	}

	pub fn not_in<I: IntoIterator<Item = T>>(&self, values: I) -> Condition {
		Condition::In {
			column: self.column,
			values: values.into_iter().map(|v| -> Param { Box::new(v) }).collect(),
			negated: true,
		}
	}

	pub fn between(&self, low: T, high: T) -> Condition {
		Condition::Between {
			column: self.column,
			low: Box::new(low),
			high: Box::new(high),
		}
	}

	/// `SET column = value`
	pub fn set(&self, value: T) -> Assignment {
		Assignment::new(self.column.name, Some(Box::new(value)))
	}
}

impl Field<String> {
	pub fn like<S: Into<String>>(&self, pattern: S) -> Condition {
		self.compare(CompareOp::Like, pattern.into())
	}

	pub fn not_like<S: Into<String>>(&self, pattern: S) -> Condition {
		self.compare(CompareOp::NotLike, pattern.into())
	}

	pub fn ilike<S: Into<String>>(&self, pattern: S) -> Condition {
		self.compare(CompareOp::ILike, pattern.into())
	}
}
