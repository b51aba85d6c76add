use std::fmt;

use super::{field::Column, Param, ToSql};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
	Eq,
	Neq,
	Gt,
	Gte,
	Lt,
	Lte,
	Like,
	NotLike,
	ILike,
}

impl CompareOp {
	pub fn as_sql(self) -> &'static str {
		use CompareOp::*;
		match self {
			Eq => "=",
			Neq => "<>",
			Gt => ">",
			Gte => ">=",
			Lt => "<",
			Lte => "<=",
			Like => "LIKE",
			NotLike => "NOT LIKE",
			ILike => "ILIKE",
		}
	}
}

/// A WHERE clause expression owning its parameter values
pub enum Condition {
	Compare {
		column: Column,
		op: CompareOp,
		value: Param,
	},
	In {
		column: Column,
		values: Vec<Param>,
		negated: bool,
	},
	Null {
		column: Column,
		negated: bool,
	},
	Between {
		column: Column,
		low: Param,
		high: Param,
	},
	And(Vec<Condition>),
	Or(Vec<Condition>),
	Not(Box<Condition>),
}

impl Condition {
	pub fn and(self, other: Condition) -> Condition {
		match self {
			Condition::And(mut v) => {
				v.push(other);
				Condition::And(v)
			},
			this => Condition::And(vec![this, other]),
		}
	}

	pub fn or(self, other: Condition) -> Condition {
		match self {
			Condition::Or(mut v) => {
				v.push(other);
				Condition::Or(v)
			},
			this => Condition::Or(vec![this, other]),
		}
	}

	#[allow(clippy::should_implement_trait)]
	pub fn not(self) -> Condition {
		Condition::Not(Box::new(self))
	}

	/// Appends the SQL for this condition to `out`, pushing parameters and numbering placeholders after those already in `params`
	pub fn render<'a>(&'a self, out: &mut String, params: &mut Vec<&'a (dyn ToSql + Sync)>) {
		match self {
			Condition::Compare { column, op, value } => {
				params.push(&**value);
				out.push_str(&format!("{} {} ${}", column, op.as_sql(), params.len()));
			},
			Condition::In { values, negated, .. } if values.is_empty() => {
				// `x IN ()` is not valid SQL
				out.push_str(if *negated { "TRUE" } else { "FALSE" });
			},
			Condition::In { column, values, negated } => {
				out.push_str(&column.to_string());
				out.push_str(if *negated { " NOT IN (" } else { " IN (" });
				for (i, v) in values.iter().enumerate() {
					if i > 0 {
						out.push_str(", ");
					}
					params.push(&**v);
					out.push_str(&format!("${}", params.len()));
				}
				out.push(')');
			},
			Condition::Null { column, negated } => {
				out.push_str(&column.to_string());
				out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
			},
			Condition::Between { column, low, high } => {
				params.push(&**low);
				let low_idx = params.len();
				params.push(&**high);
				out.push_str(&format!("{} BETWEEN ${} AND ${}", column, low_idx, params.len()));
			},
			Condition::And(conds) => render_joined(conds, " AND ", "TRUE", out, params),
			Condition::Or(conds) => render_joined(conds, " OR ", "FALSE", out, params),
			Condition::Not(inner) => {
				out.push_str("NOT (");
				inner.render(out, params);
				out.push(')');
			},
		}
	}
}

fn render_joined<'a>(
	conds: &'a [Condition],
	sep: &str,
	empty: &str,
	out: &mut String,
	params: &mut Vec<&'a (dyn ToSql + Sync)>,
) {
	match conds {
		[] => out.push_str(empty),
		[only] => only.render(out, params),
		_ => {
			out.push('(');
			for (i, c) in conds.iter().enumerate() {
				if i > 0 {
					out.push_str(sep);
				}
				c.render(out, params);
			}
			out.push(')');
		},
	}
}

impl fmt::Debug for Condition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut text = String::new();
		let mut params = Vec::new();
		self.render(&mut text, &mut params);
		f.debug_struct("Condition")
			.field("sql", &text)
			.field("params", &params.len())
			.finish()
	}
}

/// An ORDER BY term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
	pub column: Column,
	pub descending: bool,
}

impl Order {
	pub const fn asc(column: Column) -> Self {
		Order { column, descending: false }
	}

	pub const fn desc(column: Column) -> Self {
		Order { column, descending: true }
	}

	pub fn to_sql(&self) -> String {
		if self.descending {
			format!("{} DESC", self.column)
		} else {
			format!("{} ASC", self.column)
		}
	}
}
