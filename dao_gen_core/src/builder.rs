use super::{
	condition::{Condition, Order},
	quote_ident,
	DaoError,
	Param,
	ToSql,
};

/// Rendered SQL text and the parameters its placeholders refer to
pub struct Sql<'a> {
	text: String,
	params: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Sql<'a> {
	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn params(&self) -> &[&'a (dyn ToSql + Sync)] {
		&self.params
	}
}

/// One `column = value` of an UPDATE. A `None` value sets NULL
pub struct Assignment {
	column: &'static str,
	value: Option<Param>,
}

impl Assignment {
	pub fn new(column: &'static str, value: Option<Param>) -> Self {
		Assignment { column, value }
	}

	pub fn column(&self) -> &'static str {
		self.column
	}
}

fn column_list(columns: &[&str]) -> String {
	columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(", ")
}

/// `SELECT "a", "b" FROM "table"`
pub fn select_sql(table: &str, columns: &[&str]) -> String {
	let cols = if columns.is_empty() {
		"*".to_owned()
	} else {
		column_list(columns)
	};
	format!("SELECT {} FROM {}", cols, quote_ident(table))
}

/// `INSERT INTO "table" ("a", "b") VALUES ($1, $2) RETURNING ...`
///
/// An empty `columns` inserts `DEFAULT VALUES` and an empty `returning` returns `*`, so there is always a row to read back
pub fn insert_sql(table: &str, columns: &[&str], returning: &[&str]) -> String {
	let mut ret = format!("INSERT INTO {}", quote_ident(table));
	if columns.is_empty() {
		ret += " DEFAULT VALUES";
	} else {
		let placeholders = (1..=columns.len())
			.map(|i| format!("${}", i))
			.collect::<Vec<_>>()
			.join(", ");
		ret += &format!(" ({}) VALUES ({})", column_list(columns), placeholders);
	}
	ret += " RETURNING ";
	if returning.is_empty() {
		ret.push('*');
	} else {
		ret += &column_list(returning);
	}
	ret
}

/// Accumulates the filter, ordering and paging of a query against one table
pub struct QueryBuilder {
	table: &'static str,
	columns: &'static [&'static str],
	filter: Option<Condition>,
	orders: Vec<Order>,
	limit: Option<i64>,
	offset: Option<i64>,
}

impl QueryBuilder {
	pub fn new(table: &'static str, columns: &'static [&'static str]) -> Self {
		QueryBuilder {
			table,
			columns,
			filter: None,
			orders: Vec::new(),
			limit: None,
			offset: None,
		}
	}

	pub fn table(&self) -> &'static str {
		self.table
	}

	/// ANDs `cond` onto the current filter
	pub fn and_where(&mut self, cond: Condition) {
		self.filter = Some(match self.filter.take() {
			None => cond,
			Some(existing) => existing.and(cond),
		});
	}

	/// ORs `cond` onto the current filter
	pub fn or_where(&mut self, cond: Condition) {
		self.filter = Some(match self.filter.take() {
			None => cond,
			Some(existing) => existing.or(cond),
		});
	}

	pub fn order(&mut self, order: Order) {
		self.orders.push(order);
	}

	pub fn has_order(&self) -> bool {
		!self.orders.is_empty()
	}

	pub fn limit(&mut self, limit: i64) {
		self.limit = Some(limit);
	}

	pub fn offset(&mut self, offset: i64) {
		self.offset = Some(offset);
	}

	fn push_where<'a>(&'a self, text: &mut String, params: &mut Vec<&'a (dyn ToSql + Sync)>) {
		if let Some(filter) = &self.filter {
			text.push_str(" WHERE ");
			filter.render(text, params);
		}
	}

	pub fn build_select(&self) -> Sql<'_> {
		let mut text = select_sql(self.table, self.columns);
		let mut params = Vec::new();
		self.push_where(&mut text, &mut params);
		if !self.orders.is_empty() {
			let orders: Vec<String> = self.orders.iter().map(Order::to_sql).collect();
			text.push_str(" ORDER BY ");
			text.push_str(&orders.join(", "));
		}
		if let Some(limit) = self.limit {
			text.push_str(&format!(" LIMIT {}", limit));
		}
		if let Some(offset) = self.offset {
			text.push_str(&format!(" OFFSET {}", offset));
		}
		Sql { text, params }
	}

	/// ordering and paging are ignored
	pub fn build_count(&self) -> Sql<'_> {
		let mut text = format!("SELECT COUNT(*) FROM {}", quote_ident(self.table));
		let mut params = Vec::new();
		self.push_where(&mut text, &mut params);
		Sql { text, params }
	}

	pub fn build_update<'a>(&'a self, assignments: &'a [Assignment]) -> Result<Sql<'a>, DaoError> {
		if self.filter.is_none() {
			return Err(DaoError::MissingWhereClause("update"));
		}
		if assignments.is_empty() {
			return Err(DaoError::EmptyUpdate);
		}
		let mut params: Vec<&'a (dyn ToSql + Sync)> = Vec::new();
		let mut sets = Vec::with_capacity(assignments.len());
		for a in assignments {
			match &a.value {
				Some(v) => {
					params.push(&**v);
					sets.push(format!("{} = ${}", quote_ident(a.column), params.len()));
				},
				None => sets.push(format!("{} = NULL", quote_ident(a.column))),
			}
		}
		let mut text = format!("UPDATE {} SET {}", quote_ident(self.table), sets.join(", "));
		self.push_where(&mut text, &mut params);
		Ok(Sql { text, params })
	}

	pub fn build_delete(&self) -> Result<Sql<'_>, DaoError> {
		if self.filter.is_none() {
			return Err(DaoError::MissingWhereClause("delete"));
		}
		let mut text = format!("DELETE FROM {}", quote_ident(self.table));
		let mut params = Vec::new();
		self.push_where(&mut text, &mut params);
		Ok(Sql { text, params })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::Field;

	const COLUMNS: &[&str] = &["id", "name", "age"];
	const ID: Field<i64> = Field::new("user", "id");
	const NAME: Field<String> = Field::new("user", "name");
	const AGE: Field<i32> = Field::new("user", "age");

	#[test]
	fn select_with_everything() {
		let mut b = QueryBuilder::new("user", COLUMNS);
		b.and_where(AGE.gte(18));
		b.or_where(NAME.like("adm%"));
		b.order(ID.desc());
		b.limit(10);
		b.offset(20);
		let sql = b.build_select();
		assert_eq!(
			sql.text(),
			r#"SELECT "id", "name", "age" FROM "user" WHERE ("user"."age" >= $1 OR "user"."name" LIKE $2) ORDER BY "user"."id" DESC LIMIT 10 OFFSET 20"#
		);
		assert_eq!(sql.params().len(), 2);
	}

	#[test]
	fn select_without_filter() {
		let b = QueryBuilder::new("user", COLUMNS);
		assert_eq!(b.build_select().text(), r#"SELECT "id", "name", "age" FROM "user""#);
		assert_eq!(select_sql("user", &[]), r#"SELECT * FROM "user""#);
	}

	#[test]
	fn count_ignores_paging() {
		let mut b = QueryBuilder::new("user", COLUMNS);
		b.and_where(ID.gt(5));
		b.limit(1);
		assert_eq!(b.build_count().text(), r#"SELECT COUNT(*) FROM "user" WHERE "user"."id" > $1"#);
	}

	#[test]
	fn update_numbers_sets_before_where() {
		let mut b = QueryBuilder::new("user", COLUMNS);
		b.and_where(ID.eq(7));
		let sets = [NAME.set("x".to_owned()), AGE.null()];
		let sql = b.build_update(&sets).unwrap();
		assert_eq!(
			sql.text(),
			r#"UPDATE "user" SET "name" = $1, "age" = NULL WHERE "user"."id" = $2"#
		);
		assert_eq!(sql.params().len(), 2);
	}

	#[test]
	fn update_and_delete_need_where() {
		let b = QueryBuilder::new("user", COLUMNS);
		assert!(matches!(
			b.build_update(&[NAME.set("x".to_owned())]),
			Err(DaoError::MissingWhereClause("update"))
		));
		assert!(matches!(b.build_delete(), Err(DaoError::MissingWhereClause("delete"))));

		let mut b = QueryBuilder::new("user", COLUMNS);
		b.and_where(ID.eq(1));
		assert!(matches!(b.build_update(&[]), Err(DaoError::EmptyUpdate)));
		assert_eq!(b.build_delete().unwrap().text(), r#"DELETE FROM "user" WHERE "user"."id" = $1"#);
	}

	#[test]
	fn insert_forms() {
		assert_eq!(
			insert_sql("user", &["name", "age"], COLUMNS),
			r#"INSERT INTO "user" ("name", "age") VALUES ($1, $2) RETURNING "id", "name", "age""#
		);
		assert_eq!(
			insert_sql("user", &[], &["id"]),
			r#"INSERT INTO "user" DEFAULT VALUES RETURNING "id""#
		);
	}

	#[test]
	fn insert_without_mapped_columns_returns_star() {
		assert_eq!(insert_sql("audit", &[], &[]), r#"INSERT INTO "audit" DEFAULT VALUES RETURNING *"#);
		assert_eq!(
			insert_sql("audit", &["at"], &[]),
			r#"INSERT INTO "audit" ("at") VALUES ($1) RETURNING *"#
		);
	}
}
