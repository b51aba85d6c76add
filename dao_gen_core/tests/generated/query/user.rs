// Code generated by dao_gen. DO NOT EDIT.

#![allow(unused_imports, unused_mut)]
use dao_gen_core::{
	field::Field, insert_sql, Assignment, Condition, DaoError, Model, Order, QueryBuilder, ToSql, TryFromRow,
};
use super::super::model::User;

/// Typed columns of table <user>
#[derive(Debug, Clone, Copy)]
pub struct UserQuery {
	pub id: Field<i64>,
	pub name: Field<String>,
	pub email: Field<String>,
	pub created_at: Field<dao_gen_core::chrono::DateTime<dao_gen_core::chrono::Utc>>,
}

impl UserQuery {
	pub const fn new() -> Self {
		UserQuery {
			id: Field::new(<User as Model>::TABLE_NAME, "id"),
			name: Field::new(<User as Model>::TABLE_NAME, "name"),
			email: Field::new(<User as Model>::TABLE_NAME, "email"),
			created_at: Field::new(<User as Model>::TABLE_NAME, "created_at"),
		}
	}

	pub fn table_name(&self) -> &'static str {
		<User as Model>::TABLE_NAME
	}

	pub fn columns(&self) -> &'static [&'static str] {
		<User as Model>::COLUMNS
	}

	/// an unfiltered query over the whole table
	pub fn query(&self) -> UserDo {
		UserDo {
			builder: QueryBuilder::new(<User as Model>::TABLE_NAME, <User as Model>::COLUMNS),
		}
	}

	pub fn where_(&self, cond: Condition) -> UserDo {
		self.query().where_(cond)
	}

	pub fn order(&self, order: Order) -> UserDo {
		self.query().order(order)
	}

	pub fn limit(&self, limit: i64) -> UserDo {
		self.query().limit(limit)
	}

	/// Inserts `value` and returns the stored row, database defaults included
	pub fn create(&self, client: &mut ::dao_gen_core::postgres::Client, value: &User) -> Result<User, DaoError> {
		let mut columns: Vec<&'static str> = Vec::new();
		let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();
		if value.id.is_some() {
			columns.push("id");
			params.push(&value.id);
		}
		columns.push("name");
		params.push(&value.name);
		columns.push("email");
		params.push(&value.email);
		if value.created_at.is_some() {
			columns.push("created_at");
			params.push(&value.created_at);
		}
		let sql = insert_sql(<User as Model>::TABLE_NAME, &columns, <User as Model>::COLUMNS);
		let row = client.query_one(sql.as_str(), &params)?;
		Ok(User::from_row(&row)?)
	}
}

impl Default for UserQuery {
	fn default() -> Self {
		Self::new()
	}
}

/// A query against table <user> being built
pub struct UserDo {
	builder: QueryBuilder,
}

impl UserDo {
	pub fn where_(mut self, cond: Condition) -> Self {
		self.builder.and_where(cond);
		self
	}

	pub fn or_(mut self, cond: Condition) -> Self {
		self.builder.or_where(cond);
		self
	}

	pub fn order(mut self, order: Order) -> Self {
		self.builder.order(order);
		self
	}

	pub fn limit(mut self, limit: i64) -> Self {
		self.builder.limit(limit);
		self
	}

	pub fn offset(mut self, offset: i64) -> Self {
		self.builder.offset(offset);
		self
	}

	/// the SELECT this query runs
	pub fn to_sql(&self) -> String {
		self.builder.build_select().text().to_owned()
	}

	pub fn find(&self, client: &mut ::dao_gen_core::postgres::Client) -> Result<Vec<User>, DaoError> {
		let sql = self.builder.build_select();
		let rows = client.query(sql.text(), sql.params())?;
		Ok(rows.iter().map(User::from_row).collect::<Result<Vec<_>, _>>()?)
	}

	/// first row by primary key
	pub fn first(mut self, client: &mut ::dao_gen_core::postgres::Client) -> Result<Option<User>, DaoError> {
		self.builder.order(UserQuery::new().id.asc());
		self.take(client)
	}

	/// any one row, in whatever order was given
	pub fn take(mut self, client: &mut ::dao_gen_core::postgres::Client) -> Result<Option<User>, DaoError> {
		self.builder.limit(1);
		let sql = self.builder.build_select();
		let row = client.query_opt(sql.text(), sql.params())?;
		Ok(row.as_ref().map(User::from_row).transpose()?)
	}

	/// last row by primary key
	pub fn last(mut self, client: &mut ::dao_gen_core::postgres::Client) -> Result<Option<User>, DaoError> {
		self.builder.order(UserQuery::new().id.desc());
		self.take(client)
	}

	pub fn count(&self, client: &mut ::dao_gen_core::postgres::Client) -> Result<i64, DaoError> {
		let sql = self.builder.build_count();
		let row = client.query_one(sql.text(), sql.params())?;
		Ok(row.try_get::<_, i64>(0)?)
	}

	/// Errors without a where clause
	pub fn update(&self, client: &mut ::dao_gen_core::postgres::Client, assignments: &[Assignment]) -> Result<u64, DaoError> {
		let sql = self.builder.build_update(assignments)?;
		Ok(client.execute(sql.text(), sql.params())?)
	}

	/// Errors without a where clause
	pub fn delete(&self, client: &mut ::dao_gen_core::postgres::Client) -> Result<u64, DaoError> {
		let sql = self.builder.build_delete()?;
		Ok(client.execute(sql.text(), sql.params())?)
	}
}
