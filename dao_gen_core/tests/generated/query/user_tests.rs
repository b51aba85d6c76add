// Code generated by dao_gen. DO NOT EDIT.

use super::user::UserQuery;

#[test]
fn user_query_table() {
	let q = UserQuery::new();
	let expected: &[&str] = &["id", "name", "email", "created_at"];
	assert_eq!(q.table_name(), "user");
	assert_eq!(q.columns(), expected);
}

#[test]
fn user_query_select_sql() {
	assert_eq!(
		UserQuery::new().query().to_sql(),
		"SELECT \"id\", \"name\", \"email\", \"created_at\" FROM \"user\""
	);
}

#[test]
fn user_query_filter_sql() {
	let q = UserQuery::new();
	let sql = q
		.where_(q.id.is_not_null())
		.order(q.id.desc())
		.limit(10)
		.offset(5)
		.to_sql();
	assert_eq!(
		sql,
		"SELECT \"id\", \"name\", \"email\", \"created_at\" FROM \"user\" WHERE \"user\".\"id\" IS NOT NULL ORDER BY \"user\".\"id\" DESC LIMIT 10 OFFSET 5"
	);
}
