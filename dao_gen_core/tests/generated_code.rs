//! Compiles the checked in output of dao_gen against this crate. The generated unit tests under
//! `generated/query/user_tests.rs` run as part of this binary.
mod generated;

use dao_gen_core::{insert_sql, postgres::Client, DaoError, Model, TryFromRow};
use generated::{
	model::{User, TABLE_NAME_USER},
	query::{Query, UserDo, UserQuery, Q},
};

fn assert_model<T: Model + TryFromRow>() {}

#[test]
fn model_matches_table() {
	assert_model::<User>();
	assert_eq!(TABLE_NAME_USER, "user");
	assert_eq!(<User as Model>::COLUMNS, &["id", "name", "email", "created_at"]);
	assert_eq!(<User as Model>::PRIMARY_KEY, &["id"]);
}

#[test]
fn default_query_covers_the_table() {
	assert_eq!(Q.user.table_name(), "user");
	assert_eq!(Query::default().user.columns(), UserQuery::new().columns());
	let q = Q.user;
	let sql = q.where_(q.name.like("a%")).or_(q.email.eq("a@b.c".to_owned())).limit(1).to_sql();
	assert_eq!(
		sql,
		r#"SELECT "id", "name", "email", "created_at" FROM "user" WHERE ("user"."name" LIKE $1 OR "user"."email" = $2) LIMIT 1"#
	);
}

#[test]
fn create_reads_back_every_column() {
	assert_eq!(
		insert_sql(TABLE_NAME_USER, &["name", "email"], <User as Model>::COLUMNS),
		r#"INSERT INTO "user" ("name", "email") VALUES ($1, $2) RETURNING "id", "name", "email", "created_at""#
	);
}

// the helpers talk to a server, only their signatures are checked here
#[allow(dead_code)]
fn helpers_type_check(client: &mut Client, value: &User) -> Result<(), DaoError> {
	let q = UserQuery::new();
	let _: User = q.create(client, value)?;
	let _: Vec<User> = q.where_(q.id.gt(1)).find(client)?;
	let _: Option<User> = q.query().first(client)?;
	let _: Option<User> = q.order(q.created_at.desc()).take(client)?;
	let _: Option<User> = q.query().last(client)?;
	let _: i64 = q.query().count(client)?;
	let _: u64 = q.where_(q.id.eq(1)).update(client, &[q.name.set("b".to_owned()), q.email.null()])?;
	let _: u64 = q.where_(q.id.eq(1)).delete(client)?;
	let _: UserDo = q.limit(5).offset(5);
	Ok(())
}
