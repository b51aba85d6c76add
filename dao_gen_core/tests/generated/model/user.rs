// Code generated by dao_gen. DO NOT EDIT.

use dao_gen_core::{Model, TryFromRow};

pub const TABLE_NAME_USER: &str = "user";

/// User mapped from table <user>
#[derive(Debug, Clone, PartialEq, TryFromRow)]
pub struct User {
	#[row(column = "id")]
	pub id: Option<i64>,
	#[row(column = "name")]
	pub name: String,
	/// contact address
	#[row(column = "email", default_on_null)]
	pub email: String,
	#[row(column = "created_at")]
	pub created_at: Option<dao_gen_core::chrono::DateTime<dao_gen_core::chrono::Utc>>,
}

impl Model for User {
	const TABLE_NAME: &'static str = TABLE_NAME_USER;
	const COLUMNS: &'static [&'static str] = &["id", "name", "email", "created_at"];
	const PRIMARY_KEY: &'static [&'static str] = &["id"];
}
