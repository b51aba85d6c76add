// Code generated by dao_gen. DO NOT EDIT.

pub mod user;
#[cfg(test)]
mod user_tests;
pub use self::user::{UserDo, UserQuery};

/// Queries for every generated table
#[derive(Debug, Clone, Copy)]
pub struct Query {
	pub user: UserQuery,
}

impl Query {
	pub const fn new() -> Self {
		Query {
			user: UserQuery::new(),
		}
	}
}

impl Default for Query {
	fn default() -> Self {
		Self::new()
	}
}

/// Shared query over every generated table
pub static Q: Query = Query::new();
