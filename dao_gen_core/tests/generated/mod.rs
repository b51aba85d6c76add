//! Output of dao_gen for `user(id int8 pk default, name varchar not null, email text null, created_at timestamptz default)`
//! in blocking mode with coverable fields, unit tests and the default query. dao_gen checks its render against these files.
pub mod model;
pub mod query;
