// Code generated by dao_gen. DO NOT EDIT.

pub mod user;
pub use self::user::{User, TABLE_NAME_USER};
