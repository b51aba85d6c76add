//! A simple AST of the parts of a PostgreSQL table the generator needs

/// A table (or view) and everything read about it from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	pub oid: u32,
	pub schema: String,
	pub name: String,
	pub comment: Option<String>,
	/// ordered by attnum
	pub columns: Vec<Column>,
	/// ordered by index name
	pub indexes: Vec<Index>,
}

impl Table {
	/// names of the primary key columns in key order
	pub fn primary_key(&self) -> Vec<&str> {
		self.indexes
			.iter()
			.find(|i| i.is_primary)
			.map(|i| i.columns.iter().map(String::as_str).collect())
			.unwrap_or_default()
	}

	pub fn column(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.name == name)
	}

	/// indexes that include `column`
	pub fn indexes_on<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Index> + 'a {
		self.indexes.iter().filter(move |i| i.columns.iter().any(|c| c == column))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
	pub pos: i16,
	pub name: String,
	pub type_id: u32,
	/// pg_type.typname, e.g. `int8` or `_text`
	pub type_name: String,
	/// format_type() output, e.g. `character varying(64)`
	pub sql_type: String,
	/// element typname for array columns
	pub elem_type_name: Option<String>,
	pub not_null: bool,
	pub has_default: bool,
	/// GENERATED ALWAYS AS (...) STORED columns can't be written
	pub generated: bool,
	pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
	pub name: String,
	pub columns: Vec<String>,
	pub is_primary: bool,
	pub is_unique: bool,
}
