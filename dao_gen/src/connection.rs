use super::{
	error::{GenError, GenResult},
	pg_select_types::*,
	sql_tree::*,
};
use dao_gen_core::{SqlError, TryFromRow};
use postgres::{Client, NoTls, Statement};

/// A database connection plus the prepared catalog queries used for introspection
pub struct GenClient {
	client: Client,
	table_stmt: Statement,
	table_names_stmt: Statement,
	columns_stmt: Statement,
	indexes_stmt: Statement,
}

impl GenClient {
	/// Connects without TLS
	///
	/// A failure here is fatal to generation: nothing is introspected or written without a live connection
	pub fn connect(dsn: &str) -> GenResult<GenClient> {
		let client = Client::connect(dsn, NoTls).map_err(GenError::Connect)?;
		log::debug!("connected to database");
		Ok(GenClient::new(client)?)
	}

	pub fn new(mut client: Client) -> Result<GenClient, SqlError> {
		Ok(GenClient {
			table_stmt: client.prepare(GET_TABLE)?,
			table_names_stmt: client.prepare(GET_TABLE_NAMES)?,
			columns_stmt: client.prepare(GET_COLUMNS)?,
			indexes_stmt: client.prepare(GET_INDEXES)?,
			client,
		})
	}

	/// Reads a table with its columns and indexes. `schema = None` searches `current_schema()`
	pub fn get_table(&mut self, name: &str, schema: Option<&str>) -> GenResult<Table> {
		let table = self
			.get_table_row(name, schema)?
			.ok_or_else(|| GenError::TableNotFound(name.to_owned()))?;

		let columns = self
			.get_columns(table.oid)?
			.into_iter()
			.map(|v| Column {
				pos: v.attnum,
				name: v.name,
				type_id: v.typ_id,
				type_name: v.typ_name,
				sql_type: v.sql_type,
				elem_type_name: v.elem_name,
				not_null: v.not_null,
				has_default: v.has_default,
				generated: v.generated,
				comment: v.comment,
			})
			.collect();

		let indexes = self
			.get_indexes(table.oid)?
			.into_iter()
			.map(|v| Index {
				name: v.name,
				columns: v.columns,
				is_primary: v.is_primary,
				is_unique: v.is_unique,
			})
			.collect();

		log::debug!("read table {}.{}", table.ns_name, table.name);
		Ok(Table {
			oid: table.oid,
			schema: table.ns_name,
			name: table.name,
			comment: table.comment,
			columns,
			indexes,
		})
	}

	/// Names of ordinary and partitioned tables in `schema`, sorted
	pub fn get_table_names(&mut self, schema: Option<&str>) -> GenResult<Vec<String>> {
		Ok(self.get_table_name_rows(schema)?.into_iter().map(|v| v.name).collect())
	}
}
/// Wrappers on SQL select statements
impl GenClient {
	fn get_table_row(&mut self, name: &str, schema: Option<&str>) -> Result<Option<GetTable>, SqlError> {
		self.client
			.query_opt(&self.table_stmt, &[&name, &schema])?
			.as_ref()
			.map(TryFromRow::from_row)
			.transpose()
	}
	fn get_table_name_rows(&mut self, schema: Option<&str>) -> Result<Vec<GetTableNames>, SqlError> {
		self.client
			.query(&self.table_names_stmt, &[&schema])?
			.iter()
			.map(TryFromRow::from_row)
			.collect()
	}
	fn get_columns(&mut self, class_id: u32) -> Result<Vec<GetColumns>, SqlError> {
		self.client
			.query(&self.columns_stmt, &[&class_id])?
			.iter()
			.map(TryFromRow::from_row)
			.collect()
	}
	fn get_indexes(&mut self, class_id: u32) -> Result<Vec<GetIndexes>, SqlError> {
		self.client
			.query(&self.indexes_stmt, &[&class_id])?
			.iter()
			.map(TryFromRow::from_row)
			.collect()
	}
}
