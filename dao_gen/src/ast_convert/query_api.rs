//! Typed query helpers for one table
use super::{
	super::{error::GenResult, generator::GenConfig, model::TableModel},
	ident,
	parse_path,
	parse_type,
	ClientFlavor,
};
use proc_macro2::TokenStream;
use quote::quote;

/// Renders the query module of a table: a `<Model>Query` with one typed field per column and the `<Model>Do` it builds
///
/// ```ignore
/// #[derive(Debug, Clone, Copy)]
/// pub struct UserQuery {
/// 	pub id: Field<i64>,
/// 	pub name: Field<String>,
/// }
///
/// // q.where_(q.name.like("a%")).order(q.id.desc()).limit(10).find(&mut client)?
/// pub struct UserDo {
/// 	builder: QueryBuilder,
/// }
///
/// impl UserDo {
/// 	// client is &mut Client when sync and &Client when async, mirroring postgres and tokio-postgres
/// 	pub async fn find(&self, client: &Client) -> Result<Vec<User>, DaoError> {
/// 		/* implementation */
/// 	}
/// }
/// ```
pub fn query_file(model: &TableModel, config: &GenConfig) -> GenResult<TokenStream> {
	let ClientFlavor {
		opt_async,
		opt_await,
		client_type,
	} = ClientFlavor::new(config);
	let model_path = parse_path(&config.model_module_path)?;
	let struct_name = ident(&model.struct_name)?;
	let query_name = ident(&model.query_struct_name())?;
	let do_name = ident(&model.do_struct_name())?;

	let mut field_names = Vec::with_capacity(model.fields.len());
	let mut field_types = Vec::with_capacity(model.fields.len());
	let mut columns = Vec::with_capacity(model.fields.len());
	for f in &model.fields {
		field_names.push(ident(&f.field_name)?);
		field_types.push(parse_type(&f.inner_type, &f.column_name)?);
		columns.push(&f.column_name);
	}

	let insert_pushes = model
		.fields
		.iter()
		.filter(|f| !f.generated)
		.map(|f| -> GenResult<TokenStream> {
			let name = ident(&f.field_name)?;
			let column = &f.column_name;
			Ok(if f.insert_when_some() {
				quote! {
					if value.#name.is_some() {
						columns.push(#column);
						params.push(&value.#name);
					}
				}
			} else {
				quote! {
					columns.push(#column);
					params.push(&value.#name);
				}
			})
		})
		.collect::<GenResult<Vec<_>>>()?;

	let order_key = model
		.order_key()
		.into_iter()
		.map(|f| ident(&f.field_name))
		.collect::<GenResult<Vec<_>>>()?;

	let query_doc = format!(" Typed columns of table <{}>", model.table_name);
	let do_doc = format!(" A query against table <{}> being built", model.table_name);

	Ok(quote! {
		#![allow(unused_imports, unused_mut)]
		use dao_gen_core::{
			field::Field, insert_sql, Assignment, Condition, DaoError, Model, Order, QueryBuilder, ToSql, TryFromRow,
		};
		use #model_path::#struct_name;

		#[doc = #query_doc]
		#[derive(Debug, Clone, Copy)]
		pub struct #query_name {
			#(pub #field_names: Field<#field_types>,)*
		}

		impl #query_name {
			pub const fn new() -> Self {
				#query_name {
					#(#field_names: Field::new(<#struct_name as Model>::TABLE_NAME, #columns),)*
				}
			}

			pub fn table_name(&self) -> &'static str {
				<#struct_name as Model>::TABLE_NAME
			}

			pub fn columns(&self) -> &'static [&'static str] {
				<#struct_name as Model>::COLUMNS
			}

			/// an unfiltered query over the whole table
			pub fn query(&self) -> #do_name {
				#do_name {
					builder: QueryBuilder::new(<#struct_name as Model>::TABLE_NAME, <#struct_name as Model>::COLUMNS),
				}
			}

			pub fn where_(&self, cond: Condition) -> #do_name {
				self.query().where_(cond)
			}

			pub fn order(&self, order: Order) -> #do_name {
				self.query().order(order)
			}

			pub fn limit(&self, limit: i64) -> #do_name {
				self.query().limit(limit)
			}

			/// Inserts `value` and returns the stored row, database defaults included
			pub #opt_async fn create(&self, client: #client_type, value: &#struct_name) -> Result<#struct_name, DaoError> {
				let mut columns: Vec<&'static str> = Vec::new();
				let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();
				#(#insert_pushes)*
				let sql = insert_sql(<#struct_name as Model>::TABLE_NAME, &columns, <#struct_name as Model>::COLUMNS);
				let row = client.query_one(sql.as_str(), &params)#opt_await?;
				Ok(#struct_name::from_row(&row)?)
			}
		}

		impl Default for #query_name {
			fn default() -> Self {
				Self::new()
			}
		}

		#[doc = #do_doc]
		pub struct #do_name {
			builder: QueryBuilder,
		}

		impl #do_name {
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

			pub #opt_async fn find(&self, client: #client_type) -> Result<Vec<#struct_name>, DaoError> {
				let sql = self.builder.build_select();
				let rows = client.query(sql.text(), sql.params())#opt_await?;
				Ok(rows.iter().map(#struct_name::from_row).collect::<Result<Vec<_>, _>>()?)
			}

			/// first row by primary key
			pub #opt_async fn first(mut self, client: #client_type) -> Result<Option<#struct_name>, DaoError> {
				#(self.builder.order(#query_name::new().#order_key.asc());)*
				self.take(client)#opt_await
			}

			/// any one row, in whatever order was given
			pub #opt_async fn take(mut self, client: #client_type) -> Result<Option<#struct_name>, DaoError> {
				self.builder.limit(1);
				let sql = self.builder.build_select();
				let row = client.query_opt(sql.text(), sql.params())#opt_await?;
				Ok(row.as_ref().map(#struct_name::from_row).transpose()?)
			}

			/// last row by primary key
			pub #opt_async fn last(mut self, client: #client_type) -> Result<Option<#struct_name>, DaoError> {
				#(self.builder.order(#query_name::new().#order_key.desc());)*
				self.take(client)#opt_await
			}

			pub #opt_async fn count(&self, client: #client_type) -> Result<i64, DaoError> {
				let sql = self.builder.build_count();
				let row = client.query_one(sql.text(), sql.params())#opt_await?;
				Ok(row.try_get::<_, i64>(0)?)
			}

			/// Errors without a where clause
			pub #opt_async fn update(&self, client: #client_type, assignments: &[Assignment]) -> Result<u64, DaoError> {
				let sql = self.builder.build_update(assignments)?;
				Ok(client.execute(sql.text(), sql.params())#opt_await?)
			}

			/// Errors without a where clause
			pub #opt_async fn delete(&self, client: #client_type) -> Result<u64, DaoError> {
				let sql = self.builder.build_delete()?;
				Ok(client.execute(sql.text(), sql.params())#opt_await?)
			}
		}
	})
}

#[cfg(test)]
mod tests {
	use super::{
		super::tests::{checked, sync_config, user_model},
		*,
	};
	use crate::{
		model::FieldOpt,
		sql_tree::{fixtures::user_table, Column},
	};

	#[test]
	fn sync_helpers() {
		let config = sync_config();
		let text = checked(query_file(&user_model(&config), &config).unwrap());
		assert!(text.contains("use super :: super :: model :: User ;"));
		assert!(text.contains("pub id : Field < i64 >"));
		assert!(text.contains("pub email : Field < String >"));
		assert!(text.contains("pub fn find (& self , client : & mut :: dao_gen_core :: postgres :: Client)"));
		assert!(!text.contains("async"));
		assert!(!text.contains(". await"));
		// ordering falls on the primary key
		assert!(text.contains("UserQuery :: new () . id . asc ()"));
		assert!(text.contains("UserQuery :: new () . id . desc ()"));
	}

	#[test]
	fn async_helpers() {
		let config = GenConfig::default();
		let text = checked(query_file(&user_model(&config), &config).unwrap());
		assert!(text.contains("pub async fn find (& self , client : & :: dao_gen_core :: tokio_postgres :: Client)"));
		assert!(text.contains("pub async fn create"));
		assert!(text.contains(". await ?"));
	}

	#[test]
	fn insert_skips_defaults_and_generated() {
		let mut table = user_table();
		table.columns.push(Column {
			generated: true,
			..crate::sql_tree::fixtures::column(5, "search", "text", false, false)
		});
		let config = sync_config();
		let model = TableModel::resolve(&table, None, &[], &config).unwrap();
		let text = checked(query_file(&model, &config).unwrap());
		// coverable defaults only go in when set
		assert!(text.contains("if value . id . is_some ()"));
		assert!(text.contains("if value . created_at . is_some ()"));
		assert!(!text.contains("value . search"));
		assert!(text.contains("pub search : Field < String >"));
	}

	#[test]
	fn overrides_reach_field_types() {
		let config = sync_config();
		let opts = [FieldOpt::field_type("id", "u64"), FieldOpt::rename("name", "type")];
		let model = TableModel::resolve(&user_table(), None, &opts, &config).unwrap();
		let text = checked(query_file(&model, &config).unwrap());
		assert!(text.contains("pub id : Field < u64 >"));
		assert!(text.contains("pub r#type : Field < String >"));
	}

	#[test]
	fn create_without_columns_reads_back_the_row() {
		let config = sync_config();
		let opts: Vec<_> = ["id", "name", "email", "created_at"].iter().map(|c| FieldOpt::ignore(*c)).collect();
		let model = TableModel::resolve(&user_table(), None, &opts, &config).unwrap();
		let text = checked(query_file(&model, &config).unwrap());
		// insert_sql returns `*` for the empty column list, query_one always gets its row
		assert!(text.contains("pub fn create"));
		assert!(text.contains("insert_sql (< User as Model > :: TABLE_NAME , & columns , < User as Model > :: COLUMNS)"));
		assert_eq!(
			dao_gen_core::insert_sql("user", &[], &[]),
			r#"INSERT INTO "user" DEFAULT VALUES RETURNING *"#
		);
	}

	#[test]
	fn custom_model_path() {
		let config = GenConfig {
			model_module_path: "crate::dao::model".to_owned(),
			..sync_config()
		};
		let text = checked(query_file(&user_model(&config), &config).unwrap());
		assert!(text.contains("use crate :: dao :: model :: User ;"));

		let config = GenConfig {
			model_module_path: "not a path".to_owned(),
			..sync_config()
		};
		assert!(query_file(&user_model(&config), &config).is_err());
	}
}
