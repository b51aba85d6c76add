//! Tests emitted next to each query module. They only check generated SQL so they run without a database
use super::{
	super::{error::GenResult, generator::GenConfig, model::TableModel},
	format_heck,
	ident,
	module_ident,
	Case::SnakeCase,
};
use dao_gen_core::{quote_ident, select_sql};
use proc_macro2::TokenStream;
use quote::quote;

/// Renders `<module>_tests.rs`
///
/// The expected SQL is computed here, at generation time, so the tests catch the runtime and the generator drifting apart
pub fn unit_test_file(model: &TableModel, _config: &GenConfig) -> GenResult<TokenStream> {
	let module = module_ident(model)?;
	let query_name = ident(&model.query_struct_name())?;
	let table = &model.table_name;
	let columns: Vec<&str> = model.fields.iter().map(|f| f.column_name.as_str()).collect();
	let select = select_sql(table, &columns);

	let test_table = format_heck(&format!("{}_query_table", model.module_name), SnakeCase)?;
	let test_select = format_heck(&format!("{}_query_select_sql", model.module_name), SnakeCase)?;

	let filter_test = match model.fields.first() {
		Some(first) => {
			let test_filter = format_heck(&format!("{}_query_filter_sql", model.module_name), SnakeCase)?;
			let field = ident(&first.field_name)?;
			let column = format!("{}.{}", quote_ident(table), quote_ident(&first.column_name));
			let expected = format!(
				"{} WHERE {} IS NOT NULL ORDER BY {} DESC LIMIT 10 OFFSET 5",
				select, column, column
			);
			quote! {
				#[test]
				fn #test_filter() {
					let q = #query_name::new();
					let sql = q
						.where_(q.#field.is_not_null())
						.order(q.#field.desc())
						.limit(10)
						.offset(5)
						.to_sql();
					assert_eq!(sql, #expected);
				}
			}
		},
		None => quote! {},
	};

	Ok(quote! {
		use super::#module::#query_name;

		#[test]
		fn #test_table() {
			let q = #query_name::new();
			let expected: &[&str] = &[#(#columns),*];
			assert_eq!(q.table_name(), #table);
			assert_eq!(q.columns(), expected);
		}

		#[test]
		fn #test_select() {
			assert_eq!(#query_name::new().query().to_sql(), #select);
		}

		#filter_test
	})
}

#[cfg(test)]
mod tests {
	use super::{
		super::tests::{checked, sync_config, user_model},
		*,
	};
	use crate::{model::FieldOpt, sql_tree::fixtures::user_table};

	#[test]
	fn expected_sql_is_embedded() {
		let config = sync_config();
		let text = checked(unit_test_file(&user_model(&config), &config).unwrap());
		assert!(text.contains("use super :: user :: UserQuery ;"));
		assert!(text.contains("fn user_query_table ()"));
		assert!(text.contains(r#""SELECT \"id\", \"name\", \"email\", \"created_at\" FROM \"user\"""#));
		assert!(text.contains(
			r#""SELECT \"id\", \"name\", \"email\", \"created_at\" FROM \"user\" WHERE \"user\".\"id\" IS NOT NULL ORDER BY \"user\".\"id\" DESC LIMIT 10 OFFSET 5""#
		));
	}

	#[test]
	fn no_fields_no_filter_test() {
		let config = sync_config();
		let opts: Vec<_> = ["id", "name", "email", "created_at"].iter().map(|c| FieldOpt::ignore(*c)).collect();
		let model = TableModel::resolve(&user_table(), None, &opts, &config).unwrap();
		let text = checked(unit_test_file(&model, &config).unwrap());
		assert!(text.contains(r#""SELECT * FROM \"user\"""#));
		assert!(!text.contains("filter_sql"));
	}
}
