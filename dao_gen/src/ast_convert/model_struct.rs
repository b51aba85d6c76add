//! Model structs, one file per table
use super::{
	super::{
		error::GenResult,
		generator::GenConfig,
		model::{ModelField, TableModel},
	},
	ident,
	parse_type,
	table_const,
};
use proc_macro2::TokenStream;
use quote::quote;

/// Renders the model struct of a table
///
/// ```ignore
/// use dao_gen_core::{Model, TryFromRow};
///
/// pub const TABLE_NAME_USER: &str = "user";
///
/// /// User mapped from table <user>
/// #[derive(Debug, Clone, PartialEq, TryFromRow)]
/// pub struct User {
/// 	#[row(column = "id")]
/// 	pub id: Option<i64>,
/// 	/// contact address
/// 	#[row(column = "email", default_on_null)]
/// 	pub email: String,
/// }
///
/// impl Model for User {
/// 	const TABLE_NAME: &'static str = TABLE_NAME_USER;
/// 	const COLUMNS: &'static [&'static str] = &["id", "email"];
/// 	const PRIMARY_KEY: &'static [&'static str] = &["id"];
/// }
/// ```
pub fn model_file(model: &TableModel, config: &GenConfig) -> GenResult<TokenStream> {
	let struct_name = ident(&model.struct_name)?;
	let table_const = table_const(model)?;
	let table_name = &model.table_name;

	let mut docs = vec![format!(
		" {} mapped from table <{}>",
		model.struct_name.trim_start_matches("r#"),
		model.table_name
	)];
	if let Some(comment) = &model.comment {
		docs.push(String::new());
		docs.extend(comment.lines().map(|l| format!(" {}", l)));
	}

	let serde_derive = if config.with_serde {
		quote! { #[derive(::serde::Serialize, ::serde::Deserialize)] }
	} else {
		quote! {}
	};
	let fields = model
		.fields
		.iter()
		.map(|f| field_to_rust(f, config))
		.collect::<GenResult<Vec<_>>>()?;
	let columns = model.fields.iter().map(|f| &f.column_name);
	let primary_key = model.primary_key().map(|f| &f.column_name);

	Ok(quote! {
		use dao_gen_core::{Model, TryFromRow};

		pub const #table_const: &str = #table_name;

		#(#[doc = #docs])*
		#[derive(Debug, Clone, PartialEq, TryFromRow)]
		#serde_derive
		pub struct #struct_name {
			#(#fields)*
		}

		impl Model for #struct_name {
			const TABLE_NAME: &'static str = #table_const;
			const COLUMNS: &'static [&'static str] = &[#(#columns),*];
			const PRIMARY_KEY: &'static [&'static str] = &[#(#primary_key),*];
		}
	})
}

fn field_to_rust(field: &ModelField, config: &GenConfig) -> GenResult<TokenStream> {
	let name = ident(&field.field_name)?;
	let typ = parse_type(&field.rust_type, &field.column_name)?;
	let column = &field.column_name;

	let mut docs: Vec<String> = Vec::new();
	if let Some(comment) = &field.comment {
		docs.extend(comment.lines().map(|l| format!(" {}", l)));
	}
	if config.field_with_type_tag {
		docs.push(format!(" type: {}", field.sql_type));
	}
	if config.field_with_index_tag && !field.indexes.is_empty() {
		docs.push(format!(" index: {}", field.indexes.join(", ")));
	}

	let row_attr = if field.default_on_null {
		quote! { #[row(column = #column, default_on_null)] }
	} else {
		quote! { #[row(column = #column)] }
	};
	let serde_attr = if config.with_serde && field.field_name != *column {
		quote! { #[serde(rename = #column)] }
	} else {
		quote! {}
	};

	Ok(quote! {
		#(#[doc = #docs])*
		#row_attr
		#serde_attr
		pub #name: #typ,
	})
}
