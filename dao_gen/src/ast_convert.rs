//! Turn resolved table models into Rust syntax trees with quote
//!
//! Every generated file is rendered to a [`TokenStream`] here and formatted by the caller

mod model_struct;
mod query_api;
mod unit_test;

pub use model_struct::model_file;
pub use query_api::query_file;
pub use unit_test::unit_test_file;

use super::{
	error::{GenError, GenResult},
	generator::{GenConfig, Mode},
	model::{rust_ident, TableModel},
};
use heck::{CamelCase, ShoutySnakeCase, SnakeCase};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Path, Type};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Case {
	CamelCase,
	SnakeCase,
	ShoutySnakeCase,
}

/// Converts `name` to `case` and makes an identifier of it
pub(crate) fn format_heck(name: &str, case: Case) -> GenResult<Ident> {
	let name = match case {
		Case::CamelCase => name.to_camel_case(),
		Case::SnakeCase => name.to_snake_case(),
		Case::ShoutySnakeCase => name.to_shouty_snake_case(),
	};
	ident(&name)
}

pub(crate) fn ident(name: &str) -> GenResult<Ident> {
	syn::parse_str(name).map_err(|_| GenError::InvalidIdent(name.to_owned()))
}

pub(crate) fn parse_type(ty: &str, column: &str) -> GenResult<Type> {
	syn::parse_str(ty).map_err(|source| GenError::InvalidType {
		ty: ty.to_owned(),
		column: column.to_owned(),
		source,
	})
}

fn parse_path(path: &str) -> GenResult<Path> {
	syn::parse_str(path).map_err(|_| GenError::InvalidIdent(path.to_owned()))
}

/// identifier of the module a model is generated into
pub(crate) fn module_ident(model: &TableModel) -> GenResult<Ident> {
	ident(&rust_ident(&model.module_name)?)
}

/// `TABLE_NAME_<MODULE>`
pub(crate) fn table_const(model: &TableModel) -> GenResult<Ident> {
	format_heck(&format!("table_name_{}", model.module_name), Case::ShoutySnakeCase)
}

/// The parts of a query helper that differ between the blocking and async clients
pub(crate) struct ClientFlavor {
	pub opt_async: TokenStream,
	pub opt_await: TokenStream,
	pub client_type: TokenStream,
}

impl ClientFlavor {
	pub fn new(config: &GenConfig) -> Self {
		if config.mode.contains(Mode::WITHOUT_CONTEXT) {
			ClientFlavor {
				opt_async: quote! {},
				opt_await: quote! {},
				client_type: quote! { &mut ::dao_gen_core::postgres::Client },
			}
		} else {
			ClientFlavor {
				opt_async: quote! { async },
				opt_await: quote! { .await },
				client_type: quote! { &::dao_gen_core::tokio_postgres::Client },
			}
		}
	}
}

/// `model/mod.rs`: one module per model plus reexports of the struct and its table name
pub fn model_mod_file(models: &[TableModel]) -> GenResult<TokenStream> {
	let items = models
		.iter()
		.map(|m| -> GenResult<TokenStream> {
			let module = module_ident(m)?;
			let struct_name = ident(&m.struct_name)?;
			let table_const = table_const(m)?;
			Ok(quote! {
				pub mod #module;
				pub use self::#module::{#struct_name, #table_const};
			})
		})
		.collect::<GenResult<Vec<_>>>()?;
	Ok(quote! { #(#items)* })
}

/// `query/mod.rs`: the query modules, the `Query` struct over all of them and, in default-query mode, `Q`
///
/// ```ignore
/// pub mod user;
/// #[cfg(test)]
/// mod user_tests;
/// pub use self::user::{UserDo, UserQuery};
///
/// pub struct Query {
/// 	pub user: UserQuery,
/// }
///
/// pub static Q: Query = Query::new();
/// ```
pub fn query_mod_file(models: &[TableModel], config: &GenConfig) -> GenResult<TokenStream> {
	let mut modules = Vec::with_capacity(models.len());
	let mut fields = Vec::with_capacity(models.len());
	let mut query_names = Vec::with_capacity(models.len());
	for m in models {
		let module = module_ident(m)?;
		let query_name = ident(&m.query_struct_name())?;
		let do_name = ident(&m.do_struct_name())?;
		let tests = if config.with_unit_test {
			let tests_module = format_heck(&format!("{}_tests", m.module_name), Case::SnakeCase)?;
			quote! {
				#[cfg(test)]
				mod #tests_module;
			}
		} else {
			quote! {}
		};
		modules.push(quote! {
			pub mod #module;
			#tests
			pub use self::#module::{#do_name, #query_name};
		});
		fields.push(module);
		query_names.push(query_name);
	}

	let default_query = if config.mode.contains(Mode::WITH_DEFAULT_QUERY) {
		quote! {
			/// Shared query over every generated table
			pub static Q: Query = Query::new();
		}
	} else {
		quote! {}
	};

	Ok(quote! {
		#(#modules)*

		/// Queries for every generated table
		#[derive(Debug, Clone, Copy)]
		pub struct Query {
			#(pub #fields: #query_names,)*
		}

		impl Query {
			pub const fn new() -> Self {
				Query {
					#(#fields: #query_names::new(),)*
				}
			}
		}

		impl Default for Query {
			fn default() -> Self {
				Self::new()
			}
		}

		#default_query
	})
}
