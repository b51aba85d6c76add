//! Contains a derive macro for [`TryFromRow`] which converts from a tokio-postgres Row
//!
//! Fields are read by position unless they carry `#[row(column = "name")]`, in which case they are read by column name.
//! `#[row(default_on_null)]` reads the column as an `Option` and falls back to `Default::default()` on NULL.
//!
//! [`TryFromRow`]: https://docs.rs/dao_gen_core/latest/dao_gen_core/trait.TryFromRow.html

extern crate proc_macro;

use proc_macro2::TokenStream;

use quote::quote;

use syn::{
	parse_macro_input,
	DeriveInput,
	Field,
	LitStr,
};

#[derive(Default)]
struct RowAttrs {
	column: Option<LitStr>,
	default_on_null: bool,
}

impl RowAttrs {
	fn from_field(field: &Field) -> syn::Result<Self> {
		let mut ret = RowAttrs::default();
		for attr in field.attrs.iter().filter(|a| a.path().is_ident("row")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("column") {
					ret.column = Some(meta.value()?.parse()?);
					Ok(())
				} else if meta.path.is_ident("default_on_null") {
					ret.default_on_null = true;
					Ok(())
				} else {
					Err(meta.error("expected `column = \"...\"` or `default_on_null`"))
				}
			})?;
		}
		Ok(ret)
	}
}

/// the expression reading one field out of `row`
fn field_getter(index: usize, field: &Field) -> syn::Result<TokenStream> {
	let attrs = RowAttrs::from_field(field)?;
	let ty = &field.ty;
	let idx = match &attrs.column {
		Some(name) => quote! { #name },
		None => quote! { #index },
	};
	Ok(if attrs.default_on_null {
		quote! { row.try_get::<_, ::core::option::Option<#ty>>(#idx)?.unwrap_or_default() }
	} else {
		quote! { row.try_get(#idx)? }
	})
}

#[proc_macro_derive(TryFromRow, attributes(row))]
/// A derive macro for [`TryFromRow`] which converts from a tokio-postgres Row
///
/// [`TryFromRow`]: https://docs.rs/dao_gen_core/latest/dao_gen_core/trait.TryFromRow.html
pub fn try_from_tokio_postgres_row(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	match expand(input) {
		Ok(tokens) => tokens.into(),
		Err(e) => e.to_compile_error().into(),
	}
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
	// get the name of the type we want to implement the trait for
	let name = &input.ident;
	let generics = &input.generics;
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let fields = match &input.data {
		syn::Data::Struct(x) => &x.fields,
		// enums are expected to implement FromSql and live in a single column
		syn::Data::Enum(_) => {
			return Ok(quote! {
				impl #impl_generics ::dao_gen_core::TryFromRow for #name #ty_generics #where_clause {
					fn from_row(row: &::dao_gen_core::Row) -> ::core::result::Result<Self, ::dao_gen_core::SqlError> {
						row.try_get(0)
					}
				}
			});
		},
		syn::Data::Union(_) => {
			return Err(syn::Error::new_spanned(name, "Cannot derive TryFromRow automatically for union types"));
		},
	};

	let from_row_code = match fields {
		syn::Fields::Named(_) => {
			let tmp = fields
				.iter()
				.enumerate()
				.map(|(i, v)| {
					let ident = &v.ident;
					let getter = field_getter(i, v)?;
					Ok(quote! { #ident : #getter, })
				})
				.collect::<syn::Result<TokenStream>>()?;
			quote! { Ok(Self { #tmp }) }
		},
		syn::Fields::Unnamed(_) => {
			let tmp = fields
				.iter()
				.enumerate()
				.map(|(i, v)| {
					let getter = field_getter(i, v)?;
					Ok(quote! { #getter, })
				})
				.collect::<syn::Result<TokenStream>>()?;
			quote! { Ok(Self ( #tmp )) }
		},
		syn::Fields::Unit => quote! { Ok(Self) },
	};

	Ok(quote! {
		impl #impl_generics ::dao_gen_core::TryFromRow for #name #ty_generics #where_clause {
			#[allow(unused_variables)]
			fn from_row(row: &::dao_gen_core::Row) -> ::core::result::Result<Self, ::dao_gen_core::SqlError> {
				#from_row_code
			}
		}
	})
}
