//! Resolves an introspected [`Table`] into the [`TableModel`] the code generator renders
use std::collections::HashSet;

use heck::{CamelCase, SnakeCase};

use super::{
	error::{GenError, GenResult},
	generator::GenConfig,
	sql_tree::{Column, Table},
};

/// Turns table names into struct names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingStrategy {
	/// stripped from table names before they are converted
	pub table_prefix: String,
}

impl NamingStrategy {
	pub fn schema_name(&self, table: &str) -> String {
		let stripped = match table.strip_prefix(self.table_prefix.as_str()) {
			Some(rest) if !rest.is_empty() => rest,
			_ => table,
		};
		stripped.to_camel_case()
	}
}

/// Per-column options passed to `generate_model`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOpt {
	/// leave the column out of the model
	Ignore(String),
	/// use `rust_type` verbatim instead of the mapped type
	///
	/// On a nullable column NULL reads as `Default::default()` unless `rust_type` is itself an `Option<..>`,
	/// so the type has to implement `Default` there
	Type { column: String, rust_type: String },
	/// name the field `field` instead of the snake_cased column name
	Rename { column: String, field: String },
}

impl FieldOpt {
	pub fn ignore<S: Into<String>>(column: S) -> Self {
		FieldOpt::Ignore(column.into())
	}

	pub fn field_type<S: Into<String>, T: Into<String>>(column: S, rust_type: T) -> Self {
		FieldOpt::Type {
			column: column.into(),
			rust_type: rust_type.into(),
		}
	}

	pub fn rename<S: Into<String>, T: Into<String>>(column: S, field: T) -> Self {
		FieldOpt::Rename {
			column: column.into(),
			field: field.into(),
		}
	}

	pub fn column(&self) -> &str {
		match self {
			FieldOpt::Ignore(column) => column,
			FieldOpt::Type { column, .. } => column,
			FieldOpt::Rename { column, .. } => column,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelField {
	pub column_name: String,
	/// Rust identifier, raw (`r#type`) where the column name is a keyword
	pub field_name: String,
	/// the value type, what `Field<T>` is parameterised with
	pub inner_type: String,
	/// the struct field type: `inner_type` or `Option<inner_type>`
	pub rust_type: String,
	pub optional: bool,
	/// nullable column mapped to a plain type; NULL reads as `Default::default()`
	pub default_on_null: bool,
	pub nullable: bool,
	pub has_default: bool,
	pub generated: bool,
	pub primary_key: bool,
	pub sql_type: String,
	/// `name (primary key)`, `name (unique)` or `name`
	pub indexes: Vec<String>,
	pub comment: Option<String>,
}

impl ModelField {
	fn resolve(table: &Table, column: &Column, opts: &[FieldOpt], primary_key: &[&str], config: &GenConfig) -> GenResult<ModelField> {
		let mut field_name = column.name.to_snake_case();
		let mut type_override = None;
		for opt in opts.iter().filter(|o| o.column() == column.name) {
			match opt {
				FieldOpt::Rename { field, .. } => field_name = field.clone(),
				FieldOpt::Type { rust_type, .. } => type_override = Some(rust_type.clone()),
				FieldOpt::Ignore(_) => (),
			}
		}
		let field_name = rust_ident(&field_name)?;
		let nullable = !column.not_null;

		let (inner_type, optional, default_on_null) = match type_override {
			Some(ty) => {
				let parsed = syn::parse_str::<syn::Type>(&ty).map_err(|source| GenError::InvalidType {
					ty: ty.clone(),
					column: column.name.clone(),
					source,
				})?;
				(ty, false, nullable && !is_option(&parsed))
			},
			None => {
				let inner = mapped_type(table, column);
				let optional = (nullable && (config.field_nullable || !has_default_value(&inner)))
					|| (config.field_coverable && column.has_default && !column.generated);
				(inner, optional, nullable && !optional)
			},
		};
		let rust_type = if optional {
			format!("Option<{}>", inner_type)
		} else {
			inner_type.clone()
		};

		let indexes = table
			.indexes_on(&column.name)
			.map(|i| {
				if i.is_primary {
					format!("{} (primary key)", i.name)
				} else if i.is_unique {
					format!("{} (unique)", i.name)
				} else {
					i.name.clone()
				}
			})
			.collect();

		Ok(ModelField {
			column_name: column.name.clone(),
			field_name,
			inner_type,
			rust_type,
			optional,
			default_on_null,
			nullable,
			has_default: column.has_default,
			generated: column.generated,
			primary_key: primary_key.contains(&column.name.as_str()),
			sql_type: column.sql_type.clone(),
			indexes,
			comment: column.comment.clone(),
		})
	}

	/// Generated columns are never written, and a `None` in a column with a default leaves it to the database
	pub fn insert_when_some(&self) -> bool {
		self.optional && self.has_default
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
	pub table_name: String,
	pub schema: String,
	pub struct_name: String,
	/// file stem of the generated modules
	pub module_name: String,
	pub comment: Option<String>,
	pub fields: Vec<ModelField>,
}

impl TableModel {
	/// Maps every column of `table` (minus ignored ones) to a field
	pub fn resolve(table: &Table, struct_name: Option<&str>, opts: &[FieldOpt], config: &GenConfig) -> GenResult<TableModel> {
		if let Some(opt) = opts.iter().find(|o| table.column(o.column()).is_none()) {
			return Err(GenError::UnknownColumn {
				table: table.name.clone(),
				column: opt.column().to_owned(),
			});
		}

		let struct_name = match struct_name {
			Some(name) => name.to_owned(),
			None => config.naming.schema_name(&table.name),
		};
		let struct_name = rust_ident(&struct_name)?;
		let module_name = module_file_stem(struct_name.trim_start_matches("r#").to_snake_case());

		let primary_key = table.primary_key();
		let mut seen = HashSet::new();
		let mut fields = Vec::with_capacity(table.columns.len());
		for column in &table.columns {
			if opts.iter().any(|o| matches!(o, FieldOpt::Ignore(c) if *c == column.name)) {
				continue;
			}
			let field = ModelField::resolve(table, column, opts, &primary_key, config)?;
			if !seen.insert(field.field_name.clone()) {
				return Err(GenError::DuplicateField {
					model: struct_name,
					field: field.field_name,
				});
			}
			fields.push(field);
		}

		Ok(TableModel {
			table_name: table.name.clone(),
			schema: table.schema.clone(),
			struct_name,
			module_name,
			comment: table.comment.clone(),
			fields,
		})
	}

	pub fn query_struct_name(&self) -> String {
		format!("{}Query", self.struct_name.trim_start_matches("r#"))
	}

	pub fn do_struct_name(&self) -> String {
		format!("{}Do", self.struct_name.trim_start_matches("r#"))
	}

	pub fn primary_key(&self) -> impl Iterator<Item = &ModelField> {
		self.fields.iter().filter(|f| f.primary_key)
	}

	/// the fields `first`/`last` order by: the primary key, or the first field without one
	pub fn order_key(&self) -> Vec<&ModelField> {
		let pk: Vec<_> = self.primary_key().collect();
		if pk.is_empty() {
			self.fields.iter().take(1).collect()
		} else {
			pk
		}
	}
}

/// Rust type for a column, by `pg_type.typname`
pub fn rust_type_for(type_name: &str) -> Option<&'static str> {
	Some(match type_name {
		"bool" => "bool",
		"char" => "i8",
		"int2" => "i16",
		"int4" => "i32",
		"int8" => "i64",
		"float4" => "f32",
		"float8" => "f64",
		"oid" => "u32",
		"numeric" => "dao_gen_core::rust_decimal::Decimal",
		"text" | "varchar" | "bpchar" | "name" | "citext" => "String",
		"bytea" => "Vec<u8>",
		"date" => "dao_gen_core::chrono::NaiveDate",
		"time" => "dao_gen_core::chrono::NaiveTime",
		"timestamp" => "dao_gen_core::chrono::NaiveDateTime",
		"timestamptz" => "dao_gen_core::chrono::DateTime<dao_gen_core::chrono::Utc>",
		"uuid" => "dao_gen_core::uuid::Uuid",
		"json" | "jsonb" => "dao_gen_core::serde_json::Value",
		"inet" => "std::net::IpAddr",
		_ => return None,
	})
}

fn mapped_type(table: &Table, column: &Column) -> String {
	let mapped = match &column.elem_type_name {
		Some(elem) => rust_type_for(elem).map(|t| format!("Vec<{}>", t)),
		None => rust_type_for(&column.type_name).map(str::to_owned),
	};
	match mapped {
		Some(t) => t,
		None => {
			log::warn!(
				"no Rust type for {}.{} of type {}, using String (override it with FieldOpt::Type)",
				table.name,
				column.name,
				column.sql_type
			);
			"String".to_owned()
		},
	}
}

/// `mod` and `<x>_tests` are the stems of the index and unit-test files, tables landing there get a `_table` suffix
fn module_file_stem(name: String) -> String {
	if name == "mod" || name.ends_with("_tests") {
		format!("{}_table", name)
	} else {
		name
	}
}

fn is_option(ty: &syn::Type) -> bool {
	match ty {
		syn::Type::Path(p) => p.qself.is_none() && p.path.segments.last().map_or(false, |s| s.ident == "Option"),
		_ => false,
	}
}

/// whether NULL can be read as `Default::default()`
fn has_default_value(rust_type: &str) -> bool {
	rust_type != "std::net::IpAddr"
}

/// Turns `name` into a usable identifier: raw for keywords, `_` suffixed for `self`/`super`/`crate`/`Self`, `_` prefixed when it starts with a digit
pub fn rust_ident(name: &str) -> GenResult<String> {
	let mut name = name.to_owned();
	if name.starts_with(|c: char| c.is_ascii_digit()) {
		name.insert(0, '_');
	}
	if let "self" | "Self" | "super" | "crate" | "_" = name.as_str() {
		return Ok(format!("{}_", name));
	}
	if syn::parse_str::<syn::Ident>(&name).is_ok() {
		return Ok(name);
	}
	let raw = format!("r#{}", name);
	if syn::parse_str::<syn::Ident>(&raw).is_ok() {
		return Ok(raw);
	}
	Err(GenError::InvalidIdent(name))
}
