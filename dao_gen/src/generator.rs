//! Collects table models and writes the generated model and query modules
use std::{
	collections::{HashMap, HashSet},
	fs,
	ops::{BitOr, BitOrAssign},
	path::{Path, PathBuf},
};

use super::{
	ast_convert,
	connection::GenClient,
	error::{GenError, GenResult},
	format_rust,
	model::{FieldOpt, NamingStrategy, TableModel},
};

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by dao_gen. DO NOT EDIT.";

/// Generation mode flags, combined with `|`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mode(u8);

impl Mode {
	/// query helpers take a blocking `postgres::Client` instead of being async over `tokio_postgres::Client`
	pub const WITHOUT_CONTEXT: Mode = Mode(1);
	/// also emit a `pub static Q: Query` holding every table query
	pub const WITH_DEFAULT_QUERY: Mode = Mode(1 << 1);

	pub const fn empty() -> Mode {
		Mode(0)
	}

	pub const fn contains(self, other: Mode) -> bool {
		self.0 & other.0 == other.0
	}
}

impl BitOr for Mode {
	type Output = Mode;

	fn bitor(self, rhs: Mode) -> Mode {
		Mode(self.0 | rhs.0)
	}
}

impl BitOrAssign for Mode {
	fn bitor_assign(&mut self, rhs: Mode) {
		self.0 |= rhs.0;
	}
}

#[derive(Debug, Clone)]
pub struct GenConfig {
	/// directory the query modules are written to
	pub out_path: PathBuf,
	/// directory for the model structs, defaults to `model/` next to `out_path`
	pub model_path: Option<PathBuf>,
	/// path from a query module to the model module
	pub model_module_path: String,
	pub mode: Mode,
	/// nullable columns become `Option<T>`
	pub field_nullable: bool,
	/// columns with a database default become `Option<T>` and are left out of inserts when `None`
	pub field_coverable: bool,
	/// document the indexes a column takes part in
	pub field_with_index_tag: bool,
	/// document the SQL type of a column
	pub field_with_type_tag: bool,
	/// emit `<module>_tests.rs` next to every query module
	pub with_unit_test: bool,
	/// derive serde's Serialize and Deserialize on models
	pub with_serde: bool,
	pub naming: NamingStrategy,
	/// schema tables are looked up in, `None` is `current_schema()`
	pub schema: Option<String>,
	/// run rustfmt over the output
	pub format: bool,
}

impl Default for GenConfig {
	fn default() -> Self {
		GenConfig {
			out_path: PathBuf::from("./query"),
			model_path: None,
			model_module_path: "super::super::model".to_owned(),
			mode: Mode::empty(),
			field_nullable: false,
			field_coverable: false,
			field_with_index_tag: false,
			field_with_type_tag: false,
			with_unit_test: false,
			with_serde: false,
			naming: NamingStrategy::default(),
			schema: None,
			format: true,
		}
	}
}

impl GenConfig {
	pub fn model_dir(&self) -> PathBuf {
		match &self.model_path {
			Some(path) => path.clone(),
			None => self.out_path.parent().unwrap_or_else(|| Path::new(".")).join("model"),
		}
	}

	pub fn is_sync(&self) -> bool {
		self.mode.contains(Mode::WITHOUT_CONTEXT)
	}
}

/// A file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
	pub path: PathBuf,
	pub contents: String,
}

pub struct Generator {
	config: GenConfig,
	db: Option<GenClient>,
	models: Vec<TableModel>,
}

impl Generator {
	pub fn new(config: GenConfig) -> Self {
		Generator {
			config,
			db: None,
			models: Vec::new(),
		}
	}

	pub fn config(&self) -> &GenConfig {
		&self.config
	}

	pub fn use_db(&mut self, db: GenClient) {
		self.db = Some(db);
	}

	fn db(&mut self) -> GenResult<&mut GenClient> {
		self.db.as_mut().ok_or(GenError::NoDatabase)
	}

	/// Introspects `table` and maps it to a struct named after it
	pub fn generate_model(&mut self, table: &str, opts: &[FieldOpt]) -> GenResult<TableModel> {
		self.introspect(table, None, opts)
	}

	/// Like [`generate_model`](Self::generate_model) with an explicit struct name
	pub fn generate_model_as(&mut self, table: &str, struct_name: &str, opts: &[FieldOpt]) -> GenResult<TableModel> {
		self.introspect(table, Some(struct_name), opts)
	}

	/// One model per table in the schema. Each option only applies to tables that have its column
	pub fn generate_all_tables(&mut self, opts: &[FieldOpt]) -> GenResult<Vec<TableModel>> {
		let schema = self.config.schema.clone();
		let names = self.db()?.get_table_names(schema.as_deref())?;
		let mut ret = Vec::with_capacity(names.len());
		for name in names {
			let table = self.db()?.get_table(&name, schema.as_deref())?;
			let table_opts: Vec<FieldOpt> = opts
				.iter()
				.filter(|o| table.column(o.column()).is_some())
				.cloned()
				.collect();
			ret.push(TableModel::resolve(&table, None, &table_opts, &self.config)?);
		}
		Ok(ret)
	}

	fn introspect(&mut self, table: &str, struct_name: Option<&str>, opts: &[FieldOpt]) -> GenResult<TableModel> {
		let schema = self.config.schema.clone();
		let table = self.db()?.get_table(table, schema.as_deref())?;
		TableModel::resolve(&table, struct_name, opts, &self.config)
	}

	/// Registers models for model and query generation
	///
	/// Registering the same table under the same module again replaces the earlier model. Two different tables on one
	/// module are both kept and rejected by [`render`](Self::render)
	pub fn apply_basic<I: IntoIterator<Item = TableModel>>(&mut self, models: I) {
		for model in models {
			let existing = self.models.iter_mut().find(|m| {
				m.module_name == model.module_name && m.table_name == model.table_name && m.schema == model.schema
			});
			match existing {
				Some(existing) => {
					log::debug!("replacing model {} for table {}", existing.struct_name, existing.table_name);
					*existing = model;
				},
				None => self.models.push(model),
			}
		}
	}

	pub fn models(&self) -> &[TableModel] {
		&self.models
	}

	/// Renders every file without touching the filesystem
	///
	/// Fails with [`GenError::DuplicateModule`] when two tables share a module and with [`GenError::FileCollision`] when
	/// two files share a path, e.g. `model_path` equal to `out_path`
	pub fn render(&self) -> GenResult<Vec<GeneratedFile>> {
		self.check_modules()?;
		let config = &self.config;
		let model_dir = config.model_dir();
		let out_dir = &config.out_path;
		let mut files = Vec::new();

		for model in &self.models {
			files.push(self.file(
				model_dir.join(format!("{}.rs", model.module_name)),
				ast_convert::model_file(model, config)?,
			));
		}
		files.push(self.file(model_dir.join("mod.rs"), ast_convert::model_mod_file(&self.models)?));

		for model in &self.models {
			files.push(self.file(
				out_dir.join(format!("{}.rs", model.module_name)),
				ast_convert::query_file(model, config)?,
			));
			if config.with_unit_test {
				files.push(self.file(
					out_dir.join(format!("{}_tests.rs", model.module_name)),
					ast_convert::unit_test_file(model, config)?,
				));
			}
		}
		files.push(self.file(out_dir.join("mod.rs"), ast_convert::query_mod_file(&self.models, config)?));

		{
			let mut paths = HashSet::with_capacity(files.len());
			if let Some(file) = files.iter().find(|f| !paths.insert(&f.path)) {
				return Err(GenError::FileCollision(file.path.clone()));
			}
		}
		Ok(files)
	}

	fn check_modules(&self) -> GenResult<()> {
		let mut seen: HashMap<&str, &TableModel> = HashMap::with_capacity(self.models.len());
		for model in &self.models {
			if let Some(first) = seen.insert(&model.module_name, model) {
				return Err(GenError::DuplicateModule {
					module: model.module_name.clone(),
					first: format!("{}.{}", first.schema, first.table_name),
					second: format!("{}.{}", model.schema, model.table_name),
				});
			}
		}
		Ok(())
	}

	fn file(&self, path: PathBuf, tokens: proc_macro2::TokenStream) -> GeneratedFile {
		let code = tokens.to_string();
		let code = if self.config.format { format_rust(&code) } else { code };
		GeneratedFile {
			path,
			contents: format!("{}\n\n{}\n", GENERATED_HEADER, code.trim_end()),
		}
	}

	/// Writes all registered models and their queries, returning the written paths
	pub fn execute(&self) -> GenResult<Vec<PathBuf>> {
		if self.models.is_empty() {
			log::warn!("no models registered, nothing to generate");
			return Ok(Vec::new());
		}
		log::info!("Start generating code.");
		let files = self.render()?;
		let mut written = Vec::with_capacity(files.len());
		for file in files {
			write_file(&file)?;
			log::info!("generated {}", file.path.display());
			written.push(file.path);
		}
		log::info!("Generate code done.");
		Ok(written)
	}
}

fn write_file(file: &GeneratedFile) -> GenResult<()> {
	let io_err = |source| GenError::Write {
		path: file.path.clone(),
		source,
	};
	if let Some(dir) = file.path.parent() {
		fs::create_dir_all(dir).map_err(io_err)?;
	}
	fs::write(&file.path, &file.contents).map_err(io_err)
}
