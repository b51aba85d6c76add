//! Select statments into pg_* tables and corresponding return types
use dao_gen_core::TryFromRow;

pub const GET_TABLE: &str = "SELECT c.oid,
	ns.nspname,
	c.relname,
	obj_description(c.oid, 'pg_class')
FROM pg_class c
JOIN pg_namespace ns
	ON ns.oid = c.relnamespace
WHERE c.relname = $1 AND
	ns.nspname::text = COALESCE($2::text, current_schema()::text) AND
	c.relkind IN ('r', 'p', 'v', 'm', 'f')";
#[derive(Debug, TryFromRow)]
pub struct GetTable {
	pub oid: u32,
	pub ns_name: String,
	pub name: String,
	pub comment: Option<String>,
}

pub const GET_TABLE_NAMES: &str = "SELECT c.relname
FROM pg_class c
JOIN pg_namespace ns
	ON ns.oid = c.relnamespace
WHERE ns.nspname::text = COALESCE($1::text, current_schema()::text) AND
	c.relkind IN ('r', 'p') AND
	NOT c.relispartition
ORDER BY c.relname ASC";
#[derive(Debug, TryFromRow)]
pub struct GetTableNames {
	pub name: String,
}

pub const GET_COLUMNS: &str = "SELECT a.attnum,
	a.attname,
	a.atttypid,
	t.typname,
	format_type(a.atttypid, a.atttypmod),
	et.typname AS elem_name,
	a.attnotnull,
	(a.atthasdef OR a.attidentity <> '') AS has_default,
	(a.attgenerated <> '') AS generated,
	col_description(a.attrelid, a.attnum)
FROM pg_attribute a
JOIN pg_type t ON a.atttypid = t.oid
LEFT JOIN pg_type et ON t.typcategory = 'A' AND et.oid = t.typelem
WHERE a.attnum > 0 AND NOT a.attisdropped
	AND a.attrelid = $1
ORDER BY a.attnum ASC";
#[derive(Debug, TryFromRow)]
pub struct GetColumns {
	pub attnum: i16,
	pub name: String,
	pub typ_id: u32,
	pub typ_name: String,
	pub sql_type: String,
	pub elem_name: Option<String>,
	pub not_null: bool,
	pub has_default: bool,
	pub generated: bool,
	pub comment: Option<String>,
}

pub const GET_INDEXES: &str = "SELECT ic.relname,
	ARRAY(
		SELECT a.attname::text
		FROM unnest(i.indkey::int2[]) WITH ORDINALITY AS k(attnum, ord)
		JOIN pg_attribute a
			ON a.attrelid = i.indrelid AND a.attnum = k.attnum
		ORDER BY k.ord
	) AS columns,
	i.indisprimary,
	i.indisunique
FROM pg_index i
JOIN pg_class ic
	ON ic.oid = i.indexrelid
WHERE i.indrelid = $1
ORDER BY ic.relname ASC";
#[derive(Debug, TryFromRow)]
pub struct GetIndexes {
	pub name: String,
	pub columns: Vec<String>,
	pub is_primary: bool,
	pub is_unique: bool,
}
