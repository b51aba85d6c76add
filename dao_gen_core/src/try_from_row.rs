use super::{Row, SqlError};

/// Converts from a [`tokio_postgres::Row`]. Implementations are provided for rows holding a single value of several types that implement [`FromSql`] and for tuples
///
/// Generated models get an implementation through `#[derive(TryFromRow)]`
///
/// [`FromSql`]: https://docs.rs/postgres-types/0.2/postgres_types/trait.FromSql.html
pub trait TryFromRow: Sized {
	fn from_row(row: &Row) -> Result<Self, SqlError>;
}
impl TryFromRow for () {
	fn from_row(_row: &Row) -> Result<Self, SqlError> {
		Ok(())
	}
}

/// Provides an implementation of [`TryFromRow`] for a given type that implements [`FromSql`]
///
/// Does not check if the row contains more than one value (a row with 3 columns whose first is a bool converts to a bool)
///
/// [`FromSql`]: https://docs.rs/postgres-types/0.2/postgres_types/trait.FromSql.html
macro_rules! try_from_row {
	($impl_type:ty) => {
		impl TryFromRow for $impl_type {
			fn from_row(row: &Row) -> Result<Self, SqlError> {
				row.try_get(0)
			}
		}
	};
}

try_from_row!(bool);
try_from_row!(i8);
try_from_row!(i16);
try_from_row!(i32);
try_from_row!(u32);
try_from_row!(i64);
try_from_row!(f32);
try_from_row!(f64);
try_from_row!(String);
try_from_row!(Vec<u8>);
try_from_row!(std::collections::HashMap<String, Option<String>>);
try_from_row!(std::time::SystemTime);
try_from_row!(std::net::IpAddr);

// tuples, handy for ad hoc selects
use postgres_types::FromSqlOwned;
macro_rules! try_from_tuple {
	($($typ_name:ident $number:tt),*) => {
		impl< $($typ_name:FromSqlOwned),* > TryFromRow for ($($typ_name,)*) {
			fn from_row(row: &Row) -> Result<Self, SqlError> {
				Ok((
					$(row.try_get::<_, $typ_name>($number)?,)*
				))
			}
		}
	};
}
try_from_tuple!(A 0);
try_from_tuple!(A 0, B 1);
try_from_tuple!(A 0, B 1, C 2);
try_from_tuple!(A 0, B 1, C 2, D 3);
try_from_tuple!(A 0, B 1, C 2, D 3, E 4);
try_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
try_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
try_from_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

// chrono
#[cfg(feature = "chrono")]
try_from_row!(chrono::NaiveDate);
#[cfg(feature = "chrono")]
try_from_row!(chrono::NaiveTime);
#[cfg(feature = "chrono")]
try_from_row!(chrono::NaiveDateTime);
#[cfg(feature = "chrono")]
try_from_row!(chrono::DateTime<chrono::Utc>);

// rust_decimal
#[cfg(feature = "rust_decimal")]
try_from_row!(rust_decimal::Decimal);

// serde_json
#[cfg(feature = "serde_json")]
try_from_row!(serde_json::Value);

// uuid
#[cfg(feature = "uuid")]
try_from_row!(uuid::Uuid);
