//! Literal encoding and row-value decoding.
//!
//! `encode` turns a [`SqlValue`] into the literal text the statement
//! builders splice into generated SQL. `decode` goes the other way:
//! it checks a value read from a result row against the declared type
//! of the target field, widening within a type family but never across
//! families. The [`Scalar`] trait ties native Rust types to both.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::value::{SqlType, SqlValue};

/// Render a value as a SQL literal under the given dialect.
///
/// Text is quote-doubled and wrapped in single quotes. Numbers are
/// emitted as plain decimal text, never in exponent notation. Dates and
/// times use the dialect's format strings, quoted. Booleans encode as
/// `'1'` / `'0'`.
pub fn encode(dialect: &Dialect, value: &SqlValue) -> String {
    match value {
        SqlValue::Null => dialect.null.to_string(),
        SqlValue::Text(v) => quote(&v.replace('\'', "''")),
        SqlValue::TinyInt(v) => v.to_string(),
        SqlValue::SmallInt(v) => v.to_string(),
        SqlValue::Int(v) => v.to_string(),
        SqlValue::BigInt(v) => v.to_string(),
        // Rust's float Display is always fixed-notation decimal.
        SqlValue::Float(v) => format!("{v}"),
        SqlValue::Double(v) => format!("{v}"),
        SqlValue::Date(v) => quote(&v.format(dialect.date_format).to_string()),
        SqlValue::Time(v) => quote(&v.format(dialect.time_format).to_string()),
        SqlValue::Timestamp(v) => quote(&v.format(dialect.timestamp_format).to_string()),
        SqlValue::Bool(v) => quote(if *v { "1" } else { "0" }),
    }
}

fn quote(text: &str) -> String {
    format!("'{text}'")
}

/// Check a row value against the declared type of the target field,
/// widening within the integer and float families where no precision is
/// lost. Any narrowing or cross-family pairing is an invalid mapping.
pub fn decode(value: SqlValue, target: SqlType) -> OrmResult<SqlValue> {
    if value.is_null() {
        return Ok(SqlValue::Null);
    }
    let found = value.sql_type();
    match (target, value) {
        (SqlType::Text, v @ SqlValue::Text(_)) => Ok(v),
        (SqlType::TinyInt, v @ SqlValue::TinyInt(_)) => Ok(v),
        (SqlType::SmallInt, SqlValue::TinyInt(v)) => Ok(SqlValue::SmallInt(v.into())),
        (SqlType::SmallInt, v @ SqlValue::SmallInt(_)) => Ok(v),
        (SqlType::Int, SqlValue::TinyInt(v)) => Ok(SqlValue::Int(v.into())),
        (SqlType::Int, SqlValue::SmallInt(v)) => Ok(SqlValue::Int(v.into())),
        (SqlType::Int, v @ SqlValue::Int(_)) => Ok(v),
        (SqlType::BigInt, SqlValue::TinyInt(v)) => Ok(SqlValue::BigInt(v.into())),
        (SqlType::BigInt, SqlValue::SmallInt(v)) => Ok(SqlValue::BigInt(v.into())),
        (SqlType::BigInt, SqlValue::Int(v)) => Ok(SqlValue::BigInt(v.into())),
        (SqlType::BigInt, v @ SqlValue::BigInt(_)) => Ok(v),
        (SqlType::Float, v @ SqlValue::Float(_)) => Ok(v),
        (SqlType::Double, SqlValue::Float(v)) => Ok(SqlValue::Double(v.into())),
        (SqlType::Double, v @ SqlValue::Double(_)) => Ok(v),
        (SqlType::Date, v @ SqlValue::Date(_)) => Ok(v),
        (SqlType::Time, v @ SqlValue::Time(_)) => Ok(v),
        (SqlType::Timestamp, v @ SqlValue::Timestamp(_)) => Ok(v),
        (SqlType::Bool, v @ SqlValue::Bool(_)) => Ok(v),
        (target, _) => Err(OrmError::invalid_mapping(format!(
            "cannot map a {} column value into a {} field",
            found.map(SqlType::name).unwrap_or("null"),
            target
        ))),
    }
}

/// A native Rust type that maps to exactly one declared SQL type family.
///
/// Derived entity code reads fields through `to_value` and writes them
/// back through `from_value`; the associated const feeds the generated
/// field-mapping table. A field whose type has no `Scalar` impl fails to
/// compile, which is where unsupported column types surface.
pub trait Scalar: Sized {
    const SQL_TYPE: SqlType;

    fn to_value(&self) -> SqlValue;

    fn from_value(value: SqlValue) -> OrmResult<Self>;
}

macro_rules! scalar {
    ($ty:ty => $sql:ident, $variant:ident) => {
        impl Scalar for $ty {
            const SQL_TYPE: SqlType = SqlType::$sql;

            fn to_value(&self) -> SqlValue {
                SqlValue::$variant(self.clone())
            }

            fn from_value(value: SqlValue) -> OrmResult<Self> {
                match decode(value, Self::SQL_TYPE)? {
                    SqlValue::$variant(v) => Ok(v),
                    SqlValue::Null => Err(OrmError::invalid_mapping(concat!(
                        "NULL column value for a non-nullable ",
                        stringify!($ty),
                        " field"
                    ))),
                    other => Err(OrmError::invalid_mapping(format!(
                        "unexpected {:?} after decode",
                        other
                    ))),
                }
            }
        }
    };
}

scalar!(String => Text, Text);
scalar!(i8 => TinyInt, TinyInt);
scalar!(i16 => SmallInt, SmallInt);
scalar!(i32 => Int, Int);
scalar!(i64 => BigInt, BigInt);
scalar!(f32 => Float, Float);
scalar!(f64 => Double, Double);
scalar!(NaiveDate => Date, Date);
scalar!(NaiveTime => Time, Time);
scalar!(NaiveDateTime => Timestamp, Timestamp);
scalar!(bool => Bool, Bool);

/// Nullable column: `None` round-trips as `Null`.
impl<T: Scalar> Scalar for Option<T> {
    const SQL_TYPE: SqlType = T::SQL_TYPE;

    fn to_value(&self) -> SqlValue {
        match self {
            Some(v) => v.to_value(),
            None => SqlValue::Null,
        }
    }

    fn from_value(value: SqlValue) -> OrmResult<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }
}
