//! Bound values and their declared-type families.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A single bound value: the runtime value of one mapped field, tagged
/// with its type family. Created by an entity accessor, consumed by the
/// codec, and discarded within one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Bool(bool),
}

/// Declared type of a mapped field. `NULL` is a value, not a type, so it
/// has no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Text,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Date,
    Time,
    Timestamp,
    Bool,
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The type family this value belongs to, or `None` for `Null`.
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Self::Null => None,
            Self::Text(_) => Some(SqlType::Text),
            Self::TinyInt(_) => Some(SqlType::TinyInt),
            Self::SmallInt(_) => Some(SqlType::SmallInt),
            Self::Int(_) => Some(SqlType::Int),
            Self::BigInt(_) => Some(SqlType::BigInt),
            Self::Float(_) => Some(SqlType::Float),
            Self::Double(_) => Some(SqlType::Double),
            Self::Date(_) => Some(SqlType::Date),
            Self::Time(_) => Some(SqlType::Time),
            Self::Timestamp(_) => Some(SqlType::Timestamp),
            Self::Bool(_) => Some(SqlType::Bool),
        }
    }
}

impl SqlType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::TinyInt => "tinyint",
            Self::SmallInt => "smallint",
            Self::Int => "integer",
            Self::BigInt => "bigint",
            Self::Float => "real",
            Self::Double => "double precision",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Bool => "boolean",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
