//! Bind values and their conversions.
//!
//! Every value that reaches a compiled statement travels as a [`SqlValue`]
//! next to the SQL text, never spliced into it. The only exception is
//! [`SqlValue::to_sql_inline`], which is used for join literals and for the
//! debug view of a compiled query.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// A scalar value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// `NULL`.
    Null,
    /// Boolean, bound as an integer.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double precision float.
    Float(f64),
    /// String.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

/// How the execution layer should type a binding.
///
/// Integers and booleans bind as integers, everything else as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Integer-typed parameter.
    Int,
    /// String-typed parameter.
    Str,
}

impl SqlValue {
    /// Renders the value as an SQL literal. Quotes inside text are doubled.
    ///
    /// **Warning**: Only for join literals and logging. Statements bind
    /// values instead.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => "NULL".into(),
            Self::Bool(true) => "TRUE".into(),
            Self::Bool(false) => "FALSE".into(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                let hex: String = bytes.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }

    /// Returns the parameter type the execution layer binds this value with.
    #[must_use]
    pub const fn param_type(&self) -> ParamType {
        match self {
            Self::Bool(_) | Self::Int(_) => ParamType::Int,
            _ => ParamType::Str,
        }
    }

    /// The positional placeholder every dialect uses.
    #[must_use]
    pub const fn placeholder() -> &'static str {
        "?"
    }
}

/// Conversion into a bindable [`SqlValue`].
pub trait ToSqlValue {
    /// Consumes `self` and returns the bound value.
    fn to_sql_value(self) -> SqlValue;
}

macro_rules! impl_to_sql_value {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    let $v = self;
                    $body
                }
            }
        )*
    };
}

impl_to_sql_value! {
    SqlValue => |v| v,
    bool => |v| SqlValue::Bool(v),
    i64 => |v| SqlValue::Int(v),
    i32 => |v| SqlValue::Int(i64::from(v)),
    i16 => |v| SqlValue::Int(i64::from(v)),
    i8 => |v| SqlValue::Int(i64::from(v)),
    u32 => |v| SqlValue::Int(i64::from(v)),
    u16 => |v| SqlValue::Int(i64::from(v)),
    u8 => |v| SqlValue::Int(i64::from(v)),
    f64 => |v| SqlValue::Float(v),
    f32 => |v| SqlValue::Float(f64::from(v)),
    String => |v| SqlValue::Text(v),
    &str => |v| SqlValue::Text(v.to_owned()),
    &String => |v| SqlValue::Text(v.clone()),
    Vec<u8> => |v| SqlValue::Blob(v),
    &[u8] => |v| SqlValue::Blob(v.to_vec()),
    NaiveDate => |v| SqlValue::Text(v.format("%Y-%m-%d").to_string()),
    NaiveDateTime => |v| SqlValue::Text(v.format("%Y-%m-%d %H:%M:%S").to_string()),
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        self.map_or(SqlValue::Null, ToSqlValue::to_sql_value)
    }
}

impl<Tz: TimeZone> ToSqlValue for DateTime<Tz> {
    fn to_sql_value(self) -> SqlValue {
        self.naive_utc().to_sql_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_literals() {
        let cases = [
            (SqlValue::Null, "NULL"),
            (SqlValue::Bool(true), "TRUE"),
            (SqlValue::Bool(false), "FALSE"),
            (SqlValue::Int(-3), "-3"),
            (SqlValue::Float(0.5), "0.5"),
            (SqlValue::Text("it's".into()), "'it''s'"),
            (SqlValue::Blob(vec![0xCA, 0xFE]), "X'CAFE'"),
        ];
        for (value, literal) in cases {
            assert_eq!(value.to_sql_inline(), literal);
        }
    }

    #[test]
    fn test_inline_text_cannot_break_out() {
        let value = SqlValue::Text("x'; DELETE FROM users; --".into());
        assert_eq!(value.to_sql_inline(), "'x''; DELETE FROM users; --'");
    }

    #[test]
    fn test_param_types() {
        assert_eq!(SqlValue::Int(1).param_type(), ParamType::Int);
        assert_eq!(SqlValue::Bool(true).param_type(), ParamType::Int);
        assert_eq!(SqlValue::Text("x".into()).param_type(), ParamType::Str);
        assert_eq!(SqlValue::Float(1.5).param_type(), ParamType::Str);
        assert_eq!(SqlValue::Null.param_type(), ParamType::Str);
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(false.to_sql_value(), SqlValue::Bool(false));
        assert_eq!(7_u8.to_sql_value(), SqlValue::Int(7));
        assert_eq!((-9_i16).to_sql_value(), SqlValue::Int(-9));
        assert_eq!(1.25_f32.to_sql_value(), SqlValue::Float(1.25));
        assert_eq!(String::from("a").to_sql_value(), SqlValue::Text("a".into()));
        assert_eq!(Option::<&str>::None.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(5_i64).to_sql_value(), SqlValue::Int(5));
        assert_eq!(vec![1_u8].to_sql_value(), SqlValue::Blob(vec![1]));
    }

    #[test]
    fn test_chrono_values_render_as_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(date.to_sql_value(), SqlValue::Text("2024-03-09".into()));

        let stamp = date.and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(
            stamp.to_sql_value(),
            SqlValue::Text("2024-03-09 07:05:00".into())
        );
        assert_eq!(
            stamp.and_utc().to_sql_value(),
            SqlValue::Text("2024-03-09 07:05:00".into())
        );
    }

    #[test]
    fn test_serializes_untagged() {
        let values = vec![
            SqlValue::Int(1),
            SqlValue::Text("a".into()),
            SqlValue::Null,
            SqlValue::Bool(false),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[1,"a",null,false]"#);
    }
}
