//! Conversions between mysql_async values and dbtree values

use dbtree_core::Value;
use mysql_async::consts::ColumnType;

/// Escape a value for SQL literal inclusion
pub(crate) fn value_to_mysql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(v) => if *v { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int64(v) => v.to_string(),
        Value::Float32(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::String(v) => format!("'{}'", v.replace('\\', "\\\\").replace('\'', "''")),
        Value::Bytes(v) => {
            let hex: String = v.iter().map(|b| format!("{:02x}", b)).collect();
            format!("X'{}'", hex)
        }
        Value::Date(v) => format!("'{}'", v),
        Value::DateTime(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S")),
    }
}

/// Substitute `?` placeholders with literals, left to right
pub(crate) fn bind_params(sql: &str, params: &[Value]) -> String {
    let mut params = params.iter();
    let mut bound = String::with_capacity(sql.len());
    for ch in sql.chars() {
        if ch == '?' {
            if let Some(param) = params.next() {
                bound.push_str(&value_to_mysql_literal(param));
                continue;
            }
        }
        bound.push(ch);
    }
    bound
}

/// Convert mysql_async Value to our Value type, using column type metadata
/// to interpret byte strings from the text protocol.
pub(crate) fn mysql_value_to_value(val: mysql_async::Value, col_type: ColumnType) -> Value {
    match val {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(s) => match col_type {
                ColumnType::MYSQL_TYPE_TINY
                | ColumnType::MYSQL_TYPE_SHORT
                | ColumnType::MYSQL_TYPE_LONG
                | ColumnType::MYSQL_TYPE_LONGLONG
                | ColumnType::MYSQL_TYPE_INT24
                | ColumnType::MYSQL_TYPE_YEAR => {
                    s.parse::<i64>().map(Value::Int64).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_FLOAT => {
                    s.parse::<f32>().map(Value::Float32).unwrap_or(Value::String(s))
                }
                ColumnType::MYSQL_TYPE_DOUBLE => {
                    s.parse::<f64>().map(Value::Float64).unwrap_or(Value::String(s))
                }
                _ => Value::String(s),
            },
            Err(err) => Value::Bytes(err.into_bytes()),
        },
        mysql_async::Value::Int(i) => Value::Int64(i),
        mysql_async::Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int64(i),
            Err(_) => Value::String(u.to_string()),
        },
        mysql_async::Value::Float(f) => Value::Float32(f),
        mysql_async::Value::Double(d) => Value::Float64(d),
        mysql_async::Value::Date(year, month, day, hour, min, sec, micro) => {
            let date = chrono::NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32);
            if hour == 0 && min == 0 && sec == 0 && micro == 0 {
                date.map(Value::Date).unwrap_or_else(|| {
                    Value::String(format!("{:04}-{:02}-{:02}", year, month, day))
                })
            } else {
                date.and_then(|d| d.and_hms_micro_opt(hour as u32, min as u32, sec as u32, micro))
                    .map(Value::DateTime)
                    .unwrap_or_else(|| {
                        Value::String(format!(
                            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                            year, month, day, hour, min, sec
                        ))
                    })
            }
        }
        mysql_async::Value::Time(negative, days, hours, mins, secs, micros) => {
            let total_hours = days * 24 + u32::from(hours);
            let sign = if negative { "-" } else { "" };
            Value::String(format!(
                "{}{:02}:{:02}:{:02}.{:06}",
                sign, total_hours, mins, secs, micros
            ))
        }
    }
}
