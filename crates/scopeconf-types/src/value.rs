//! Closed union of storable configuration values.
//!
//! A tagged enum instead of a dynamic type switch: the compiler enforces
//! exhaustiveness and an unsupported type is unrepresentable at the write
//! boundary. Reading with the wrong kind fails with `NotValid`, which is
//! distinguishable from `NotFound` so the scope fallback never papers over a
//! kind mismatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CfgResult, Error};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)] // No type tag - the variant order below drives deserialization
pub enum Value {
	Bool(bool), // Must be before Int to avoid bool -> int coercion
	Int(i64),
	Float(f64),
	Time(DateTime<Utc>), // Before Str: RFC 3339 strings deserialize as Time
	Str(String),
	Bytes(Vec<u8>),
}

impl Value {
	/// Kind name for error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Str(_) => "string",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Time(_) => "time",
			Value::Bytes(_) => "bytes",
		}
	}

	/// Check whether this value has the same kind as another.
	pub fn matches_type(&self, other: &Value) -> bool {
		matches!(
			(self, other),
			(Value::Str(_), Value::Str(_))
				| (Value::Bool(_), Value::Bool(_))
				| (Value::Int(_), Value::Int(_))
				| (Value::Float(_), Value::Float(_))
				| (Value::Time(_), Value::Time(_))
				| (Value::Bytes(_), Value::Bytes(_))
		)
	}

	fn mismatch(&self, want: &'static str) -> Error {
		Error::not_valid(format!("value kind mismatch: want {}, got {}", want, self.type_name()))
	}

	pub fn into_str(self) -> CfgResult<String> {
		match self {
			Value::Str(v) => Ok(v),
			other => Err(other.mismatch("string")),
		}
	}

	pub fn into_bool(self) -> CfgResult<bool> {
		match self {
			Value::Bool(v) => Ok(v),
			other => Err(other.mismatch("bool")),
		}
	}

	pub fn into_int(self) -> CfgResult<i64> {
		match self {
			Value::Int(v) => Ok(v),
			other => Err(other.mismatch("int")),
		}
	}

	pub fn into_float(self) -> CfgResult<f64> {
		match self {
			Value::Float(v) => Ok(v),
			other => Err(other.mismatch("float")),
		}
	}

	pub fn into_time(self) -> CfgResult<DateTime<Utc>> {
		match self {
			Value::Time(v) => Ok(v),
			other => Err(other.mismatch("time")),
		}
	}

	pub fn into_bytes(self) -> CfgResult<Vec<u8>> {
		match self {
			Value::Bytes(v) => Ok(v),
			other => Err(other.mismatch("bytes")),
		}
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Value {
		Value::Str(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Value {
		Value::Str(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Value {
		Value::Bool(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Value {
		Value::Int(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Value {
		Value::Float(v)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(v: DateTime<Utc>) -> Value {
		Value::Time(v)
	}
}

impl From<Vec<u8>> for Value {
	fn from(v: Vec<u8>) -> Value {
		Value::Bytes(v)
	}
}


// vim: ts=4
