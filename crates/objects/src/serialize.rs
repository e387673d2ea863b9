//! Wire serialization.
//!
//! Output shape: fixed `object` tag, then `type` tag, then declared fields
//! under their wire names. Unset optional fields never appear, not even as
//! `null`; falsy values that are set (`0`, `false`, `""`) are kept.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{ObjectError, Result};
use crate::object::{DynObject, Object, fixed_tags};

/// Output representation requested from the serializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SerializationMode {
	/// A tree of plain values, ready to hand to an API client.
	#[default]
	Native,
	/// Compact JSON text.
	Json,
}

impl SerializationMode {
	/// Alias used by API callers.
	pub const API: Self = Self::Native;
}

impl FromStr for SerializationMode {
	type Err = ObjectError;

	fn from_str(s: &str) -> Result<Self> {
		match s {
			"native" | "python" | "api" => Ok(Self::Native),
			"json" => Ok(Self::Json),
			other => Err(ObjectError::UnsupportedMode(other.to_string())),
		}
	}
}

impl std::fmt::Display for SerializationMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Native => write!(f, "native"),
			Self::Json => write!(f, "json"),
		}
	}
}

/// Serializer output.
#[derive(Debug, Clone, PartialEq)]
pub enum Serialized {
	Native(Value),
	Json(String),
}

impl Serialized {
	/// Returns the native tree, if this is native output.
	pub fn into_native(self) -> Option<Value> {
		match self {
			Self::Native(value) => Some(value),
			Self::Json(_) => None,
		}
	}

	/// Returns the JSON text, if this is wire-text output.
	pub fn into_json(self) -> Option<String> {
		match self {
			Self::Json(text) => Some(text),
			Self::Native(_) => None,
		}
	}
}

/// Serializes an object in the requested mode.
pub fn serialize<T: Object>(obj: &T, mode: SerializationMode) -> Result<Serialized> {
	encode(to_native(obj)?, mode)
}

/// Serializes a family member in the requested mode.
pub fn serialize_dyn<T: DynObject + ?Sized>(obj: &T, mode: SerializationMode) -> Result<Serialized> {
	encode(obj.native_value()?, mode)
}

fn encode(value: Value, mode: SerializationMode) -> Result<Serialized> {
	match mode {
		SerializationMode::Native => Ok(Serialized::Native(value)),
		SerializationMode::Json => Ok(Serialized::Json(serde_json::to_string(&value)?)),
	}
}

/// Converts an object to its native wire tree.
pub fn to_native<T: Object>(obj: &T) -> Result<Value> {
	let value = match serde_json::to_value(obj)? {
		Value::Object(fields) => Value::Object(with_tags::<T>(fields)),
		other => other,
	};
	Ok(strip_nulls(value))
}

/// Puts the fixed discriminators of `T` ahead of `fields`.
fn with_tags<T: Object>(fields: Map<String, Value>) -> Map<String, Value> {
	let mut out = Map::with_capacity(fields.len() + 2);
	for tag in fixed_tags::<T>() {
		out.insert(tag.field.to_string(), Value::String(tag.value.to_string()));
	}
	for (name, value) in fields {
		if !out.contains_key(&name) {
			out.insert(name, value);
		}
	}
	out
}

/// Removes `null` entries from every mapping in the tree.
///
/// Nulls inside sequences are positional data and are kept.
pub fn strip_nulls(value: Value) -> Value {
	match value {
		Value::Object(fields) => Value::Object(
			fields
				.into_iter()
				.filter(|(_, v)| !v.is_null())
				.map(|(k, v)| (k, strip_nulls(v)))
				.collect(),
		),
		Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
		other => other,
	}
}
