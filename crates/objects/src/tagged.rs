//! Serde adapters for nested objects that carry fixed tags.
//!
//! Derived impls only see declared fields, so a nested [`Object`] with an
//! `OBJECT` or `TAG` would lose its discriminators on the wire. Fields holding
//! such objects opt in with `with`:
//!
//! ```ignore
//! #[serde(with = "notional_objects::tagged")]
//! pub created_by: UserRef,
//!
//! #[serde(default, skip_serializing_if = "Option::is_none", with = "notional_objects::tagged::option")]
//! pub icon: Option<EmojiObject>,
//! ```
//!
//! Family members (`Box<dyn Family>`) do not need this.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::object::Object;
use crate::resolve::{build_strict, nested_error};
use crate::serialize::to_native;

pub fn serialize<T: Object, S: Serializer>(obj: &T, serializer: S) -> Result<S::Ok, S::Error> {
	to_native(obj)
		.map_err(serde::ser::Error::custom)?
		.serialize(serializer)
}

pub fn deserialize<'de, T: Object, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
	build_strict(Value::deserialize(deserializer)?).map_err(nested_error)
}

/// Adapter for `Option<T>` fields.
pub mod option {
	use super::*;

	pub fn serialize<T: Object, S: Serializer>(
		obj: &Option<T>,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match obj {
			Some(obj) => super::serialize(obj, serializer),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, T: Object, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<T>, D::Error> {
		match Option::<Value>::deserialize(deserializer)? {
			Some(raw) => build_strict(raw)
				.map(Some)
				.map_err(nested_error),
			None => Ok(None),
		}
	}
}

/// Adapter for `Vec<T>` fields.
pub mod vec {
	use super::*;

	pub fn serialize<T: Object, S: Serializer>(objs: &[T], serializer: S) -> Result<S::Ok, S::Error> {
		objs.iter()
			.map(to_native)
			.collect::<Result<Vec<_>>>()
			.map_err(serde::ser::Error::custom)?
			.serialize(serializer)
	}

	pub fn deserialize<'de, T: Object, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Vec<T>, D::Error> {
		Vec::<Value>::deserialize(deserializer)?
			.into_iter()
			.map(build_strict)
			.collect::<Result<Vec<_>>>()
			.map_err(nested_error)
	}
}

#[cfg(test)]
mod tests;
