//! Typed-object resolution.
//!
//! Resolution order for raw data handed to a family:
//!
//! 1. An existing instance passes through unchanged.
//! 2. Anything other than a mapping is rejected as malformed.
//! 3. A family with no variants is a setup defect ([`ObjectError::EmptyRegistry`]).
//! 4. Each discriminator field known to the family is tried in registration
//!    order; the first registered value wins and the data is built strictly
//!    against that variant.
//! 5. Otherwise resolution fails with [`ObjectError::UnresolvedVariant`],
//!    listing every discriminator seen. Unknown kinds are never coerced into a
//!    generic shape.
//!
//! A member nested inside another object fails with its own error kind: the
//! error travels through serde as text and is restored when the enclosing
//! strict build unwinds.

use std::cell::RefCell;

use serde_json::{Map, Value};

use crate::error::{ObjectError, Result, SeenTag};
use crate::object::{Object, fixed_tags};
use crate::registry::{Family, VariantDef};

/// Input accepted by [`Family::resolve`].
pub enum Input<T: ?Sized> {
	/// An already-resolved instance.
	Instance(Box<T>),
	/// Untyped data.
	Raw(Value),
}

impl<T: ?Sized> From<Box<T>> for Input<T> {
	fn from(obj: Box<T>) -> Self {
		Self::Instance(obj)
	}
}

impl<T: ?Sized> From<Value> for Input<T> {
	fn from(raw: Value) -> Self {
		Self::Raw(raw)
	}
}

impl<T: ?Sized> From<Map<String, Value>> for Input<T> {
	fn from(raw: Map<String, Value>) -> Self {
		Self::Raw(Value::Object(raw))
	}
}

impl<T: ?Sized + 'static> Family<T> {
	/// Resolves input to the concrete variant it describes.
	pub fn resolve(&self, input: impl Into<Input<T>>) -> Result<Box<T>> {
		let raw = match input.into() {
			Input::Instance(obj) => return Ok(obj),
			Input::Raw(raw) => raw,
		};

		let map = match raw {
			Value::Object(map) => map,
			other => return Err(ObjectError::malformed(&other)),
		};

		let def = self.select(&map)?;

		tracing::debug!(
			family = self.label(),
			tag = %def.tag,
			variant = def.type_name,
			"resolved variant"
		);

		(def.build)(Value::Object(map))
	}

	/// Parses raw data as a member of this family.
	pub fn deserialize(&self, raw: Value) -> Result<Box<T>> {
		self.resolve(raw)
	}

	/// Parses JSON text as a member of this family.
	pub fn deserialize_str(&self, text: &str) -> Result<Box<T>> {
		self.resolve(serde_json::from_str::<Value>(text)?)
	}

	/// Picks the variant for `map`. The table lock is released before the
	/// variant is built, since nested members may resolve through this family.
	fn select(&self, map: &Map<String, Value>) -> Result<&'static VariantDef<T>> {
		let tables = self.tables();

		if tables.items.is_empty() {
			return Err(ObjectError::EmptyRegistry {
				family: self.label(),
			});
		}

		let mut seen = Vec::new();
		for (&field, values) in &tables.fields {
			let Some(value) = map.get(field) else {
				continue;
			};
			if value.is_null() {
				continue;
			}

			match value.as_str().and_then(|v| values.get(v)) {
				Some(&def) => return Ok(def),
				None => seen.push(SeenTag {
					field,
					value: value.clone(),
				}),
			}
		}

		Err(ObjectError::UnresolvedVariant {
			family: self.label(),
			seen,
		})
	}
}

/// Deserializes `raw` strictly as `T`.
///
/// Fixed discriminators present in the data must match the ones declared by
/// `T`; field shapes are checked by serde.
pub fn build_strict<T: Object>(raw: Value) -> Result<T> {
	let Value::Object(map) = &raw else {
		return Err(ObjectError::malformed(&raw));
	};

	for tag in fixed_tags::<T>() {
		match map.get(tag.field) {
			None | Some(Value::Null) => {}
			Some(Value::String(found)) if found == tag.value => {}
			Some(found) => {
				return Err(ObjectError::invalid(format!(
					"{}: expected {}={:?}, found {}",
					std::any::type_name::<T>(),
					tag.field,
					tag.value,
					found
				)));
			}
		}
	}

	serde_json::from_value(raw).map_err(restore_nested)
}

thread_local! {
	/// Last error raised by a nested member on this thread.
	static NESTED: RefCell<Option<ObjectError>> = const { RefCell::new(None) };
}

/// Hands a nested member's error to serde, keeping the typed error aside.
#[doc(hidden)]
pub fn nested_error<E: serde::de::Error>(err: ObjectError) -> E {
	let carried = E::custom(&err);
	NESTED.with(|slot| *slot.borrow_mut() = Some(err));
	carried
}

/// Recovers the typed error behind a serde failure, if it came from a nested
/// member. A kept error only matches when serde reports its exact text.
fn restore_nested(err: serde_json::Error) -> ObjectError {
	match NESTED.with(|slot| slot.borrow_mut().take()) {
		Some(nested) if nested.to_string() == err.to_string() => nested,
		_ => ObjectError::Validation(err),
	}
}
