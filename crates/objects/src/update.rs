//! Partial update of live instances.
//!
//! A patch is an explicit merge: fields missing from the patch, or set to
//! `null`, keep their current value. Discriminators and read-only fields are
//! dropped before validation, so they can be present in an API response
//! without ever being written back.

use serde_json::{Map, Value};

use crate::error::{ObjectError, Result};
use crate::object::{Object, fixed_tags};
use crate::resolve::build_strict;

/// Merges `patch` into `obj` and returns it.
///
/// The merged form is validated against `T` before anything is written, so a
/// rejected patch leaves `obj` untouched.
pub fn apply_partial<T: Object>(obj: &mut T, mut patch: Map<String, Value>) -> Result<&mut T> {
	for field in fixed_tags::<T>()
		.map(|tag| tag.field)
		.chain(T::READ_ONLY.iter().copied())
	{
		if patch.remove(field).is_some() {
			tracing::trace!(field, "ignoring read-only field in patch");
		}
	}
	patch.retain(|_, value| !value.is_null());

	if patch.is_empty() {
		return Ok(obj);
	}

	let mut merged = match obj.to_native()? {
		Value::Object(fields) => fields,
		other => return Err(ObjectError::malformed(&other)),
	};
	let written: Vec<String> = patch.keys().cloned().collect();
	merged.extend(patch);

	*obj = build_strict(Value::Object(merged))?;

	for field in &written {
		tracing::debug!(%field, "set object data");
	}

	Ok(obj)
}
