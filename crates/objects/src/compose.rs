//! Composition of objects from shorthand values.
//!
//! Rather than spelling out nested records, callers hand a terse value to
//! [`compose`]: a string, a number, or a list of such values. A non-empty list
//! is spread into positional parameters, so `compose::<T>(vec!["a", "b"])` and
//! `compose!(T; "a", "b")` reach the same rule. Each type defines its rule in
//! [`Object::compose`]; the result is then re-validated exactly as if it had
//! been deserialized.

use serde_json::Value;

use crate::error::{ObjectError, Result, SeenTag};
use crate::object::Object;
use crate::registry::Family;

/// Splits shorthand into positional parameters.
pub fn spread(params: Value) -> Vec<Value> {
	match params {
		Value::Array(items) if !items.is_empty() => items,
		other => vec![other],
	}
}

/// Composes `T` from shorthand.
pub fn compose<T: Object>(params: impl Into<Value>) -> Result<T> {
	compose_params(&spread(params.into()))
}

/// Composes `T` from already spread parameters.
pub fn compose_params<T: Object>(params: &[Value]) -> Result<T> {
	let composed = T::compose(params)?;
	crate::resolve::build_strict(composed.to_native()?)
}

impl<T: ?Sized + 'static> Family<T> {
	/// Composes the variant registered under `value` from shorthand.
	///
	/// Discriminator fields are searched in registration order.
	pub fn compose(&self, value: &str, params: impl Into<Value>) -> Result<Box<T>> {
		let fields = self.discriminator_fields();
		if fields.is_empty() {
			return Err(ObjectError::EmptyRegistry {
				family: self.label(),
			});
		}

		match fields.iter().find_map(|field| self.lookup(field, value)) {
			Some(def) => (def.compose)(&spread(params.into())),
			None => Err(ObjectError::UnresolvedVariant {
				family: self.label(),
				seen: fields
					.into_iter()
					.map(|field| SeenTag {
						field,
						value: Value::String(value.to_string()),
					})
					.collect(),
			}),
		}
	}
}

/// Composes an object from one or more shorthand values.
///
/// ```ignore
/// let para = compose!(Paragraph; "hello world")?;
/// let link = compose!(TextSpan; "docs", "https://example.com")?;
/// ```
#[macro_export]
macro_rules! compose {
	($ty:ty; $param:expr $(,)?) => {
		$crate::compose::<$ty>($param)
	};
	($ty:ty; $($param:expr),+ $(,)?) => {
		$crate::compose::<$ty>($crate::__private::serde_json::Value::Array(::std::vec![
			$($crate::__private::serde_json::Value::from($param)),+
		]))
	};
}
