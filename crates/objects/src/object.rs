//! Base contracts shared by every wire object.
//!
//! Plain records implement [`Object`]. Records that belong to a family and are
//! selected by a discriminator additionally implement [`Variant`], which gives
//! them the object-safe [`DynObject`] plumbing used behind `Box<dyn Family>`.

use std::any::{Any, type_name};
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ObjectError, Result};
use crate::serialize::{SerializationMode, Serialized};

/// Name of the discriminator used by typed objects.
pub const TYPE_FIELD: &str = "type";

/// Name of the discriminator used by top-level data objects.
pub const OBJECT_FIELD: &str = "object";

/// A fixed discriminator pair baked into a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
	/// Wire field holding the discriminator.
	pub field: &'static str,
	/// Value identifying the variant.
	pub value: &'static str,
}

impl Tag {
	pub const fn new(field: &'static str, value: &'static str) -> Self {
		Self { field, value }
	}

	/// A `type` discriminator.
	pub const fn kind(value: &'static str) -> Self {
		Self::new(TYPE_FIELD, value)
	}

	/// An `object` discriminator.
	pub const fn object(value: &'static str) -> Self {
		Self::new(OBJECT_FIELD, value)
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}={:?}", self.field, self.value)
	}
}

/// The base for all API objects.
///
/// Discriminators are declared as constants rather than fields, so they are
/// fixed at compile time and cannot be changed on a live instance. They are
/// written ahead of the declared fields on serialization and checked on
/// deserialization.
pub trait Object:
	Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
	/// Fixed value of the `object` field, if this type carries one.
	const OBJECT: Option<&'static str> = None;

	/// Fixed `type` discriminator, if this type carries one.
	const TAG: Option<Tag> = None;

	/// Server-assigned wire fields that a partial update never writes.
	const READ_ONLY: &'static [&'static str] = &[];

	/// Builds an instance from shorthand parameters.
	///
	/// Types without a composition rule keep this default.
	fn compose(params: &[Value]) -> Result<Self> {
		let _ = params;
		Err(ObjectError::CompositionUnsupported {
			type_name: type_name::<Self>(),
		})
	}

	/// Parses raw data strictly against this type's shape.
	fn parse(raw: Value) -> Result<Self> {
		crate::resolve::build_strict(raw)
	}

	/// Parses JSON text strictly against this type's shape.
	fn parse_str(text: &str) -> Result<Self> {
		Self::parse(serde_json::from_str(text)?)
	}

	/// Converts to the native wire tree (tags first, unset fields omitted).
	fn to_native(&self) -> Result<Value> {
		crate::serialize::to_native(self)
	}

	/// Serializes in the requested mode.
	fn to_wire(&self, mode: SerializationMode) -> Result<Serialized> {
		crate::serialize::serialize(self, mode)
	}

	/// Merges a partial payload into this instance.
	fn apply_partial(&mut self, patch: Map<String, Value>) -> Result<&mut Self> {
		crate::update::apply_partial(self, patch)
	}
}

/// Iterates the fixed discriminators of `T`, `object` first.
pub fn fixed_tags<T: Object>() -> impl Iterator<Item = Tag> {
	T::OBJECT.map(Tag::object).into_iter().chain(T::TAG)
}

/// Returns the registered discriminator of a variant type.
///
/// Evaluated in const context by the registration macro, so a variant without
/// a tag fails to compile.
pub const fn variant_tag<V: Object>() -> Tag {
	match V::TAG {
		Some(tag) => tag,
		None => panic!("variant types must declare a discriminator tag"),
	}
}

/// A concrete shape registered within a family.
pub trait Variant: Object {
	/// Nested data stored under the field named by the discriminator value.
	type Payload: Serialize + ?Sized;

	/// Returns the nested payload.
	fn payload(&self) -> &Self::Payload;
}

/// Object-safe plumbing behind family trait objects.
pub trait DynObject: fmt::Debug + Send + Sync + 'static {
	/// Rust type name of the concrete variant.
	fn variant_name(&self) -> &'static str;

	/// The discriminator this instance was registered under.
	fn discriminator(&self) -> Tag;

	/// Native wire tree for this instance.
	fn native_value(&self) -> Result<Value>;

	/// The nested payload as a wire tree.
	fn nested_payload(&self) -> Result<Value>;

	/// Merges a partial payload into this instance.
	fn merge_patch(&mut self, patch: Map<String, Value>) -> Result<()>;

	fn as_any(&self) -> &dyn Any;

	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// Structural equality against another concrete value.
	fn object_eq(&self, other: &dyn Any) -> bool;
}

impl<V: Variant> DynObject for V {
	fn variant_name(&self) -> &'static str {
		type_name::<V>()
	}

	fn discriminator(&self) -> Tag {
		variant_tag::<V>()
	}

	fn native_value(&self) -> Result<Value> {
		Object::to_native(self)
	}

	fn nested_payload(&self) -> Result<Value> {
		let payload = serde_json::to_value(self.payload())?;
		Ok(crate::serialize::strip_nulls(payload))
	}

	fn merge_patch(&mut self, patch: Map<String, Value>) -> Result<()> {
		Object::apply_partial(self, patch).map(|_| ())
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn object_eq(&self, other: &dyn Any) -> bool {
		other.downcast_ref::<V>().is_some_and(|other| other == self)
	}
}
