use std::any::{Any, TypeId};

use serde_json::Value;

use crate::error::Result;
use crate::object::Tag;

/// Describes one concrete variant of a family.
///
/// Definitions are static and built by [`crate::variant!`]; the function
/// pointers wrap the concrete type so the registry can produce `Box<T>` for
/// a family trait object `T` without knowing the concrete type.
pub struct VariantDef<T: ?Sized + 'static> {
	/// Discriminator this variant is registered under.
	pub tag: Tag,
	/// Rust type name of the variant.
	pub type_name: &'static str,
	/// Identity of the concrete type, for idempotent re-registration.
	pub type_id: fn() -> TypeId,
	/// Strictly deserializes raw data into the variant.
	pub build: fn(Value) -> Result<Box<T>>,
	/// Composes the variant from shorthand parameters.
	pub compose: fn(&[Value]) -> Result<Box<T>>,
}

impl<T: ?Sized + 'static> VariantDef<T> {
	/// Returns true if both definitions describe the same concrete type.
	pub fn same_variant(&self, other: &Self) -> bool {
		std::ptr::eq(self, other) || (self.type_id)() == (other.type_id)()
	}
}

impl<T: ?Sized + 'static> std::fmt::Debug for VariantDef<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VariantDef")
			.field("tag", &self.tag)
			.field("type_name", &self.type_name)
			.finish_non_exhaustive()
	}
}

/// Type-erased static registration collected via `inventory`.
///
/// `def` always points at a `VariantDef<dyn Family>`; families downcast the
/// entries carrying their own label when they seed.
pub struct VariantReg {
	/// Label of the family this definition belongs to.
	pub family: &'static str,
	/// The erased definition.
	pub def: &'static (dyn Any + Send + Sync),
}

inventory::collect!(VariantReg);

/// Result of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Discriminator was new; definition inserted.
	InsertedNew,
	/// The same variant was already registered under this discriminator.
	KeptExisting,
}
