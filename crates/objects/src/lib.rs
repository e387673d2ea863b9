//! Polymorphic object model for the Notion API.
//!
//! This crate provides the pieces every wire object is built on:
//! - [`Object`] / [`Variant`]: base contracts with fixed discriminators
//! - [`Family`]: process-wide variant registry for one family of objects
//! - [`Family::resolve`]: selects and builds the variant raw data describes
//! - [`compose`]: builds objects from terse shorthand values
//! - [`serialize`]: native or compact JSON output with unset fields omitted
//! - [`apply_partial`]: additive merge of API responses into live objects
//!
//! Families and their variants are declared with [`family!`] and
//! [`variant!`]; registration is static and needs no explicit init call.

mod compose;
mod error;
mod macros;
mod object;
mod registry;
mod resolve;
mod serialize;
pub mod tagged;
#[cfg(test)]
mod testing;
mod update;

pub use compose::{compose, compose_params, spread};
pub use error::{ErrorKind, ObjectError, Result, SeenTag, value_kind};
pub use object::{
	DynObject, OBJECT_FIELD, Object, TYPE_FIELD, Tag, Variant, fixed_tags, variant_tag,
};
pub use registry::{Family, FamilyKind, InsertAction, VariantDef, VariantReg};
pub use resolve::{Input, build_strict};
pub use serialize::{
	SerializationMode, Serialized, serialize, serialize_dyn, strip_nulls, to_native,
};
pub use update::apply_partial;

/// Parses raw data strictly as `T`.
pub fn deserialize<T: Object>(raw: serde_json::Value) -> Result<T> {
	T::parse(raw)
}

#[doc(hidden)]
pub mod __private {
	pub use {inventory, paste, serde, serde_json};

	pub use crate::resolve::nested_error;
}
