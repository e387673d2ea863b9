//! Variant registry.
//!
//! Each family owns its own tables, keyed first by discriminator field and then
//! by discriminator value. Variants register statically through
//! [`crate::variant!`] and are picked up when the family is first used; late
//! registrations go through [`Family::register`].
//!
//! # Invariants
//!
//! - Within one family and one discriminator field, a value maps to exactly one
//!   variant. A conflicting registration fails at registration time.
//! - Re-registering the same variant is idempotent.
//! - Families never share tables: seeding filters by family label and by the
//!   family's trait object type.

mod def;
mod family;

pub use def::{InsertAction, VariantDef, VariantReg};
pub use family::Family;

#[cfg(test)]
mod tests;

/// Binds a family trait object to its static [`Family`].
///
/// Implemented for `dyn Trait` by [`crate::family!`].
pub trait FamilyKind: 'static {
	/// Label of the family.
	const LABEL: &'static str;

	/// Returns the process-wide family registry.
	fn family() -> &'static Family<Self>;
}
