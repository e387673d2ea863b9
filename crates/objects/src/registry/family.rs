use std::sync::OnceLock;

use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use super::def::{InsertAction, VariantDef, VariantReg};
use crate::error::{ObjectError, Result};

/// Discriminator tables for one family.
pub(crate) struct Tables<T: ?Sized + 'static> {
	/// Discriminator field -> value -> definition, fields in registration order.
	pub(crate) fields: IndexMap<&'static str, FxHashMap<&'static str, &'static VariantDef<T>>>,
	/// Definitions in registration order.
	pub(crate) items: Vec<&'static VariantDef<T>>,
}

impl<T: ?Sized + 'static> Default for Tables<T> {
	fn default() -> Self {
		Self {
			fields: IndexMap::new(),
			items: Vec::new(),
		}
	}
}

impl<T: ?Sized + 'static> Tables<T> {
	fn insert(&mut self, label: &'static str, def: &'static VariantDef<T>) -> Result<InsertAction> {
		let values = self.fields.entry(def.tag.field).or_default();

		if let Some(&existing) = values.get(def.tag.value) {
			if existing.same_variant(def) {
				return Ok(InsertAction::KeptExisting);
			}
			return Err(ObjectError::DuplicateVariant {
				family: label,
				field: def.tag.field,
				value: def.tag.value,
				existing: existing.type_name,
				new: def.type_name,
			});
		}

		values.insert(def.tag.value, def);
		self.items.push(def);
		Ok(InsertAction::InsertedNew)
	}
}

/// Process-wide registry of the variants of one family.
///
/// A family is declared as a `static` (see [`crate::family!`]). On first use
/// it seeds itself from every [`VariantReg`] submitted with its label, then
/// accepts further runtime registrations. Tables sit behind a single-writer,
/// many-reader lock.
pub struct Family<T: ?Sized + 'static> {
	label: &'static str,
	tables: OnceLock<RwLock<Tables<T>>>,
}

impl<T: ?Sized + 'static> Family<T> {
	/// Creates an unseeded family.
	pub const fn new(label: &'static str) -> Self {
		Self {
			label,
			tables: OnceLock::new(),
		}
	}

	/// Returns the family label.
	pub fn label(&self) -> &'static str {
		self.label
	}

	pub(crate) fn tables(&self) -> RwLockReadGuard<'_, Tables<T>> {
		self.lock().read()
	}

	fn lock(&self) -> &RwLock<Tables<T>> {
		self.tables.get_or_init(|| RwLock::new(self.seed()))
	}

	/// Builds the initial tables from statically submitted definitions.
	///
	/// Definitions are sorted by discriminator so the seeded order does not
	/// depend on link order.
	fn seed(&self) -> Tables<T> {
		let mut defs: Vec<&'static VariantDef<T>> = inventory::iter::<VariantReg>
			.into_iter()
			.filter(|reg| reg.family == self.label)
			.filter_map(|reg| reg.def.downcast_ref::<VariantDef<T>>())
			.collect();
		defs.sort_by_key(|def| (def.tag.field, def.tag.value));

		let mut tables = Tables::default();
		for def in defs {
			if let Err(e) = tables.insert(self.label, def) {
				panic!("variant registry {}: {}", self.label, e);
			}
		}

		tracing::debug!(
			family = self.label,
			variants = tables.items.len(),
			"seeded variant registry"
		);
		tables
	}

	/// Registers a variant at runtime.
	///
	/// Registering the same variant twice is a no-op. Registering a different
	/// variant under a taken discriminator fails with
	/// [`ObjectError::DuplicateVariant`].
	pub fn register(&self, def: &'static VariantDef<T>) -> Result<InsertAction> {
		let mut tables = self.lock().write();
		let action = tables.insert(self.label, def)?;

		match action {
			InsertAction::InsertedNew => tracing::debug!(
				family = self.label,
				field = def.tag.field,
				value = def.tag.value,
				variant = def.type_name,
				"registered variant"
			),
			InsertAction::KeptExisting => tracing::trace!(
				family = self.label,
				field = def.tag.field,
				value = def.tag.value,
				"variant already registered"
			),
		}

		Ok(action)
	}

	/// Looks up the variant registered under `field = value`.
	pub fn lookup(&self, field: &str, value: &str) -> Option<&'static VariantDef<T>> {
		self.tables()
			.fields
			.get(field)
			.and_then(|values| values.get(value))
			.copied()
	}

	/// Returns the discriminator fields in use, in registration order.
	pub fn discriminator_fields(&self) -> Vec<&'static str> {
		self.tables().fields.keys().copied().collect()
	}

	/// Returns every registered definition.
	pub fn variants(&self) -> Vec<&'static VariantDef<T>> {
		self.tables().items.clone()
	}

	/// Returns the number of registered variants.
	pub fn len(&self) -> usize {
		self.tables().items.len()
	}

	/// Returns true if no variant is registered.
	pub fn is_empty(&self) -> bool {
		self.tables().items.is_empty()
	}
}

impl<T: ?Sized + 'static> std::fmt::Debug for Family<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Family")
			.field("label", &self.label)
			.field("seeded", &self.tables.get().is_some())
			.finish()
	}
}
