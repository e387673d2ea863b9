use pretty_assertions::assert_eq;

use super::*;
use crate::error::ErrorKind;
use crate::object::{DynObject, Tag};
use crate::testing::{CIRCLE_AGAIN, HOLLOW, LATE, OVAL, PATTERNS, SHAPES, TARDY};

#[test]
fn seeds_static_variants() {
	assert_eq!(SHAPES.len(), 3);
	assert!(!SHAPES.is_empty());
	assert_eq!(SHAPES.label(), "shape");

	let mut names: Vec<_> = SHAPES.variants().iter().map(|def| def.type_name).collect();
	names.sort_unstable();
	assert_eq!(names, vec!["Circle", "Marker", "Square"]);
}

#[test]
fn discriminator_fields_are_ordered() {
	assert_eq!(SHAPES.discriminator_fields(), vec!["object", "type"]);
	assert_eq!(PATTERNS.discriminator_fields(), vec!["type"]);
}

#[test]
fn lookup_by_field_and_value() {
	let def = SHAPES.lookup("type", "square").expect("square is registered");
	assert_eq!(def.tag, Tag::kind("square"));
	assert_eq!(def.type_name, "Square");

	assert!(SHAPES.lookup("object", "marker").is_some());
	assert!(SHAPES.lookup("object", "square").is_none());
	assert!(SHAPES.lookup("type", "triangle").is_none());
	assert!(SHAPES.lookup("kind", "square").is_none());
}

#[test]
fn families_do_not_share_tables() {
	let shape = SHAPES.lookup("type", "circle").expect("circle shape");
	let pattern = PATTERNS.lookup("type", "circle").expect("circle pattern");

	assert_eq!(shape.type_name, "Circle");
	assert_eq!(pattern.type_name, "Dots");
	assert_eq!(PATTERNS.len(), 1);
}

#[test]
fn conflicting_registration_fails() {
	let err = SHAPES.register(&OVAL).unwrap_err();

	assert_eq!(err.kind(), ErrorKind::DuplicateVariant);
	assert_eq!(
		err.to_string(),
		"duplicate variant in shape: type=\"circle\" existing=Circle new=Oval"
	);
	assert_eq!(
		SHAPES.lookup("type", "circle").map(|def| def.type_name),
		Some("Circle")
	);
}

#[test]
fn reregistration_is_idempotent() {
	let seeded = SHAPES.lookup("type", "circle").expect("circle shape");

	assert_eq!(SHAPES.register(seeded).unwrap(), InsertAction::KeptExisting);
	assert_eq!(SHAPES.register(&CIRCLE_AGAIN).unwrap(), InsertAction::KeptExisting);
	assert_eq!(SHAPES.len(), 3);
}

#[test]
fn late_registration_is_honored() {
	assert_eq!(LATE.register(&TARDY).unwrap(), InsertAction::InsertedNew);
	assert_eq!(LATE.register(&TARDY).unwrap(), InsertAction::KeptExisting);

	let late = LATE
		.deserialize(serde_json::json!({"type": "tardy", "tardy": "finally"}))
		.unwrap();
	assert_eq!(late.discriminator(), Tag::kind("tardy"));
}

#[test]
fn empty_family() {
	assert!(HOLLOW.is_empty());
	assert_eq!(HOLLOW.len(), 0);
	assert!(HOLLOW.discriminator_fields().is_empty());
}

#[test]
fn family_kind_binds_static() {
	assert_eq!(<dyn crate::testing::Shape as FamilyKind>::LABEL, "shape");
	assert!(std::ptr::eq(
		<dyn crate::testing::Shape as FamilyKind>::family(),
		&SHAPES
	));
}
