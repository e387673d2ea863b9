//! Fixture families shared by the unit tests.

use std::any::TypeId;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compose::compose_params;
use crate::error::{ObjectError, Result};
use crate::object::{Object, Tag, Variant, variant_tag};
use crate::registry::VariantDef;
use crate::resolve::build_strict;

crate::family! {
	/// Geometric shapes, discriminated by `type` and by `object`.
	pub(crate) trait Shape: "shape" in SHAPES {
		fn area(&self) -> f64;
	}
}

crate::family! {
	pub(crate) trait Pattern: "pattern" in PATTERNS {}
}

crate::family! {
	pub(crate) trait Hollow: "hollow" in HOLLOW {}
}

crate::family! {
	pub(crate) trait Late: "late" in LATE {}
}

crate::variant!(Shape => Circle, Square, Marker);
crate::variant!(Pattern => Dots);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Radius {
	pub(crate) radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Circle {
	pub(crate) circle: Radius,
}

impl Object for Circle {
	const TAG: Option<Tag> = Some(Tag::kind("circle"));
}

impl Variant for Circle {
	type Payload = Radius;

	fn payload(&self) -> &Radius {
		&self.circle
	}
}

impl Shape for Circle {
	fn area(&self) -> f64 {
		std::f64::consts::PI * self.circle.radius * self.circle.radius
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Side {
	pub(crate) side: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Square {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) id: Option<String>,
	pub(crate) square: Side,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) label: Option<String>,
}

impl Square {
	pub(crate) fn new(side: f64) -> Self {
		Self {
			id: None,
			square: Side { side },
			label: None,
		}
	}
}

impl Object for Square {
	const TAG: Option<Tag> = Some(Tag::kind("square"));
	const READ_ONLY: &'static [&'static str] = &["id"];

	fn compose(params: &[Value]) -> Result<Self> {
		let side = params
			.first()
			.and_then(Value::as_f64)
			.ok_or_else(|| ObjectError::invalid("square needs a side length"))?;
		let label = params.get(1).and_then(Value::as_str).map(str::to_string);
		Ok(Self {
			label,
			..Self::new(side)
		})
	}
}

impl Variant for Square {
	type Payload = Side;

	fn payload(&self) -> &Side {
		&self.square
	}
}

impl Shape for Square {
	fn area(&self) -> f64 {
		self.square.side * self.square.side
	}
}

/// Registered under `object` rather than `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Marker {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) note: Option<String>,
}

impl Object for Marker {
	const TAG: Option<Tag> = Some(Tag::object("marker"));
}

impl Variant for Marker {
	type Payload = Option<String>;

	fn payload(&self) -> &Option<String> {
		&self.note
	}
}

impl Shape for Marker {
	fn area(&self) -> f64 {
		0.0
	}
}

/// Shares its discriminator value with [`Circle`] in another family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Dots {
	pub(crate) circle: Vec<u32>,
}

impl Object for Dots {
	const TAG: Option<Tag> = Some(Tag::kind("circle"));
}

impl Variant for Dots {
	type Payload = Vec<u32>;

	fn payload(&self) -> &Vec<u32> {
		&self.circle
	}
}

impl Pattern for Dots {}

/// Claims the `circle` discriminator of [`SHAPES`]; never statically registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Oval {
	pub(crate) circle: Radius,
	pub(crate) stretch: f64,
}

impl Object for Oval {
	const TAG: Option<Tag> = Some(Tag::kind("circle"));
}

impl Variant for Oval {
	type Payload = Radius;

	fn payload(&self) -> &Radius {
		&self.circle
	}
}

impl Shape for Oval {
	fn area(&self) -> f64 {
		std::f64::consts::PI * self.circle.radius * self.circle.radius * self.stretch
	}
}

pub(crate) static OVAL: VariantDef<dyn Shape> = VariantDef {
	tag: variant_tag::<Oval>(),
	type_name: "Oval",
	type_id: TypeId::of::<Oval>,
	build: |raw| build_strict::<Oval>(raw).map(|v| Box::new(v) as Box<dyn Shape>),
	compose: |params| compose_params::<Oval>(params).map(|v| Box::new(v) as Box<dyn Shape>),
};

/// A second definition of [`Circle`], distinct from the static one.
pub(crate) static CIRCLE_AGAIN: VariantDef<dyn Shape> = VariantDef {
	tag: variant_tag::<Circle>(),
	type_name: "Circle",
	type_id: TypeId::of::<Circle>,
	build: |raw| build_strict::<Circle>(raw).map(|v| Box::new(v) as Box<dyn Shape>),
	compose: |params| compose_params::<Circle>(params).map(|v| Box::new(v) as Box<dyn Shape>),
};

/// Registered at runtime only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Tardy {
	pub(crate) tardy: String,
}

impl Object for Tardy {
	const TAG: Option<Tag> = Some(Tag::kind("tardy"));

	fn compose(params: &[Value]) -> Result<Self> {
		let tardy = params
			.first()
			.and_then(Value::as_str)
			.ok_or_else(|| ObjectError::invalid("tardy needs text"))?;
		Ok(Self {
			tardy: tardy.to_string(),
		})
	}
}

impl Variant for Tardy {
	type Payload = String;

	fn payload(&self) -> &String {
		&self.tardy
	}
}

impl Late for Tardy {}

pub(crate) static TARDY: VariantDef<dyn Late> = VariantDef {
	tag: variant_tag::<Tardy>(),
	type_name: "Tardy",
	type_id: TypeId::of::<Tardy>,
	build: |raw| build_strict::<Tardy>(raw).map(|v| Box::new(v) as Box<dyn Late>),
	compose: |params| compose_params::<Tardy>(params).map(|v| Box::new(v) as Box<dyn Late>),
};

/// A plain record with no discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Counter {
	pub(crate) a: i64,
	pub(crate) b: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) c: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) flag: Option<bool>,
	#[serde(rename = "display_name", default, skip_serializing_if = "Option::is_none")]
	pub(crate) name: Option<String>,
}

impl Counter {
	pub(crate) fn new(a: i64, b: i64) -> Self {
		Self {
			a,
			b,
			c: None,
			flag: None,
			name: None,
		}
	}
}

impl Object for Counter {}

/// A record holding family members, resolved through [`SHAPES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Canvas {
	pub(crate) shapes: Vec<Box<dyn Shape>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub(crate) focus: Option<Box<dyn Shape>>,
}

impl Object for Canvas {
	const OBJECT: Option<&'static str> = Some("canvas");
}
