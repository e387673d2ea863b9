//! Rollup results.

use notional_objects::{Object, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{DateRange, Function};
use crate::property::PropertyValue;

family! {
	/// The aggregated value of a rollup property.
	pub trait RollupObject: "rollup" in ROLLUP {
		/// Aggregation that produced this value.
		fn function(&self) -> Option<Function>;
	}
}

variant!(RollupObject => RollupNumber, RollupDate, RollupArray);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupNumber {
	#[serde(default)]
	pub function: Option<Function>,
	#[serde(default)]
	pub number: Option<f64>,
}

impl Object for RollupNumber {
	const TAG: Option<Tag> = Some(Tag::kind("number"));
}

impl Variant for RollupNumber {
	type Payload = Option<f64>;

	fn payload(&self) -> &Option<f64> {
		&self.number
	}
}

impl RollupObject for RollupNumber {
	fn function(&self) -> Option<Function> {
		self.function
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollupDate {
	#[serde(default)]
	pub function: Option<Function>,
	#[serde(default)]
	pub date: Option<DateRange>,
}

impl Object for RollupDate {
	const TAG: Option<Tag> = Some(Tag::kind("date"));
}

impl Variant for RollupDate {
	type Payload = Option<DateRange>;

	fn payload(&self) -> &Option<DateRange> {
		&self.date
	}
}

impl RollupObject for RollupDate {
	fn function(&self) -> Option<Function> {
		self.function
	}
}

/// Rolled-up property values, one per related page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollupArray {
	#[serde(default)]
	pub function: Option<Function>,
	pub array: Vec<Box<dyn PropertyValue>>,
}

impl RollupArray {
	/// Returns the rolled-up values as plain values.
	pub fn values(&self) -> Result<Vec<Value>> {
		self.array.iter().map(|value| value.value()).collect()
	}
}

impl Object for RollupArray {
	const TAG: Option<Tag> = Some(Tag::kind("array"));
}

impl Variant for RollupArray {
	type Payload = [Box<dyn PropertyValue>];

	fn payload(&self) -> &[Box<dyn PropertyValue>] {
		&self.array
	}
}

impl RollupObject for RollupArray {
	fn function(&self) -> Option<Function> {
		self.function
	}
}
