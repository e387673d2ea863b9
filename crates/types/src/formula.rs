//! Formula results.

use notional_objects::{Object, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::DateRange;

family! {
	/// The computed result of a formula property.
	pub trait FormulaResult: "formula_result" in FORMULA_RESULT {
		/// The result as a plain value; `null` when the formula is empty.
		fn result(&self) -> Result<Value>;
	}
}

variant!(FormulaResult => StringFormula, NumberFormula, BooleanFormula, DateFormula);

macro_rules! formula {
	($ty:ident, $tag:literal, $field:ident: $payload:ty) => {
		#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
		pub struct $ty {
			#[serde(default)]
			pub $field: Option<$payload>,
		}

		impl Object for $ty {
			const TAG: Option<Tag> = Some(Tag::kind($tag));
		}

		impl Variant for $ty {
			type Payload = Option<$payload>;

			fn payload(&self) -> &Option<$payload> {
				&self.$field
			}
		}
	};
}

formula!(StringFormula, "string", string: String);
formula!(NumberFormula, "number", number: f64);
formula!(BooleanFormula, "boolean", boolean: bool);
formula!(DateFormula, "date", date: DateRange);

impl FormulaResult for StringFormula {
	fn result(&self) -> Result<Value> {
		Ok(self.string.clone().map_or(Value::Null, Value::String))
	}
}

impl FormulaResult for NumberFormula {
	fn result(&self) -> Result<Value> {
		Ok(self.number.map_or(Value::Null, Value::from))
	}
}

impl FormulaResult for BooleanFormula {
	fn result(&self) -> Result<Value> {
		Ok(self.boolean.map_or(Value::Null, Value::Bool))
	}
}

impl FormulaResult for DateFormula {
	fn result(&self) -> Result<Value> {
		match &self.date {
			Some(date) => Ok(serde_json::to_value(date)?),
			None => Ok(Value::Null),
		}
	}
}
