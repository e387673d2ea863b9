//! Shared value records.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use notional_objects::{Object, Result, Tag};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::text::Color;

/// A reference to a Notion user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
	pub id: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
}

impl UserRef {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: None,
			avatar_url: None,
		}
	}
}

impl Object for UserRef {
	const OBJECT: Option<&'static str> = Some("user");
	const READ_ONLY: &'static [&'static str] = &["id"];
}

impl fmt::Display for UserRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name.as_deref().unwrap_or(&self.id))
	}
}

/// A page (or database) reference: an object with an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageReference {
	pub id: String,
}

impl PageReference {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into() }
	}
}

impl Object for PageReference {}

/// A calendar date or an instant, as Notion sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateValue {
	DateTime(DateTime<FixedOffset>),
	Date(NaiveDate),
}

impl DateValue {
	/// Returns the value as a naive timestamp; dates start at midnight.
	pub fn naive(&self) -> NaiveDateTime {
		match self {
			Self::DateTime(dt) => dt.naive_utc(),
			Self::Date(date) => date.and_time(chrono::NaiveTime::MIN),
		}
	}
}

impl From<NaiveDate> for DateValue {
	fn from(date: NaiveDate) -> Self {
		Self::Date(date)
	}
}

impl From<DateTime<FixedOffset>> for DateValue {
	fn from(dt: DateTime<FixedOffset>) -> Self {
		Self::DateTime(dt)
	}
}

impl PartialOrd for DateValue {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		self.naive().partial_cmp(&other.naive())
	}
}

impl fmt::Display for DateValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
			Self::Date(date) => write!(f, "{date}"),
		}
	}
}

/// A Notion date range, with an optional end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
	pub start: DateValue,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end: Option<DateValue>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub time_zone: Option<String>,
}

impl DateRange {
	pub fn new(start: impl Into<DateValue>) -> Self {
		Self {
			start: start.into(),
			end: None,
			time_zone: None,
		}
	}

	pub fn between(start: impl Into<DateValue>, end: impl Into<DateValue>) -> Self {
		Self {
			end: Some(end.into()),
			..Self::new(start)
		}
	}

	/// Returns true if this range has an end.
	pub fn is_range(&self) -> bool {
		self.end.is_some()
	}

	/// Returns whether `when` falls inside the range, inclusive.
	///
	/// A single date is not a range and yields `None`.
	pub fn contains(&self, when: impl Into<DateValue>) -> Option<bool> {
		let end = self.end?;
		let when = when.into();
		Some(self.start <= when && when <= end)
	}

	/// Parses a date range from shorthand: `(start[, end])`.
	pub(crate) fn from_params(params: &[Value]) -> Result<Self> {
		let mut raw = serde_json::Map::new();
		if let Some(start) = params.first() {
			raw.insert("start".into(), start.clone());
		}
		if let Some(end) = params.get(1) {
			raw.insert("end".into(), end.clone());
		}
		Self::parse(Value::Object(raw))
	}
}

impl Object for DateRange {}

impl fmt::Display for DateRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.end {
			Some(end) => write!(f, "{} :: {}", self.start, end),
			None => write!(f, "{}", self.start),
		}
	}
}

/// A Notion emoji object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiObject {
	pub emoji: String,
}

impl EmojiObject {
	pub fn new(emoji: impl Into<String>) -> Self {
		Self {
			emoji: emoji.into(),
		}
	}
}

impl Object for EmojiObject {
	const TAG: Option<Tag> = Some(Tag::kind("emoji"));

	fn compose(params: &[Value]) -> Result<Self> {
		match params.first().and_then(Value::as_str) {
			Some(emoji) => Ok(Self::new(emoji)),
			None => Err(notional_objects::ObjectError::invalid("emoji needs a character")),
		}
	}
}

/// An option of a select or multi-select property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectValue {
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Color>,
}

impl SelectValue {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			id: None,
			color: None,
		}
	}
}

impl Object for SelectValue {}

impl fmt::Display for SelectValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.name)
	}
}

/// Aggregation applied by a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
	CountAll,
	CountValues,
	CountUniqueValues,
	CountEmpty,
	CountNotEmpty,
	PercentEmpty,
	PercentNotEmpty,
	Sum,
	Average,
	Median,
	Min,
	Max,
	Range,
	EarliestDate,
	LatestDate,
	DateRange,
	Checked,
	Unchecked,
	PercentChecked,
	PercentUnchecked,
	ShowOriginal,
	ShowUnique,
}
