//! Page property values.
//!
//! Every property value carries a server-assigned `id` which is never written
//! back by a partial update. The payload lives in the field named after the
//! value's `type`.

use std::fmt;
use std::ops::{AddAssign, SubAssign};

use chrono::{DateTime, FixedOffset};
use notional_objects::{Object, ObjectError, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::{DateRange, DateValue, PageReference, SelectValue, UserRef};
use crate::file::FileObject;
use crate::formula::FormulaResult;
use crate::rollup::RollupObject;
use crate::text::{RichTextObject, plain_text, spans_from_params};

family! {
	/// The value of a page property.
	pub trait PropertyValue: "property_value" in PROPERTY_VALUE {
		/// Server-assigned property id.
		fn id(&self) -> Option<&str>;

		/// The value as a plain value.
		fn value(&self) -> Result<Value> {
			self.nested_payload()
		}
	}
}

variant!(
	PropertyValue => Title,
	RichText,
	Number,
	Checkbox,
	Date,
	SelectOne,
	MultiSelect,
	People,
	Url,
	Email,
	PhoneNumber,
	Files,
	Formula,
	Relation,
	Rollup,
	CreatedTime,
	CreatedBy,
	LastEditedTime,
	LastEditedBy
);

/// Implements the object plumbing of a property value.
///
/// `compose` names an inherent shorthand builder, `value` an inherent
/// conversion to a plain value.
macro_rules! property {
	(
		$ty:ident, $tag:literal, $field:ident: $payload:ty
		$(; compose = $compose:path)?
		$(; value = $value:path)?
	) => {
		impl Object for $ty {
			const TAG: Option<Tag> = Some(Tag::kind($tag));
			const READ_ONLY: &'static [&'static str] = &["id"];

			$(
				fn compose(params: &[Value]) -> Result<Self> {
					$compose(params)
				}
			)?
		}

		impl Variant for $ty {
			type Payload = $payload;

			fn payload(&self) -> &$payload {
				&self.$field
			}
		}

		impl PropertyValue for $ty {
			fn id(&self) -> Option<&str> {
				self.id.as_deref()
			}

			$(
				fn value(&self) -> Result<Value> {
					$value(self)
				}
			)?
		}
	};
}

/// Reads an optional string parameter; `null` and absence are `None`.
fn optional_str(params: &[Value], what: &str) -> Result<Option<String>> {
	match params.first() {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(s)) => Ok(Some(s.clone())),
		Some(other) => Err(ObjectError::invalid(format!(
			"{what} must be a string, got {other}"
		))),
	}
}

/// A page title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub title: Vec<Box<dyn RichTextObject>>,
}

impl Title {
	pub fn new(text: &str) -> Self {
		Self {
			id: None,
			title: spans(text),
		}
	}

	pub fn plain_text(&self) -> String {
		plain_text(&self.title)
	}

	pub fn len(&self) -> usize {
		self.title.len()
	}

	pub fn is_empty(&self) -> bool {
		self.title.is_empty()
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		Ok(Self {
			id: None,
			title: spans_from_params(params)?,
		})
	}

	fn native(&self) -> Result<Value> {
		Ok(Value::String(self.plain_text()))
	}
}

property!(Title, "title", title: Vec<Box<dyn RichTextObject>>; compose = Self::from_params; value = Self::native);

impl fmt::Display for Title {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.plain_text())
	}
}

/// A rich text property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub rich_text: Vec<Box<dyn RichTextObject>>,
}

impl RichText {
	pub fn new(text: &str) -> Self {
		Self {
			id: None,
			rich_text: spans(text),
		}
	}

	pub fn plain_text(&self) -> String {
		plain_text(&self.rich_text)
	}

	pub fn len(&self) -> usize {
		self.rich_text.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rich_text.is_empty()
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		Ok(Self {
			id: None,
			rich_text: spans_from_params(params)?,
		})
	}

	fn native(&self) -> Result<Value> {
		Ok(Value::String(self.plain_text()))
	}
}

property!(RichText, "rich_text", rich_text: Vec<Box<dyn RichTextObject>>; compose = Self::from_params; value = Self::native);

impl fmt::Display for RichText {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.plain_text())
	}
}

fn spans(text: &str) -> Vec<Box<dyn RichTextObject>> {
	crate::text::TextSpan::chunked(text, None, None)
		.into_iter()
		.map(|span| Box::new(span) as Box<dyn RichTextObject>)
		.collect()
}

/// A number property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Number {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub number: Option<f64>,
}

impl Number {
	pub fn new(number: f64) -> Self {
		Self {
			id: None,
			number: Some(number),
		}
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		match params.first() {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(value) => value.as_f64().map(Self::new).ok_or_else(|| {
				ObjectError::invalid(format!("number must be numeric, got {value}"))
			}),
		}
	}

	/// Integral numbers come back as integers.
	fn native(&self) -> Result<Value> {
		Ok(match self.number {
			Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Value::from(n as i64),
			Some(n) => Value::from(n),
			None => Value::Null,
		})
	}
}

property!(Number, "number", number: Option<f64>; compose = Self::from_params; value = Self::native);

impl AddAssign<f64> for Number {
	fn add_assign(&mut self, rhs: f64) {
		self.number = Some(self.number.unwrap_or_default() + rhs);
	}
}

impl SubAssign<f64> for Number {
	fn sub_assign(&mut self, rhs: f64) {
		self.number = Some(self.number.unwrap_or_default() - rhs);
	}
}

/// A checkbox property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkbox {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub checkbox: Option<bool>,
}

impl Checkbox {
	pub fn new(checked: bool) -> Self {
		Self {
			id: None,
			checkbox: Some(checked),
		}
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		match params.first() {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(Value::Bool(checked)) => Ok(Self::new(*checked)),
			Some(other) => Err(ObjectError::invalid(format!(
				"checkbox must be a boolean, got {other}"
			))),
		}
	}
}

property!(Checkbox, "checkbox", checkbox: Option<bool>; compose = Self::from_params);

/// A date property; may include a time and may be a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Date {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub date: Option<DateRange>,
}

impl Date {
	pub fn new(range: DateRange) -> Self {
		Self {
			id: None,
			date: Some(range),
		}
	}

	/// Returns true if this date has an end.
	pub fn is_range(&self) -> bool {
		self.date.as_ref().is_some_and(DateRange::is_range)
	}

	pub fn start(&self) -> Option<DateValue> {
		self.date.as_ref().map(|date| date.start)
	}

	pub fn end(&self) -> Option<DateValue> {
		self.date.as_ref().and_then(|date| date.end)
	}

	/// Returns whether `when` falls inside this range, inclusive; `None` if
	/// this is not a range.
	pub fn contains(&self, when: impl Into<DateValue>) -> Option<bool> {
		self.date.as_ref().and_then(|date| date.contains(when))
	}

	/// `(start[, end])`
	fn from_params(params: &[Value]) -> Result<Self> {
		match params.first() {
			None | Some(Value::Null) => Ok(Self::default()),
			Some(_) => DateRange::from_params(params).map(Self::new),
		}
	}
}

property!(Date, "date", date: Option<DateRange>; compose = Self::from_params);

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.date {
			Some(date) => write!(f, "{date}"),
			None => Ok(()),
		}
	}
}

/// A single-select property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOne {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub select: Option<SelectValue>,
}

impl SelectOne {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: None,
			select: Some(SelectValue::new(name)),
		}
	}

	/// Name of the selected option.
	pub fn name(&self) -> Option<&str> {
		self.select.as_ref().map(|select| select.name.as_str())
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		Ok(match optional_str(params, "select option")? {
			Some(name) => Self::new(name),
			None => Self::default(),
		})
	}

	fn native(&self) -> Result<Value> {
		Ok(self.name().map_or(Value::Null, |name| Value::String(name.to_string())))
	}
}

property!(SelectOne, "select", select: Option<SelectValue>; compose = Self::from_params; value = Self::native);

impl fmt::Display for SelectOne {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name().unwrap_or_default())
	}
}

/// A multi-select property.
///
/// Options are compared by name only, never by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiSelect {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub multi_select: Vec<SelectValue>,
}

impl MultiSelect {
	pub fn new<I, S>(names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			id: None,
			multi_select: names.into_iter().map(SelectValue::new).collect(),
		}
	}

	/// Adds an option unless one with the same name is already selected.
	pub fn append(&mut self, name: impl Into<String>) -> &mut Self {
		let name = name.into();
		if !self.contains(&name) {
			tracing::debug!(%name, "append option");
			self.multi_select.push(SelectValue::new(name));
		}
		self
	}

	/// Removes every option with the given name.
	pub fn remove(&mut self, name: &str) -> &mut Self {
		tracing::debug!(name, "remove option");
		self.multi_select.retain(|opt| opt.name != name);
		self
	}

	pub fn contains(&self, name: &str) -> bool {
		self.multi_select.iter().any(|opt| opt.name == name)
	}

	/// Names of the selected options.
	pub fn values(&self) -> Vec<&str> {
		self.multi_select.iter().map(|opt| opt.name.as_str()).collect()
	}

	pub fn len(&self) -> usize {
		self.multi_select.len()
	}

	pub fn is_empty(&self) -> bool {
		self.multi_select.is_empty()
	}

	/// Strings and numbers become option names; nulls are skipped.
	fn from_params(params: &[Value]) -> Result<Self> {
		let mut select = Self::default();
		for param in params {
			match param {
				Value::Null => {}
				Value::String(name) => {
					select.append(name.as_str());
				}
				Value::Number(n) => {
					select.append(n.to_string());
				}
				other => {
					return Err(ObjectError::invalid(format!(
						"select option must be a string, got {other}"
					)));
				}
			}
		}
		Ok(select)
	}

	fn native(&self) -> Result<Value> {
		Ok(self.values().into_iter().map(Value::from).collect())
	}
}

property!(MultiSelect, "multi_select", multi_select: Vec<SelectValue>; compose = Self::from_params; value = Self::native);

impl fmt::Display for MultiSelect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.values().join(", "))
	}
}

/// A people property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct People {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, with = "notional_objects::tagged::vec")]
	pub people: Vec<UserRef>,
}

impl People {
	/// Returns true if a user with this id or name is listed.
	pub fn contains(&self, id_or_name: &str) -> bool {
		self.people
			.iter()
			.any(|user| user.id == id_or_name || user.name.as_deref() == Some(id_or_name))
	}
}

property!(People, "people", people: Vec<UserRef>);

impl fmt::Display for People {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<String> = self.people.iter().map(ToString::to_string).collect();
		f.write_str(&names.join(", "))
	}
}

macro_rules! string_property {
	($ty:ident, $tag:literal, $field:ident, $what:literal) => {
		#[doc = concat!("A `", $tag, "` property.")]
		#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
		pub struct $ty {
			#[serde(default, skip_serializing_if = "Option::is_none")]
			pub id: Option<String>,
			#[serde(default)]
			pub $field: Option<String>,
		}

		impl $ty {
			pub fn new(value: impl Into<String>) -> Self {
				Self {
					id: None,
					$field: Some(value.into()),
				}
			}

			fn from_params(params: &[Value]) -> Result<Self> {
				Ok(Self {
					id: None,
					$field: optional_str(params, $what)?,
				})
			}
		}

		property!($ty, $tag, $field: Option<String>; compose = Self::from_params);

		impl fmt::Display for $ty {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.$field.as_deref().unwrap_or_default())
			}
		}
	};
}

string_property!(Url, "url", url, "url");
string_property!(Email, "email", email, "email");
string_property!(PhoneNumber, "phone_number", phone_number, "phone number");

/// A files property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Files {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub files: Vec<Box<dyn FileObject>>,
}

impl Files {
	/// Returns true if a file with this name or URL is listed.
	pub fn contains(&self, name_or_url: &str) -> bool {
		self.files
			.iter()
			.any(|file| file.name() == Some(name_or_url) || file.url() == name_or_url)
	}

	pub fn append(&mut self, file: Box<dyn FileObject>) -> &mut Self {
		tracing::debug!(file = %file, "append file");
		self.files.push(file);
		self
	}

	/// Removes every file with this name or URL.
	pub fn remove(&mut self, name_or_url: &str) -> &mut Self {
		tracing::debug!(file = name_or_url, "remove file");
		self.files
			.retain(|file| file.name() != Some(name_or_url) && file.url() != name_or_url);
		self
	}
}

property!(Files, "files", files: Vec<Box<dyn FileObject>>);

impl fmt::Display for Files {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let names: Vec<String> = self.files.iter().map(ToString::to_string).collect();
		f.write_str(&names.join("; "))
	}
}

/// A formula property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formula {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub formula: Option<Box<dyn FormulaResult>>,
}

impl Formula {
	/// The formula result as a plain value.
	pub fn result(&self) -> Result<Value> {
		self.formula
			.as_ref()
			.map_or(Ok(Value::Null), |formula| formula.result())
	}
}

property!(Formula, "formula", formula: Option<Box<dyn FormulaResult>>; value = Self::result);

/// A relation property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relation {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub relation: Vec<PageReference>,
}

impl Relation {
	/// Builds a relation to the given pages.
	pub fn pages<I>(pages: I) -> Self
	where
		I: IntoIterator<Item = PageReference>,
	{
		Self {
			id: None,
			relation: pages.into_iter().collect(),
		}
	}
}

property!(Relation, "relation", relation: Vec<PageReference>);

/// A rollup property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rollup {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default)]
	pub rollup: Option<Box<dyn RollupObject>>,
}

impl Rollup {
	fn native(&self) -> Result<Value> {
		self.rollup
			.as_ref()
			.map_or(Ok(Value::Null), |rollup| rollup.nested_payload())
	}
}

property!(Rollup, "rollup", rollup: Option<Box<dyn RollupObject>>; value = Self::native);

/// When the page was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTime {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub created_time: DateTime<FixedOffset>,
}

property!(CreatedTime, "created_time", created_time: DateTime<FixedOffset>);

/// Who created the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBy {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(with = "notional_objects::tagged")]
	pub created_by: UserRef,
}

property!(CreatedBy, "created_by", created_by: UserRef);

/// When the page was last edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEditedTime {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	pub last_edited_time: DateTime<FixedOffset>,
}

property!(LastEditedTime, "last_edited_time", last_edited_time: DateTime<FixedOffset>);

/// Who last edited the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastEditedBy {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(with = "notional_objects::tagged")]
	pub last_edited_by: UserRef,
}

property!(LastEditedBy, "last_edited_by", last_edited_by: UserRef);

#[cfg(test)]
mod tests;
