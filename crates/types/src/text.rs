//! Rich text spans and styling.
//!
//! Rich text is an ordered list of spans. Each span is one member of the
//! [`RICH_TEXT`] family, discriminated by `type`: plain text, mention or
//! equation. Every span carries the same rendering metadata ([`SpanMeta`]).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use notional_objects::{Object, ObjectError, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mention::MentionObject;

/// Maximum length of a single text span accepted by the API.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Foreground and background colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
	#[default]
	Default,
	Gray,
	Brown,
	Orange,
	Yellow,
	Green,
	Blue,
	Purple,
	Pink,
	Red,
	GrayBackground,
	BrownBackground,
	OrangeBackground,
	YellowBackground,
	GreenBackground,
	BlueBackground,
	PurpleBackground,
	PinkBackground,
	RedBackground,
}

/// Style flags of a span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
	pub bold: bool,
	pub italic: bool,
	#[serde(rename = "strikethrough")]
	pub strike: bool,
	pub underline: bool,
	pub code: bool,
	pub color: Color,
}

impl Annotations {
	/// Returns true if no flag is set and the color is the default.
	pub fn is_plain(&self) -> bool {
		*self == Self::default()
	}
}

/// A hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkObject {
	pub url: String,
}

/// Metadata shared by every span.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanMeta {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub annotations: Option<Annotations>,
	#[serde(default)]
	pub plain_text: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub href: Option<String>,
}

family! {
	/// A span of rich text.
	pub trait RichTextObject: "rich_text" in RICH_TEXT {
		fn meta(&self) -> &SpanMeta;

		/// Text content without styling.
		fn plain_text(&self) -> &str {
			&self.meta().plain_text
		}

		fn href(&self) -> Option<&str> {
			self.meta().href.as_deref()
		}

		fn annotations(&self) -> Option<&Annotations> {
			self.meta().annotations.as_ref()
		}
	}
}

variant!(RichTextObject => TextSpan, MentionSpan, EquationSpan);

/// Joins the plain text of the given spans.
pub fn plain_text<'a, I>(spans: I) -> String
where
	I: IntoIterator<Item = &'a Box<dyn RichTextObject>>,
{
	spans.into_iter().map(|span| span.plain_text()).collect()
}

/// Content of a text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
	pub content: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link: Option<LinkObject>,
}

/// A plain text span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
	pub text: TextData,
	#[serde(flatten)]
	pub meta: SpanMeta,
}

impl TextSpan {
	pub fn new(content: impl Into<String>) -> Self {
		Self::styled(content, None, None)
	}

	/// Builds a span with an optional link and styling.
	pub fn styled(
		content: impl Into<String>,
		href: Option<String>,
		annotations: Option<Annotations>,
	) -> Self {
		let content = content.into();
		Self {
			text: TextData {
				content: content.clone(),
				link: href.clone().map(|url| LinkObject { url }),
			},
			meta: SpanMeta {
				annotations,
				plain_text: content,
				href,
			},
		}
	}

	/// Splits `content` into spans no longer than [`MAX_TEXT_LENGTH`].
	pub fn chunked(
		content: &str,
		href: Option<String>,
		annotations: Option<Annotations>,
	) -> Vec<Self> {
		chunks(content, MAX_TEXT_LENGTH)
			.into_iter()
			.map(|chunk| Self::styled(chunk, href.clone(), annotations.clone()))
			.collect()
	}
}

impl FromStr for TextSpan {
	type Err = Infallible;

	fn from_str(s: &str) -> std::result::Result<Self, Infallible> {
		Ok(Self::new(s))
	}
}

impl From<&str> for TextSpan {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl Object for TextSpan {
	const TAG: Option<Tag> = Some(Tag::kind("text"));

	/// `(content[, href[, annotations]])`
	fn compose(params: &[Value]) -> Result<Self> {
		let content = match params.first() {
			Some(Value::String(content)) => content.clone(),
			Some(other) => {
				return Err(ObjectError::invalid(format!(
					"text content must be a string, got {other}"
				)));
			}
			None => return Err(ObjectError::invalid("text needs content")),
		};
		let href = match params.get(1) {
			None | Some(Value::Null) => None,
			Some(Value::String(href)) => Some(href.clone()),
			Some(other) => {
				return Err(ObjectError::invalid(format!(
					"link must be a string, got {other}"
				)));
			}
		};
		let annotations = match params.get(2) {
			None | Some(Value::Null) => None,
			Some(style) => Some(serde_json::from_value(style.clone())?),
		};
		Ok(Self::styled(content, href, annotations))
	}
}

impl Variant for TextSpan {
	type Payload = TextData;

	fn payload(&self) -> &TextData {
		&self.text
	}
}

impl RichTextObject for TextSpan {
	fn meta(&self) -> &SpanMeta {
		&self.meta
	}

	/// Falls back to the content when no plain text was sent.
	fn plain_text(&self) -> &str {
		match self.meta.plain_text.as_str() {
			"" => &self.text.content,
			text => text,
		}
	}
}

impl fmt::Display for TextSpan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text.content)
	}
}

/// A mention of a user, page, database, date or link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionSpan {
	pub mention: Box<dyn MentionObject>,
	#[serde(flatten)]
	pub meta: SpanMeta,
}

impl Object for MentionSpan {
	const TAG: Option<Tag> = Some(Tag::kind("mention"));
}

impl Variant for MentionSpan {
	type Payload = dyn MentionObject;

	fn payload(&self) -> &dyn MentionObject {
		&*self.mention
	}
}

impl RichTextObject for MentionSpan {
	fn meta(&self) -> &SpanMeta {
		&self.meta
	}
}

/// An inline math expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationData {
	pub expression: String,
}

/// An inline equation span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationSpan {
	pub equation: EquationData,
	#[serde(flatten)]
	pub meta: SpanMeta,
}

impl EquationSpan {
	pub fn new(expression: impl Into<String>) -> Self {
		let expression = expression.into();
		Self {
			equation: EquationData {
				expression: expression.clone(),
			},
			meta: SpanMeta {
				plain_text: expression,
				..SpanMeta::default()
			},
		}
	}
}

impl Object for EquationSpan {
	const TAG: Option<Tag> = Some(Tag::kind("equation"));

	fn compose(params: &[Value]) -> Result<Self> {
		match params.first().and_then(Value::as_str) {
			Some(expression) => Ok(Self::new(expression)),
			None => Err(ObjectError::invalid("equation needs an expression")),
		}
	}
}

impl Variant for EquationSpan {
	type Payload = EquationData;

	fn payload(&self) -> &EquationData {
		&self.equation
	}
}

impl RichTextObject for EquationSpan {
	fn meta(&self) -> &SpanMeta {
		&self.meta
	}

	/// Falls back to the expression when no plain text was sent.
	fn plain_text(&self) -> &str {
		match self.meta.plain_text.as_str() {
			"" => &self.equation.expression,
			text => text,
		}
	}
}

/// Splits `text` into pieces of at most `limit` characters.
///
/// Empty text yields a single empty piece.
pub(crate) fn chunks(text: &str, limit: usize) -> Vec<&str> {
	let limit = limit.max(1);
	let mut out = Vec::new();
	let mut rest = text;
	loop {
		let split = rest
			.char_indices()
			.nth(limit)
			.map_or(rest.len(), |(idx, _)| idx);
		let (chunk, tail) = rest.split_at(split);
		out.push(chunk);
		if tail.is_empty() {
			return out;
		}
		rest = tail;
	}
}

/// Builds spans from shorthand parameters.
///
/// Strings become plain spans (split at the length limit), mappings are
/// resolved as spans, nulls are skipped.
pub(crate) fn spans_from_params(params: &[Value]) -> Result<Vec<Box<dyn RichTextObject>>> {
	let mut spans: Vec<Box<dyn RichTextObject>> = Vec::new();
	for param in params {
		match param {
			Value::Null => {}
			Value::String(text) => spans.extend(
				TextSpan::chunked(text, None, None)
					.into_iter()
					.map(|span| Box::new(span) as Box<dyn RichTextObject>),
			),
			Value::Object(_) => spans.push(RICH_TEXT.deserialize(param.clone())?),
			other => {
				return Err(ObjectError::invalid(format!(
					"rich text must be built from strings, got {other}"
				)));
			}
		}
	}
	Ok(spans)
}
