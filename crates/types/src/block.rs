//! Blocks: the content of a page.
//!
//! Every block is an `object=block` discriminated by `type`; its content
//! lives in the field named after the type. Server metadata ([`BlockMeta`])
//! is shared by all blocks and is read-only except for `archived`.

use chrono::{DateTime, FixedOffset};
use notional_objects::{Object, ObjectError, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::EmojiObject;
use crate::text::{Color, EquationData, RichTextObject, TextSpan, plain_text, spans_from_params};

/// Server-assigned block metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockMeta {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_time: Option<DateTime<FixedOffset>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_edited_time: Option<DateTime<FixedOffset>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub has_children: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub archived: Option<bool>,
}

const BLOCK_READ_ONLY: &[&str] = &["id", "created_time", "last_edited_time", "has_children"];

family! {
	/// A block of page content.
	pub trait Block: "block" in BLOCK {
		fn meta(&self) -> &BlockMeta;

		/// Text content of the block without styling; empty for blocks
		/// without text.
		fn plain_text(&self) -> String {
			String::new()
		}
	}
}

variant!(
	Block => Paragraph,
	Heading1,
	Heading2,
	Heading3,
	Quote,
	BulletedListItem,
	NumberedListItem,
	ToDo,
	Toggle,
	Code,
	Callout,
	Divider,
	EquationBlock,
	Bookmark
);

/// Implements the object plumbing of a block.
macro_rules! block {
	(
		$ty:ident, $tag:literal, $field:ident: $payload:ty
		$(; compose = $compose:path)?
		$(; text = $text:ident)?
	) => {
		impl Object for $ty {
			const OBJECT: Option<&'static str> = Some("block");
			const TAG: Option<Tag> = Some(Tag::kind($tag));
			const READ_ONLY: &'static [&'static str] = BLOCK_READ_ONLY;

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

		impl Block for $ty {
			fn meta(&self) -> &BlockMeta {
				&self.meta
			}

			$(
				fn plain_text(&self) -> String {
					plain_text(&self.$field.$text)
				}
			)?
		}
	};
}

/// Content of the plain text blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
	#[serde(default)]
	pub rich_text: Vec<Box<dyn RichTextObject>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Color>,
}

impl TextBlock {
	pub fn new(text: &str) -> Self {
		Self {
			rich_text: TextSpan::chunked(text, None, None)
				.into_iter()
				.map(|span| Box::new(span) as Box<dyn RichTextObject>)
				.collect(),
			color: None,
		}
	}

	/// One span per string parameter.
	pub fn from_params(params: &[Value]) -> Result<Self> {
		Ok(Self {
			rich_text: spans_from_params(params)?,
			color: None,
		})
	}
}

macro_rules! text_block {
	($ty:ident, $tag:literal, $field:ident) => {
		#[doc = concat!("A `", $tag, "` block.")]
		#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
		pub struct $ty {
			#[serde(flatten)]
			pub meta: BlockMeta,
			pub $field: TextBlock,
		}

		impl $ty {
			pub fn new(text: &str) -> Self {
				Self {
					meta: BlockMeta::default(),
					$field: TextBlock::new(text),
				}
			}

			fn from_params(params: &[Value]) -> Result<Self> {
				Ok(Self {
					meta: BlockMeta::default(),
					$field: TextBlock::from_params(params)?,
				})
			}
		}

		block!($ty, $tag, $field: TextBlock; compose = Self::from_params; text = rich_text);
	};
}

text_block!(Paragraph, "paragraph", paragraph);
text_block!(Heading1, "heading_1", heading_1);
text_block!(Heading2, "heading_2", heading_2);
text_block!(Heading3, "heading_3", heading_3);
text_block!(Quote, "quote", quote);
text_block!(BulletedListItem, "bulleted_list_item", bulleted_list_item);
text_block!(NumberedListItem, "numbered_list_item", numbered_list_item);
text_block!(Toggle, "toggle", toggle);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDoData {
	#[serde(default)]
	pub rich_text: Vec<Box<dyn RichTextObject>>,
	#[serde(default)]
	pub checked: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Color>,
}

/// A checklist item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToDo {
	#[serde(flatten)]
	pub meta: BlockMeta,
	pub to_do: ToDoData,
}

impl ToDo {
	pub fn new(text: &str, checked: bool) -> Self {
		Self {
			meta: BlockMeta::default(),
			to_do: ToDoData {
				rich_text: TextBlock::new(text).rich_text,
				checked,
				color: None,
			},
		}
	}

	pub fn is_checked(&self) -> bool {
		self.to_do.checked
	}

	/// `(text[, checked])`
	fn from_params(params: &[Value]) -> Result<Self> {
		let checked = match params.get(1) {
			None | Some(Value::Null) => false,
			Some(Value::Bool(checked)) => *checked,
			Some(other) => {
				return Err(ObjectError::invalid(format!(
					"to-do state must be a boolean, got {other}"
				)));
			}
		};
		Ok(Self {
			meta: BlockMeta::default(),
			to_do: ToDoData {
				rich_text: spans_from_params(params.get(..1).unwrap_or_default())?,
				checked,
				color: None,
			},
		})
	}
}

block!(ToDo, "to_do", to_do: ToDoData; compose = Self::from_params; text = rich_text);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeData {
	#[serde(default)]
	pub rich_text: Vec<Box<dyn RichTextObject>>,
	#[serde(default)]
	pub caption: Vec<Box<dyn RichTextObject>>,
	pub language: String,
}

impl Default for CodeData {
	fn default() -> Self {
		Self {
			rich_text: Vec::new(),
			caption: Vec::new(),
			language: Code::PLAIN_TEXT.to_string(),
		}
	}
}

/// A block of source code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
	#[serde(flatten)]
	pub meta: BlockMeta,
	pub code: CodeData,
}

impl Code {
	/// Language used when none is given.
	pub const PLAIN_TEXT: &'static str = "plain text";

	pub fn new(text: &str, language: Option<&str>) -> Self {
		Self {
			meta: BlockMeta::default(),
			code: CodeData {
				rich_text: TextBlock::new(text).rich_text,
				caption: Vec::new(),
				language: language.unwrap_or(Self::PLAIN_TEXT).to_string(),
			},
		}
	}

	/// `(text[, language])`
	fn from_params(params: &[Value]) -> Result<Self> {
		let language = match params.get(1) {
			None | Some(Value::Null) => Self::PLAIN_TEXT.to_string(),
			Some(Value::String(language)) => language.clone(),
			Some(other) => {
				return Err(ObjectError::invalid(format!(
					"code language must be a string, got {other}"
				)));
			}
		};
		Ok(Self {
			meta: BlockMeta::default(),
			code: CodeData {
				rich_text: spans_from_params(params.get(..1).unwrap_or_default())?,
				caption: Vec::new(),
				language,
			},
		})
	}
}

block!(Code, "code", code: CodeData; compose = Self::from_params; text = rich_text);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalloutData {
	#[serde(default)]
	pub rich_text: Vec<Box<dyn RichTextObject>>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "notional_objects::tagged::option"
	)]
	pub icon: Option<EmojiObject>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<Color>,
}

/// A highlighted block with an icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Callout {
	#[serde(flatten)]
	pub meta: BlockMeta,
	pub callout: CalloutData,
}

block!(Callout, "callout", callout: CalloutData; text = rich_text);

/// Content of a divider; always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividerData {}

/// A horizontal rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Divider {
	#[serde(flatten)]
	pub meta: BlockMeta,
	#[serde(default)]
	pub divider: DividerData,
}

block!(Divider, "divider", divider: DividerData);

/// A block-level math expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationBlock {
	#[serde(flatten)]
	pub meta: BlockMeta,
	pub equation: EquationData,
}

impl EquationBlock {
	pub fn new(expression: impl Into<String>) -> Self {
		Self {
			meta: BlockMeta::default(),
			equation: EquationData {
				expression: expression.into(),
			},
		}
	}

	fn from_params(params: &[Value]) -> Result<Self> {
		match params.first().and_then(Value::as_str) {
			Some(expression) => Ok(Self::new(expression)),
			None => Err(ObjectError::invalid("equation needs an expression")),
		}
	}
}

block!(EquationBlock, "equation", equation: EquationData; compose = Self::from_params);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkData {
	pub url: String,
	#[serde(default)]
	pub caption: Vec<Box<dyn RichTextObject>>,
}

/// A link preview to an external page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
	#[serde(flatten)]
	pub meta: BlockMeta,
	pub bookmark: BookmarkData,
}

impl Bookmark {
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			meta: BlockMeta::default(),
			bookmark: BookmarkData {
				url: url.into(),
				caption: Vec::new(),
			},
		}
	}

	/// `(url[, caption...])`
	fn from_params(params: &[Value]) -> Result<Self> {
		let url = params
			.first()
			.and_then(Value::as_str)
			.ok_or_else(|| ObjectError::invalid("bookmark needs a URL"))?;
		Ok(Self {
			meta: BlockMeta::default(),
			bookmark: BookmarkData {
				url: url.to_string(),
				caption: spans_from_params(params.get(1..).unwrap_or_default())?,
			},
		})
	}
}

block!(Bookmark, "bookmark", bookmark: BookmarkData; compose = Self::from_params; text = caption);
