//! Notion API value model.
//!
//! Each module declares one or more families on top of `notional-objects`:
//!
//! | module      | family               | discriminator         |
//! |-------------|----------------------|-----------------------|
//! | [`text`]    | [`RICH_TEXT`]        | `type`                |
//! | [`mention`] | [`MENTION`], [`TEMPLATE_MENTION`] | `type`   |
//! | [`file`]    | [`FILE`]             | `type`                |
//! | [`property`]| [`PROPERTY_VALUE`]   | `type`                |
//! | [`formula`] | [`FORMULA_RESULT`]   | `type`                |
//! | [`rollup`]  | [`ROLLUP`]           | `type`                |
//! | [`block`]   | [`BLOCK`]            | `type` (`object=block`) |
//!
//! Variants register themselves when the crate is linked; any family can
//! deserialize raw API data as soon as it is first used.

pub mod block;
pub mod common;
pub mod file;
pub mod formula;
pub mod mention;
pub mod property;
pub mod rollup;
pub mod text;

pub use block::{BLOCK, Block};
pub use file::{FILE, FileObject};
pub use formula::{FORMULA_RESULT, FormulaResult};
pub use mention::{MENTION, MentionObject, TEMPLATE_MENTION, TemplateMention};
pub use notional_objects::{
	ErrorKind, Object, ObjectError, Result, SerializationMode, Serialized, compose,
};
pub use property::{PROPERTY_VALUE, PropertyValue};
pub use rollup::{ROLLUP, RollupObject};
pub use text::{RICH_TEXT, RichTextObject};
