use serde_json::Value;
use thiserror::Error;

/// Result alias used throughout the object model.
pub type Result<T, E = ObjectError> = std::result::Result<T, E>;

/// A discriminator observed in raw data that did not resolve to a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct SeenTag {
	/// Discriminator field name (e.g. `type`).
	pub field: &'static str,
	/// Raw value found under that field.
	pub value: Value,
}

impl std::fmt::Display for SeenTag {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}={}", self.field, self.value)
	}
}

fn fmt_seen(seen: &[SeenTag]) -> String {
	if seen.is_empty() {
		return "no discriminator present".to_string();
	}
	seen.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(", ")
}

/// Errors raised while registering, resolving, composing or serializing objects.
#[derive(Error, Debug)]
pub enum ObjectError {
	/// Two different variants claimed the same discriminator within a family.
	#[error(
		"duplicate variant in {family}: {field}={value:?} existing={existing} new={new}"
	)]
	DuplicateVariant {
		family: &'static str,
		field: &'static str,
		value: &'static str,
		existing: &'static str,
		new: &'static str,
	},
	/// A family was asked to resolve data before any variant registered.
	#[error("no variants registered for {family}")]
	EmptyRegistry { family: &'static str },
	/// Raw data carried discriminators that no registered variant claims.
	#[error("unsupported sub-type for {family}: {}", fmt_seen(.seen))]
	UnresolvedVariant {
		family: &'static str,
		seen: Vec<SeenTag>,
	},
	/// A mapping was required but something else was supplied.
	#[error("invalid object: expected a mapping, got {found}")]
	MalformedInput { found: &'static str },
	/// Shorthand construction was attempted on a type without a composition rule.
	#[error("{type_name} does not support object composition")]
	CompositionUnsupported { type_name: &'static str },
	/// Unknown serialization mode.
	#[error("unsupported serialization mode: {0}")]
	UnsupportedMode(String),
	/// Field type or required-field violation.
	#[error("validation failed: {0}")]
	Validation(#[from] serde_json::Error),
}

/// Payload-free classification of an [`ObjectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	DuplicateVariant,
	EmptyRegistry,
	UnresolvedVariant,
	MalformedInput,
	CompositionUnsupported,
	UnsupportedMode,
	Validation,
}

impl ObjectError {
	/// Returns the kind of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::DuplicateVariant { .. } => ErrorKind::DuplicateVariant,
			Self::EmptyRegistry { .. } => ErrorKind::EmptyRegistry,
			Self::UnresolvedVariant { .. } => ErrorKind::UnresolvedVariant,
			Self::MalformedInput { .. } => ErrorKind::MalformedInput,
			Self::CompositionUnsupported { .. } => ErrorKind::CompositionUnsupported,
			Self::UnsupportedMode(_) => ErrorKind::UnsupportedMode,
			Self::Validation(_) => ErrorKind::Validation,
		}
	}

	/// Builds a validation error from a message.
	pub fn invalid(msg: impl std::fmt::Display) -> Self {
		Self::Validation(<serde_json::Error as serde::de::Error>::custom(msg))
	}

	/// Builds a [`ObjectError::MalformedInput`] describing `value`.
	pub fn malformed(value: &Value) -> Self {
		Self::MalformedInput {
			found: value_kind(value),
		}
	}
}

/// Short name of a JSON value's shape, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
