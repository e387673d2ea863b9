//! File references.
//!
//! Depending on context a file may require a name (such as in the `files`
//! property), so `name` is optional on every variant and it is up to the
//! caller to set it where the API expects one.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use notional_objects::{Object, ObjectError, Result, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};
use serde_json::Value;

family! {
	/// A file hosted by Notion or linked from elsewhere.
	pub trait FileObject: "file" in FILE {
		fn name(&self) -> Option<&str>;

		fn url(&self) -> &str;
	}
}

variant!(FileObject => HostedFile, ExternalFile);

impl fmt::Display for dyn FileObject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name().unwrap_or("__unknown__"))
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedData {
	pub url: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expiry_time: Option<DateTime<FixedOffset>>,
}

/// A file uploaded to Notion. The URL is temporary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub file: HostedData,
}

impl Object for HostedFile {
	const TAG: Option<Tag> = Some(Tag::kind("file"));
}

impl Variant for HostedFile {
	type Payload = HostedData;

	fn payload(&self) -> &HostedData {
		&self.file
	}
}

impl FileObject for HostedFile {
	fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	fn url(&self) -> &str {
		&self.file.url
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalData {
	pub url: String,
}

/// A file linked by URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	pub external: ExternalData,
}

impl ExternalFile {
	pub fn from_url(url: impl Into<String>) -> Self {
		Self {
			name: None,
			external: ExternalData { url: url.into() },
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}
}

impl Object for ExternalFile {
	const TAG: Option<Tag> = Some(Tag::kind("external"));

	/// `(url[, name])`
	fn compose(params: &[Value]) -> Result<Self> {
		let url = params
			.first()
			.and_then(Value::as_str)
			.ok_or_else(|| ObjectError::invalid("external file needs a URL"))?;
		let file = Self::from_url(url);
		Ok(match params.get(1).and_then(Value::as_str) {
			Some(name) => file.with_name(name),
			None => file,
		})
	}
}

impl Variant for ExternalFile {
	type Payload = ExternalData;

	fn payload(&self) -> &ExternalData {
		&self.external
	}
}

impl FileObject for ExternalFile {
	fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	fn url(&self) -> &str {
		&self.external.url
	}
}

#[cfg(test)]
mod tests;
