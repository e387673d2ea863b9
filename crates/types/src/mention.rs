//! Mention payloads.

use notional_objects::{Object, Tag, Variant, family, variant};
use serde::{Deserialize, Serialize};

use crate::common::{DateRange, PageReference, UserRef};

family! {
	/// Data referenced by a mention span.
	pub trait MentionObject: "mention" in MENTION {}
}

family! {
	/// Data referenced by a template mention.
	pub trait TemplateMention: "template_mention" in TEMPLATE_MENTION {}
}

variant!(
	MentionObject => MentionUser,
	MentionPage,
	MentionDatabase,
	MentionDate,
	MentionLink,
	MentionTemplate
);
variant!(TemplateMention => MentionTemplateDate, MentionTemplateUser);

/// Implements the variant plumbing of a mention type whose payload lives in
/// the field named after its discriminator.
macro_rules! mention {
	($family:ident: $ty:ident, $tag:literal, $field:ident: $payload:ty) => {
		impl Object for $ty {
			const TAG: Option<Tag> = Some(Tag::kind($tag));
		}

		impl Variant for $ty {
			type Payload = $payload;

			fn payload(&self) -> &$payload {
				&self.$field
			}
		}

		impl $family for $ty {}
	};
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionUser {
	#[serde(with = "notional_objects::tagged")]
	pub user: UserRef,
}

mention!(MentionObject: MentionUser, "user", user: UserRef);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionPage {
	pub page: PageReference,
}

mention!(MentionObject: MentionPage, "page", page: PageReference);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionDatabase {
	pub database: PageReference,
}

mention!(MentionObject: MentionDatabase, "database", database: PageReference);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionDate {
	pub date: DateRange,
}

mention!(MentionObject: MentionDate, "date", date: DateRange);

/// Target of a link preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
	pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionLink {
	pub link_preview: LinkPreview,
}

mention!(MentionObject: MentionLink, "link_preview", link_preview: LinkPreview);

/// A template placeholder, resolved when the template is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionTemplate {
	pub template_mention: Box<dyn TemplateMention>,
}

mention!(MentionObject: MentionTemplate, "template_mention", template_mention: Box<dyn TemplateMention>);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionTemplateDate {
	/// `today` or `now`.
	pub template_mention_date: String,
}

mention!(TemplateMention: MentionTemplateDate, "template_mention_date", template_mention_date: String);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionTemplateUser {
	/// Always `me`.
	pub template_mention_user: String,
}

mention!(TemplateMention: MentionTemplateUser, "template_mention_user", template_mention_user: String);

#[cfg(test)]
mod tests;
