use notional_objects::{DynObject, ErrorKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::text::{MentionSpan, RICH_TEXT, RichTextObject};

#[rstest]
#[case(json!({"type": "user", "user": {"object": "user", "id": "u-1"}}))]
#[case(json!({"type": "page", "page": {"id": "p-1"}}))]
#[case(json!({"type": "database", "database": {"id": "d-1"}}))]
#[case(json!({"type": "date", "date": {"start": "2022-01-01"}}))]
#[case(json!({"type": "link_preview", "link_preview": {"url": "https://example.com"}}))]
#[case(json!({
	"type": "template_mention",
	"template_mention": {"type": "template_mention_user", "template_mention_user": "me"}
}))]
fn mentions_round_trip(#[case] raw: Value) {
	let mention = MENTION.deserialize(raw.clone()).unwrap();

	assert_eq!(mention.native_value().unwrap(), raw);
}

#[test]
fn user_mention_keeps_user_tag() {
	let mention = MENTION
		.deserialize(json!({"type": "user", "user": {"object": "user", "id": "u-1", "name": "Ada"}}))
		.unwrap();

	let user = mention.downcast_ref::<MentionUser>().map(|m| m.user.clone());

	assert_eq!(
		user,
		Some(UserRef {
			name: Some("Ada".to_string()),
			..UserRef::new("u-1")
		})
	);
	assert_eq!(
		mention.nested_payload().unwrap(),
		json!({"id": "u-1", "name": "Ada"})
	);
}

#[test]
fn template_mentions_resolve_nested_family() {
	let mention = MENTION
		.deserialize(json!({
			"type": "template_mention",
			"template_mention": {"type": "template_mention_date", "template_mention_date": "today"}
		}))
		.unwrap();

	let inner = mention
		.downcast_ref::<MentionTemplate>()
		.and_then(|m| m.template_mention.downcast_ref::<MentionTemplateDate>())
		.map(|date| date.template_mention_date.as_str());

	assert_eq!(inner, Some("today"));
}

#[test]
fn unknown_template_is_rejected() {
	let err = MENTION
		.deserialize(json!({
			"type": "template_mention",
			"template_mention": {"type": "template_mention_page", "template_mention_page": "x"}
		}))
		.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::UnresolvedVariant);
	assert_eq!(
		err.to_string(),
		r#"unsupported sub-type for template_mention: type="template_mention_page""#
	);
}

#[test]
fn mention_span_from_api() {
	let span = RICH_TEXT
		.deserialize(json!({
			"type": "mention",
			"mention": {"type": "page", "page": {"id": "p-1"}},
			"annotations": {"bold": false},
			"plain_text": "Roadmap",
			"href": "https://www.notion.so/p1"
		}))
		.unwrap();

	assert_eq!(span.plain_text(), "Roadmap");
	assert_eq!(span.href(), Some("https://www.notion.so/p1"));

	let page = span
		.downcast_ref::<MentionSpan>()
		.and_then(|m| m.mention.downcast_ref::<MentionPage>())
		.map(|m| m.page.id.as_str());
	assert_eq!(page, Some("p-1"));
}
