use chrono::NaiveDate;
use notional_objects::{DynObject, ErrorKind, compose};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Map, json};

use super::*;
use crate::file::ExternalFile;

fn patch(value: Value) -> Map<String, Value> {
	match value {
		Value::Object(fields) => fields,
		other => panic!("patch fixture must be a mapping, got {other}"),
	}
}

#[test]
fn title_composes_from_text() {
	let title: Title = compose("Meeting notes").unwrap();

	assert_eq!(title, Title::new("Meeting notes"));
	assert_eq!(title.plain_text(), "Meeting notes");
	assert_eq!(title.len(), 1);
	assert_eq!(title.value().unwrap(), json!("Meeting notes"));
}

#[test]
fn rich_text_joins_spans() {
	let text = notional_objects::compose!(RichText; "one ", "two").unwrap();

	assert_eq!(text.len(), 2);
	assert_eq!(text.to_string(), "one two");
}

#[rstest]
#[case(json!(5), json!(5))]
#[case(json!(2.5), json!(2.5))]
#[case(json!(-3), json!(-3))]
fn number_value_keeps_integers(#[case] shorthand: Value, #[case] expected: Value) {
	let number: Number = compose(shorthand).unwrap();

	assert_eq!(number.value().unwrap(), expected);
}

#[test]
fn number_arithmetic() {
	let mut number = Number::default();

	number += 5.0;
	number -= 1.5;

	assert_eq!(number.number, Some(3.5));
}

#[test]
fn number_rejects_text() {
	let err = compose::<Number>("five").unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn checkbox_composes_from_bool() {
	let checkbox: Checkbox = compose(true).unwrap();

	assert_eq!(checkbox, Checkbox::new(true));
	assert_eq!(checkbox.value().unwrap(), json!(true));
}

#[test]
fn date_range_from_shorthand() {
	let date = notional_objects::compose!(Date; "2021-01-01", "2021-01-05").unwrap();
	let day = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();

	assert!(date.is_range());
	assert_eq!(date.contains(day(3)), Some(true));
	assert_eq!(date.contains(day(6)), Some(false));
	assert_eq!(date.to_string(), "2021-01-01 :: 2021-01-05");
}

#[test]
fn select_from_api() {
	let value = PROPERTY_VALUE
		.deserialize(json!({
			"id": "ab%3D",
			"type": "select",
			"select": {"id": "1", "name": "Doing", "color": "yellow"}
		}))
		.unwrap();

	assert_eq!(value.id(), Some("ab%3D"));
	assert_eq!(value.value().unwrap(), json!("Doing"));
	assert_eq!(
		value.downcast_ref::<SelectOne>().and_then(SelectOne::name),
		Some("Doing")
	);
}

#[test]
fn multi_select_deduplicates_by_name() {
	let mut tags: MultiSelect = compose(vec!["a", "b", "a"]).unwrap();

	assert_eq!(tags.values(), vec!["a", "b"]);

	tags.append("c").append("b").remove("a");

	assert_eq!(tags.values(), vec!["b", "c"]);
	assert!(tags.contains("c"));
	assert!(!tags.contains("a"));
	assert_eq!(tags.to_string(), "b, c");
	assert_eq!(tags.value().unwrap(), json!(["b", "c"]));
}

#[test]
fn people_keep_user_tags() {
	let raw = json!({
		"id": "p%3F",
		"type": "people",
		"people": [{"object": "user", "id": "u-1", "name": "Ada"}]
	});

	let people = People::parse(raw.clone()).unwrap();

	assert!(people.contains("Ada"));
	assert!(people.contains("u-1"));
	assert!(!people.contains("Grace"));
	assert_eq!(people.to_native().unwrap(), raw);
}

#[test]
fn files_are_matched_by_name_or_url() {
	let mut files = Files::default();

	files
		.append(Box::new(ExternalFile::from_url("https://example.com/a").with_name("a")))
		.append(Box::new(ExternalFile::from_url("https://example.com/b").with_name("b")));

	assert!(files.contains("a"));
	assert!(files.contains("https://example.com/b"));
	assert_eq!(files.to_string(), "a; b");

	files.remove("https://example.com/a");

	assert!(!files.contains("a"));
	assert_eq!(files.files.len(), 1);
}

#[test]
fn formula_value_is_its_result() {
	let value = PROPERTY_VALUE
		.deserialize(json!({
			"id": "f",
			"type": "formula",
			"formula": {"type": "number", "number": 42}
		}))
		.unwrap();

	assert_eq!(value.value().unwrap(), json!(42.0));
}

#[test]
fn created_by_round_trips() {
	let raw = json!({
		"id": "c",
		"type": "created_by",
		"created_by": {"object": "user", "id": "u-9"}
	});

	let value = PROPERTY_VALUE.deserialize(raw.clone()).unwrap();

	assert!(value.is::<CreatedBy>());
	assert_eq!(value.native_value().unwrap(), raw);
}

#[test]
fn relation_lists_pages() {
	let relation = Relation::pages([PageReference::new("p-1"), PageReference::new("p-2")]);

	assert_eq!(
		relation.to_native().unwrap(),
		json!({"type": "relation", "relation": [{"id": "p-1"}, {"id": "p-2"}]})
	);
}

#[test]
fn partial_update_keeps_property_id() {
	let mut number = Number {
		id: Some("n".to_string()),
		..Number::new(1.0)
	};

	number
		.apply_partial(patch(json!({"id": "other", "type": "number", "number": 7})))
		.unwrap();

	assert_eq!(number.id.as_deref(), Some("n"));
	assert_eq!(number.number, Some(7.0));
}

#[test]
fn partial_update_through_family() {
	let mut value = PROPERTY_VALUE
		.deserialize(json!({"id": "u", "type": "url", "url": null}))
		.unwrap();

	value
		.merge_patch(patch(json!({"url": "https://example.com"})))
		.unwrap();

	assert_eq!(
		value.downcast_ref::<Url>().map(ToString::to_string),
		Some("https://example.com".to_string())
	);
}

#[test]
fn unknown_property_type_is_rejected() {
	let err = PROPERTY_VALUE
		.deserialize(json!({"id": "x", "type": "status", "status": {"name": "Done"}}))
		.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::UnresolvedVariant);
	assert_eq!(
		err.to_string(),
		r#"unsupported sub-type for property_value: type="status""#
	);
}

/// Property whose payload cannot be written as JSON (non-string map keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Grid {
	grid: std::collections::BTreeMap<(u8, u8), bool>,
}

impl Object for Grid {
	const TAG: Option<Tag> = Some(Tag::kind("grid"));
}

impl Variant for Grid {
	type Payload = std::collections::BTreeMap<(u8, u8), bool>;

	fn payload(&self) -> &Self::Payload {
		&self.grid
	}
}

impl PropertyValue for Grid {
	fn id(&self) -> Option<&str> {
		None
	}
}

#[test]
fn unwritable_value_is_an_error() {
	let grid = Grid {
		grid: [((0, 1), true)].into_iter().collect(),
	};

	let err = grid.value().unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn empty_formula_is_null() {
	let formula = PROPERTY_VALUE
		.deserialize(json!({"type": "formula", "id": "f", "formula": null}))
		.unwrap();

	assert_eq!(formula.value().unwrap(), Value::Null);
}
