use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Badge {
	name: String,
}

impl Object for Badge {
	const OBJECT: Option<&'static str> = Some("badge");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Holder {
	#[serde(with = "crate::tagged")]
	main: Badge,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "crate::tagged::option"
	)]
	spare: Option<Badge>,
	#[serde(default, with = "crate::tagged::vec")]
	extra: Vec<Badge>,
}

impl Object for Holder {}

fn badge(name: &str) -> Badge {
	Badge {
		name: name.to_string(),
	}
}

#[test]
fn nested_tags_are_written() {
	let holder = Holder {
		main: badge("a"),
		spare: Some(badge("b")),
		extra: vec![badge("c")],
	};

	assert_eq!(
		holder.to_native().unwrap(),
		json!({
			"main": {"object": "badge", "name": "a"},
			"spare": {"object": "badge", "name": "b"},
			"extra": [{"object": "badge", "name": "c"}],
		})
	);
}

#[test]
fn nested_tags_are_checked() {
	let err = Holder::parse(json!({
		"main": {"object": "user", "name": "a"},
	}))
	.unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn missing_optionals_default() {
	let holder = Holder::parse(json!({
		"main": {"name": "a"},
		"spare": null,
	}))
	.unwrap();

	assert_eq!(
		holder,
		Holder {
			main: badge("a"),
			spare: None,
			extra: Vec::new(),
		}
	);
	assert_eq!(
		holder.to_native().unwrap(),
		json!({"main": {"object": "badge", "name": "a"}, "extra": []})
	);
}
