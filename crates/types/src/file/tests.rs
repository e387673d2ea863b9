use notional_objects::{ErrorKind, compose};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;

#[test]
fn hosted_file_from_api() {
	let file = FILE
		.deserialize(json!({
			"type": "file",
			"name": "report.pdf",
			"file": {
				"url": "https://s3.example.com/report.pdf",
				"expiry_time": "2022-03-01T12:00:00.000Z"
			}
		}))
		.unwrap();

	assert!(file.is::<HostedFile>());
	assert_eq!(file.name(), Some("report.pdf"));
	assert_eq!(file.url(), "https://s3.example.com/report.pdf");
	assert_eq!(file.to_string(), "report.pdf");
}

#[test]
fn external_file_composes_from_url() {
	let file: ExternalFile = compose("https://example.com/a.png").unwrap();

	assert_eq!(file, ExternalFile::from_url("https://example.com/a.png"));
	assert_eq!(
		file.to_native().unwrap(),
		json!({"type": "external", "external": {"url": "https://example.com/a.png"}})
	);
}

#[test]
fn external_file_composes_with_name() {
	let file = notional_objects::compose!(ExternalFile; "https://example.com/a.png", "a.png").unwrap();

	assert_eq!(file.name, Some("a.png".to_string()));
	assert_eq!(
		file.to_native().unwrap(),
		json!({
			"type": "external",
			"name": "a.png",
			"external": {"url": "https://example.com/a.png"}
		})
	);
}

#[test]
fn family_compose_picks_variant_by_type() {
	let file = FILE.compose("external", "https://example.com/b.png").unwrap();

	assert!(file.is::<ExternalFile>());
	assert_eq!(file.url(), "https://example.com/b.png");
}

#[test]
fn hosted_files_cannot_be_composed() {
	let err = FILE.compose("file", "https://example.com").unwrap_err();

	assert_eq!(err.kind(), ErrorKind::CompositionUnsupported);
}

#[test]
fn unnamed_file_displays_placeholder() {
	let file: Box<dyn FileObject> = Box::new(ExternalFile::from_url("https://example.com"));

	assert_eq!(file.to_string(), "__unknown__");
}
