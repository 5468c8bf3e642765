//! Component props parsing and validation.
//!
//! Props travel as an optional JSON object: the render request body on
//! the server, the `props` attribute on a client island element. The
//! rules are the same on both sides - absent or `null` means "no props",
//! an object is used as-is, and anything else (including an array) is
//! rejected before any render is attempted.

use serde_json::{Map, Value};

use crate::error::{IslandError, IslandResult};

/// Validated component props: a JSON object, when any were supplied.
pub type Props = Map<String, Value>;

/// Parses a raw props payload.
///
/// An empty payload or JSON `null` yields `Ok(None)`. A JSON object
/// yields the object. Any other JSON value - and malformed JSON - fails
/// with [`IslandError::InvalidProps`].
pub fn parse_props(raw: &[u8]) -> IslandResult<Option<Props>> {
	if raw.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}
	let value: Value = serde_json::from_slice(raw)
		.map_err(|err| IslandError::InvalidProps(format!("malformed JSON: {err}")))?;
	validate_props(value)
}

/// Validates an already-parsed JSON value as props.
pub fn validate_props(value: Value) -> IslandResult<Option<Props>> {
	match value {
		Value::Null => Ok(None),
		Value::Object(map) => Ok(Some(map)),
		Value::Array(_) => Err(IslandError::InvalidProps(
			"props must be a JSON object, got an array".to_string(),
		)),
		other => Err(IslandError::InvalidProps(format!(
			"props must be a JSON object, got {}",
			json_type_name(&other)
		))),
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn absent_and_null_bodies_mean_no_props() {
		assert!(parse_props(b"").unwrap().is_none());
		assert!(parse_props(b"  \n").unwrap().is_none());
		assert!(parse_props(b"null").unwrap().is_none());
	}

	#[test]
	fn object_body_is_used_as_is() {
		let props = parse_props(br#"{"count":1}"#).unwrap().expect("props");
		assert_eq!(props.get("count"), Some(&serde_json::json!(1)));
	}

	#[rstest]
	#[case::array(br#"[1,2,3]"# as &[u8])]
	#[case::number(b"42")]
	#[case::string(br#""props""#)]
	#[case::boolean(b"true")]
	#[case::malformed(b"{count:")]
	fn non_object_bodies_are_rejected(#[case] raw: &[u8]) {
		let err = parse_props(raw).unwrap_err();
		assert!(matches!(err, IslandError::InvalidProps(_)));
	}
}
