use serde_json::json;

use super::*;

#[test]
fn field_errors_are_prefixed_with_field_name() {
	let body = json!({"order": ["Ensure this value is greater than or equal to 1."]});
	assert_eq!(
		rejection_message(&body),
		"order: Ensure this value is greater than or equal to 1."
	);
}

#[test]
fn bare_list_errors_are_joined() {
	let body = json!(["Graph already exists with properties {'order': 5}"]);
	assert_eq!(
		AppError::rejected(&body).to_string(),
		"Graph already exists with properties {'order': 5}"
	);
}

#[test]
fn detail_and_non_field_errors_drop_the_key() {
	let body = json!({"detail": "Method not allowed.", "non_field_errors": ["bad"]});
	assert_eq!(rejection_message(&body), "Method not allowed.; bad");
}

#[test]
fn multiple_fields_are_separated() {
	let body = json!({
		"order": ["This field is required."],
		"jumps": ["Array of jumps must not contain duplicates"],
	});
	let message = rejection_message(&body);
	assert!(message.contains("order: This field is required."));
	assert!(message.contains("jumps: Array of jumps must not contain duplicates"));
}

#[test]
fn cancelled_is_detectable() {
	assert!(AppError::Cancelled.is_cancelled());
	assert!(!AppError::Network("offline".into()).is_cancelled());
}
