//! Form generation from an options schema.
//!
//! The server decides which fields exist; this module only turns raw control
//! text into a JSON record of the declared types. Cross-field rules stay on
//! the server.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Number, Value};

use crate::api::{Field, FieldType, Method, Options};

/// Record sent as the body of a create request.
pub type Record = Map<String, Value>;

/// Which input control a field renders as.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
	Number { step: &'static str },
	Checkbox,
	/// Comma separated values for `list` fields.
	List,
	Text,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
	pub name: String,
	pub field: Field,
}

impl FormField {
	pub fn label(&self) -> &str {
		self.field.label_or(&self.name)
	}

	pub fn control(&self) -> ControlKind {
		match self.field.kind {
			FieldType::Integer => ControlKind::Number { step: "1" },
			FieldType::Float | FieldType::Decimal => ControlKind::Number { step: "any" },
			FieldType::Boolean => ControlKind::Checkbox,
			FieldType::List => ControlKind::List,
			_ => ControlKind::Text,
		}
	}

	/// Hint shown under list inputs and anywhere the server sent help text.
	pub fn hint(&self) -> Option<String> {
		if let Some(help) = &self.field.help_text {
			return Some(help.clone());
		}
		(self.field.kind == FieldType::List).then(|| "Comma separated values".to_owned())
	}
}

/// Writable fields for one method, in server order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormSchema {
	fields: Vec<FormField>,
}

impl FormSchema {
	/// Read-only fields are dropped; they are never rendered or submitted.
	pub fn from_options(options: &Options, method: Method) -> Self {
		let fields = options
			.action(method)
			.map(|set| {
				set.iter()
					.filter(|(_, field)| !field.read_only)
					.map(|(name, field)| FormField {
						name: name.to_owned(),
						field: field.clone(),
					})
					.collect()
			})
			.unwrap_or_default();
		Self { fields }
	}

	pub fn fields(&self) -> &[FormField] {
		&self.fields
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Check every field and build the record, or report every failure.
	pub fn validate(&self, values: &FormValues) -> Result<Record, FieldErrors> {
		let mut record = Record::new();
		let mut errors = Vec::new();
		for form_field in &self.fields {
			let raw = values.get(&form_field.name);
			match parse_field(&form_field.field, raw) {
				Ok(Some(value)) => {
					record.insert(form_field.name.clone(), value);
				}
				Ok(None) => {}
				Err(err) => errors.push((form_field.name.clone(), err)),
			}
		}
		if errors.is_empty() {
			Ok(record)
		} else {
			Err(FieldErrors(errors))
		}
	}
}

/// Raw control text keyed by field name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&mut self, name: impl Into<String>, raw: impl Into<String>) {
		self.0.insert(name.into(), raw.into());
	}

	pub fn get(&self, name: &str) -> &str {
		self.0.get(name).map(String::as_str).unwrap_or_default()
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FieldError {
	#[error("This field is required.")]
	Required,
	#[error("A valid integer is required, got {0:?}.")]
	NotAnInteger(String),
	#[error("A valid number is required, got {0:?}.")]
	NotANumber(String),
	#[error("Must be true or false, got {0:?}.")]
	NotABoolean(String),
	#[error("Ensure this value is greater than or equal to {0}.")]
	BelowMin(f64),
	#[error("Ensure this value is less than or equal to {0}.")]
	AboveMax(f64),
}

/// Per-field validation failures, in form order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(pub Vec<(String, FieldError)>);

impl FieldErrors {
	pub fn get(&self, name: &str) -> Option<&FieldError> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, e)| e)
	}
}

impl fmt::Display for FieldErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, (name, err)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str("; ")?;
			}
			write!(f, "{name}: {err}")?;
		}
		Ok(())
	}
}

impl std::error::Error for FieldErrors {}

fn parse_field(field: &Field, raw: &str) -> Result<Option<Value>, FieldError> {
	let text = raw.trim();
	if field.kind == FieldType::Boolean {
		return parse_bool(text).map(Some);
	}
	if text.is_empty() {
		return if field.required {
			Err(FieldError::Required)
		} else {
			Ok(None)
		};
	}
	match field.kind {
		FieldType::List => {
			let child = field.child.as_deref().cloned().unwrap_or(Field {
				kind: FieldType::Integer,
				..Field::default()
			});
			let items = text
				.split(|c: char| c == ',' || c.is_whitespace())
				.filter(|item| !item.is_empty())
				.map(|item| parse_scalar(&child, item))
				.collect::<Result<Vec<_>, _>>()?;
			match (items.is_empty(), field.required) {
				(true, true) => Err(FieldError::Required),
				(true, false) => Ok(None),
				(false, _) => Ok(Some(Value::Array(items))),
			}
		}
		_ => parse_scalar(field, text).map(Some),
	}
}

fn parse_scalar(field: &Field, text: &str) -> Result<Value, FieldError> {
	match field.kind {
		FieldType::Integer => {
			let n: i64 = text
				.parse()
				.map_err(|_| FieldError::NotAnInteger(text.to_owned()))?;
			check_bounds(field, n as f64)?;
			Ok(Value::from(n))
		}
		FieldType::Float | FieldType::Decimal => {
			let n: f64 = text
				.parse()
				.map_err(|_| FieldError::NotANumber(text.to_owned()))?;
			let number = Number::from_f64(n).ok_or_else(|| FieldError::NotANumber(text.to_owned()))?;
			check_bounds(field, n)?;
			Ok(Value::Number(number))
		}
		FieldType::Boolean => parse_bool(text),
		_ => Ok(Value::String(text.to_owned())),
	}
}

fn parse_bool(text: &str) -> Result<Value, FieldError> {
	match text.to_ascii_lowercase().as_str() {
		"true" | "on" | "1" => Ok(Value::Bool(true)),
		"" | "false" | "off" | "0" => Ok(Value::Bool(false)),
		_ => Err(FieldError::NotABoolean(text.to_owned())),
	}
}

fn check_bounds(field: &Field, n: f64) -> Result<(), FieldError> {
	if let Some(min) = field.min.filter(|&min| n < min) {
		return Err(FieldError::BelowMin(min));
	}
	if let Some(max) = field.max.filter(|&max| n > max) {
		return Err(FieldError::AboveMax(max));
	}
	Ok(())
}

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;
