//! Server-declared schemas returned by `OPTIONS` requests.
//!
//! The server describes, per allowed method, which fields it accepts and how
//! they are typed. Bounds arrive as `min_value`/`max_value` and are
//! normalized to `min`/`max` on decode so the form layer sees one spelling.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// HTTP methods an options payload can describe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	Get,
	Post,
	Put,
	Patch,
	Delete,
	Options,
	Head,
}

impl Method {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
			Self::Options => "OPTIONS",
			Self::Head => "HEAD",
		}
	}
}

/// The `type` a field is declared with.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
	Integer,
	Float,
	Decimal,
	#[default]
	String,
	Boolean,
	List,
	/// Opaque server-managed values such as primary keys.
	Field,
	#[serde(other)]
	Other,
}

/// Metadata for one field, after bound normalization.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub struct Field {
	pub kind: FieldType,
	pub required: bool,
	pub read_only: bool,
	pub label: Option<String>,
	pub help_text: Option<String>,
	pub min: Option<f64>,
	pub max: Option<f64>,
	/// Element schema for `list` fields.
	pub child: Option<Box<Field>>,
}

impl Field {
	/// Label to show next to the control, falling back to the field key.
	pub fn label_or<'a>(&'a self, key: &'a str) -> &'a str {
		self.label.as_deref().unwrap_or(key)
	}
}

#[derive(Deserialize)]
struct RawField {
	#[serde(rename = "type", default)]
	kind: FieldType,
	#[serde(default)]
	required: bool,
	#[serde(default)]
	read_only: bool,
	label: Option<String>,
	help_text: Option<String>,
	min: Option<f64>,
	max: Option<f64>,
	min_value: Option<f64>,
	max_value: Option<f64>,
	child: Option<Box<Field>>,
}

impl From<RawField> for Field {
	fn from(raw: RawField) -> Self {
		Self {
			kind: raw.kind,
			required: raw.required,
			read_only: raw.read_only,
			label: raw.label,
			help_text: raw.help_text,
			// `min_value` wins when both spellings are present.
			min: raw.min_value.or(raw.min),
			max: raw.max_value.or(raw.max),
			child: raw.child,
		}
	}
}

/// Fields accepted by one method, in the order the server declared them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet(pub Vec<(String, Field)>);

impl FieldSet {
	pub fn get(&self, key: &str) -> Option<&Field> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, f)| f)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
		self.0.iter().map(|(k, f)| (k.as_str(), f))
	}
}

impl<'de> Deserialize<'de> for FieldSet {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct FieldSetVisitor;

		impl<'de> Visitor<'de> for FieldSetVisitor {
			type Value = FieldSet;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a map of field name to field metadata")
			}

			fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FieldSet, A::Error> {
				let mut fields = Vec::with_capacity(map.size_hint().unwrap_or(0));
				while let Some((key, field)) = map.next_entry::<String, Field>()? {
					fields.push((key, field));
				}
				Ok(FieldSet(fields))
			}
		}

		deserializer.deserialize_map(FieldSetVisitor)
	}
}

/// Body of an `OPTIONS` response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Options {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	/// Absent when the caller may not write to the endpoint.
	pub actions: Option<BTreeMap<Method, FieldSet>>,
}

impl Options {
	pub fn action(&self, method: Method) -> Option<&FieldSet> {
		self.actions.as_ref()?.get(&method)
	}
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
