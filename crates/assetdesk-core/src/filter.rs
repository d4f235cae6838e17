//! Column filter predicates and the filter document
//!
//! The filter document is the wire format shared by every table page and
//! the list endpoints: a JSON array of `{column, criteria, filterwith}`
//! objects with at most one entry per column.
//!
//! ```
//! use assetdesk_core::filter::{FilterCriteria, FilterDocument, FilterPredicate};
//!
//! let doc = FilterDocument::new()
//!     .upserted(FilterPredicate::new("AssetType", FilterCriteria::Contains, "laptop"))
//!     .upserted(FilterPredicate::new("AssetType", FilterCriteria::EqualTo, "desktop"));
//!
//! assert_eq!(doc.len(), 1);
//! assert_eq!(doc.get("AssetType").unwrap().filterwith, "desktop");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::warn_log;

/// Comparison operator of a column filter
///
/// Serialized by variant name (`"Contains"`, `"EqualTo"`, ...), which is what
/// the list endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterCriteria {
	/// Operand appears anywhere in the value
	Contains,
	/// Operand does not appear in the value
	DoesNotContain,
	/// Value starts with the operand
	StartsWith,
	/// Value ends with the operand
	EndsWith,
	/// Value equals the operand
	EqualTo,
	/// Value differs from the operand
	NotEqualTo,
	/// Value is greater than the operand
	GreaterThan,
	/// Value is less than the operand
	LessThan,
	/// Value is greater than or equal to the operand
	GreaterThanOrEqualTo,
	/// Value is less than or equal to the operand
	LessThanOrEqualTo,
}

impl FilterCriteria {
	/// Every operator, in the order the column dropdown lists them
	pub const ALL: [FilterCriteria; 10] = [
		Self::Contains,
		Self::DoesNotContain,
		Self::StartsWith,
		Self::EndsWith,
		Self::EqualTo,
		Self::NotEqualTo,
		Self::GreaterThan,
		Self::LessThan,
		Self::GreaterThanOrEqualTo,
		Self::LessThanOrEqualTo,
	];

	/// Wire name of the operator
	pub fn label(&self) -> &'static str {
		match self {
			Self::Contains => "Contains",
			Self::DoesNotContain => "DoesNotContain",
			Self::StartsWith => "StartsWith",
			Self::EndsWith => "EndsWith",
			Self::EqualTo => "EqualTo",
			Self::NotEqualTo => "NotEqualTo",
			Self::GreaterThan => "GreaterThan",
			Self::LessThan => "LessThan",
			Self::GreaterThanOrEqualTo => "GreaterThanOrEqualTo",
			Self::LessThanOrEqualTo => "LessThanOrEqualTo",
		}
	}
}

impl fmt::Display for FilterCriteria {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Returned when a string names no known operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCriteria(pub String);

impl fmt::Display for UnknownCriteria {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown filter criteria `{}`", self.0)
	}
}

impl std::error::Error for UnknownCriteria {}

impl FromStr for FilterCriteria {
	type Err = UnknownCriteria;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|criteria| criteria.label() == s)
			.ok_or_else(|| UnknownCriteria(s.to_string()))
	}
}

/// One column filter
///
/// `filterwith` is always the raw text the user typed; numeric and date
/// columns are compared by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
	/// Logical field name, unique within a document
	pub column: String,
	/// Comparison operator
	pub criteria: FilterCriteria,
	/// Comparison operand
	pub filterwith: String,
}

impl FilterPredicate {
	/// Create a predicate
	pub fn new(
		column: impl Into<String>,
		criteria: FilterCriteria,
		filterwith: impl Into<String>,
	) -> Self {
		Self {
			column: column.into(),
			criteria,
			filterwith: filterwith.into(),
		}
	}
}

/// Ordered set of column filters, keyed by column
///
/// Entries keep their insertion order; writing a column that already has an
/// entry replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterDocument {
	predicates: Vec<FilterPredicate>,
}

impl FilterDocument {
	/// Create an empty document
	pub fn new() -> Self {
		Self::default()
	}

	/// Decode a stored document, treating anything unreadable as "no filters"
	///
	/// Missing text, invalid JSON and non-array JSON all yield an empty
	/// document. Inside an array, entries that are not valid predicates are
	/// skipped, and repeated columns collapse onto their first position with
	/// the later value.
	pub fn parse_lenient(raw: Option<&str>) -> Self {
		let Some(raw) = raw else {
			return Self::default();
		};
		let entries = match serde_json::from_str::<serde_json::Value>(raw) {
			Ok(serde_json::Value::Array(entries)) => entries,
			Ok(_) => {
				warn_log!("filter document is not an array, ignoring it");
				return Self::default();
			}
			Err(err) => {
				warn_log!("failed to parse filter document: {}", err);
				return Self::default();
			}
		};

		let mut doc = Self::default();
		for entry in entries {
			match serde_json::from_value::<FilterPredicate>(entry) {
				Ok(predicate) => doc.upsert(predicate),
				Err(err) => warn_log!("skipping malformed filter entry: {}", err),
			}
		}
		doc
	}

	/// Insert or replace the predicate for its column
	pub fn upsert(&mut self, predicate: FilterPredicate) {
		match self
			.predicates
			.iter_mut()
			.find(|existing| existing.column == predicate.column)
		{
			Some(existing) => {
				existing.criteria = predicate.criteria;
				existing.filterwith = predicate.filterwith;
			}
			None => self.predicates.push(predicate),
		}
	}

	/// Copy of this document with `predicate` upserted
	pub fn upserted(&self, predicate: FilterPredicate) -> Self {
		let mut next = self.clone();
		next.upsert(predicate);
		next
	}

	/// Remove the predicate for `column`, returning it if present
	pub fn remove(&mut self, column: &str) -> Option<FilterPredicate> {
		let index = self
			.predicates
			.iter()
			.position(|predicate| predicate.column == column)?;
		Some(self.predicates.remove(index))
	}

	/// Predicate for `column`
	pub fn get(&self, column: &str) -> Option<&FilterPredicate> {
		self.predicates
			.iter()
			.find(|predicate| predicate.column == column)
	}

	/// Number of filtered columns
	pub fn len(&self) -> usize {
		self.predicates.len()
	}

	/// Check if no column is filtered
	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	/// Predicates in insertion order
	pub fn iter(&self) -> impl Iterator<Item = &FilterPredicate> {
		self.predicates.iter()
	}

	/// Compact JSON form stored in the `filterState` cookie
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string(self)?)
	}
}

impl FromIterator<FilterPredicate> for FilterDocument {
	fn from_iter<I: IntoIterator<Item = FilterPredicate>>(iter: I) -> Self {
		let mut doc = Self::default();
		for predicate in iter {
			doc.upsert(predicate);
		}
		doc
	}
}

impl<'a> IntoIterator for &'a FilterDocument {
	type Item = &'a FilterPredicate;
	type IntoIter = std::slice::Iter<'a, FilterPredicate>;

	fn into_iter(self) -> Self::IntoIter {
		self.predicates.iter()
	}
}
