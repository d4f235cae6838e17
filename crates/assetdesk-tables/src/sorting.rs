//! Client-side sorting of the rendered rows

use std::cmp::Reverse;

use crate::column::ColumnSpec;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Parses a sort direction from a query parameter
	///
	/// Returns `Ascending` for positive values and `Descending` for negative values
	/// (e.g., "name" -> Ascending, "-name" -> Descending)
	pub fn parse_from_query(s: &str) -> (Self, &str) {
		if let Some(field) = s.strip_prefix('-') {
			(Self::Descending, field)
		} else {
			(Self::Ascending, s)
		}
	}
}

/// Which column a table is sorted by
///
/// Clicking a header sorts ascending; clicking the same header again flips
/// the direction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
	current: Option<(String, SortDirection)>,
}

impl SortState {
	/// Unsorted
	pub fn new() -> Self {
		Self::default()
	}

	/// Restore from a query value such as `-PurchaseDate`
	pub fn from_query(value: &str) -> Self {
		let value = value.trim();
		if value.is_empty() || value == "-" {
			return Self::default();
		}
		let (direction, column) = SortDirection::parse_from_query(value);
		Self {
			current: Some((column.to_string(), direction)),
		}
	}

	/// Handle a click on `column`'s header
	pub fn toggle(&mut self, column: &str) -> SortDirection {
		let direction = match &self.current {
			Some((current, direction)) if current == column => direction.toggle(),
			_ => SortDirection::Ascending,
		};
		self.current = Some((column.to_string(), direction));
		direction
	}

	/// Current column and direction
	pub fn current(&self) -> Option<(&str, SortDirection)> {
		self.current
			.as_ref()
			.map(|(column, direction)| (column.as_str(), *direction))
	}

	/// Direction for `column`, if the table is sorted by it
	pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
		self.current()
			.filter(|(current, _)| *current == column)
			.map(|(_, direction)| direction)
	}

	/// Query form, `column` or `-column`
	pub fn to_query(&self) -> Option<String> {
		self.current().map(|(column, direction)| match direction {
			SortDirection::Ascending => column.to_string(),
			SortDirection::Descending => format!("-{column}"),
		})
	}

	/// Clear the sort
	pub fn clear(&mut self) {
		self.current = None;
	}
}

/// Stable sort of `rows` by the rendered text of `column`
pub fn sort_rows<R>(rows: &mut [R], column: &ColumnSpec<R>, direction: SortDirection) {
	match direction {
		SortDirection::Ascending => rows.sort_by_cached_key(|row| column.render(row)),
		SortDirection::Descending => rows.sort_by_cached_key(|row| Reverse(column.render(row))),
	}
}
