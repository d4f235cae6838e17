//! Column definitions and the per-column filter control
//!
//! Every filterable column header carries a sort toggle and a filter
//! dropdown. The dropdown holds the operand text being typed; picking one of
//! the ten operators writes `{column, criteria, filterwith}` into the shared
//! filter document, which makes every mounted table refetch.

use std::fmt;
use std::rc::Rc;

use assetdesk_core::store::FilterStore;
use assetdesk_core::{FilterCriteria, FilterDocument, FilterPredicate, Result, debug_log};

/// One table column
///
/// # Example
///
/// ```rust
/// use assetdesk_tables::column::ColumnSpec;
///
/// struct Company {
///     code: String,
/// }
///
/// let column = ColumnSpec::new("CompCode", "Code", |row: &Company| row.code.clone());
/// assert_eq!(column.render(&Company { code: "IT001".into() }), "IT001");
/// ```
pub struct ColumnSpec<R> {
	accessor: &'static str,
	header: String,
	extractor: Rc<dyn Fn(&R) -> String>,
	sortable: bool,
	filterable: bool,
}

impl<R> Clone for ColumnSpec<R> {
	fn clone(&self) -> Self {
		Self {
			accessor: self.accessor,
			header: self.header.clone(),
			extractor: Rc::clone(&self.extractor),
			sortable: self.sortable,
			filterable: self.filterable,
		}
	}
}

impl<R> fmt::Debug for ColumnSpec<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ColumnSpec")
			.field("accessor", &self.accessor)
			.field("header", &self.header)
			.field("sortable", &self.sortable)
			.field("filterable", &self.filterable)
			.finish()
	}
}

impl<R> ColumnSpec<R> {
	/// Sortable, filterable column named `accessor`
	pub fn new<F>(accessor: &'static str, header: impl Into<String>, extractor: F) -> Self
	where
		F: Fn(&R) -> String + 'static,
	{
		Self {
			accessor,
			header: header.into(),
			extractor: Rc::new(extractor),
			sortable: true,
			filterable: true,
		}
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets whether this column is filterable
	pub fn filterable(mut self, filterable: bool) -> Self {
		self.filterable = filterable;
		self
	}

	/// Field name, used as the filter column
	pub fn accessor(&self) -> &'static str {
		self.accessor
	}

	/// Header text
	pub fn header(&self) -> &str {
		&self.header
	}

	/// Check if the header shows a sort toggle
	pub fn is_sortable(&self) -> bool {
		self.sortable
	}

	/// Check if the header shows a filter dropdown
	pub fn is_filterable(&self) -> bool {
		self.filterable
	}

	/// Cell text for `row`
	pub fn render(&self, row: &R) -> String {
		(self.extractor)(row)
	}

	/// Filter dropdown for this column, if it has one
	pub fn filter_control(&self, store: FilterStore) -> Option<FilterControl> {
		self.filterable
			.then(|| FilterControl::new(store, self.accessor))
	}
}

/// Render an optional cell; missing values render empty
pub fn text<T: ToString>(value: &Option<T>) -> String {
	value.as_ref().map(ToString::to_string).unwrap_or_default()
}

/// Filter dropdown of one column header
#[derive(Debug, Clone)]
pub struct FilterControl {
	store: FilterStore,
	column: String,
	input: String,
}

impl FilterControl {
	/// Dropdown for `column`, starting with an empty operand
	pub fn new(store: FilterStore, column: impl Into<String>) -> Self {
		Self {
			store,
			column: column.into(),
			input: String::new(),
		}
	}

	/// Column this dropdown filters
	pub fn column(&self) -> &str {
		&self.column
	}

	/// Replace the operand text
	pub fn set_input(&mut self, text: impl Into<String>) {
		self.input = text.into();
	}

	/// Current operand text
	pub fn input(&self) -> &str {
		&self.input
	}

	/// Operators offered, in menu order
	pub fn options(&self) -> &'static [FilterCriteria] {
		&FilterCriteria::ALL
	}

	/// Filter the column with `criteria` and the current operand
	///
	/// The operand is stored as typed, whatever the column's type.
	pub fn select(&self, criteria: FilterCriteria) -> Result<FilterDocument> {
		debug_log!("{} {} {:?}", self.column, criteria, self.input);
		self.store.apply(FilterPredicate::new(
			self.column.clone(),
			criteria,
			self.input.clone(),
		))
	}

	/// Predicate currently stored for this column
	pub fn active(&self) -> Option<FilterPredicate> {
		self.store.read_document().get(&self.column).cloned()
	}

	/// Remove this column's predicate
	pub fn clear(&self) -> Result<bool> {
		self.store.remove_column(&self.column)
	}
}
