//! Asset Desk Tables - filterable data tables for the asset desk UI
//!
//! Builds on `assetdesk-core`: column filter dropdowns write into the shared
//! filter document, and every mounted [`TablePage`] refetches from its
//! [`RowSource`] when that document changes.
//!
//! ## Modules
//!
//! - [`column`]: column definitions and the per-column filter control
//! - [`view`]: rows, loading state and fetch tickets
//! - [`page`]: a table mounted against the filter store
//! - [`source`]: the row source trait
//! - [`api`]: REST client and list endpoints
//! - [`sorting`]: client-side sort state
//! - [`notice`]: toast notices
//! - [`entities`]: row types of the backend
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use assetdesk_core::prelude::*;
//! use assetdesk_tables::prelude::*;
//!
//! let jar: Rc<dyn CookieJar> = Rc::new(BrowserCookies::new());
//! let store = FilterStore::with_defaults(Rc::clone(&jar));
//! let client = ApiClient::new("https://assets.example.com/api", jar);
//!
//! let page: TablePage<AssetRow> = TablePage::mount(
//!     store.clone(),
//!     EndpointSource::new(client, ListEndpoint::FilteredAssets),
//!     Notices::new(),
//! );
//!
//! let mut control = FilterControl::new(store, "AssetType");
//! control.set_input("laptop");
//! control.select(FilterCriteria::Contains)?; // page refetches
//! ```

pub mod api;
pub mod column;
pub mod entities;
pub mod error;
pub mod notice;
pub mod page;
pub mod sorting;
pub mod source;
pub mod view;

pub use api::{ApiClient, EndpointSource, ListEndpoint, MutationResponse};
pub use column::{ColumnSpec, FilterControl};
pub use entities::{AssetRow, CompanyRow, EmployeeRow, IssueRow, TransferRow};
pub use error::{ApiError, ApiResult};
pub use notice::{Notice, NoticeLevel, Notices};
pub use page::TablePage;
pub use sorting::{SortDirection, SortState, sort_rows};
pub use source::{LocalRows, RowSource};
pub use view::{FetchOutcome, FetchTicket, TableView};

/// Commonly used types
pub mod prelude {
	pub use crate::api::{ApiClient, EndpointSource, ListEndpoint};
	pub use crate::column::{ColumnSpec, FilterControl};
	pub use crate::entities::{AssetRow, CompanyRow, EmployeeRow, IssueRow, TransferRow};
	pub use crate::error::ApiError;
	pub use crate::notice::Notices;
	pub use crate::page::TablePage;
	pub use crate::sorting::{SortDirection, SortState};
	pub use crate::source::RowSource;
	pub use crate::view::FetchOutcome;
}
