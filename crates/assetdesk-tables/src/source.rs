//! Row sources
//!
//! A table gets its rows from a [`RowSource`], given the full filter
//! document. The REST implementation lives in [`crate::api`]; tests and
//! offline pages supply their own.

use std::rc::Rc;

use assetdesk_core::FilterDocument;
use async_trait::async_trait;

use crate::error::ApiResult;

/// Produces the rows matching a filter document
///
/// Futures are not `Send`: a tab runs on one thread.
#[async_trait(?Send)]
pub trait RowSource<R> {
	/// Fetch the rows matching `filters`
	async fn fetch(&self, filters: &FilterDocument) -> ApiResult<Vec<R>>;
}

#[async_trait(?Send)]
impl<R, S> RowSource<R> for Rc<S>
where
	S: RowSource<R> + ?Sized,
{
	async fn fetch(&self, filters: &FilterDocument) -> ApiResult<Vec<R>> {
		(**self).fetch(filters).await
	}
}

/// Fixed rows, filtered locally by a predicate over the document
///
/// Serves pages whose data is already on the client.
pub struct LocalRows<R, F> {
	rows: Vec<R>,
	matches: F,
}

impl<R, F> LocalRows<R, F>
where
	R: Clone,
	F: Fn(&R, &FilterDocument) -> bool,
{
	/// Serve `rows`, keeping those for which `matches` holds
	pub fn new(rows: Vec<R>, matches: F) -> Self {
		Self { rows, matches }
	}
}

#[async_trait(?Send)]
impl<R, F> RowSource<R> for LocalRows<R, F>
where
	R: Clone,
	F: Fn(&R, &FilterDocument) -> bool,
{
	async fn fetch(&self, filters: &FilterDocument) -> ApiResult<Vec<R>> {
		Ok(self
			.rows
			.iter()
			.filter(|row| (self.matches)(row, filters))
			.cloned()
			.collect())
	}
}
