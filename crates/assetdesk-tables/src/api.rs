//! REST client for the asset desk backend
//!
//! List endpoints take `POST {"filters": [...]}` and answer with a JSON
//! array of rows. Mutation endpoints are plain REST calls answering with an
//! optional `message` or `error` field. Every call carries the session's
//! bearer token and is not sent at all when there is none.

use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use assetdesk_core::cookie::CookieJar;
use assetdesk_core::{FilterDocument, StateConfig, debug_log, require_token};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::source::RowSource;

/// The filterable list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListEndpoint {
	/// Asset register (admin)
	FilteredAssets,
	/// Transfer requests awaiting admin approval
	AdminTransfers,
	/// Transfers raised by the current user
	Transfers,
	/// Transfers awaiting the current user's approval
	PendingTransfers,
	/// Employee directory
	Employees,
	/// Companies
	Companies,
	/// Assets not issued to anyone
	FreeAssets,
}

impl ListEndpoint {
	/// Every list endpoint
	pub const ALL: [ListEndpoint; 7] = [
		ListEndpoint::FilteredAssets,
		ListEndpoint::AdminTransfers,
		ListEndpoint::Transfers,
		ListEndpoint::PendingTransfers,
		ListEndpoint::Employees,
		ListEndpoint::Companies,
		ListEndpoint::FreeAssets,
	];

	/// Path below the API base URL
	pub fn path(&self) -> &'static str {
		match self {
			Self::FilteredAssets => "manage-asset/get-filtered-assets",
			Self::AdminTransfers => "transfer-asset-function/get-filtered-transfers-admin",
			Self::Transfers => "transfer-asset-function/transfers-list",
			Self::PendingTransfers => "transfer-asset-function/pending-requests",
			Self::Employees => "utils/get-employees",
			Self::Companies => "utils/get-companies",
			Self::FreeAssets => "utils/get-free-assets",
		}
	}
}

impl fmt::Display for ListEndpoint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.path())
	}
}

#[derive(Serialize)]
struct ListRequest<'a> {
	filters: &'a FilterDocument,
}

/// Body of a successful mutation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse {
	/// Confirmation text, when the backend sends one
	#[serde(default)]
	pub message: Option<String>,
	/// Remaining fields of the body
	#[serde(flatten)]
	pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Extract the user-facing message from an error body
///
/// Prefers `message`, then `error`, then the raw text.
pub fn error_message(body: &str) -> String {
	#[derive(Deserialize)]
	struct ErrorBody {
		message: Option<String>,
		error: Option<String>,
	}

	match serde_json::from_str::<ErrorBody>(body) {
		Ok(ErrorBody {
			message: Some(message),
			..
		}) => message,
		Ok(ErrorBody {
			error: Some(error), ..
		}) => error,
		_ => body.trim().to_string(),
	}
}

/// Authenticated JSON client
#[derive(Clone)]
pub struct ApiClient {
	http: reqwest::Client,
	base_url: String,
	jar: Rc<dyn CookieJar>,
}

impl fmt::Debug for ApiClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url)
			.finish_non_exhaustive()
	}
}

impl ApiClient {
	/// Client for the backend at `base_url`, reading the token from `jar`
	pub fn new(base_url: impl Into<String>, jar: Rc<dyn CookieJar>) -> Self {
		Self {
			http: reqwest::Client::new(),
			base_url: base_url.into(),
			jar,
		}
	}

	/// Client for the backend named in `config`
	pub fn from_config(config: &StateConfig, jar: Rc<dyn CookieJar>) -> Self {
		Self::new(config.api_base_url.clone(), jar)
	}

	/// Absolute URL of `path`
	pub fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	/// Rows of `endpoint` matching `filters`
	pub async fn list<R>(
		&self,
		endpoint: ListEndpoint,
		filters: &FilterDocument,
	) -> ApiResult<Vec<R>>
	where
		R: DeserializeOwned,
	{
		let token = require_token(self.jar.as_ref())?;
		debug_log!("POST {} with {} filters", endpoint, filters.len());

		let response = self
			.http
			.post(self.url(endpoint.path()))
			.bearer_auth(token)
			.json(&ListRequest { filters })
			.send()
			.await
			.map_err(|e| ApiError::network(e.to_string()))?;

		let body = Self::success_body(response).await?;
		serde_json::from_str(&body).map_err(|e| ApiError::deserialization(e.to_string()))
	}

	/// Plain REST call, e.g. `PATCH transfer-asset-function/approve/42`
	pub async fn mutate(
		&self,
		method: reqwest::Method,
		path: &str,
		body: Option<&serde_json::Value>,
	) -> ApiResult<MutationResponse> {
		let token = require_token(self.jar.as_ref())?;
		debug_log!("{} {}", method, path);

		let mut request = self.http.request(method, self.url(path)).bearer_auth(token);
		if let Some(body) = body {
			request = request.json(body);
		}
		let response = request
			.send()
			.await
			.map_err(|e| ApiError::network(e.to_string()))?;

		let body = Self::success_body(response).await?;
		if body.trim().is_empty() {
			return Ok(MutationResponse::default());
		}
		serde_json::from_str(&body).map_err(|e| ApiError::deserialization(e.to_string()))
	}

	async fn success_body(response: reqwest::Response) -> ApiResult<String> {
		let status = response.status();
		let body = response
			.text()
			.await
			.map_err(|e| ApiError::network(e.to_string()))?;
		if !status.is_success() {
			return Err(ApiError::server(status.as_u16(), error_message(&body)));
		}
		Ok(body)
	}
}

/// [`RowSource`] reading one list endpoint
pub struct EndpointSource<R> {
	client: ApiClient,
	endpoint: ListEndpoint,
	_row: PhantomData<fn() -> R>,
}

impl<R> EndpointSource<R> {
	/// Rows of `endpoint` through `client`
	pub fn new(client: ApiClient, endpoint: ListEndpoint) -> Self {
		Self {
			client,
			endpoint,
			_row: PhantomData,
		}
	}

	/// The endpoint this source reads
	pub fn endpoint(&self) -> ListEndpoint {
		self.endpoint
	}
}

#[async_trait(?Send)]
impl<R> RowSource<R> for EndpointSource<R>
where
	R: DeserializeOwned,
{
	async fn fetch(&self, filters: &FilterDocument) -> ApiResult<Vec<R>> {
		self.client.list(self.endpoint, filters).await
	}
}
