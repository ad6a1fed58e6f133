//! HTTP client for the repograph backend.
//!
//! Four request shapes, each a single request/response with no retry, no
//! timeout override, and no caching. Callers map any [`ApiError`] to their
//! widget's fixed user-visible message and log the underlying cause; the
//! variants exist for the console, not the UI.

use gloo_net::http::Request;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::model::GraphSnapshot;

/// Backend base URL: build-time override with a hard-coded local fallback.
pub fn base_url() -> &'static str {
	option_env!("REPOGRAPH_API_URL").unwrap_or("http://localhost:8000")
}

/// Failure of a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never completed or the body failed to decode.
	#[error("request failed: {0}")]
	Transport(#[from] gloo_net::Error),
	/// The server answered with a non-success status.
	#[error("server responded with status {0}")]
	Status(u16),
}

#[derive(Serialize)]
struct UploadRequest<'a> {
	repo_url: &'a str,
}

/// Acknowledgement returned by the upload endpoint.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct UploadResponse {
	/// Status message for display on the landing page.
	pub message: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
	query: &'a str,
	context: &'a Value,
}

/// Assistant answer returned by the query endpoint.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct QueryResponse {
	/// Raw response text; the chat widget parses it into blocks.
	pub response: String,
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
	let resp = Request::get(&format!("{}{}", base_url(), path))
		.send()
		.await?;
	if !resp.ok() {
		return Err(ApiError::Status(resp.status()));
	}
	Ok(resp.json().await?)
}

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
	let resp = Request::post(&format!("{}{}", base_url(), path))
		.json(body)?
		.send()
		.await?;
	if !resp.ok() {
		return Err(ApiError::Status(resp.status()));
	}
	Ok(resp.json().await?)
}

/// Ask the backend to clone and analyze a repository.
pub async fn upload_repository(repo_url: &str) -> Result<UploadResponse, ApiError> {
	post_json("/api/upload_repo", &UploadRequest { repo_url }).await
}

/// Send one chat query together with the opaque context object.
pub async fn send_query(query: &str, context: &Value) -> Result<QueryResponse, ApiError> {
	post_json("/api/query", &QueryRequest { query, context }).await
}

/// Fetch the opaque context object resent with every chat query.
pub async fn fetch_context() -> Result<Value, ApiError> {
	get_json("/api/context").await
}

/// Fetch the current dependency graph snapshot.
pub async fn fetch_dependency_graph() -> Result<GraphSnapshot, ApiError> {
	get_json("/api/dependency_graph").await
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_url_falls_back_to_local_backend() {
		// Built without the override in tests.
		assert!(base_url().starts_with("http://"));
	}

	#[test]
	fn upload_request_wire_shape() {
		let body = UploadRequest {
			repo_url: "https://github.com/acme/widgets",
		};
		assert_eq!(
			serde_json::to_string(&body).unwrap(),
			r#"{"repo_url":"https://github.com/acme/widgets"}"#
		);
	}

	#[test]
	fn query_request_embeds_context_unmodified() {
		let context = serde_json::json!({"repo": "widgets", "chunks": [1, 2]});
		let body = QueryRequest {
			query: "what does main do?",
			context: &context,
		};
		let encoded: Value = serde_json::to_value(&body).unwrap();
		assert_eq!(encoded["query"], "what does main do?");
		assert_eq!(encoded["context"], context);
	}

	#[test]
	fn responses_decode() {
		let upload: UploadResponse = serde_json::from_str(r#"{"message": "queued"}"#).unwrap();
		assert_eq!(upload.message, "queued");
		let query: QueryResponse =
			serde_json::from_str(r#"{"response": "It parses."}"#).unwrap();
		assert_eq!(query.response, "It parses.");
	}
}
