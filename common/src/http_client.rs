// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client used by all of the Stratus service clients
//!
//! Each service client exposes one method per REST endpoint; all of them are
//! thin wrappers over this client, which owns URL construction, header
//! injection, body (de)serialization, logging, and the translation of
//! non-2xx responses into typed errors.

use crate::api::Error;
use crate::api::LookupType;
use crate::api::ResourceType;
use bytes::Bytes;
use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use slog::debug;
use slog::Logger;
use std::time::Duration;

/// Header carrying the authentication token issued at login
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A low-level failure to carry out one HTTP request
///
/// This is the transport-layer view of a failure.  Most callers never see
/// one of these: the typed helpers on [`HttpClient`] convert them into
/// [`Error`] (see `From<RequestError> for Error`).
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The request could not be serialized or was otherwise invalid before
    /// it ever reached the wire.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The request did not produce an HTTP response at all.
    #[error("communication error: {0}")]
    Communication(String),
    /// The service answered with a non-2xx status.
    #[error("error response from {path}: status {status}: {message}")]
    ErrorResponse {
        status: StatusCode,
        path: String,
        error_code: Option<String>,
        message: String,
    },
    /// The service answered 2xx but the body didn't parse as documented.
    #[error("invalid response payload: {0}")]
    InvalidResponsePayload(String),
}

/// Wire shape of an error response body from a Stratus service
#[derive(Debug, Deserialize)]
struct ErrorResponseBody {
    error_code: Option<String>,
    message: String,
    #[serde(default)]
    #[allow(dead_code)]
    request_id: Option<String>,
}

/// Body of an outbound request
enum RequestBody {
    Json(serde_json::Value),
    Raw { content_type: String, data: Vec<u8> },
}

/// HTTP client bound to one service endpoint
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    /// label for this client, used for error messages and logging
    label: String,
    /// base URL of the service endpoint, without a trailing slash
    base_url: String,
    /// debug log
    log: Logger,
    /// reqwest Client used to actually make requests
    client: reqwest::Client,
    /// authentication token sent with every request, once logged in
    token: Option<String>,
}

impl HttpClient {
    /// Create a new `HttpClient` for the service at `base_url`.
    pub fn new<S: AsRef<str>>(
        label: S,
        base_url: &str,
        log: Logger,
    ) -> Result<HttpClient, Error> {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                Error::internal_error(&format!(
                    "failed to build HTTP client: {}",
                    e
                ))
            })?;
        Ok(HttpClient {
            label: String::from(label.as_ref()),
            base_url: String::from(base_url.trim_end_matches('/')),
            log,
            client,
            token: None,
        })
    }

    /// Return a copy of this client that authenticates every request with
    /// `token`.
    pub fn with_token(&self, token: &str) -> HttpClient {
        HttpClient { token: Some(String::from(token)), ..self.clone() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    /// Returns an appropriate prefix for an error message associated with a
    /// request using method `method` to URI path `path`
    fn error_message_base(&self, method: &Method, path: &str) -> String {
        format!(
            "client request to {} at {} ({} {})",
            self.label, self.base_url, method, path
        )
    }

    /// Issue a request to the service having the given HTTP `method`, URI
    /// `path`, and `body` contents
    ///
    /// A 200-level response is returned as a successful
    /// `Ok(reqwest::Response)`.  Any other result (including failure to make
    /// the request or a 400- or 500-level response) results in an
    /// `Err(RequestError)` describing the error.  When the response body
    /// carries a serialized error that we can recognize, the server-side
    /// error code and message are reconstituted into the returned error.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<reqwest::Response, RequestError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(self.log, "client request";
            "method" => %method,
            "uri" => %url,
        );

        let mut builder = self.client.request(method.clone(), &url);
        if let Some(token) = &self.token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        match body {
            Some(RequestBody::Json(value)) => {
                builder = builder.json(&value);
            }
            Some(RequestBody::Raw { content_type, data }) => {
                builder = builder
                    .header(http::header::CONTENT_TYPE, content_type)
                    .body(data);
            }
            None => (),
        }

        let result = builder.send().await.map_err(|error| {
            RequestError::Communication(format!(
                "{}: {}",
                self.error_message_base(&method, path),
                error
            ))
        });

        debug!(self.log, "client response";
            "result" => ?result.as_ref().map(|r| r.status()),
        );

        let response = result?;
        let status = response.status();
        if !status.is_client_error() && !status.is_server_error() {
            return Ok(response);
        }

        let body_bytes = response.bytes().await.unwrap_or_default();
        let (error_code, message) =
            match serde_json::from_slice::<ErrorResponseBody>(&body_bytes) {
                Ok(error_body) => {
                    (error_body.error_code, error_body.message)
                }
                Err(_) => (
                    None,
                    String::from(
                        status.canonical_reason().unwrap_or("unknown error"),
                    ),
                ),
            };
        Err(RequestError::ErrorResponse {
            status,
            path: String::from(path),
            error_code,
            message,
        })
    }

    fn json_body<B: Serialize>(body: &B) -> Result<RequestBody, RequestError> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| RequestError::InvalidRequest(e.to_string()))
    }

    /// Reads the body of a 2xx response as a JSON object to be deserialized
    /// into type `T`
    async fn read_json<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let body_bytes = response.bytes().await.map_err(|error| {
            Error::from(RequestError::Communication(format!(
                "{}: reading response: {}",
                self.error_message_base(method, path),
                error
            )))
        })?;
        serde_json::from_slice::<T>(&body_bytes).map_err(|error| {
            Error::from(RequestError::InvalidResponsePayload(format!(
                "{}: {}",
                self.error_message_base(method, path),
                error
            )))
        })
    }

    /// GET `path` and parse the response body as `T`
    ///
    /// Used for list and query endpoints, where a 404 reflects a bad
    /// request path rather than a missing resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, Error> {
        let response = self.request(Method::GET, path, None).await?;
        self.read_json(&Method::GET, path, response).await
    }

    /// GET the resource identified by `lookup` at `path` and parse the
    /// response body as `T`
    ///
    /// A 404 here means the resource itself is gone and becomes a precise
    /// [`Error::ObjectNotFound`].
    pub async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
        type_name: ResourceType,
        lookup: LookupType,
    ) -> Result<T, Error> {
        let response = self
            .request(Method::GET, path, None)
            .await
            .map_err(|e| refine_not_found(e, type_name, lookup))?;
        self.read_json(&Method::GET, path, response).await
    }

    /// DELETE the resource identified by `lookup` at `path`
    pub async fn delete_resource(
        &self,
        path: &str,
        type_name: ResourceType,
        lookup: LookupType,
    ) -> Result<(), Error> {
        self.request(Method::DELETE, path, None)
            .await
            .map_err(|e| refine_not_found(e, type_name, lookup))?;
        Ok(())
    }

    /// POST `body` to `path` and parse the response body as `T`
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = Self::json_body(body)?;
        let response = self.request(Method::POST, path, Some(body)).await?;
        self.read_json(&Method::POST, path, response).await
    }

    /// POST to `path` with no body, for action endpoints on the resource
    /// identified by `lookup` (e.g. instance start/stop); the response body,
    /// if any, is discarded
    pub async fn post_action(
        &self,
        path: &str,
        type_name: ResourceType,
        lookup: LookupType,
    ) -> Result<(), Error> {
        self.request(Method::POST, path, None)
            .await
            .map_err(|e| refine_not_found(e, type_name, lookup))?;
        Ok(())
    }

    /// PUT `body` to `path` and parse the response body as `T`
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = Self::json_body(body)?;
        let response = self.request(Method::PUT, path, Some(body)).await?;
        self.read_json(&Method::PUT, path, response).await
    }

    /// PUT to `path` with no body; the response body, if any, is discarded
    pub async fn put_empty(&self, path: &str) -> Result<(), Error> {
        self.request(Method::PUT, path, None).await?;
        Ok(())
    }

    /// PUT raw `data` to `path` with the given content type
    pub async fn put_bytes(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), Error> {
        self.request(
            Method::PUT,
            path,
            Some(RequestBody::Raw {
                content_type: String::from(content_type),
                data,
            }),
        )
        .await?;
        Ok(())
    }

    /// GET the raw bytes of the resource identified by `lookup` at `path`
    pub async fn get_bytes(
        &self,
        path: &str,
        type_name: ResourceType,
        lookup: LookupType,
    ) -> Result<Bytes, Error> {
        let response = self
            .request(Method::GET, path, None)
            .await
            .map_err(|e| refine_not_found(e, type_name, lookup))?;
        response.bytes().await.map_err(|error| {
            Error::from(RequestError::Communication(format!(
                "{}: reading response: {}",
                self.error_message_base(&Method::GET, path),
                error
            )))
        })
    }
}

/// Translate a 404 observed while operating on a known resource into a
/// precise `ObjectNotFound`; all other failures go through the generic
/// conversion.
fn refine_not_found(
    err: RequestError,
    type_name: ResourceType,
    lookup: LookupType,
) -> Error {
    match err {
        RequestError::ErrorResponse { status, .. }
            if status == StatusCode::NOT_FOUND =>
        {
            lookup.into_not_found(type_name)
        }
        other => Error::from(other),
    }
}
