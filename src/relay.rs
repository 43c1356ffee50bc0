//! HTTP request handling and relaying.
//!
//! This module contains the per-request pipeline for the relay:
//! interception (forwarding-header normalization), body stashing, and
//! forwarding to the upstream service.
//!
//! # Architecture
//!
//! The request handling flow:
//! 1. Reconstruct the absolute URI the client used
//! 2. Run the forwarded-header interceptor on a cloned header set
//! 3. Stash the request body in the temporary store
//! 4. Forward the request to the upstream service
//! 5. Stash the response body and relay it back
//!
//! # Connection Pooling
//!
//! The module accepts a shared [`reqwest::Client`] for HTTP connection
//! pooling, configured by the caller with [`UPSTREAM_TIMEOUT`].

use std::convert::Infallible;
use std::io::Write;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::{Request, Response, StatusCode, Uri, body::Incoming};
use tracing::debug;
use uuid::Uuid;

use relaygate_core::ClientContext;
use relaygate_core::headers;
use relaygate_core::interceptor::{ForwardedInterceptor, InterceptedRequest, RequestInterceptor};
use relaygate_core::store::MemoryStore;
use relaygate_core::types::ForwardingProvider;

/// Timeout applied to upstream requests via the shared HTTP client.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Handles an incoming HTTP request through the relay pipeline.
///
/// This is the main entry point for request processing. It performs:
/// - Forwarding-header normalization via the injected interceptor
/// - Request body stashing under a fresh request id
/// - Forwarding to the upstream service with the transformed header set
/// - Response body stashing and relaying
///
/// # Arguments
///
/// * `req` - The incoming HTTP request
/// * `client_addr` - Address the client connection was accepted from
/// * `forward_host` - The upstream host to forward requests to
/// * `forward_port` - The upstream port to forward requests to
/// * `interceptor` - The shared forwarded-header interceptor
/// * `store` - The shared post-data temporary store
/// * `http_client` - HTTP client for forwarding requests (with connection pooling)
///
/// # Returns
///
/// Always returns `Ok` with either:
/// - A successfully relayed response from upstream
/// - An error response (400, 405, 502, 504, etc.)
pub async fn handle_request<C: ForwardingProvider>(
    req: Request<Incoming>,
    client_addr: IpAddr,
    forward_host: String,
    forward_port: u16,
    interceptor: Arc<ForwardedInterceptor<C>>,
    store: MemoryStore,
    http_client: reqwest::Client,
) -> Result<Response<Full<bytes::Bytes>>, Infallible> {
    let request_id = Uuid::new_v4().to_string();
    debug!(request_id = %request_id, method = %req.method(), path = req.uri().path(), "relaying request");

    let uri = client_request_uri(&req, &forward_host);
    let mut intercepted = InterceptedRequest {
        context: ClientContext::new(uri, client_addr),
        headers: req.headers().clone(),
    };
    if let Some(response) = interceptor.on_request(&mut intercepted) {
        return Ok(response);
    }
    let outbound_headers = intercepted.headers;

    // Collect and stash the request body
    let (parts, body) = req.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => {
            return Ok(create_error_response(
                StatusCode::BAD_REQUEST,
                "Failed to read request body",
            ));
        }
    };
    {
        let mut writer = store.request_writer(&request_id);
        writer.write_all(&body_bytes).ok();
    }

    forward_request(
        parts,
        outbound_headers,
        body_bytes,
        &request_id,
        &forward_host,
        forward_port,
        &store,
        &http_client,
    )
    .await
}

/// Reconstructs the absolute URI the client used.
///
/// The relay terminates plain HTTP, so the scheme is fixed; the authority
/// comes from the `Host` header (falling back to the forward host) and the
/// path and query are taken from the request line.
fn client_request_uri<B>(req: &Request<B>, fallback_host: &str) -> Uri {
    let authority = req
        .headers()
        .get(headers::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(fallback_host);
    let path_and_query = req.uri().path_and_query().map_or("/", |pq| pq.as_str());

    Uri::builder()
        .scheme("http")
        .authority(authority)
        .path_and_query(path_and_query)
        .build()
        .unwrap_or_else(|_| req.uri().clone())
}

/// Forward the request to the upstream service using the transformed headers.
async fn forward_request(
    parts: hyper::http::request::Parts,
    outbound_headers: hyper::HeaderMap,
    body_bytes: bytes::Bytes,
    request_id: &str,
    host: &str,
    port: u16,
    store: &MemoryStore,
    client: &reqwest::Client,
) -> Result<Response<Full<bytes::Bytes>>, Infallible> {
    // Construct destination URI
    let destination_uri = format!(
        "http://{}:{}{}",
        host,
        port,
        parts.uri.path_and_query().map_or("", |pq| pq.as_str())
    );

    let method = match reqwest::Method::from_bytes(parts.method.as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => {
            return Ok(create_error_response(
                StatusCode::METHOD_NOT_ALLOWED,
                "HTTP method not supported",
            ));
        }
    };
    let mut req_builder = client.request(method, &destination_uri);

    // Add the transformed headers (excluding host, content-length, and
    // hop-by-hop headers)
    for (name, value) in outbound_headers.iter() {
        if name != headers::HOST
            && name != headers::CONTENT_LENGTH
            && !headers::is_hop_by_hop(name.as_str())
            && let Ok(header_value) = value.to_str()
        {
            req_builder = req_builder.header(name.as_str(), header_value);
        }
    }

    // Add body if not empty
    if !body_bytes.is_empty() {
        req_builder = req_builder.body(body_bytes.to_vec());
    }

    // Send request
    match req_builder.send().await {
        Ok(response) => {
            let status = response.status();
            let response_headers = response.headers().clone();

            match response.bytes().await {
                Ok(response_bytes) => {
                    {
                        let mut writer = store.response_writer(request_id);
                        writer.write_all(&response_bytes).ok();
                    }

                    let mut relayed = match Response::builder()
                        .status(status.as_u16())
                        .body(Full::new(response_bytes))
                    {
                        Ok(resp) => resp,
                        Err(_) => {
                            return Ok(create_error_response(
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "Failed to build response",
                            ));
                        }
                    };

                    // Copy response headers (skip hop-by-hop headers)
                    for (name, value) in response_headers.iter() {
                        if !headers::is_hop_by_hop(name.as_str())
                            && let (Ok(hyper_name), Ok(hyper_value)) = (
                                hyper::header::HeaderName::from_bytes(name.as_str().as_bytes()),
                                hyper::header::HeaderValue::from_bytes(value.as_bytes()),
                            )
                        {
                            relayed.headers_mut().insert(hyper_name, hyper_value);
                        }
                    }

                    Ok(relayed)
                }
                Err(_) => Ok(create_error_response(
                    StatusCode::BAD_GATEWAY,
                    "Failed to read response body",
                )),
            }
        }
        Err(err) => {
            if err.is_timeout() {
                Ok(create_error_response(
                    StatusCode::GATEWAY_TIMEOUT,
                    "Upstream service timeout",
                ))
            } else if err.is_connect() {
                Ok(create_error_response(
                    StatusCode::BAD_GATEWAY,
                    "Could not connect to upstream service",
                ))
            } else {
                Ok(create_error_response(
                    StatusCode::BAD_GATEWAY,
                    "Upstream service error",
                ))
            }
        }
    }
}

/// Creates a standardized error response.
///
/// Builds an HTTP response with the given status code and plain text message.
/// Falls back to a minimal 500 response if building fails (should never
/// happen with valid StatusCode).
///
/// # Example
///
/// ```
/// use relaygate::relay::create_error_response;
/// use hyper::StatusCode;
///
/// let response = create_error_response(StatusCode::BAD_GATEWAY, "Upstream service error");
/// assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
/// ```
pub fn create_error_response(status: StatusCode, message: &str) -> Response<Full<bytes::Bytes>> {
    Response::builder()
        .status(status)
        .header("content-type", "text/plain")
        .body(Full::new(bytes::Bytes::from(message.to_string())))
        .unwrap_or_else(|_| {
            // Fallback response if builder fails (extremely unlikely)
            Response::new(Full::new(bytes::Bytes::from("Internal Server Error")))
        })
}
