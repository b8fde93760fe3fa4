//! Request ids.
//!
//! Each request carries an `x-request-id`: the client's own if it sent
//! one, a fresh UUID v4 otherwise. The id is echoed on the response and
//! recorded on the request's tracing span, so log lines from one request
//! can be grouped.

use axum::extract::Request;
use http::{HeaderName, HeaderValue};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Hands out a UUID v4 to requests that arrive without an id.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewRequestId;

impl MakeRequestId for NewRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Sets the id on incoming requests. Must wrap the trace and propagate layers.
pub fn set_request_id_layer() -> SetRequestIdLayer<NewRequestId> {
    SetRequestIdLayer::new(REQUEST_ID_HEADER, NewRequestId)
}

/// Copies the request's id onto its response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(REQUEST_ID_HEADER)
}

/// Span for `TraceLayer`, tagged with the request id.
pub fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = request.uri().path(),
        request_id
    )
}
