use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

/// Request-id header shared by the gateway and all Mercato services.
pub const REQUEST_ID_HEADER: &str = "x-mercato-request-id";

#[derive(Clone, Default)]
pub struct MakeUuidRequestId;

impl MakeRequestId for MakeUuidRequestId {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        id.parse().ok().map(RequestId::new)
    }
}

/// Stamp requests that arrive without an id. An id set by the gateway is
/// kept as-is.
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidRequestId> {
    SetRequestIdLayer::new(
        axum::http::HeaderName::from_static(REQUEST_ID_HEADER),
        MakeUuidRequestId,
    )
}

/// Echo the request id back on the response so clients can correlate.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(axum::http::HeaderName::from_static(REQUEST_ID_HEADER))
}
