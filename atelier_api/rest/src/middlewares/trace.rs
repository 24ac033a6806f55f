use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tracing::{debug, Span};

use super::request_id::RequestId;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        tower_http::trace::TraceLayer::new_for_http()
            .make_span_with(make_span)
            .on_request(|_: &Request, _: &Span| debug!("started processing request"))
            .on_response(on_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn make_span(request: &Request) -> Span {
    // the request id middleware wraps this layer, so the extension is always set
    let request_id = *request.extensions().get::<RequestId>().unwrap();
    let method = request.method();
    let uri = request.uri();

    tracing::debug_span!("request", %request_id, %method, %uri)
}

fn on_response(response: &Response, latency: Duration, _: &Span) {
    debug!(status = %response.status(), ?latency, "finished processing request")
}
