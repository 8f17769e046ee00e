//! Per-request spans, request IDs and outcome logging.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, field, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

/// Health and metrics endpoints are served without a span or metrics.
const UNTRACED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

/// The request id, as echoed in the `x-request-id` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestId(pub(crate) String);

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNTRACED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;

        return;
    }

    let started = Instant::now();
    let settings = settings::current();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        route = %names.route,
        remote_addr = %req.remote_addr(),
        status = field::Empty,
        duration_ms = field::Empty,
    );

    if settings.propagate_parent
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to continue the caller's trace: {source}");
    }

    depot.inject(RequestId(request_id));

    let in_flight = metrics::InFlight::enter();

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    drop(in_flight);

    let status = res.status_code.unwrap_or(StatusCode::OK);
    let elapsed = started.elapsed();

    metrics::observe_request(&method, &names.route, status, elapsed.as_secs_f64());

    log_outcome(&span, &path, status, elapsed, settings.slow_request_threshold);
}

fn log_outcome(span: &Span, path: &str, status: StatusCode, elapsed: Duration, slow: Duration) {
    let status_code = status.as_u16();
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    span.record("status", status_code);
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status_code, path, "server error response");
        } else if status.is_client_error() {
            warn!(status = status_code, path, "client error response");
        }

        if elapsed > slow {
            warn!(
                duration_ms,
                threshold_ms = u64::try_from(slow.as_millis()).unwrap_or(u64::MAX),
                path,
                "slow request"
            );
        }

        info!(status = status_code, duration_ms, "request.completed");
    });
}
