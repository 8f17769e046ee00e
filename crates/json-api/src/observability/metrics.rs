//! Prometheus metrics and the `/metrics` endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder as _, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Response, handler,
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::error;

/// Seconds; most handlers are a couple of queries against Postgres.
const DURATION_BUCKETS: [f64; 12] = [
    0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_requests_in_flight: IntGauge,
    orders_confirmed_total: IntCounterVec,
}

fn register<C>(registry: &Registry, collector: C) -> Result<C, prometheus::Error>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

impl Metrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some("shoeclean".to_owned()), None)?;

        let http_requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("http_requests_total", "Requests by method, route and status."),
                &["method", "route", "status"],
            )?,
        )?;

        let http_request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new("http_request_duration_seconds", "Request latency.")
                    .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let http_requests_in_flight = register(
            &registry,
            IntGauge::new("http_requests_in_flight", "Requests being served.")?,
        )?;

        let orders_confirmed_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("orders_confirmed_total", "Confirmed orders by payment method."),
                &["method", "voucher"],
            )?,
        )?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            orders_confirmed_total,
        })
    }
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::build()
                .inspect_err(|source| error!("failed to register metrics: {source}"))
                .ok()
        })
        .as_ref()
}

/// Holds the in-flight gauge up for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlight(Option<&'static IntGauge>);

impl InFlight {
    pub(super) fn enter() -> Self {
        let gauge = metrics().map(|metrics| &metrics.http_requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .http_requests_total
        .with_label_values(&[method, route, status.as_str()])
        .inc();

    metrics
        .http_request_duration_seconds
        .with_label_values(&[method, route])
        .observe(seconds);
}

/// Count a confirmed order by payment method and whether a voucher was redeemed.
pub(crate) fn record_order_confirmed(method: &str, with_voucher: bool) {
    if let Some(metrics) = metrics() {
        let voucher = if with_voucher { "yes" } else { "no" };

        metrics
            .orders_confirmed_total
            .with_label_values(&[method, voucher])
            .inc();
    }
}

/// Prometheus text exposition.
#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return;
    };

    let encoder = TextEncoder::new();
    let mut body = String::new();

    if let Err(source) = encoder.encode_utf8(&metrics.registry.gather(), &mut body) {
        error!("failed to encode metrics: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    if let Err(source) = res.add_header(CONTENT_TYPE, encoder.format_type(), true) {
        error!("failed to set metrics content type: {source}");
    }

    res.render(body);
}
