//! HTTP span helpers.

use shoeclean::orders::USC_ID_PREFIX;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) route: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let route = route_template(path);
    let otel_span_name = format!("{method} {route}");

    RequestSpanName {
        route,
        otel_span_name,
    }
}

/// Replace identifiers in `path` with placeholders so routes group in spans and metrics.
fn route_template(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.trim_matches('/').split('/') {
        let previous = segments.last().copied();

        let template = if Uuid::parse_str(segment).is_ok() {
            "{uuid}"
        } else if segment.starts_with(USC_ID_PREFIX) {
            "{usc_id}"
        } else if previous == Some("{usc_id}") {
            "{voucher_code}"
        } else if previous == Some("vouchers") && segments.first() == Some(&"v1") {
            "{code}"
        } else {
            segment
        };

        segments.push(template);
    }

    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_stays_root() {
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn uuids_are_replaced() {
        assert_eq!(
            route_template("/v1/addresses/0192e0c4-7d2b-7cc0-a6f1-6f1d5f0f3b11"),
            "/v1/addresses/{uuid}"
        );
    }

    #[test]
    fn order_ids_and_voucher_codes_are_replaced() {
        assert_eq!(
            route_template("/v1/orders/USCID-24300007/HEMAT10"),
            "/v1/orders/{usc_id}/{voucher_code}"
        );
        assert_eq!(
            route_template("/v1/orders/confirm/USCID-24300007"),
            "/v1/orders/confirm/{usc_id}"
        );
        assert_eq!(route_template("/v1/vouchers/HEMAT10"), "/v1/vouchers/{code}");
    }

    #[test]
    fn backoffice_vouchers_route_is_kept() {
        let names = request_span_name("POST", "/v1/backoffice/vouchers");

        assert_eq!(names.route, "/v1/backoffice/vouchers");
        assert_eq!(names.otel_span_name, "POST /v1/backoffice/vouchers");
    }
}
