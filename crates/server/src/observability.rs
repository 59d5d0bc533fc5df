use once_cell::sync::Lazy;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, Encoder, IntCounter, IntCounterVec, IntGauge,
    TextEncoder,
};

// Prometheus metrics (default registry)
pub static AUTH_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "lobby_auth_requests_total",
        "Auth requests handled, by event and outcome",
        &["event", "outcome"]
    )
    .expect("register auth_requests_total")
});

pub static CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "lobby_auth_connections_active",
        "Currently open socket connections"
    )
    .expect("register connections_active")
});

pub static CONNECTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "lobby_auth_connections_total",
        "Socket connections accepted since start"
    )
    .expect("register connections_total")
});

pub fn record_request(event: &str, success: bool) {
    let outcome = if success { "success" } else { "error" };
    AUTH_REQUESTS_TOTAL.with_label_values(&[event, outcome]).inc();
}

pub fn connection_opened() {
    CONNECTIONS_TOTAL.inc();
    CONNECTIONS_ACTIVE.inc();
}

pub fn connection_closed() {
    CONNECTIONS_ACTIVE.dec();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorded_requests_show_up_in_exposition() {
        record_request("register", true);
        record_request("register", false);
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("lobby_auth_requests_total"));
        assert!(body.contains(r#"outcome="success""#));
    }
}
