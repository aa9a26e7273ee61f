//! Prometheus metrics recorder and `/metrics` endpoint handler.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Must be called once at server startup before any metrics are recorded.
pub fn install_recorder() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install metrics recorder");
    info!("prometheus metrics recorder installed");
    handle
}

/// Render Prometheus text format from the installed recorder.
pub fn render(handle: &PrometheusHandle) -> String {
    handle.render()
}

// Metric name constants to avoid typos across crates.

/// WebSocket connections opened total (counter).
pub const WS_CONNECTIONS_TOTAL: &str = "ws_connections_total";
/// WebSocket disconnections total (counter).
pub const WS_DISCONNECTIONS_TOTAL: &str = "ws_disconnections_total";
/// Active WebSocket connections (gauge).
pub const WS_CONNECTIONS_ACTIVE: &str = "ws_connections_active";
/// WebSocket connection duration seconds (histogram).
pub const WS_CONNECTION_DURATION_SECONDS: &str = "ws_connection_duration_seconds";
/// Outbound frames dropped total (counter).
pub const WS_DROPPED_FRAMES_TOTAL: &str = "ws_dropped_frames_total";
/// Command dispatches total (counter, labels: tool).
pub const DISPATCH_TOTAL: &str = "dispatch_total";
/// Command dispatch soft-failures total (counter, labels: tool, reason).
pub const DISPATCH_FAILURES_TOTAL: &str = "dispatch_failures_total";
/// Query gateway requests total (counter).
pub const QUERY_REQUESTS_TOTAL: &str = "query_requests_total";
/// Query gateway failures total (counter).
pub const QUERY_FAILURES_TOTAL: &str = "query_failures_total";
/// Tool invocations total (counter, labels: tool).
pub const TOOL_INVOCATIONS_TOTAL: &str = "tool_invocations_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_render() {
        // Build a recorder + handle (no global install to avoid test conflicts).
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let output = handle.render();
        assert!(output.is_empty() || output.contains('#') || output.contains('\n'));
    }

    #[test]
    fn metric_constants_are_snake_case() {
        let names = [
            WS_CONNECTIONS_TOTAL,
            WS_DISCONNECTIONS_TOTAL,
            WS_CONNECTIONS_ACTIVE,
            WS_CONNECTION_DURATION_SECONDS,
            WS_DROPPED_FRAMES_TOTAL,
            DISPATCH_TOTAL,
            DISPATCH_FAILURES_TOTAL,
            QUERY_REQUESTS_TOTAL,
            QUERY_FAILURES_TOTAL,
            TOOL_INVOCATIONS_TOTAL,
        ];
        for name in names {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "metric name '{name}' must be snake_case"
            );
        }
    }
}
