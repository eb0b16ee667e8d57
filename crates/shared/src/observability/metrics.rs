//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};

use super::ObservabilityConfig;

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    register_common_metrics(&config.service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册通用指标
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!("auth_signups_total", "Total number of signup attempts");
    metrics::describe_counter!("auth_logins_total", "Total number of login attempts");
    metrics::describe_counter!(
        "auth_refresh_total",
        "Total number of refresh token exchanges"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

/// 启动指标 HTTP 服务器
async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 认证操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Signup,
    Login,
    Refresh,
}

impl AuthOperation {
    /// 对应的计数器名称
    pub fn metric_name(self) -> &'static str {
        match self {
            Self::Signup => "auth_signups_total",
            Self::Login => "auth_logins_total",
            Self::Refresh => "auth_refresh_total",
        }
    }
}

/// 记录认证操作结果
///
/// `outcome` 为 success 或错误码
#[inline]
pub fn record_auth_outcome(operation: AuthOperation, outcome: &str) {
    metrics::counter!(operation.metric_name(), "outcome" => outcome.to_string()).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_functions_do_not_panic() {
        // 即使没有初始化 recorder，这些函数也不应该 panic
        record_http_request("GET", "/api/contacts", 200, 0.1);
        record_auth_outcome(AuthOperation::Login, "success");
        record_auth_outcome(AuthOperation::Refresh, "UNAUTHORIZED");
        record_auth_outcome(AuthOperation::Signup, "DUPLICATE_EMAIL");
    }

    #[test]
    fn test_auth_operation_metric_names() {
        assert_eq!(AuthOperation::Signup.metric_name(), "auth_signups_total");
        assert_eq!(AuthOperation::Login.metric_name(), "auth_logins_total");
        assert_eq!(AuthOperation::Refresh.metric_name(), "auth_refresh_total");
    }
}
