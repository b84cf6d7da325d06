//! Health checks
//!
//! Liveness plus a readiness report covering the record store and the
//! attachment storage backend.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roster_services::RecordStore;
use serde::Serialize;
use tracing::{debug, warn};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Overall health report
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: Vec<ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            HealthStatus::Healthy => StatusCode::OK,
            HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Health checker service
pub struct HealthChecker {
    start_time: Instant,
    store: Arc<RecordStore>,
}

impl HealthChecker {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            start_time: Instant::now(),
            store,
        }
    }

    pub async fn check(&self) -> HealthReport {
        let components = vec![self.check_records().await, self.check_storage().await];

        let status = if components.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        debug!(status = ?status, "Health checked");

        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            components,
            timestamp: chrono::Utc::now(),
        }
    }

    async fn check_records(&self) -> ComponentHealth {
        ComponentHealth {
            name: "records".to_string(),
            status: HealthStatus::Healthy,
            details: Some(serde_json::json!({ "count": self.store.count().await })),
        }
    }

    async fn check_storage(&self) -> ComponentHealth {
        let attachments = self.store.attachments();
        let mut details = serde_json::json!({
            "backend": attachments.storage_name(),
            "public_path": attachments.public_path(),
        });

        let status = match attachments.check_storage().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = %e, "Attachment storage check failed");
                details["error"] = serde_json::Value::String(e.to_string());
                HealthStatus::Unhealthy
            }
        };

        ComponentHealth {
            name: "storage".to_string(),
            status,
            details: Some(details),
        }
    }
}

/// Simple liveness check
pub async fn liveness() -> &'static str {
    "OK"
}

/// Readiness check with component report
pub async fn readiness(State(checker): State<Arc<HealthChecker>>) -> (StatusCode, Json<HealthReport>) {
    let report = checker.check().await;
    let status = report.http_status();
    (status, Json(report))
}
