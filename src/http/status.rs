use axum::Json;
use serde::Serialize;

/// Payload served on `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub message: &'static str,
    pub status: &'static str,
    pub note: &'static str,
}

pub const SERVICE_STATUS: ServiceStatus = ServiceStatus {
    message: "YouTube Proxy Server",
    status: "running",
    note: "This proxy forwards requests to bypass IP blocking",
};

pub async fn get_status() -> Json<ServiceStatus> {
    Json(SERVICE_STATUS)
}
