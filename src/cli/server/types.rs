//! Response types for the catalog server.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// Server status (always "ok" when healthy)
    pub status: String,
    /// Server version from Cargo.toml
    pub version: String,
}

impl HealthResponse {
    /// Create a healthy response with the current package version
    pub fn healthy() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response for the API root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootResponse {
    pub message: String,
}

impl RootResponse {
    pub fn banner() -> Self {
        Self {
            message: "Atmosphere Viewer API".to_string(),
        }
    }
}
