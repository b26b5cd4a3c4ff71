//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" while the process serves requests.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Database reachability response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealthResponse {
    pub status: String,
    pub database: String,
}
