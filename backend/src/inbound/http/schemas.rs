//! Shared response schemas for the HTTP adapter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform error envelope returned by every failing API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    #[schema(example = "Email is required")]
    pub error: String,
}

/// Bare acknowledgement returned by mutating endpoints without a payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SuccessBody {
    /// Always `true` on the success path.
    pub success: bool,
}

impl SuccessBody {
    /// The canonical acknowledgement value.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
