use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
    /// Stable error category clients can branch on (e.g. `not_found`, `conflict`)
    pub code: String,
}
