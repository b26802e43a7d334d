use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateTokensRequest {
    /// Number of tokens to issue, between 1 and 1000
    #[validate(range(min = 1, max = 1000, message = "count must be between 1 and 1000"))]
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateTokensResponse {
    /// The issued 64-hex-character codes
    pub codes: Vec<String>,
}
