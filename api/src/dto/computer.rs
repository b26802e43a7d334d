use serde::{Deserialize, Serialize};
use validator::Validate;

use cr_core::domain::entities::computer::Computer;
use cr_core::services::registration::{NewRegistration, OwnerRef};
use cr_shared::types::pagination::PageMeta;

/// Body of POST/PUT /api/computers/{registrationId}
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterComputerRequest {
    /// Student registration number
    pub reg_no: Option<i64>,

    /// Guest national id
    pub national_id: Option<i64>,

    #[validate(length(min = 1, message = "serialNo cannot be empty"))]
    pub serial_no: String,

    #[validate(length(min = 1, message = "brand cannot be empty"))]
    pub brand: String,
}

impl From<RegisterComputerRequest> for NewRegistration {
    fn from(request: RegisterComputerRequest) -> Self {
        NewRegistration {
            owner: OwnerRef {
                reg_no: request.reg_no,
                national_id: request.national_id,
            },
            serial_no: request.serial_no,
            brand: request.brand,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterComputerResponse {
    pub message: String,
    pub registration_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComputerResponse {
    pub registration_id: String,
}

/// Response of GET /api/computers/verify/{registrationId}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyComputerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_no: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<i64>,

    pub names: String,
    pub serial_no: String,
}

/// Query string of GET /api/computers/search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub reg_no: Option<i64>,
    pub national_id: Option<i64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerSummary {
    pub registration_id: String,
    pub serial_no: String,
    pub brand: String,
}

impl From<Computer> for ComputerSummary {
    fn from(computer: Computer) -> Self {
        Self {
            registration_id: computer.token_code,
            serial_no: computer.serial_no,
            brand: computer.brand,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub computers: Vec<ComputerSummary>,
    pub pagination: PageMeta,
}
