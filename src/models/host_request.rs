use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "host_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HostRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub business_name: String,
    pub business_type: String,
    pub business_location: String,
    pub business_image_url: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub comments: Option<String>,
    pub status: RequestStatus,
    pub admin_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHostRequest {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub business_name: String,
    pub business_type: String,
    pub business_location: String,
    pub business_image_url: Option<String>,
    pub opening_time: String,
    pub closing_time: String,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for RequestStatus {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Approve => Self::Approved,
            Decision::Reject => Self::Rejected,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub action: Decision,
    pub message: Option<String>,
}
