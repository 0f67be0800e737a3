use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::user::UserLookup;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub image_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub opening_time: String,
    pub closing_time: String,
    pub owner_id: Uuid,
    pub assigned_host: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The venue fields shown next to a joinable game.
#[derive(Debug, Clone, Serialize)]
pub struct VenueSummary {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub image_url: String,
    pub opening_time: String,
    pub closing_time: String,
}

impl From<&Venue> for VenueSummary {
    fn from(v: &Venue) -> Self {
        Self {
            title: v.title.clone(),
            kind: v.kind.clone(),
            image_url: v.image_url.clone(),
            opening_time: v.opening_time.clone(),
            closing_time: v.closing_time.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVenueRequest {
    pub title: String,
    pub image_url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub opening_time: String,
    pub closing_time: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVenueRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssignHostRequest {
    #[serde(flatten)]
    pub host: UserLookup,
}

#[derive(Debug, Serialize)]
pub struct VenueListResponse {
    pub items: Vec<Venue>,
    pub next_cursor: Option<DateTime<Utc>>,
}
