use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::venue::VenueSummary;
use crate::slots::SlotTime;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub date: NaiveDate,
    #[sqlx(rename = "start_minute", try_from = "i32")]
    pub time_slot: SlotTime,
    pub open_slots: i32,
    pub joined_slots: Option<i32>,
    pub original_booking_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub venue_id: Uuid,
    pub date: NaiveDate,
    pub time_slot: SlotTime,
    pub open_slots: i32,
    pub joined_slots: Option<i32>,
    pub original_booking_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub time: SlotTime,
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub open_slots: i32,
}

#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub booking_ids: Vec<Uuid>,
    pub slots_booked: usize,
    pub open_slots: Option<i32>,
    pub message: String,
    /// Fresh availability for the booked date, absent if the re-check failed.
    pub availability: Option<Vec<SlotAvailability>>,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub count: i32,
}

#[derive(Debug, Serialize)]
pub struct JoinConfirmation {
    pub booking_id: Uuid,
    pub original_booking_id: Uuid,
    pub joined_slots: i32,
    pub remaining_open_slots: i32,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct JoinableGame {
    #[serde(flatten)]
    pub booking: Booking,
    pub venue: Option<VenueSummary>,
}
