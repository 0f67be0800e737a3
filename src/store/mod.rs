//! The storage collaborator the booking engine talks to.
//!
//! Route handlers for plain CRUD query the pool directly; everything the slot
//! and booking rules depend on goes through [`BookingStore`] so the rules can be
//! exercised against an in-memory store.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::booking::{Booking, NewBooking};
use crate::models::venue::Venue;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

pub trait BookingStore: Send + Sync {
    fn get_venue(&self, id: Uuid) -> impl Future<Output = Result<Option<Venue>, AppError>> + Send;

    /// Every booking (primary and joined) on a venue for one calendar day.
    fn list_bookings(
        &self,
        venue_id: Uuid,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Booking>, AppError>> + Send;

    /// Bookings that still have seats open for other players.
    fn list_open_slot_bookings(&self) -> impl Future<Output = Result<Vec<Booking>, AppError>> + Send;

    fn list_user_bookings(
        &self,
        user_id: Uuid,
        open_only: bool,
    ) -> impl Future<Output = Result<Vec<Booking>, AppError>> + Send;

    fn get_booking(&self, id: Uuid) -> impl Future<Output = Result<Option<Booking>, AppError>> + Send;

    /// Fails with [`AppError::Conflict`] when a primary booking already holds the
    /// same venue, date and slot.
    fn create_booking(
        &self,
        booking: &NewBooking,
    ) -> impl Future<Output = Result<Uuid, AppError>> + Send;

    /// Conditionally lowers the open-seat count and returns what remains.
    /// Fails with [`AppError::InvalidJoinCount`] if fewer than `by` seats are open.
    fn decrement_open_slots(
        &self,
        id: Uuid,
        by: i32,
    ) -> impl Future<Output = Result<i32, AppError>> + Send;
}
