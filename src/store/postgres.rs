use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::BookingStore;
use crate::error::AppError;
use crate::models::booking::{Booking, NewBooking};
use crate::models::venue::Venue;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl BookingStore for PgStore {
    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>, AppError> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venue)
    }

    async fn list_bookings(&self, venue_id: Uuid, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE venue_id = $1 AND date = $2 ORDER BY start_minute",
        )
        .bind(venue_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn list_open_slot_bookings(&self) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE open_slots > 0 ORDER BY date, start_minute",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn list_user_bookings(&self, user_id: Uuid, open_only: bool) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE user_id = $1 AND (NOT $2 OR open_slots > 0)
             ORDER BY date DESC, start_minute DESC",
        )
        .bind(user_id)
        .bind(open_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Uuid, AppError> {
        sqlx::query_scalar(
            "INSERT INTO bookings
                (user_id, venue_id, date, start_minute, open_slots, joined_slots, original_booking_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(booking.user_id)
        .bind(booking.venue_id)
        .bind(booking.date)
        .bind(i32::from(booking.time_slot))
        .bind(booking.open_slots)
        .bind(booking.joined_slots)
        .bind(booking.original_booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict(format!(
                    "{} on {} has already been booked",
                    booking.time_slot, booking.date
                ))
            } else {
                AppError::Database(e)
            }
        })
    }

    async fn decrement_open_slots(&self, id: Uuid, by: i32) -> Result<i32, AppError> {
        let remaining: Option<i32> = sqlx::query_scalar(
            "UPDATE bookings SET open_slots = open_slots - $2
             WHERE id = $1 AND open_slots >= $2
             RETURNING open_slots",
        )
        .bind(id)
        .bind(by)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(remaining) = remaining {
            return Ok(remaining);
        }

        let open: Option<i32> = sqlx::query_scalar("SELECT open_slots FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match open {
            Some(open) => Err(AppError::InvalidJoinCount { requested: by, open }),
            None => Err(AppError::NotFound("Booking not found".into())),
        }
    }
}
