use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::BookingStore;
use crate::error::AppError;
use crate::models::booking::{Booking, NewBooking};
use crate::models::venue::Venue;
use crate::slots::SlotTime;

#[derive(Default)]
pub struct Failures {
    pub reads: bool,
    pub venues: HashSet<Uuid>,
    pub slot_writes: HashSet<SlotTime>,
    pub join_writes: bool,
}

/// Test double mirroring the Postgres constraints, with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    venues: Mutex<HashMap<Uuid, Venue>>,
    bookings: Mutex<Vec<Booking>>,
    pub failures: Mutex<Failures>,
    writes: Mutex<usize>,
}

fn unavailable() -> AppError {
    AppError::Internal("store unavailable".into())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_venue(&self, venue: Venue) {
        self.venues.lock().unwrap().insert(venue.id, venue);
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    pub fn booking(&self, id: Uuid) -> Booking {
        self.bookings().into_iter().find(|b| b.id == id).unwrap()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    fn fail_reads(&self) -> Result<(), AppError> {
        if self.failures.lock().unwrap().reads {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

impl BookingStore for MemoryStore {
    async fn get_venue(&self, id: Uuid) -> Result<Option<Venue>, AppError> {
        if self.failures.lock().unwrap().venues.contains(&id) {
            return Err(unavailable());
        }
        self.fail_reads()?;
        Ok(self.venues.lock().unwrap().get(&id).cloned())
    }

    async fn list_bookings(&self, venue_id: Uuid, date: NaiveDate) -> Result<Vec<Booking>, AppError> {
        self.fail_reads()?;
        Ok(self
            .bookings()
            .into_iter()
            .filter(|b| b.venue_id == venue_id && b.date == date)
            .collect())
    }

    async fn list_open_slot_bookings(&self) -> Result<Vec<Booking>, AppError> {
        self.fail_reads()?;
        Ok(self.bookings().into_iter().filter(|b| b.open_slots > 0).collect())
    }

    async fn list_user_bookings(&self, user_id: Uuid, open_only: bool) -> Result<Vec<Booking>, AppError> {
        self.fail_reads()?;
        let mut bookings: Vec<Booking> = self
            .bookings()
            .into_iter()
            .filter(|b| b.user_id == user_id && (!open_only || b.open_slots > 0))
            .collect();
        bookings.sort_by_key(|b| std::cmp::Reverse((b.date, b.time_slot)));
        Ok(bookings)
    }

    async fn get_booking(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        self.fail_reads()?;
        Ok(self.bookings().into_iter().find(|b| b.id == id))
    }

    async fn create_booking(&self, new: &NewBooking) -> Result<Uuid, AppError> {
        {
            let failures = self.failures.lock().unwrap();
            if failures.slot_writes.contains(&new.time_slot)
                || (failures.join_writes && new.original_booking_id.is_some())
            {
                return Err(unavailable());
            }
        }

        let mut bookings = self.bookings.lock().unwrap();
        let taken = new.original_booking_id.is_none()
            && bookings.iter().any(|b| {
                b.original_booking_id.is_none()
                    && b.venue_id == new.venue_id
                    && b.date == new.date
                    && b.time_slot == new.time_slot
            });
        if taken {
            return Err(AppError::Conflict(format!(
                "{} on {} has already been booked",
                new.time_slot, new.date
            )));
        }

        let id = Uuid::new_v4();
        bookings.push(Booking {
            id,
            user_id: new.user_id,
            venue_id: new.venue_id,
            date: new.date,
            time_slot: new.time_slot,
            open_slots: new.open_slots,
            joined_slots: new.joined_slots,
            original_booking_id: new.original_booking_id,
            created_at: Utc::now(),
        });
        *self.writes.lock().unwrap() += 1;
        Ok(id)
    }

    async fn decrement_open_slots(&self, id: Uuid, by: i32) -> Result<i32, AppError> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;
        if booking.open_slots < by {
            return Err(AppError::InvalidJoinCount {
                requested: by,
                open: booking.open_slots,
            });
        }
        booking.open_slots -= by;
        *self.writes.lock().unwrap() += 1;
        Ok(booking.open_slots)
    }
}
