use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const MINUTES_PER_DAY: u16 = 24 * 60;
pub const SLOT_LENGTH_MINUTES: u16 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid time '{}': {}", self.input, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Start of a bookable slot, stored as minutes since midnight.
///
/// Labels such as `6:00 PM` are only produced at the edges (JSON and display);
/// ordering and comparisons always work on the minute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(u16);

impl SlotTime {
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Parse a 12-hour clock label (`H:MM AM|PM`, leading zero optional,
    /// meridiem case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let err = |reason| ParseError {
            input: input.to_string(),
            reason,
        };

        let (clock, meridiem) = input
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| err("expected a time followed by AM or PM"))?;

        let meridiem = meridiem.trim();
        let pm = if meridiem.eq_ignore_ascii_case("pm") {
            true
        } else if meridiem.eq_ignore_ascii_case("am") {
            false
        } else {
            return Err(err("expected AM or PM"));
        };

        let (hours, minutes) = clock.split_once(':').ok_or_else(|| err("expected H:MM"))?;
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(hours) || hours.len() > 2 || !is_digits(minutes) || minutes.len() != 2 {
            return Err(err("expected H:MM"));
        }

        let hours: u16 = hours.parse().map_err(|_| err("expected H:MM"))?;
        let minutes: u16 = minutes.parse().map_err(|_| err("expected H:MM"))?;
        if !(1..=12).contains(&hours) {
            return Err(err("hour must be between 1 and 12"));
        }
        if minutes > 59 {
            return Err(err("minutes must be between 00 and 59"));
        }

        let hour24 = hours % 12 + if pm { 12 } else { 0 };
        Ok(Self(hour24 * 60 + minutes))
    }

    /// The moment this slot starts on the given calendar day.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::default()) + Duration::minutes(i64::from(self.0))
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 60;
        let minutes = self.0 % 60;
        let period = if hours >= 12 { "PM" } else { "AM" };
        let display_hours = match hours % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{display_hours}:{minutes:02} {period}")
    }
}

impl FromStr for SlotTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<i32> for SlotTime {
    type Error = ParseError;

    fn try_from(minutes: i32) -> Result<Self, Self::Error> {
        u16::try_from(minutes)
            .ok()
            .and_then(Self::from_minutes)
            .ok_or_else(|| ParseError {
                input: minutes.to_string(),
                reason: "minute offset out of range",
            })
    }
}

impl From<SlotTime> for i32 {
    fn from(slot: SlotTime) -> Self {
        i32::from(slot.minutes())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label).map_err(serde::de::Error::custom)
    }
}

/// One slot per hour starting at `opening`; a slot is only produced when its
/// whole hour fits before `closing`. Spans that wrap past midnight produce nothing.
pub fn generate_slots(opening: SlotTime, closing: SlotTime) -> impl Iterator<Item = SlotTime> {
    let end = closing.0;
    (opening.0..end)
        .step_by(usize::from(SLOT_LENGTH_MINUTES))
        .take_while(move |start| start + SLOT_LENGTH_MINUTES <= end)
        .map(SlotTime)
}

pub fn parse_hours(opening: &str, closing: &str) -> Result<(SlotTime, SlotTime), ParseError> {
    Ok((SlotTime::parse(opening)?, SlotTime::parse(closing)?))
}

/// Bookable slots for a venue's stored hours. A venue with unparseable hours
/// has no bookable slots.
pub fn venue_slots(opening: &str, closing: &str) -> Vec<SlotTime> {
    match parse_hours(opening, closing) {
        Ok((open, close)) => generate_slots(open, close).collect(),
        Err(e) => {
            tracing::warn!(opening, closing, "venue has unusable opening hours: {e}");
            vec![]
        }
    }
}
