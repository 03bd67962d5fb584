//! Core booking struct
//!
//! A booking's identity (name, ID, creation time) never changes once issued.
//! Only its seat assignment moves, and only from the waiting list (seat 0) to
//! a freed seat when the booking is promoted.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::{BookingId, Zone};

/// Seat number that marks a booking as waiting
pub const WAITING_SEAT: u32 = 0;

/// A single seat reservation or waiting-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    name: String,
    #[serde(with = "hms")]
    timestamp: NaiveTime,
    booking_id: BookingId,
    seat_number: u32,
}

impl Booking {
    /// Create a new booking; the timestamp is truncated to whole seconds
    pub fn new(
        name: impl Into<String>,
        booking_id: BookingId,
        seat_number: u32,
        timestamp: NaiveTime,
    ) -> Self {
        Self {
            name: name.into(),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            booking_id,
            seat_number,
        }
    }

    /// Display name, as entered (trimmed)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local wall-clock time the booking was created
    pub fn created_at(&self) -> NaiveTime {
        self.timestamp
    }

    /// Creation time formatted as `HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.timestamp.format(hms::FORMAT).to_string()
    }

    /// Human-readable booking identifier
    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    /// Seat held by this booking, or 0 when waiting
    pub fn seat_number(&self) -> u32 {
        self.seat_number
    }

    /// Zone this booking currently sits in
    pub fn zone(&self) -> Zone {
        Zone::from_seat(self.seat_number)
    }

    /// Whether the booking holds a confirmed seat
    pub fn is_confirmed(&self) -> bool {
        self.seat_number != WAITING_SEAT
    }

    /// Whether the booking is on the waiting list
    pub fn is_waiting(&self) -> bool {
        self.seat_number == WAITING_SEAT
    }

    /// Case-insensitive name comparison used for duplicate detection
    pub fn has_name(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }

    /// Move the booking into a seat
    pub(crate) fn assign_seat(&mut self, seat_number: u32) {
        self.seat_number = seat_number;
    }
}

mod hms {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%H:%M:%S";

    pub(super) fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(seat: u32) -> Booking {
        let time = NaiveTime::from_hms_milli_opt(9, 5, 7, 450).unwrap();
        Booking::new("Alice", BookingId::new(2025, 1), seat, time)
    }

    #[test]
    fn test_booking_timestamp_format() {
        let b = booking(3);
        assert_eq!(b.timestamp(), "09:05:07");
        assert_eq!(b.created_at().nanosecond(), 0);
    }

    #[test]
    fn test_booking_zone() {
        assert_eq!(booking(3).zone(), Zone::Confirmed);
        assert!(booking(3).is_confirmed());
        assert_eq!(booking(WAITING_SEAT).zone(), Zone::Waiting);
        assert!(booking(WAITING_SEAT).is_waiting());
    }

    #[test]
    fn test_has_name_is_case_insensitive() {
        let b = booking(1);
        assert!(b.has_name("alice"));
        assert!(b.has_name("  ALICE "));
        assert!(!b.has_name("Alicia"));
    }

    #[test]
    fn test_assign_seat_keeps_identity() {
        let mut b = booking(WAITING_SEAT);
        let id = b.booking_id();
        let ts = b.timestamp();

        b.assign_seat(4);

        assert_eq!(b.seat_number(), 4);
        assert_eq!(b.booking_id(), id);
        assert_eq!(b.timestamp(), ts);
    }

    #[test]
    fn test_booking_serialization() {
        let b = booking(2);
        let value = serde_json::to_value(&b).unwrap();
        assert_eq!(value["name"], "Alice");
        assert_eq!(value["timestamp"], "09:05:07");
        assert_eq!(value["booking_id"], "TKT-2025-001");
        assert_eq!(value["seat_number"], 2);

        let back: Booking = serde_json::from_value(value).unwrap();
        assert_eq!(back, b);
    }
}
