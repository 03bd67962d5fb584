//! Booking identifier types
//!
//! Booking IDs are human-readable and sequential: `TKT-<year>-<seq>`, with the
//! sequence zero-padded to three digits. The sequence restarts at 1 whenever
//! the queue is reset, so identifiers may repeat across resets.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "TKT";

/// Unique identifier for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookingId {
    year: i32,
    sequence: u64,
}

impl BookingId {
    /// Create a booking ID from its parts
    pub fn new(year: i32, sequence: u64) -> Self {
        Self { year, sequence }
    }

    /// Calendar year the booking was issued in
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Per-process sequence number (starts at 1)
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04}-{:03}", PREFIX, self.year, self.sequence)
    }
}

impl FromStr for BookingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(PREFIX), Some(year), Some(sequence)) => {
                let year = year.parse().map_err(|_| format!("Invalid booking year in {}", s))?;
                let sequence = sequence
                    .parse()
                    .map_err(|_| format!("Invalid booking sequence in {}", s))?;
                Ok(BookingId { year, sequence })
            }
            _ => Err(format!("Unknown booking ID format: {}", s)),
        }
    }
}

impl Serialize for BookingId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BookingId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Monotonic booking ID counter owned by the queue store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingIdGenerator {
    next_sequence: u64,
}

impl BookingIdGenerator {
    /// Create a generator whose first ID has sequence 1
    pub fn new() -> Self {
        Self { next_sequence: 1 }
    }

    /// Issue the next ID for the given year
    pub fn next_id(&mut self, year: i32) -> BookingId {
        let id = BookingId::new(year, self.next_sequence);
        self.next_sequence = self.next_sequence.saturating_add(1);
        id
    }

    /// Sequence number the next issued ID will carry
    pub fn peek_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Restart the sequence at 1
    pub fn reset(&mut self) {
        self.next_sequence = 1;
    }
}

impl Default for BookingIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_format() {
        assert_eq!(BookingId::new(2025, 1).to_string(), "TKT-2025-001");
        assert_eq!(BookingId::new(2025, 42).to_string(), "TKT-2025-042");
        assert_eq!(BookingId::new(2026, 1234).to_string(), "TKT-2026-1234");
    }

    #[test]
    fn test_booking_id_parse() {
        let id: BookingId = "TKT-2025-007".parse().unwrap();
        assert_eq!(id.year(), 2025);
        assert_eq!(id.sequence(), 7);

        assert!("TKT-2025".parse::<BookingId>().is_err());
        assert!("ABC-2025-001".parse::<BookingId>().is_err());
        assert!("TKT-20x5-001".parse::<BookingId>().is_err());
    }

    #[test]
    fn test_booking_id_serde() {
        let id = BookingId::new(2025, 3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"TKT-2025-003\"");

        let back: BookingId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_generator_sequence_and_reset() {
        let mut generator = BookingIdGenerator::new();
        assert_eq!(generator.next_id(2025).sequence(), 1);
        assert_eq!(generator.next_id(2025).sequence(), 2);
        assert_eq!(generator.peek_sequence(), 3);

        generator.reset();
        assert_eq!(generator.peek_sequence(), 1);
        assert_eq!(generator.next_id(2025).to_string(), "TKT-2025-001");
    }

    #[test]
    fn test_generator_counts_past_u32_range() {
        let mut generator = BookingIdGenerator { next_sequence: u64::from(u32::MAX) };
        assert_eq!(generator.next_id(2025).sequence(), u64::from(u32::MAX));

        let next = generator.next_id(2025);
        assert_eq!(next.sequence(), u64::from(u32::MAX) + 1);
        assert_eq!(next.to_string(), "TKT-2025-4294967296");
        assert_eq!(next.to_string().parse::<BookingId>().unwrap(), next);
    }
}
