//! Queue store
//!
//! The store is the single source of truth for bookings: an ordered sequence
//! whose insertion order is the FIFO order used for waiting-list promotion and
//! front-of-queue cancellation. It also owns the booking ID counter so that a
//! reset clears both together.

use crate::booking::Booking;
use crate::types::{BookingId, BookingIdGenerator};

/// Ordered collection of bookings plus the booking ID counter
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    bookings: Vec<Booking>,
    ids: BookingIdGenerator,
}

impl QueueStore {
    /// Create an empty store whose first booking ID has sequence 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bookings in the store
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Whether the store holds no bookings
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Bookings in insertion order
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Iterate bookings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter()
    }

    /// Index of the first booking (in insertion order) holding `seat_number`
    pub fn position_of_seat(&self, seat_number: u32) -> Option<usize> {
        self.bookings.iter().position(|b| b.seat_number() == seat_number)
    }

    /// Index of the earliest-inserted confirmed booking
    pub fn first_confirmed_position(&self) -> Option<usize> {
        self.bookings.iter().position(Booking::is_confirmed)
    }

    /// Index of the earliest-inserted waiting booking
    pub fn first_waiting_position(&self) -> Option<usize> {
        self.bookings.iter().position(Booking::is_waiting)
    }

    /// Whether a booking with this name exists (case-insensitive)
    pub fn contains_name(&self, name: &str) -> bool {
        self.bookings.iter().any(|b| b.has_name(name))
    }

    /// Number of waiting bookings
    pub fn waiting_count(&self) -> usize {
        self.bookings.iter().filter(|b| b.is_waiting()).count()
    }

    /// Booking at the given insertion index
    pub fn get(&self, index: usize) -> Option<&Booking> {
        self.bookings.get(index)
    }

    /// Issue the next booking ID
    pub fn issue_id(&mut self, year: i32) -> BookingId {
        self.ids.next_id(year)
    }

    /// Sequence number the next booking ID will carry
    pub fn next_sequence(&self) -> u64 {
        self.ids.peek_sequence()
    }

    /// Append a booking at the tail
    pub(crate) fn push(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Remove and return the booking at `index`, shifting later entries forward
    pub(crate) fn remove(&mut self, index: usize) -> Option<Booking> {
        if index < self.bookings.len() {
            Some(self.bookings.remove(index))
        } else {
            None
        }
    }

    /// Mutable access used by in-place promotion
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Booking> {
        self.bookings.get_mut(index)
    }

    /// Drop every booking and restart the ID sequence
    pub(crate) fn reset(&mut self) {
        self.bookings.clear();
        self.ids.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::WAITING_SEAT;
    use chrono::NaiveTime;

    fn add(store: &mut QueueStore, name: &str, seat: u32) {
        let id = store.issue_id(2025);
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        store.push(Booking::new(name, id, seat, time));
    }

    #[test]
    fn test_store_positions() {
        let mut store = QueueStore::new();
        add(&mut store, "Wendy", WAITING_SEAT);
        add(&mut store, "Alice", 2);
        add(&mut store, "Bob", 1);
        add(&mut store, "Walt", WAITING_SEAT);

        assert_eq!(store.len(), 4);
        assert_eq!(store.first_confirmed_position(), Some(1));
        assert_eq!(store.first_waiting_position(), Some(0));
        assert_eq!(store.position_of_seat(1), Some(2));
        assert_eq!(store.position_of_seat(5), None);
        assert_eq!(store.waiting_count(), 2);
        assert!(store.contains_name("BOB"));
        assert!(!store.contains_name("Carol"));
    }

    #[test]
    fn test_store_remove_out_of_range() {
        let mut store = QueueStore::new();
        add(&mut store, "Alice", 1);
        assert!(store.remove(3).is_none());
        assert_eq!(store.remove(0).map(|b| b.name().to_string()), Some("Alice".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_reset_restarts_ids() {
        let mut store = QueueStore::new();
        add(&mut store, "Alice", 1);
        add(&mut store, "Bob", 2);
        assert_eq!(store.next_sequence(), 3);

        store.reset();

        assert!(store.is_empty());
        assert_eq!(store.next_sequence(), 1);
    }
}
