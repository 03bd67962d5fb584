//! Booking queue engine
//!
//! The engine owns a `QueueStore` and applies every queue operation to it:
//! seat allocation, waiting-list joins, cancellation with FIFO promotion, and
//! the read-only queries observers use. Each call runs to completion before
//! returning, so no caller ever sees a half-applied change.

use chrono::{Datelike, Local, NaiveDateTime};
use tracing::{debug, info, instrument};

use crate::booking::{Booking, QueueStore, WAITING_SEAT};
use crate::queue::{Booked, Cancelled, QueueError, QueueResult, QueueState};
use crate::types::{QueueCapacity, Zone};

/// Source of the wall-clock time stamped on new bookings
pub type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Fixed-capacity seat queue with a FIFO waiting list
#[derive(Debug, Clone)]
pub struct QueueEngine {
    capacity: QueueCapacity,
    store: QueueStore,
    clock: Clock,
}

impl QueueEngine {
    /// Create an engine over an existing store
    pub fn new(capacity: QueueCapacity, store: QueueStore) -> Self {
        Self::with_clock(capacity, store, local_now)
    }

    /// Create an engine over an empty store
    pub fn with_capacity(capacity: QueueCapacity) -> Self {
        Self::new(capacity, QueueStore::new())
    }

    /// Create an engine with an explicit clock (booking year and timestamp)
    pub fn with_clock(capacity: QueueCapacity, store: QueueStore, clock: Clock) -> Self {
        info!(
            "Initializing queue engine with {} seats and a waiting list of {}",
            capacity.max_seats, capacity.max_waiting_list
        );
        Self { capacity, store, clock }
    }

    /// Configured capacities
    pub fn capacity(&self) -> QueueCapacity {
        self.capacity
    }

    /// Read-only view of the underlying store
    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    /// Seats `1..=max_seats` not held by a confirmed booking, ascending
    pub fn available_seats(&self) -> Vec<u32> {
        (1..=self.capacity.max_seats)
            .filter(|&seat| self.store.position_of_seat(seat).is_none())
            .collect()
    }

    /// Number of free seats
    pub fn available_seat_count(&self) -> usize {
        self.available_seats().len()
    }

    /// Whether `seat_number` is in range and unheld
    pub fn is_seat_available(&self, seat_number: u32) -> bool {
        if seat_number < 1 || seat_number > self.capacity.max_seats {
            return false;
        }
        self.store.position_of_seat(seat_number).is_none()
    }

    /// Book a specific seat, or pass 0 to join the waiting list once every seat is taken
    #[instrument(skip(self), level = "debug")]
    pub fn enqueue(&mut self, name: &str, seat_number: u32) -> QueueResult<Booked> {
        let name = self.validate_name(name)?;

        if seat_number > 0 {
            if !self.is_seat_available(seat_number) {
                debug!(seat = seat_number, "Seat unavailable");
                return Err(QueueError::SeatTaken { seat: seat_number });
            }
        } else if self.available_seat_count() > 0 {
            return Err(QueueError::MustSelectSeat);
        } else if self.waiting_list_full() {
            return Err(QueueError::WaitingListFull { all_seats_taken: true });
        }

        Ok(self.insert(name, seat_number))
    }

    /// Join the waiting list regardless of seat availability
    #[instrument(skip(self), level = "debug")]
    pub fn add_to_waiting_list(&mut self, name: &str) -> QueueResult<Booked> {
        let name = self.validate_name(name)?;

        if self.waiting_list_full() {
            return Err(QueueError::WaitingListFull { all_seats_taken: false });
        }

        Ok(self.insert(name, WAITING_SEAT))
    }

    /// Cancel the booking holding `seat_number` and promote the earliest waiting booking into it
    ///
    /// Promotion mutates the waiting booking in place: it keeps its position in
    /// insertion order and only its seat number changes. Passing 0 removes the
    /// earliest waiting booking and never promotes.
    #[instrument(skip(self), level = "debug")]
    pub fn cancel_booking(&mut self, seat_number: u32) -> QueueResult<Cancelled> {
        let index = self
            .store
            .position_of_seat(seat_number)
            .ok_or(QueueError::NotFound { seat: seat_number })?;
        let cancelled = self.store.remove(index).ok_or(QueueError::NotFound { seat: seat_number })?;
        let freed_seat = cancelled.seat_number();

        let mut promoted = None;
        if freed_seat > 0 {
            if let Some(waiting_index) = self.store.first_waiting_position() {
                if let Some(booking) = self.store.get_mut(waiting_index) {
                    booking.assign_seat(freed_seat);
                    info!(
                        booking_id = %booking.booking_id(),
                        seat = freed_seat,
                        "Promoted {} from waiting list",
                        booking.name()
                    );
                    promoted = Some(booking.clone());
                }
            }
        }

        debug!(booking_id = %cancelled.booking_id(), seat = freed_seat, "Cancelled booking");
        Ok(Cancelled { cancelled, promoted, left_waiting_list: false })
    }

    /// Cancel the front of the queue
    ///
    /// Targets the earliest-inserted confirmed booking. With no confirmed
    /// bookings left, the store's first entry (necessarily waiting) is dropped
    /// without promotion.
    #[instrument(skip(self), level = "debug")]
    pub fn dequeue(&mut self) -> QueueResult<Cancelled> {
        if let Some(front) = self.peek() {
            let seat = front.seat_number();
            return self.cancel_booking(seat);
        }

        let cancelled = self.store.remove(0).ok_or(QueueError::QueueEmpty)?;
        debug!(booking_id = %cancelled.booking_id(), "Removed front waiting entry");
        Ok(Cancelled { cancelled, promoted: None, left_waiting_list: true })
    }

    /// Earliest-inserted confirmed booking
    pub fn peek(&self) -> Option<&Booking> {
        self.store.first_confirmed_position().and_then(|index| self.store.get(index))
    }

    /// No seats available
    pub fn is_full(&self) -> bool {
        self.available_seat_count() == 0
    }

    /// Store holds no bookings
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Total number of bookings
    pub fn queue_size(&self) -> usize {
        self.store.len()
    }

    /// Number of waiting bookings
    pub fn waiting_count(&self) -> usize {
        self.store.waiting_count()
    }

    /// Confirmed bookings ordered by seat number
    pub fn confirmed_bookings(&self) -> Vec<Booking> {
        let mut confirmed: Vec<Booking> =
            self.store.iter().filter(|b| b.is_confirmed()).cloned().collect();
        confirmed.sort_by_key(Booking::seat_number);
        confirmed
    }

    /// Waiting bookings in arrival order
    pub fn waiting_list(&self) -> Vec<Booking> {
        self.store.iter().filter(|b| b.is_waiting()).cloned().collect()
    }

    /// Clear every booking and restart booking IDs at 1
    pub fn reset_queue(&mut self) {
        self.store.reset();
        info!("Queue reset");
    }

    /// Owned snapshot of the current state
    pub fn queue_state(&self) -> QueueState {
        let available_seats = self.available_seats();
        let waiting = self.waiting_list();

        QueueState {
            queue: self.store.bookings().to_vec(),
            confirmed: self.confirmed_bookings(),
            available_seat_count: available_seats.len(),
            is_full: available_seats.is_empty(),
            available_seats,
            waiting_count: waiting.len(),
            waiting_list_full: waiting.len() >= self.capacity.max_waiting_list,
            waiting,
            queue_size: self.store.len(),
            is_empty: self.store.is_empty(),
            max_seats: self.capacity.max_seats,
            max_waiting_list: self.capacity.max_waiting_list,
        }
    }

    fn waiting_list_full(&self) -> bool {
        self.store.waiting_count() >= self.capacity.max_waiting_list
    }

    fn validate_name<'a>(&self, name: &'a str) -> QueueResult<&'a str> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(QueueError::EmptyName);
        }
        if self.store.contains_name(trimmed) {
            return Err(QueueError::DuplicateName { name: trimmed.to_string() });
        }
        Ok(trimmed)
    }

    fn insert(&mut self, name: &str, seat_number: u32) -> Booked {
        let now = (self.clock)();
        let booking_id = self.store.issue_id(now.year());
        let booking = Booking::new(name, booking_id, seat_number, now.time());
        let zone = Zone::from_seat(seat_number);

        debug!(booking_id = %booking_id, seat = seat_number, %zone, "Added {}", name);
        self.store.push(booking.clone());

        Booked { booking, zone }
    }
}

impl Default for QueueEngine {
    fn default() -> Self {
        Self::with_capacity(QueueCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_clock() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(14, 30, 15).unwrap()
    }

    fn engine(max_seats: u32, max_waiting_list: usize) -> QueueEngine {
        QueueEngine::with_clock(
            QueueCapacity { max_seats, max_waiting_list },
            QueueStore::new(),
            fixed_clock,
        )
    }

    #[test]
    fn test_enqueue_confirms_seat() {
        let mut engine = engine(5, 10);
        let booked = engine.enqueue("  Alice ", 3).unwrap();

        assert_eq!(booked.zone, Zone::Confirmed);
        assert_eq!(booked.booking.name(), "Alice");
        assert_eq!(booked.booking.seat_number(), 3);
        assert_eq!(booked.booking.booking_id().to_string(), "TKT-2025-001");
        assert_eq!(booked.booking.timestamp(), "14:30:15");
        assert_eq!(engine.available_seats(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_enqueue_rejects_empty_name() {
        let mut engine = engine(5, 10);
        assert_eq!(engine.enqueue("   ", 1), Err(QueueError::EmptyName));
        assert_eq!(engine.add_to_waiting_list(""), Err(QueueError::EmptyName));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_enqueue_out_of_range_is_seat_taken() {
        let mut engine = engine(5, 10);
        assert_eq!(engine.enqueue("Alice", 6), Err(QueueError::SeatTaken { seat: 6 }));
        assert!(!engine.is_seat_available(0));
        assert!(!engine.is_seat_available(6));
    }

    #[test]
    fn test_enqueue_without_seat_requires_selection() {
        let mut engine = engine(2, 10);
        assert_eq!(engine.enqueue("Alice", 0), Err(QueueError::MustSelectSeat));

        engine.enqueue("Alice", 1).unwrap();
        engine.enqueue("Bob", 2).unwrap();
        let booked = engine.enqueue("Carol", 0).unwrap();
        assert_eq!(booked.zone, Zone::Waiting);
        assert_eq!(booked.booking.seat_number(), WAITING_SEAT);
    }

    #[test]
    fn test_enqueue_waiting_path_full() {
        let mut engine = engine(1, 1);
        engine.enqueue("Alice", 1).unwrap();
        engine.enqueue("Bob", 0).unwrap();

        assert_eq!(
            engine.enqueue("Carol", 0),
            Err(QueueError::WaitingListFull { all_seats_taken: true })
        );
    }

    #[test]
    fn test_add_to_waiting_list_while_seats_free() {
        let mut engine = engine(3, 1);
        let booked = engine.add_to_waiting_list("Wendy").unwrap();
        assert_eq!(booked.zone, Zone::Waiting);
        assert_eq!(engine.available_seat_count(), 3);

        assert_eq!(
            engine.add_to_waiting_list("Walt"),
            Err(QueueError::WaitingListFull { all_seats_taken: false })
        );
    }

    #[test]
    fn test_cancel_promotes_in_place() {
        let mut engine = engine(2, 5);
        engine.enqueue("Alice", 1).unwrap();
        engine.enqueue("Bob", 2).unwrap();
        engine.add_to_waiting_list("Carol").unwrap();
        engine.add_to_waiting_list("Dave").unwrap();

        let cancelled = engine.cancel_booking(1).unwrap();
        assert_eq!(cancelled.cancelled.name(), "Alice");
        let promoted = cancelled.promoted.unwrap();
        assert_eq!(promoted.name(), "Carol");
        assert_eq!(promoted.seat_number(), 1);

        // Carol stays behind Bob in insertion order
        let names: Vec<&str> = engine.store().iter().map(Booking::name).collect();
        assert_eq!(names, vec!["Bob", "Carol", "Dave"]);
        assert_eq!(engine.waiting_list().len(), 1);
    }

    #[test]
    fn test_cancel_missing_seat() {
        let mut engine = engine(5, 10);
        assert_eq!(engine.cancel_booking(2), Err(QueueError::NotFound { seat: 2 }));
        assert_eq!(engine.cancel_booking(0), Err(QueueError::NotFound { seat: 0 }));
    }

    #[test]
    fn test_cancel_seat_zero_removes_first_waiting_without_promotion() {
        let mut engine = engine(1, 5);
        engine.enqueue("Alice", 1).unwrap();
        engine.add_to_waiting_list("Bob").unwrap();
        engine.add_to_waiting_list("Carol").unwrap();

        let cancelled = engine.cancel_booking(0).unwrap();
        assert_eq!(cancelled.cancelled.name(), "Bob");
        assert!(cancelled.promoted.is_none());
        assert_eq!(engine.peek().map(Booking::name), Some("Alice"));
    }

    #[test]
    fn test_dequeue_targets_earliest_confirmed() {
        let mut engine = engine(3, 5);
        engine.enqueue("Alice", 3).unwrap();
        engine.enqueue("Bob", 1).unwrap();

        assert_eq!(engine.peek().map(Booking::seat_number), Some(3));
        let cancelled = engine.dequeue().unwrap();
        assert_eq!(cancelled.cancelled.name(), "Alice");
        assert!(!cancelled.left_waiting_list);
    }

    #[test]
    fn test_dequeue_waiting_only_and_empty() {
        let mut engine = engine(2, 5);
        assert_eq!(engine.dequeue(), Err(QueueError::QueueEmpty));

        engine.add_to_waiting_list("Wendy").unwrap();
        engine.add_to_waiting_list("Walt").unwrap();

        let cancelled = engine.dequeue().unwrap();
        assert_eq!(cancelled.cancelled.name(), "Wendy");
        assert!(cancelled.left_waiting_list);
        assert!(cancelled.promoted.is_none());
        assert_eq!(engine.queue_size(), 1);
    }

    #[test]
    fn test_confirmed_bookings_sorted_by_seat() {
        let mut engine = engine(5, 5);
        engine.enqueue("Eve", 5).unwrap();
        engine.enqueue("Bob", 2).unwrap();
        engine.enqueue("Dan", 4).unwrap();

        let seats: Vec<u32> = engine.confirmed_bookings().iter().map(Booking::seat_number).collect();
        assert_eq!(seats, vec![2, 4, 5]);
    }

    #[test]
    fn test_reset_queue_is_idempotent() {
        let mut engine = engine(2, 2);
        engine.enqueue("Alice", 1).unwrap();
        engine.reset_queue();
        engine.reset_queue();

        assert!(engine.is_empty());
        assert_eq!(engine.available_seats(), vec![1, 2]);
        let booked = engine.enqueue("Bob", 1).unwrap();
        assert_eq!(booked.booking.booking_id().sequence(), 1);
    }

    #[test]
    fn test_queue_state_snapshot_is_detached() {
        let mut engine = engine(2, 1);
        engine.enqueue("Alice", 1).unwrap();
        let snapshot = engine.queue_state();

        engine.enqueue("Bob", 2).unwrap();
        engine.add_to_waiting_list("Carol").unwrap();

        assert_eq!(snapshot.queue_size, 1);
        assert_eq!(snapshot.available_seats, vec![2]);
        assert!(!snapshot.is_full);

        let latest = engine.queue_state();
        assert!(latest.is_full);
        assert!(latest.waiting_list_full);
        assert_eq!(latest.waiting_count, 1);
        assert_eq!(latest.summary(), "2/2 seats taken, 1/1 waiting");
    }
}
