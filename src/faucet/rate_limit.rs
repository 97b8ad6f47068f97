use alloy::primitives::Address;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// A disbursement is in flight for the address.
    Pending,
    Disbursed(Instant),
}

/// Per-address disbursement window.
///
/// A request reserves its slot with [`RateLimiter::reserve`] before any chain
/// access. The reservation becomes the window start on
/// [`Reservation::confirm`]; dropping it unconfirmed frees the slot again.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    slots: DashMap<Address, Slot>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slots: DashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Claims the slot for `address`, or returns how long the caller must
    /// wait. An in-flight request for the same address blocks for the whole
    /// window.
    pub fn reserve(&self, address: Address, now: Instant) -> Result<Reservation<'_>, Duration> {
        if self.window.is_zero() {
            return Ok(Reservation {
                limiter: self,
                address,
                armed: false,
            });
        }
        match self.slots.entry(address) {
            Entry::Occupied(mut occupied) => match *occupied.get() {
                Slot::Pending => return Err(self.window),
                Slot::Disbursed(last) => {
                    let elapsed = now.saturating_duration_since(last);
                    if elapsed < self.window {
                        return Err(self.window - elapsed);
                    }
                    occupied.insert(Slot::Pending);
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(Slot::Pending);
            }
        }
        Ok(Reservation {
            limiter: self,
            address,
            armed: true,
        })
    }

    fn confirm(&self, address: Address, now: Instant) {
        let window = self.window;
        self.slots.retain(|_, slot| match *slot {
            Slot::Pending => true,
            Slot::Disbursed(last) => now.saturating_duration_since(last) < window,
        });
        self.slots.insert(address, Slot::Disbursed(now));
    }

    fn release(&self, address: &Address) {
        self.slots.remove_if(address, |_, slot| *slot == Slot::Pending);
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.slots.len()
    }
}

/// Held for the duration of one disbursement.
#[must_use = "an unconfirmed reservation is released when dropped"]
pub struct Reservation<'a> {
    limiter: &'a RateLimiter,
    address: Address,
    armed: bool,
}

impl Reservation<'_> {
    /// Starts the window for the address at `now`.
    pub fn confirm(mut self, now: Instant) {
        if self.armed {
            self.limiter.confirm(self.address, now);
            self.armed = false;
        }
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.limiter.release(&self.address);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_within_window_and_releases_after() {
        let limiter = RateLimiter::new(Duration::from_secs(3600));
        let user = Address::repeat_byte(7);
        let t0 = Instant::now();

        limiter.reserve(user, t0).expect("first slot").confirm(t0);
        assert_eq!(
            limiter.reserve(user, t0 + Duration::from_secs(3000)).err(),
            Some(Duration::from_secs(600))
        );
        assert!(limiter.reserve(user, t0 + Duration::from_secs(3600)).is_ok());
    }

    #[test]
    fn in_flight_reservation_blocks_second_request() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let user = Address::repeat_byte(9);
        let now = Instant::now();

        let held = limiter.reserve(user, now).expect("first slot");
        assert_eq!(limiter.reserve(user, now).err(), Some(Duration::from_secs(60)));
        assert!(limiter.reserve(Address::repeat_byte(8), now).is_ok());
        drop(held);
    }

    #[test]
    fn dropped_reservation_frees_the_slot() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let user = Address::repeat_byte(9);
        let now = Instant::now();

        drop(limiter.reserve(user, now).expect("first slot"));
        assert_eq!(limiter.tracked(), 0);
        assert!(limiter.reserve(user, now).is_ok());
    }

    #[test]
    fn confirm_prunes_expired_entries() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let t0 = Instant::now();
        for byte in 1..=3u8 {
            let user = Address::repeat_byte(byte);
            limiter.reserve(user, t0).expect("slot").confirm(t0);
        }
        assert_eq!(limiter.tracked(), 3);

        let later = t0 + Duration::from_secs(61);
        let fresh = Address::repeat_byte(4);
        limiter.reserve(fresh, later).expect("slot").confirm(later);
        assert_eq!(limiter.tracked(), 1);
    }

    #[test]
    fn zero_window_never_limits() {
        let limiter = RateLimiter::new(Duration::ZERO);
        let user = Address::repeat_byte(1);
        let now = Instant::now();
        limiter.reserve(user, now).expect("slot").confirm(now);
        assert!(limiter.reserve(user, now).is_ok());
        assert_eq!(limiter.tracked(), 0);
    }
}
