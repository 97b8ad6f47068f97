//! Mock contract-address allocator.
//!
//! Stands in for a factory contract: a FIFO pool of pre-deployed looper
//! addresses, handed out one per launch request. Assigned addresses are gone
//! for the life of the pool; nothing is persisted, reserved or rolled back.

use crate::error::{ExhaustedError, Result, ValidationError};
use alloy::primitives::Address;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub contract_address: Address,
    pub remaining: usize,
}

#[derive(Debug, Default)]
pub struct AddressPool {
    available: Mutex<VecDeque<Address>>,
}

impl AddressPool {
    pub fn new<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        Self {
            available: Mutex::new(addresses.into_iter().collect()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Address>> {
        match self.available.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::error!("[POOL] Address pool lock poisoned; recovering guard state.");
                poisoned.into_inner()
            }
        }
    }

    /// Pops the oldest address for a launch request.
    ///
    /// The user address, leverage and amount are only checked for presence;
    /// they are echoed back by the HTTP layer, not interpreted here.
    pub fn assign(&self, user_address: &str, leverage: f64, amount: &str) -> Result<Assignment> {
        if user_address.trim().is_empty()
            || amount.trim().is_empty()
            || leverage == 0.0
            || leverage.is_nan()
        {
            return Err(ValidationError::MissingParameters.into());
        }

        let mut pool = self.lock();
        let Some(contract_address) = pool.pop_front() else {
            tracing::warn!("[POOL] Assignment refused for {}: pool exhausted", user_address);
            return Err(ExhaustedError::PoolExhausted.into());
        };
        let remaining = pool.len();
        drop(pool);

        tracing::info!(
            "[POOL] Assigned {:#x} to {} (leverage={} amount={} remaining={})",
            contract_address,
            user_address,
            leverage,
            amount,
            remaining
        );
        Ok(Assignment {
            contract_address,
            remaining,
        })
    }

    pub fn available(&self) -> usize {
        self.lock().len()
    }
}
