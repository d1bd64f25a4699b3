//! Counting semaphore with explicit waiter bookkeeping.
//!
//! This is the primitive worker threads park on between queue drains.
//! `notify_all` mints one credit per thread parked at that instant, so a
//! burst wake never hands credit to threads that arrive later; credits from
//! `notify_one` with no waiters present are kept and satisfy the next `wait`
//! without sleeping.

use std::sync::{Condvar, Mutex};

#[derive(Default)]
struct SemState {
  /// Credits available to `wait` calls.
  credits: u32,
  /// Threads currently blocked inside `wait`.
  waiters: u32,
}

/// Counting semaphore. `wait` blocks until a credit is available;
/// `notify_one` / `notify_all` mint credits and wake parked threads.
#[derive(Default)]
pub struct Semaphore {
  state: Mutex<SemState>,
  available: Condvar,
}

impl Semaphore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Block until a credit is available, then consume it.
  pub fn wait(&self) {
    let mut state = self.state.lock().unwrap();
    // The while guards against spurious wakeups.
    while state.credits == 0 {
      state.waiters += 1;
      // The condvar releases the lock while parked and reacquires on wake.
      state = self.available.wait(state).unwrap();
      state.waiters -= 1;
    }
    state.credits -= 1;
  }

  /// Mint one credit and wake one parked thread, if any.
  pub fn notify_one(&self) {
    let mut state = self.state.lock().unwrap();
    state.credits += 1;
    self.available.notify_one();
  }

  /// Mint one credit per currently-parked thread and wake them all.
  ///
  /// Threads not parked at the time of the call receive nothing.
  pub fn notify_all(&self) {
    let mut state = self.state.lock().unwrap();
    state.credits += state.waiters;
    self.available.notify_all();
  }

  /// Number of threads currently parked in `wait`.
  ///
  /// Diagnostic only; the value can be stale the moment it is returned.
  pub fn waiting_threads(&self) -> u32 {
    self.state.lock().unwrap().waiters
  }
}

#[cfg(test)]
#[path = "semaphore_test.rs"]
mod semaphore_test;
