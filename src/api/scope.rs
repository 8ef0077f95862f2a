// SPDX-License-Identifier: MIT

//! Per-screen request cancellation.
//!
//! Each screen owns one scope for its mount lifetime and runs every request
//! through it. Aborting the scope on unmount guarantees a stale response
//! can never mutate state after navigation away.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use futures_util::future::{AbortHandle, Abortable, Aborted};

use crate::error::{AppError, Result};

/// Cancellation scope for the requests of one mounted screen.
#[derive(Debug, Default)]
pub struct ScreenScope {
    in_flight: DashMap<u64, AbortHandle>,
    next_id: AtomicU64,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a request future under this scope. An aborted request resolves
    /// to [`AppError::Cancelled`] instead of its payload.
    pub async fn run<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.in_flight.insert(id, handle);

        let outcome = Abortable::new(fut, registration).await;
        self.in_flight.remove(&id);

        match outcome {
            Ok(result) => result,
            Err(Aborted) => Err(AppError::Cancelled),
        }
    }

    /// Abort everything still in flight. Call on screen unmount.
    pub fn abort_all(&self) {
        self.in_flight.retain(|_, handle| {
            handle.abort();
            false
        });
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.abort_all();
    }
}
