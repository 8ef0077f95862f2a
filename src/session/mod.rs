// SPDX-License-Identifier: MIT

//! Session restoration: token claim decoding and the session store.

pub mod store;
pub mod token;

pub use store::SessionStore;
