// SPDX-License-Identifier: MIT

//! Data models for the client core.

pub mod envelope;
pub mod principal;
pub mod role;

pub use envelope::ApiEnvelope;
pub use principal::{Principal, SessionProfile, SessionRecord};
pub use role::Role;
