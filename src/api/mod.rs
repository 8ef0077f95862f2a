// SPDX-License-Identifier: MIT

//! Boundary to the EVShare REST backend.

pub mod auth;
pub mod client;
pub mod scope;

pub use auth::{LoginRequest, ProfileUpdate, TokenGrant};
pub use client::ApiClient;
pub use scope::ScreenScope;
