// SPDX-License-Identifier: MIT

//! The canonical role table.
//!
//! Every role-name-to-id conversion in the crate goes through this one
//! table. The backend is the sole source of role assignment; this side only
//! maps what the token carries.

use serde::{Deserialize, Serialize};

/// Principal role. The discriminants are the wire-level role ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    Admin = 1,
    Staff = 2,
    CoOwner = 3,
    Technician = 4,
}

impl Role {
    /// Map a token role claim to a role. Case-sensitive exact match;
    /// unrecognized names fall back to the lowest-privilege role rather
    /// than failing.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Admin" => Role::Admin,
            "Staff" => Role::Staff,
            "CoOwner" => Role::CoOwner,
            "Technician" => Role::Technician,
            _ => Role::CoOwner,
        }
    }

    /// Map a wire-level role id to a role. Unknown ids fall back to
    /// `CoOwner`, mirroring [`Role::from_name`].
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Role::Admin,
            2 => Role::Staff,
            3 => Role::CoOwner,
            4 => Role::Technician,
            _ => Role::CoOwner,
        }
    }

    /// Wire-level role id.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Display name, identical to the token claim spelling.
    pub fn name(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::CoOwner => "CoOwner",
            Role::Technician => "Technician",
        }
    }

    /// Route prefixes this role may access. Static privilege map, loaded
    /// once at compile time and never mutated.
    pub fn allowed_prefixes(self) -> &'static [&'static str] {
        match self {
            Role::Admin => &["/admin"],
            Role::Staff => &["/staff"],
            Role::CoOwner => &["/dashboard", "/vehicles", "/groups", "/service-requests"],
            Role::Technician => &["/technician"],
        }
    }

    /// Whether this role may access the given route path.
    pub fn may_access(self, path: &str) -> bool {
        self.allowed_prefixes().iter().any(|p| path.starts_with(p))
    }
}
