//! Permission levels gating who may invoke a function.

use std::fmt;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::ConfigurationError;

/// Access level of a caller, or the level a function requires.
///
/// Levels are ordered by access: `Observer < Player < Gm`. A function that
/// requires `Gm` is the most restrictive to invoke; one that requires
/// `Observer` can be called by anyone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PermissionLevel {
    /// Anyone, including observers.
    #[default]
    Observer = 0,
    /// Players and GMs.
    Player = 1,
    /// GMs only.
    Gm = 2,
}

impl PermissionLevel {
    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Observer => "OBSERVER",
            PermissionLevel::Player => "PLAYER",
            PermissionLevel::Gm => "GM",
        }
    }

    /// Whether a caller at this level may invoke something requiring `required`.
    #[inline]
    pub fn has_at_least(&self, required: PermissionLevel) -> bool {
        *self >= required
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GM" => Ok(PermissionLevel::Gm),
            "PLAYER" => Ok(PermissionLevel::Player),
            "OBSERVER" => Ok(PermissionLevel::Observer),
            _ => Err(ConfigurationError::UnknownPermission(s.to_string())),
        }
    }
}
