//! Deterministic function identity.
//!
//! [`FunctionHash`] identifies a function by its name and the ordered types of
//! its parameters. It is computed, not assigned, so the same declaration
//! always yields the same hash regardless of registration order.
//!
//! # Examples
//!
//! ```
//! use scriptbridge_core::{DataType, FunctionHash, ParamKind};
//!
//! let a = FunctionHash::from_signature("roll", &[ParamKind::Single(DataType::Long)]);
//! let b = FunctionHash::from_signature("roll", &[ParamKind::ListVarargs]);
//! assert_ne!(a, b);
//! assert_eq!(a, FunctionHash::from_signature("roll", &[ParamKind::Single(DataType::Long)]));
//! ```

use std::fmt;

use xxhash_rust::xxh64::xxh64;

use crate::ParamKind;

/// Domain mixing constants.
mod hash_constants {
    /// Separator mixed between parameters.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for function names.
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;

    /// Marker for the list consumer pseudo-type.
    pub const LIST_VARARGS: u64 = 0x7c3e9f2a5b8d1403;

    /// Marker for the dictionary consumer pseudo-type.
    pub const DICTIONARY_VARARGS: u64 = 0x5d8c7b4a3e9f2106;

    /// Base for per-position markers.
    pub const PARAM_BASE: u64 = 0x9e3779b97f4a7c15;
}

/// A 64-bit hash identifying a function signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FunctionHash(pub u64);

impl FunctionHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: FunctionHash = FunctionHash(0);

    /// Hash a function name alone.
    #[inline]
    pub fn from_name(name: &str) -> Self {
        FunctionHash(hash_constants::FUNCTION ^ xxh64(name.as_bytes(), 0))
    }

    /// Hash a function name with its ordered parameter kinds.
    ///
    /// Parameter order matters.
    #[inline]
    pub fn from_signature(name: &str, params: &[ParamKind]) -> Self {
        let mut hash = Self::from_name(name).0;
        for (i, param) in params.iter().enumerate() {
            let kind = match param {
                ParamKind::Single(ty) => u64::from(u8::from(*ty)),
                ParamKind::ListVarargs => hash_constants::LIST_VARARGS,
                ParamKind::DictionaryVarargs => hash_constants::DICTIONARY_VARARGS,
            };
            let marker = hash_constants::PARAM_BASE.wrapping_mul(i as u64 + 1);
            hash = hash.wrapping_mul(hash_constants::SEP).wrapping_add(marker ^ kind);
        }
        FunctionHash(hash)
    }

    /// Check if this is the empty hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FunctionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionHash({:#018x})", self.0)
    }
}

impl fmt::Display for FunctionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
