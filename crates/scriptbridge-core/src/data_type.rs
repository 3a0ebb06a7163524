//! Host data type tags.
//!
//! [`DataType`] is the closed set of tags a host value can carry. [`ParamKind`]
//! extends it with the two registration-only pseudo-types (`LIST*` and
//! `DICTIONARY*`) that declare a variadic parameter.
//!
//! Type names arrive from scripts as strings, so both types parse
//! case-insensitively and accept the historic aliases (`INT`, `FLOAT`, `DICT`).
//!
//! # Example
//!
//! ```
//! use scriptbridge_core::{DataType, ParamKind};
//!
//! let long: DataType = "int".parse().unwrap();
//! assert_eq!(long, DataType::Long);
//!
//! let kind: ParamKind = "List*".parse().unwrap();
//! assert_eq!(kind.base_type(), DataType::List);
//! assert!(kind.is_varargs());
//! ```

use std::fmt;
use std::str::FromStr;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::ConfigurationError;

/// Name of the list varargs pseudo-type.
pub const LIST_VARARGS: &str = "List*";

/// Name of the dictionary varargs pseudo-type.
pub const DICTIONARY_VARARGS: &str = "Dictionary*";

/// Tag of a host value.
///
/// The numeric encoding is stable and matches the host's ordinal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum DataType {
    /// 64-bit signed integer. Alias `INT`.
    Long = 0,
    /// 64-bit float. Alias `FLOAT`.
    Double = 1,
    /// Text.
    String = 2,
    /// Ordered sequence of values.
    List = 3,
    /// String-keyed mapping of values. Alias `DICT`.
    Dictionary = 4,
    /// Boolean.
    Boolean = 5,
    /// Composite value with details and individual contributions.
    Result = 6,
    /// The null value.
    Null = 7,
}

impl DataType {
    /// All tags in ordinal order.
    pub const ALL: [DataType; 8] = [
        DataType::Long,
        DataType::Double,
        DataType::String,
        DataType::List,
        DataType::Dictionary,
        DataType::Boolean,
        DataType::Result,
        DataType::Null,
    ];

    /// Canonical upper-case name, as the host prints it.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Long => "LONG",
            DataType::Double => "DOUBLE",
            DataType::String => "STRING",
            DataType::List => "LIST",
            DataType::Dictionary => "DICTIONARY",
            DataType::Boolean => "BOOLEAN",
            DataType::Result => "RESULT",
            DataType::Null => "NULL",
        }
    }

    /// Whether values of this type contain other values.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            DataType::List | DataType::Dictionary | DataType::Result
        )
    }

    /// Whether this is one of the two numeric types.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Long | DataType::Double)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::EmptyType);
        }

        match trimmed.to_ascii_uppercase().as_str() {
            "LONG" | "INT" => Ok(DataType::Long),
            "DOUBLE" | "FLOAT" => Ok(DataType::Double),
            "STRING" => Ok(DataType::String),
            "LIST" => Ok(DataType::List),
            "DICTIONARY" | "DICT" => Ok(DataType::Dictionary),
            "BOOLEAN" => Ok(DataType::Boolean),
            "RESULT" => Ok(DataType::Result),
            "NULL" => Ok(DataType::Null),
            _ => Err(ConfigurationError::UnknownType(trimmed.to_string())),
        }
    }
}

/// A declared parameter type: a plain [`DataType`] or a varargs pseudo-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// A single argument of the given type.
    Single(DataType),
    /// Absorbs any remaining positional arguments as a list.
    ListVarargs,
    /// Absorbs any remaining named arguments as a dictionary.
    DictionaryVarargs,
}

impl ParamKind {
    /// The type the parameter has once normalized.
    pub fn base_type(&self) -> DataType {
        match self {
            ParamKind::Single(ty) => *ty,
            ParamKind::ListVarargs => DataType::List,
            ParamKind::DictionaryVarargs => DataType::Dictionary,
        }
    }

    /// Whether this declares a variadic parameter.
    pub fn is_varargs(&self) -> bool {
        !matches!(self, ParamKind::Single(_))
    }
}

impl From<DataType> for ParamKind {
    fn from(ty: DataType) -> Self {
        ParamKind::Single(ty)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Single(ty) => write!(f, "{ty}"),
            ParamKind::ListVarargs => f.write_str(LIST_VARARGS),
            ParamKind::DictionaryVarargs => f.write_str(DICTIONARY_VARARGS),
        }
    }
}

impl FromStr for ParamKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_suffix('*') {
            Some(base) => match base.parse::<DataType>() {
                Ok(DataType::List) => Ok(ParamKind::ListVarargs),
                Ok(DataType::Dictionary) => Ok(ParamKind::DictionaryVarargs),
                Ok(_) | Err(ConfigurationError::EmptyType) => {
                    Err(ConfigurationError::UnknownType(trimmed.to_string()))
                }
                Err(err) => Err(err),
            },
            None => trimmed.parse().map(ParamKind::Single),
        }
    }
}
