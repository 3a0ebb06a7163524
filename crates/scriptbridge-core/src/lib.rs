//! Core types for the scriptbridge crates.
//!
//! This crate holds the vocabulary shared by the registry and the bridge:
//!
//! - [`DataType`], [`ParamKind`]: host type tags and parameter kinds
//! - [`PermissionLevel`]: who may invoke a function
//! - [`DataValue`], [`ResultData`]: host tagged values
//! - [`ScriptValue`], [`DetailedResult`], [`ScriptArgs`]: native script values
//! - [`FromScript`], [`IntoScript`]: typed access to script values
//! - [`FunctionHash`]: deterministic function identity
//! - [`BridgeConfig`]: marshalling and dispatch limits
//! - Error types for every phase, unified by [`BridgeError`]

mod coerce;
mod config;
mod convert;
mod data_type;
mod data_value;
pub mod error;
mod function_hash;
mod permission;
mod script_value;

pub use coerce::{parse_long, parse_number, truncate_to_long};
pub use config::{BridgeConfig, DEFAULT_BUILTIN_PREFIX};
pub use convert::{FromScript, IntoScript};
pub use data_type::{DataType, DICTIONARY_VARARGS, LIST_VARARGS, ParamKind};
pub use data_value::{DataValue, Dictionary, ResultData};
pub use error::{
    BridgeError, BridgeResult, ConfigurationError, ConversionError, DispatchError,
    RegistrationError, ScriptError,
};
pub use function_hash::FunctionHash;
pub use permission::PermissionLevel;
pub use script_value::{DetailedResult, DetailedResultBuilder, ScriptArgs, ScriptMap, ScriptValue};
