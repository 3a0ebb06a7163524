//! Conversion traits between Rust types and [`ScriptValue`].
//!
//! - [`FromScript`]: read a Rust value out of a [`ScriptValue`]
//! - [`IntoScript`]: turn a Rust value into a [`ScriptValue`]
//!
//! Script implementations use these through [`ScriptArgs::arg`] and the
//! [`DetailedResultBuilder`] setters.
//!
//! [`ScriptArgs::arg`]: crate::ScriptArgs::arg
//! [`DetailedResultBuilder`]: crate::DetailedResultBuilder
//!
//! ## Example
//!
//! ```
//! use scriptbridge_core::{FromScript, IntoScript, ScriptValue};
//!
//! let value = vec![1i64, 2, 3].into_script();
//! let back: Vec<f64> = Vec::from_script(&value).unwrap();
//! assert_eq!(back, vec![1.0, 2.0, 3.0]);
//! ```

use indexmap::IndexMap;

use crate::coerce::truncate_to_long;
use crate::error::ConversionError;
use crate::script_value::{DetailedResult, ScriptValue};
use crate::DataType;

/// Read a Rust value from a script value.
pub trait FromScript: Sized {
    /// Extract a value, or fail with a `ConversionError` on incompatible types.
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError>;
}

/// Convert a Rust value into a script value.
pub trait IntoScript {
    /// Convert this value.
    fn into_script(self) -> ScriptValue;
}

fn mismatch(expected: DataType, value: &ScriptValue) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_script_int {
    ($($ty:ty),*) => {
        $(
            impl FromScript for $ty {
                fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
                    match value {
                        ScriptValue::Int(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: *v,
                                target_type: stringify!($ty),
                            }
                        }),
                        // Scripts hand integral floats around freely
                        ScriptValue::Float(f) if f.fract() == 0.0 => {
                            let v = truncate_to_long(*f)?;
                            <$ty>::try_from(v).map_err(|_| ConversionError::IntegerOverflow {
                                value: v,
                                target_type: stringify!($ty),
                            })
                        }
                        _ => Err(mismatch(DataType::Long, value)),
                    }
                }
            }

            impl IntoScript for $ty {
                fn into_script(self) -> ScriptValue {
                    ScriptValue::Int(i64::from(self))
                }
            }
        )*
    };
}

impl_script_int!(i8, i16, i32, i64, u8, u16, u32);

// ============================================================================
// Float implementations
// ============================================================================

impl FromScript for f64 {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Float(v) => Ok(*v),
            ScriptValue::Int(v) => Ok(*v as f64),
            _ => Err(mismatch(DataType::Double, value)),
        }
    }
}

impl IntoScript for f64 {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Float(self)
    }
}

impl FromScript for f32 {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        f64::from_script(value).map(|v| v as f32)
    }
}

impl IntoScript for f32 {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Float(f64::from(self))
    }
}

// ============================================================================
// Scalar implementations
// ============================================================================

impl FromScript for bool {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Bool(b) => Ok(*b),
            _ => Err(mismatch(DataType::Boolean, value)),
        }
    }
}

impl IntoScript for bool {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Bool(self)
    }
}

impl FromScript for String {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::String(s) => Ok(s.clone()),
            _ => Err(mismatch(DataType::String, value)),
        }
    }
}

impl IntoScript for String {
    fn into_script(self) -> ScriptValue {
        ScriptValue::String(self)
    }
}

impl IntoScript for &str {
    fn into_script(self) -> ScriptValue {
        ScriptValue::String(self.to_string())
    }
}

impl IntoScript for () {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Undefined
    }
}

// ============================================================================
// Container implementations
// ============================================================================

impl<T: FromScript> FromScript for Vec<T> {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Array(values) => values.iter().map(T::from_script).collect(),
            _ => Err(mismatch(DataType::List, value)),
        }
    }
}

impl<T: IntoScript> IntoScript for Vec<T> {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Array(self.into_iter().map(IntoScript::into_script).collect())
    }
}

impl<T: FromScript> FromScript for IndexMap<String, T> {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Map(map) => map
                .iter()
                .map(|(k, v)| T::from_script(v).map(|v| (k.clone(), v)))
                .collect(),
            _ => Err(mismatch(DataType::Dictionary, value)),
        }
    }
}

impl<T: IntoScript> IntoScript for IndexMap<String, T> {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Map(self.into_iter().map(|(k, v)| (k, v.into_script())).collect())
    }
}

/// `null` and `undefined` read as `None`.
impl<T: FromScript> FromScript for Option<T> {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        if value.is_nullish() {
            Ok(None)
        } else {
            T::from_script(value).map(Some)
        }
    }
}

impl<T: IntoScript> IntoScript for Option<T> {
    fn into_script(self) -> ScriptValue {
        match self {
            Some(v) => v.into_script(),
            None => ScriptValue::Null,
        }
    }
}

impl FromScript for DetailedResult {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        match value {
            ScriptValue::Result(result) => Ok((**result).clone()),
            _ => Err(mismatch(DataType::Result, value)),
        }
    }
}

impl IntoScript for DetailedResult {
    fn into_script(self) -> ScriptValue {
        ScriptValue::Result(Box::new(self))
    }
}

impl FromScript for ScriptValue {
    fn from_script(value: &ScriptValue) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoScript for ScriptValue {
    fn into_script(self) -> ScriptValue {
        self
    }
}
