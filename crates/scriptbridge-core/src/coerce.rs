//! Host-side coercion of values to a declared [`DataType`].
//!
//! The dispatcher runs every bound argument through [`DataType::coerce`]
//! before marshalling, and native built-in return values through it after
//! invocation.

use crate::data_value::{DataValue, ResultData};
use crate::error::ConversionError;
use crate::DataType;

impl DataType {
    /// Coerce `value` so that it carries this tag.
    ///
    /// | target       | accepts                                               |
    /// |--------------|-------------------------------------------------------|
    /// | `LONG`       | numbers (truncated), numeric strings, booleans (0/1)  |
    /// | `DOUBLE`     | numbers, numeric strings, booleans (0.0/1.0)          |
    /// | `STRING`     | any scalar, rendered                                  |
    /// | `BOOLEAN`    | booleans, numbers (non-zero), `"true"` / `"false"`    |
    /// | `LIST`       | lists; anything else becomes a one-element list       |
    /// | `DICTIONARY` | dictionaries only                                     |
    /// | `RESULT`     | results; anything else becomes the result's value     |
    /// | `NULL`       | anything, producing null                              |
    ///
    /// A result coerced to a scalar type is coerced through its value.
    ///
    /// ```
    /// use scriptbridge_core::{DataType, DataValue};
    ///
    /// let v = DataType::Long.coerce(DataValue::from("42")).unwrap();
    /// assert_eq!(v, DataValue::Long(42));
    /// ```
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn coerce(&self, value: DataValue) -> Result<DataValue, ConversionError> {
        if value.data_type() == *self && !matches!(value, DataValue::Opaque { .. }) {
            return Ok(value);
        }

        match self {
            DataType::Long => coerce_long(value),
            DataType::Double => coerce_double(value),
            DataType::String => coerce_string(value),
            DataType::Boolean => coerce_boolean(value),
            DataType::List => Ok(DataValue::List(vec![value])),
            DataType::Dictionary => Err(mismatch(DataType::Dictionary, &value)),
            DataType::Result => Ok(DataValue::result(ResultData::new(value))),
            DataType::Null => Ok(DataValue::Null),
        }
    }
}

fn mismatch(expected: DataType, value: &DataValue) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

/// Exclusive bound on the magnitude of a float that truncates into a `LONG`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Truncate a float toward zero.
///
/// Rejects NaN, infinities, and values whose integral part does not fit an
/// `i64`.
///
/// ```
/// use scriptbridge_core::{ConversionError, truncate_to_long};
///
/// assert_eq!(truncate_to_long(-2.7), Ok(-2));
/// assert_eq!(truncate_to_long(1e300), Err(ConversionError::OutOfRange { value: 1e300 }));
/// ```
pub fn truncate_to_long(value: f64) -> Result<i64, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFinite { value });
    }
    let whole = value.trunc();
    if (-I64_BOUND..I64_BOUND).contains(&whole) {
        Ok(whole as i64)
    } else {
        Err(ConversionError::OutOfRange { value })
    }
}

/// Parse a numeric string as the given numeric type.
pub fn parse_number(text: &str, target: DataType) -> Result<f64, ConversionError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ConversionError::NotNumeric {
            value: text.to_string(),
            target,
        })
}

fn coerce_long(value: DataValue) -> Result<DataValue, ConversionError> {
    match value {
        DataValue::Double(v) => truncate_to_long(v).map(DataValue::Long),
        DataValue::Boolean(b) => Ok(DataValue::Long(i64::from(b))),
        DataValue::String(ref s) | DataValue::Opaque { text: ref s, .. } => parse_long(s).map(DataValue::Long),
        DataValue::Result(result) => coerce_long(result.value().clone()),
        other => Err(mismatch(DataType::Long, &other)),
    }
}

fn coerce_double(value: DataValue) -> Result<DataValue, ConversionError> {
    match value {
        DataValue::Long(v) => Ok(DataValue::Double(v as f64)),
        DataValue::Boolean(b) => Ok(DataValue::Double(if b { 1.0 } else { 0.0 })),
        DataValue::String(ref s) | DataValue::Opaque { text: ref s, .. } => {
            parse_number(s, DataType::Double).map(DataValue::Double)
        }
        DataValue::Result(result) => coerce_double(result.value().clone()),
        other => Err(mismatch(DataType::Double, &other)),
    }
}

fn coerce_string(value: DataValue) -> Result<DataValue, ConversionError> {
    match value {
        DataValue::List(_) | DataValue::Dictionary(_) => Err(mismatch(DataType::String, &value)),
        DataValue::Result(result) => coerce_string(result.value().clone()),
        other => Ok(DataValue::String(other.as_string())),
    }
}

fn coerce_boolean(value: DataValue) -> Result<DataValue, ConversionError> {
    match value {
        DataValue::Long(v) => Ok(DataValue::Boolean(v != 0)),
        DataValue::Double(v) => Ok(DataValue::Boolean(v != 0.0 && !v.is_nan())),
        DataValue::String(ref s) | DataValue::Opaque { text: ref s, .. } => {
            match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(DataValue::Boolean(true)),
                "false" => Ok(DataValue::Boolean(false)),
                _ => Err(mismatch(DataType::Boolean, &value)),
            }
        }
        DataValue::Result(result) => coerce_boolean(result.value().clone()),
        other => Err(mismatch(DataType::Boolean, &other)),
    }
}
