//! Script to host conversion.

use scriptbridge_core::{
    BridgeConfig, ConversionError, DataType, DataValue, DetailedResult, Dictionary, ResultData,
    ScriptMap, ScriptValue, parse_long, parse_number, truncate_to_long,
};
use tracing::warn;

/// Converts script values back into host values.
///
/// Carries the limits from [`BridgeConfig`] that apply to reverse conversion.
#[derive(Debug, Clone, Copy)]
pub struct Marshaller {
    max_depth: usize,
    integral_doubles_as_long: bool,
}

impl Default for Marshaller {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

impl Marshaller {
    /// Create a marshaller using the limits in `config`.
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            integral_doubles_as_long: config.integral_doubles_as_long,
        }
    }

    /// Convert `value` into a host value tagged `return_type`.
    ///
    /// Fails when the value's runtime type cannot be represented under
    /// `return_type`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn convert_to_data_value(
        &self,
        value: &ScriptValue,
        return_type: DataType,
    ) -> Result<DataValue, ConversionError> {
        self.typed(value, return_type, 0)
    }

    /// Convert `value` into the closest host value, without a declared type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn convert_to_data_value_untyped(&self, value: &ScriptValue) -> Result<DataValue, ConversionError> {
        self.untyped(value, 0)
    }

    fn enter(&self, depth: usize) -> Result<usize, ConversionError> {
        let next = depth + 1;
        if next > self.max_depth {
            Err(ConversionError::DepthExceeded {
                max_depth: self.max_depth,
            })
        } else {
            Ok(next)
        }
    }

    fn typed(&self, value: &ScriptValue, ty: DataType, depth: usize) -> Result<DataValue, ConversionError> {
        // A result stands in for its value under every scalar type
        if let ScriptValue::Result(result) = value {
            if !ty.is_container() && ty != DataType::Null {
                let inner = result.value().unwrap_or(&ScriptValue::Undefined);
                return self.typed(inner, ty, depth);
            }
        }

        match ty {
            DataType::Long => to_long(value).map(DataValue::Long),
            DataType::Double => to_double(value).map(DataValue::Double),
            DataType::String => to_string(value).map(DataValue::String),
            DataType::Boolean => to_boolean(value).map(DataValue::Boolean),
            DataType::List => self.to_list(value, depth),
            DataType::Dictionary => match value {
                ScriptValue::Map(map) => self.dictionary(map, depth),
                other => Err(mismatch(DataType::Dictionary, other)),
            },
            DataType::Result => self.to_result(value, depth),
            DataType::Null => Ok(DataValue::Null),
        }
    }

    fn untyped(&self, value: &ScriptValue, depth: usize) -> Result<DataValue, ConversionError> {
        match value {
            ScriptValue::Undefined | ScriptValue::Null => Ok(DataValue::Null),
            ScriptValue::Int(v) => Ok(DataValue::Long(*v)),
            ScriptValue::Float(v) => Ok(self.float(*v)),
            ScriptValue::Bool(b) => Ok(DataValue::Boolean(*b)),
            ScriptValue::String(s) => Ok(DataValue::String(s.clone())),
            ScriptValue::Array(values) => self.list(values, depth),
            ScriptValue::Map(map) => self.dictionary(map, depth),
            ScriptValue::Result(result) => self.result(result, depth),
        }
    }

    fn float(&self, v: f64) -> DataValue {
        if self.integral_doubles_as_long && v.fract() == 0.0 {
            if let Ok(long) = truncate_to_long(v) {
                return DataValue::Long(long);
            }
        }
        DataValue::Double(v)
    }

    fn to_list(&self, value: &ScriptValue, depth: usize) -> Result<DataValue, ConversionError> {
        match value {
            ScriptValue::Array(values) => self.list(values, depth),
            other => {
                let inner = self.enter(depth)?;
                Ok(DataValue::List(vec![self.untyped(other, inner)?]))
            }
        }
    }

    fn list(&self, values: &[ScriptValue], depth: usize) -> Result<DataValue, ConversionError> {
        let inner = self.enter(depth)?;
        values
            .iter()
            .map(|v| self.untyped(v, inner))
            .collect::<Result<Vec<_>, _>>()
            .map(DataValue::List)
    }

    fn dictionary(&self, map: &ScriptMap, depth: usize) -> Result<DataValue, ConversionError> {
        let inner = self.enter(depth)?;
        map.iter()
            .map(|(k, v)| self.untyped(v, inner).map(|v| (k.clone(), v)))
            .collect::<Result<Dictionary, _>>()
            .map(DataValue::Dictionary)
    }

    fn to_result(&self, value: &ScriptValue, depth: usize) -> Result<DataValue, ConversionError> {
        match value {
            ScriptValue::Result(result) => self.result(result, depth),
            ScriptValue::Map(map) => {
                let value = map.get("value").ok_or(ConversionError::MissingResultValue)?;
                let individual = match map.get("individual") {
                    None => None,
                    Some(ScriptValue::Array(values)) => Some(values.as_slice()),
                    Some(other) => {
                        return Err(ConversionError::InvalidResultField {
                            field: "individual",
                            actual: other.type_name(),
                        });
                    }
                };
                self.result_from_parts(Some(value), map.get("details"), individual, depth)
            }
            other => Err(mismatch(DataType::Result, other)),
        }
    }

    fn result(&self, result: &DetailedResult, depth: usize) -> Result<DataValue, ConversionError> {
        self.result_from_parts(result.value(), result.details(), result.individual_values(), depth)
    }

    fn result_from_parts(
        &self,
        value: Option<&ScriptValue>,
        details: Option<&ScriptValue>,
        individual: Option<&[ScriptValue]>,
        depth: usize,
    ) -> Result<DataValue, ConversionError> {
        let inner = self.enter(depth)?;
        let value = match value {
            Some(v) => self.untyped(v, inner)?,
            None => DataValue::Null,
        };
        let details = match details {
            Some(v) => self.untyped(v, inner)?,
            None => DataValue::Null,
        };
        let values = individual
            .unwrap_or_default()
            .iter()
            .map(|v| self.untyped(v, inner))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataValue::result(
            ResultData::new(value)
                .with_detailed_result(details)
                .with_values(values),
        ))
    }
}

fn mismatch(expected: DataType, value: &ScriptValue) -> ConversionError {
    ConversionError::TypeMismatch {
        expected,
        actual: value.type_name(),
    }
}

fn to_long(value: &ScriptValue) -> Result<i64, ConversionError> {
    match value {
        ScriptValue::Int(v) => Ok(*v),
        ScriptValue::Float(v) => truncate_to_long(*v),
        ScriptValue::Bool(b) => Ok(i64::from(*b)),
        ScriptValue::String(s) => parse_long(s),
        other => Err(mismatch(DataType::Long, other)),
    }
}

fn to_double(value: &ScriptValue) -> Result<f64, ConversionError> {
    match value {
        ScriptValue::Int(v) => Ok(*v as f64),
        ScriptValue::Float(v) => Ok(*v),
        ScriptValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        ScriptValue::String(s) => parse_number(s, DataType::Double),
        other => Err(mismatch(DataType::Double, other)),
    }
}

fn to_string(value: &ScriptValue) -> Result<String, ConversionError> {
    match value {
        ScriptValue::Array(_) | ScriptValue::Map(_) => Err(mismatch(DataType::String, value)),
        ScriptValue::Undefined => {
            warn!("undefined converted to STRING");
            Ok(value.to_string())
        }
        other => Ok(other.to_string()),
    }
}

fn to_boolean(value: &ScriptValue) -> Result<bool, ConversionError> {
    match value {
        ScriptValue::Bool(b) => Ok(*b),
        ScriptValue::Int(v) => Ok(*v != 0),
        ScriptValue::Float(v) => Ok(*v != 0.0 && !v.is_nan()),
        ScriptValue::String(s) => Ok(!s.is_empty()),
        ScriptValue::Null | ScriptValue::Undefined => Ok(false),
        other => Err(mismatch(DataType::Boolean, other)),
    }
}

/// Convert `value` into a host value tagged `return_type`, with default limits.
///
/// ```
/// use scriptbridge::marshal::convert_to_data_value;
/// use scriptbridge::{DataType, DataValue, ScriptValue};
///
/// let v = convert_to_data_value(&ScriptValue::Float(10.0), DataType::Double).unwrap();
/// assert_eq!(v, DataValue::Double(10.0));
/// assert!(convert_to_data_value(&ScriptValue::array([1i64]), DataType::String).is_err());
/// ```
pub fn convert_to_data_value(value: &ScriptValue, return_type: DataType) -> Result<DataValue, ConversionError> {
    Marshaller::default().convert_to_data_value(value, return_type)
}

/// Convert `value` into the closest host value, with default limits.
pub fn convert_to_data_value_untyped(value: &ScriptValue) -> Result<DataValue, ConversionError> {
    Marshaller::default().convert_to_data_value_untyped(value)
}
