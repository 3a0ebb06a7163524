//! Host to script conversion.

use scriptbridge_core::{DataValue, DetailedResult, Dictionary, ResultData, ScriptArgs, ScriptValue};
use tracing::debug;

/// Convert a host value into a script value.
///
/// Lists and dictionaries keep their order and keys; results become a
/// [`DetailedResult`] with every field converted. Strings and values of
/// unknown tags convert through their string form, so this never fails.
///
/// ```
/// use scriptbridge::marshal::convert_data_value;
/// use scriptbridge::{DataValue, ScriptValue};
///
/// let v = convert_data_value(&DataValue::list([DataValue::Long(1), DataValue::Double(0.5)]));
/// assert_eq!(v, ScriptValue::Array(vec![ScriptValue::Int(1), ScriptValue::Float(0.5)]));
/// ```
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert_data_value(value: &DataValue) -> ScriptValue {
    match value {
        DataValue::List(values) => ScriptValue::Array(values.iter().map(convert_data_value).collect()),
        DataValue::Dictionary(dict) => ScriptValue::Map(
            dict.iter()
                .map(|(k, v)| (k.clone(), convert_data_value(v)))
                .collect(),
        ),
        DataValue::Result(result) => ScriptValue::Result(Box::new(convert_result(result))),
        DataValue::Boolean(b) => ScriptValue::Bool(*b),
        DataValue::Null => ScriptValue::Null,
        DataValue::Long(v) => ScriptValue::Int(*v),
        DataValue::Double(v) => ScriptValue::Float(*v),
        DataValue::Opaque { tag, .. } => {
            debug!(%tag, "unknown host tag converted through its string form");
            ScriptValue::String(value.as_string())
        }
        DataValue::String(_) => ScriptValue::String(value.as_string()),
    }
}

fn convert_result(result: &ResultData) -> DetailedResult {
    DetailedResult::new(
        convert_data_value(result.value()),
        convert_data_value(result.detailed_result()),
        result.values().map(convert_data_value).collect(),
    )
}

/// Convert a name to value mapping into the argument object passed to a
/// script implementation. Entry order is kept.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert_args(args: &Dictionary) -> ScriptArgs {
    args.iter()
        .map(|(name, value)| (name.clone(), convert_data_value(value)))
        .collect()
}
