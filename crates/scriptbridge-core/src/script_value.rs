//! Native scripting values.
//!
//! [`ScriptValue`] is what a script implementation sees and returns. It is the
//! counterpart of the host's [`DataValue`](crate::DataValue): a closed union
//! with one variant per runtime type of the scripting environment.
//!
//! [`DetailedResult`] is the native form of a host result, and [`ScriptArgs`]
//! is the single argument object an implementation receives.

use std::fmt;

use indexmap::IndexMap;

use crate::convert::{FromScript, IntoScript};
use crate::error::ScriptError;

/// Ordered string-keyed mapping used for native objects.
pub type ScriptMap = IndexMap<String, ScriptValue>;

/// A value in the scripting environment.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// Absent value (a function that returned nothing).
    Undefined,
    /// The null value.
    Null,
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Text value.
    String(String),
    /// Ordered sequence.
    Array(Vec<ScriptValue>),
    /// Plain object with string keys.
    Map(ScriptMap),
    /// A result object.
    Result(Box<DetailedResult>),
}

impl ScriptValue {
    /// Get a human-readable name for this value's runtime type.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Undefined => "undefined",
            ScriptValue::Null => "null",
            ScriptValue::Int(_) => "int",
            ScriptValue::Float(_) => "float",
            ScriptValue::Bool(_) => "bool",
            ScriptValue::String(_) => "string",
            ScriptValue::Array(_) => "array",
            ScriptValue::Map(_) => "map",
            ScriptValue::Result(_) => "result",
        }
    }

    /// Check if this is null or undefined.
    pub fn is_nullish(&self) -> bool {
        matches!(self, ScriptValue::Null | ScriptValue::Undefined)
    }

    /// Create an array from anything convertible.
    pub fn array<T: IntoScript>(values: impl IntoIterator<Item = T>) -> Self {
        ScriptValue::Array(values.into_iter().map(IntoScript::into_script).collect())
    }

    /// Create an object from key/value pairs.
    pub fn map<K: Into<String>, T: IntoScript>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        ScriptValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_script()))
                .collect(),
        )
    }

    /// Look up a property of an object or a result.
    ///
    /// Results expose `value`, `details` and `individual`.
    pub fn property(&self, name: &str) -> Option<ScriptValue> {
        match self {
            ScriptValue::Map(map) => map.get(name).cloned(),
            ScriptValue::Result(result) => result.property(name),
            _ => None,
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Undefined => f.write_str("undefined"),
            ScriptValue::Null => f.write_str("null"),
            ScriptValue::Int(v) => write!(f, "{v}"),
            ScriptValue::Float(v) => write!(f, "{v}"),
            ScriptValue::Bool(v) => write!(f, "{v}"),
            ScriptValue::String(s) => f.write_str(s),
            ScriptValue::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                Ok(())
            }
            ScriptValue::Map(_) => f.write_str("[object Object]"),
            ScriptValue::Result(result) => match &result.value {
                Some(value) => write!(f, "{value}"),
                None => f.write_str("undefined"),
            },
        }
    }
}

/// A composite value: a computed value, how it was derived, and the values
/// that contributed to it.
///
/// Immutable once built; use [`DetailedResult::builder`] to make one.
///
/// ```
/// use scriptbridge_core::{DetailedResult, ScriptValue};
///
/// let result = DetailedResult::builder()
///     .set_value(7i64)
///     .set_details("3 + 4")
///     .set_individual_values([3i64, 4])
///     .build();
///
/// assert_eq!(result.value(), Some(&ScriptValue::Int(7)));
/// assert_eq!(result.individual_values().map(|v| v.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedResult {
    value: Option<ScriptValue>,
    details: Option<ScriptValue>,
    individual: Option<Vec<ScriptValue>>,
}

impl DetailedResult {
    /// Create a result with all fields set.
    pub fn new(value: ScriptValue, details: ScriptValue, individual: Vec<ScriptValue>) -> Self {
        Self {
            value: Some(value),
            details: Some(details),
            individual: Some(individual),
        }
    }

    /// Start building a result.
    pub fn builder() -> DetailedResultBuilder {
        DetailedResultBuilder::default()
    }

    /// The computed value.
    pub fn value(&self) -> Option<&ScriptValue> {
        self.value.as_ref()
    }

    /// How the value was derived.
    pub fn details(&self) -> Option<&ScriptValue> {
        self.details.as_ref()
    }

    /// The contributing values, in contribution order.
    pub fn individual_values(&self) -> Option<&[ScriptValue]> {
        self.individual.as_deref()
    }

    /// Look up a field by its script-visible name.
    pub fn property(&self, name: &str) -> Option<ScriptValue> {
        match name {
            "value" => self.value.clone(),
            "details" => self.details.clone(),
            "individual" => self.individual.clone().map(ScriptValue::Array),
            _ => None,
        }
    }
}

/// Builder for [`DetailedResult`].
#[derive(Debug, Clone, Default)]
pub struct DetailedResultBuilder {
    inner: DetailedResult,
}

impl DetailedResultBuilder {
    /// Set the computed value.
    pub fn set_value(mut self, value: impl IntoScript) -> Self {
        self.inner.value = Some(value.into_script());
        self
    }

    /// Set how the value was derived.
    pub fn set_details(mut self, details: impl IntoScript) -> Self {
        self.inner.details = Some(details.into_script());
        self
    }

    /// Set the contributing values.
    pub fn set_individual_values<T: IntoScript>(mut self, values: impl IntoIterator<Item = T>) -> Self {
        self.inner.individual = Some(values.into_iter().map(IntoScript::into_script).collect());
        self
    }

    /// Finish the result.
    pub fn build(self) -> DetailedResult {
        self.inner
    }
}

/// The single argument object passed to a script implementation.
///
/// Maps each declared parameter name to its value, in declaration order.
/// A variadic parameter maps to an array (positional) or a map (named).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptArgs {
    values: ScriptMap,
}

impl ScriptArgs {
    /// Create an empty argument object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an argument, replacing any previous value under that name.
    pub fn insert(&mut self, name: impl Into<String>, value: ScriptValue) {
        self.values.insert(name.into(), value);
    }

    /// Get an argument by name.
    pub fn get(&self, name: &str) -> Option<&ScriptValue> {
        self.values.get(name)
    }

    /// Get a typed argument by name.
    ///
    /// ```ignore
    /// let nums: Vec<f64> = args.arg("nums")?;
    /// let sides: i64 = args.arg("sides")?;
    /// ```
    pub fn arg<T: FromScript>(&self, name: &str) -> Result<T, ScriptError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ScriptError::MissingArgument(name.to_string()))?;
        T::from_script(value).map_err(ScriptError::Conversion)
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScriptValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// View the arguments as a native object.
    pub fn into_value(self) -> ScriptValue {
        ScriptValue::Map(self.values)
    }
}

impl FromIterator<(String, ScriptValue)> for ScriptArgs {
    fn from_iter<I: IntoIterator<Item = (String, ScriptValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
