//! Host tagged values.
//!
//! [`DataValue`] is the host application's value representation: a closed
//! union whose tag ([`DataType`]) decides which accessor is meaningful.
//! Typed accessors return `None` on a tag mismatch; [`DataValue::as_string`]
//! is total and is what unknown tags degrade to.

use std::fmt;

use indexmap::IndexMap;

use crate::DataType;

/// Ordered string-keyed mapping used for host dictionaries.
pub type Dictionary = IndexMap<String, DataValue>;

/// A host value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Integer value.
    Long(i64),
    /// Floating point value.
    Double(f64),
    /// Text value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// The null value.
    Null,
    /// Ordered sequence.
    List(Vec<DataValue>),
    /// Mapping from unique string keys to values.
    Dictionary(Dictionary),
    /// Composite result value.
    Result(Box<ResultData>),
    /// A host value whose tag the bridge does not know.
    ///
    /// It reports [`DataType::String`] and is only reachable through its
    /// string form.
    Opaque {
        /// The host's name for the tag.
        tag: String,
        /// The host's string rendering of the value.
        text: String,
    },
}

impl DataValue {
    /// Create a list value.
    pub fn list(values: impl IntoIterator<Item = DataValue>) -> Self {
        DataValue::List(values.into_iter().collect())
    }

    /// Create a dictionary value.
    pub fn dictionary<K: Into<String>>(entries: impl IntoIterator<Item = (K, DataValue)>) -> Self {
        DataValue::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create a result value.
    pub fn result(result: ResultData) -> Self {
        DataValue::Result(Box::new(result))
    }

    /// Create a value of an unknown host tag.
    pub fn opaque(tag: impl Into<String>, text: impl Into<String>) -> Self {
        DataValue::Opaque {
            tag: tag.into(),
            text: text.into(),
        }
    }

    /// The tag of this value.
    pub fn data_type(&self) -> DataType {
        match self {
            DataValue::Long(_) => DataType::Long,
            DataValue::Double(_) => DataType::Double,
            DataValue::String(_) | DataValue::Opaque { .. } => DataType::String,
            DataValue::Boolean(_) => DataType::Boolean,
            DataValue::Null => DataType::Null,
            DataValue::List(_) => DataType::List,
            DataValue::Dictionary(_) => DataType::Dictionary,
            DataValue::Result(_) => DataType::Result,
        }
    }

    /// Human-readable runtime type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::Long(_) => "long",
            DataValue::Double(_) => "double",
            DataValue::String(_) => "string",
            DataValue::Boolean(_) => "boolean",
            DataValue::Null => "null",
            DataValue::List(_) => "list",
            DataValue::Dictionary(_) => "dictionary",
            DataValue::Result(_) => "result",
            DataValue::Opaque { .. } => "opaque",
        }
    }

    /// Check if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// The list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[DataValue]> {
        match self {
            DataValue::List(values) => Some(values),
            _ => None,
        }
    }

    /// The entries, if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            DataValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// The result, if this is a result.
    pub fn as_result(&self) -> Option<&ResultData> {
        match self {
            DataValue::Result(result) => Some(result),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            DataValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is a long.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            DataValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The float, if this is a double.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DataValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// The string form of this value. Defined for every tag.
    pub fn as_string(&self) -> String {
        match self {
            DataValue::String(s) => s.clone(),
            DataValue::Opaque { text, .. } => text.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Long(v) => write!(f, "{v}"),
            DataValue::Double(v) => write!(f, "{v}"),
            DataValue::String(s) => f.write_str(s),
            DataValue::Boolean(b) => write!(f, "{b}"),
            DataValue::Null => f.write_str("null"),
            DataValue::List(values) => {
                f.write_str("[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("]")
            }
            DataValue::Dictionary(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            DataValue::Result(result) => write!(f, "{}", result.value),
            DataValue::Opaque { text, .. } => f.write_str(text),
        }
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        DataValue::Long(v)
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        DataValue::Double(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Boolean(v)
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        DataValue::String(v.to_string())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::String(v)
    }
}

impl From<Vec<DataValue>> for DataValue {
    fn from(v: Vec<DataValue>) -> Self {
        DataValue::List(v)
    }
}

impl From<Dictionary> for DataValue {
    fn from(v: Dictionary) -> Self {
        DataValue::Dictionary(v)
    }
}

impl From<ResultData> for DataValue {
    fn from(v: ResultData) -> Self {
        DataValue::result(v)
    }
}

/// The host's composite result value.
///
/// Pairs a computed value with a description of how it was derived and the
/// individual values that contributed to it, in contribution order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    value: DataValue,
    detailed_result: DataValue,
    values: Vec<DataValue>,
}

impl ResultData {
    /// Create a result with no details and no individual values.
    pub fn new(value: impl Into<DataValue>) -> Self {
        Self {
            value: value.into(),
            detailed_result: DataValue::Null,
            values: Vec::new(),
        }
    }

    /// Set the detailed result.
    pub fn with_detailed_result(mut self, detailed: impl Into<DataValue>) -> Self {
        self.detailed_result = detailed.into();
        self
    }

    /// Set the individual values.
    pub fn with_values(mut self, values: impl IntoIterator<Item = DataValue>) -> Self {
        self.values = values.into_iter().collect();
        self
    }

    /// The computed value.
    pub fn value(&self) -> &DataValue {
        &self.value
    }

    /// How the value was derived; `Null` when absent.
    pub fn detailed_result(&self) -> &DataValue {
        &self.detailed_result
    }

    /// The contributing values in contribution order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &DataValue> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_determines_type() {
        assert_eq!(DataValue::Long(1).data_type(), DataType::Long);
        assert_eq!(DataValue::Double(1.5).data_type(), DataType::Double);
        assert_eq!(DataValue::from("x").data_type(), DataType::String);
        assert_eq!(DataValue::Null.data_type(), DataType::Null);
        assert_eq!(DataValue::list([]).data_type(), DataType::List);
        assert_eq!(
            DataValue::result(ResultData::new(1i64)).data_type(),
            DataType::Result
        );
    }

    #[test]
    fn wrong_accessor_is_none() {
        let v = DataValue::Long(3);
        assert_eq!(v.as_long(), Some(3));
        assert_eq!(v.as_double(), None);
        assert_eq!(v.as_boolean(), None);
        assert!(v.as_list().is_none());
        assert!(v.as_dictionary().is_none());
        assert!(v.as_result().is_none());
    }

    #[test]
    fn opaque_reads_as_string() {
        let v = DataValue::opaque("TOKEN", "Hero");
        assert_eq!(v.data_type(), DataType::String);
        assert_eq!(v.type_name(), "opaque");
        assert_eq!(v.as_string(), "Hero");
    }

    #[test]
    fn display_nested() {
        let v = DataValue::dictionary([
            ("a", DataValue::Long(1)),
            ("b", DataValue::list([DataValue::from("x"), DataValue::Boolean(true)])),
        ]);
        assert_eq!(v.as_string(), "{a: 1, b: [x, true]}");
    }

    #[test]
    fn dictionary_keeps_insertion_order() {
        let v = DataValue::dictionary([("z", DataValue::Null), ("a", DataValue::Null)]);
        let keys: Vec<_> = v.as_dictionary().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn result_accessors() {
        let result = ResultData::new(7i64)
            .with_detailed_result("3 + 4")
            .with_values([DataValue::Long(3), DataValue::Long(4)]);

        assert_eq!(result.value(), &DataValue::Long(7));
        assert_eq!(result.detailed_result(), &DataValue::from("3 + 4"));
        assert_eq!(result.values().len(), 2);
        assert_eq!(DataValue::result(result).as_string(), "7");
    }

    #[test]
    fn result_without_details_is_null() {
        let result = ResultData::new(1i64);
        assert!(result.detailed_result().is_null());
        assert_eq!(result.values().len(), 0);
    }
}
