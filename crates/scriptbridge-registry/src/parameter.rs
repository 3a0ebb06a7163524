//! Parameters of a registered function.

use scriptbridge_core::{DataType, DataValue, ParamKind};

/// A single declared parameter.
///
/// A parameter that *consumes remaining* arguments is a variadic parameter:
/// with type `LIST` it absorbs extra positional arguments, with type
/// `DICTIONARY` it absorbs extra named arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    name: String,
    data_type: DataType,
    default_value: Option<DataValue>,
    consumes_remaining: bool,
}

impl FunctionParameter {
    /// Create a required parameter.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            default_value: None,
            consumes_remaining: false,
        }
    }

    /// Create a parameter that falls back to `default` when not supplied.
    pub fn with_default(name: impl Into<String>, data_type: DataType, default: DataValue) -> Self {
        Self {
            name: name.into(),
            data_type,
            default_value: Some(default),
            consumes_remaining: false,
        }
    }

    /// Create a parameter absorbing extra positional arguments.
    pub fn list_varargs(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::List,
            default_value: None,
            consumes_remaining: true,
        }
    }

    /// Create a parameter absorbing extra named arguments.
    pub fn dictionary_varargs(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DataType::Dictionary,
            default_value: None,
            consumes_remaining: true,
        }
    }

    /// Parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Default value, if any.
    pub fn default_value(&self) -> Option<&DataValue> {
        self.default_value.as_ref()
    }

    /// Whether a default value was declared.
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Whether this parameter absorbs remaining arguments.
    pub fn consumes_remaining(&self) -> bool {
        self.consumes_remaining
    }

    /// The declared kind, distinguishing the variadic pseudo-types.
    pub fn kind(&self) -> ParamKind {
        match (self.consumes_remaining, self.data_type) {
            (true, DataType::List) => ParamKind::ListVarargs,
            (true, DataType::Dictionary) => ParamKind::DictionaryVarargs,
            (_, ty) => ParamKind::Single(ty),
        }
    }

    /// Value a consumer parameter starts with when it absorbs nothing.
    pub fn empty_consumer_value(&self) -> Option<DataValue> {
        match self.kind() {
            ParamKind::ListVarargs => Some(DataValue::List(Vec::new())),
            ParamKind::DictionaryVarargs => Some(DataValue::Dictionary(Default::default())),
            ParamKind::Single(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_parameter() {
        let p = FunctionParameter::new("sides", DataType::Long);
        assert_eq!(p.name(), "sides");
        assert_eq!(p.data_type(), DataType::Long);
        assert!(!p.has_default());
        assert!(!p.consumes_remaining());
        assert_eq!(p.kind(), ParamKind::Single(DataType::Long));
        assert!(p.empty_consumer_value().is_none());
    }

    #[test]
    fn defaulted_parameter() {
        let p = FunctionParameter::with_default("num", DataType::Long, DataValue::Long(1));
        assert_eq!(p.default_value(), Some(&DataValue::Long(1)));
    }

    #[test]
    fn consumers() {
        let list = FunctionParameter::list_varargs("nums");
        assert_eq!(list.kind(), ParamKind::ListVarargs);
        assert_eq!(list.empty_consumer_value(), Some(DataValue::List(Vec::new())));

        let dict = FunctionParameter::dictionary_varargs("opts");
        assert_eq!(dict.kind(), ParamKind::DictionaryVarargs);
        assert_eq!(dict.data_type(), DataType::Dictionary);
    }
}
