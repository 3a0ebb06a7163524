//! The exported function builder.

use scriptbridge_core::{
    ConfigurationError, DataType, DataValue, ParamKind, PermissionLevel, RegistrationError,
    ScriptValue,
};
use tracing::{debug, warn};

use super::{ExportSink, ExportedDescriptor};
use crate::marshal::Marshaller;

/// A declared parameter of an exported function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Declared type; variadic pseudo-types are stored as their base type.
    pub param_type: DataType,
    /// Whether this parameter absorbs a variable number of arguments.
    pub vararg_flag: bool,
    /// Value used when the caller omits this argument.
    pub default_val: Option<DataValue>,
}

impl ParameterSpec {
    /// The declared kind, distinguishing the variadic pseudo-types.
    pub fn kind(&self) -> ParamKind {
        match (self.vararg_flag, self.param_type) {
            (true, DataType::List) => ParamKind::ListVarargs,
            (true, DataType::Dictionary) => ParamKind::DictionaryVarargs,
            (_, ty) => ParamKind::Single(ty),
        }
    }
}

/// Builder a script uses to declare a function for the host.
///
/// Every call validates immediately and fails with a [`ConfigurationError`];
/// nothing is deferred to [`export`](Self::export).
///
/// ```
/// use scriptbridge::export::{ExportCollector, ExportedFunction};
/// use scriptbridge::ScriptValue;
///
/// let mut sink = ExportCollector::new();
/// let mut f = ExportedFunction::new("rollSomeDice", "RESULT", "doRollSomeDice", None).unwrap();
/// f.add_parameter("num", "LONG", Some(ScriptValue::Int(1))).unwrap();
/// f.add_parameter("sides", "LONG", None).unwrap();
/// f.export(&mut sink).unwrap();
///
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFunction {
    name: String,
    return_type: DataType,
    js_function_name: String,
    permission: Option<PermissionLevel>,
    parameter_list: Vec<ParameterSpec>,
    has_varargs: bool,
}

impl ExportedFunction {
    /// Start declaring a function.
    ///
    /// `return_type` and `permission` are type and permission names, matched
    /// case-insensitively. Without a permission the function is callable by
    /// anyone.
    pub fn new(
        name: &str,
        return_type: &str,
        js_function_name: &str,
        permission: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        if return_type.trim().is_empty() {
            Self::check_names(name, js_function_name)?;
            return Err(ConfigurationError::EmptyReturnType);
        }
        let return_type = return_type.parse::<DataType>()?;
        let permission = permission.map(str::parse::<PermissionLevel>).transpose()?;
        Self::with_types(name, return_type, js_function_name, permission)
    }

    /// Start declaring a function from already-parsed types.
    pub fn with_types(
        name: &str,
        return_type: DataType,
        js_function_name: &str,
        permission: Option<PermissionLevel>,
    ) -> Result<Self, ConfigurationError> {
        Self::check_names(name, js_function_name)?;
        Ok(Self {
            name: name.to_string(),
            return_type,
            js_function_name: js_function_name.to_string(),
            permission,
            parameter_list: Vec::new(),
            has_varargs: false,
        })
    }

    fn check_names(name: &str, js_function_name: &str) -> Result<(), ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyFunctionName);
        }
        if js_function_name.is_empty() {
            return Err(ConfigurationError::EmptyScriptFunctionName);
        }
        Ok(())
    }

    /// Append a parameter.
    ///
    /// `param_type` may be `List*` or `Dictionary*` to declare the variadic
    /// parameter, which must come last. `default_val` is converted to the
    /// parameter type now; defaults on variadic parameters are ignored.
    pub fn add_parameter(
        &mut self,
        name: &str,
        param_type: &str,
        default_val: Option<ScriptValue>,
    ) -> Result<(), ConfigurationError> {
        self.check_not_after_varargs(name)?;
        if param_type.trim().is_empty() {
            if name.is_empty() {
                return Err(ConfigurationError::EmptyParameterName);
            }
            return Err(ConfigurationError::EmptyParameterType);
        }
        let kind = param_type.parse::<ParamKind>()?;
        self.add_typed_parameter(name, kind, default_val)
    }

    /// Append a parameter of an already-parsed kind.
    pub fn add_typed_parameter(
        &mut self,
        name: &str,
        kind: ParamKind,
        default_val: Option<ScriptValue>,
    ) -> Result<(), ConfigurationError> {
        self.check_not_after_varargs(name)?;
        if name.is_empty() {
            return Err(ConfigurationError::EmptyParameterName);
        }
        if self.parameter_list.iter().any(|p| p.name == name) {
            return Err(ConfigurationError::DuplicateParameter {
                function: self.name.clone(),
                parameter: name.to_string(),
            });
        }

        let default_val = match default_val {
            Some(ScriptValue::Undefined) | None => None,
            Some(_) if kind.is_varargs() => {
                warn!(
                    function = %self.name,
                    parameter = %name,
                    "default value on varargs parameter ignored"
                );
                None
            }
            Some(value) => Some(
                Marshaller::default()
                    .convert_to_data_value(&value, kind.base_type())
                    .map_err(|source| ConfigurationError::InvalidDefault {
                        parameter: name.to_string(),
                        source,
                    })?,
            ),
        };

        self.has_varargs |= kind.is_varargs();
        self.parameter_list.push(ParameterSpec {
            name: name.to_string(),
            param_type: kind.base_type(),
            vararg_flag: kind.is_varargs(),
            default_val,
        });
        Ok(())
    }

    fn check_not_after_varargs(&self, parameter: &str) -> Result<(), ConfigurationError> {
        if self.has_varargs {
            Err(ConfigurationError::VarargsNotLast {
                function: self.name.clone(),
                parameter: parameter.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a new name.
    ///
    /// The declared name is kept; only the validation takes effect.
    pub fn set_name(&self, name: &str) -> Result<(), ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyFunctionName);
        }
        if name != self.name {
            debug!(function = %self.name, requested = %name, "set_name does not rename");
        }
        Ok(())
    }

    /// Exported name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared return type.
    pub fn return_type(&self) -> DataType {
        self.return_type
    }

    /// Name of the implementing script function.
    pub fn js_function_name(&self) -> &str {
        &self.js_function_name
    }

    /// Required permission; `Observer` unless declared.
    pub fn permission(&self) -> PermissionLevel {
        self.permission.unwrap_or_default()
    }

    /// Declared parameters in order.
    pub fn parameter_list(&self) -> &[ParameterSpec] {
        &self.parameter_list
    }

    /// Whether the last parameter is variadic.
    pub fn has_varargs(&self) -> bool {
        self.has_varargs
    }

    /// Hand the finished declaration to `sink`.
    pub fn export<S>(self, sink: &mut S) -> Result<(), RegistrationError>
    where
        S: ExportSink + ?Sized,
    {
        debug!(
            function = %self.name,
            js_function = %self.js_function_name,
            parameters = self.parameter_list.len(),
            "exporting function"
        );
        sink.export_function(ExportedDescriptor {
            name: self.name,
            parameter_list: self.parameter_list,
            return_type: self.return_type,
            js_function_name: self.js_function_name,
            permission: self.permission,
        })
    }
}
