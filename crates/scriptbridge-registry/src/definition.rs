//! Function definitions and their builder.
//!
//! A [`FunctionDefinition`] is the immutable signature of a registered
//! function: its name, ordered parameters, required permission and return
//! type. Definitions are produced by [`FunctionDefinitionBuilder`]:
//!
//! ```
//! use scriptbridge_core::{DataType, DataValue, PermissionLevel};
//! use scriptbridge_registry::FunctionDefinitionBuilder;
//!
//! let def = FunctionDefinitionBuilder::new("rollSomeDice")
//!     .add_parameter_with_default("num", DataType::Long, DataValue::Long(1))
//!     .add_parameter("sides", DataType::Long)
//!     .default_permission(PermissionLevel::Player)
//!     .return_type(DataType::Result)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(def.parameters().len(), 2);
//! assert!(def.is_valid_parameter_name("sides"));
//! assert!(!def.is_valid_parameter_name("faces"));
//! ```

use indexmap::IndexMap;
use scriptbridge_core::{DataType, DataValue, FunctionHash, ParamKind, PermissionLevel, RegistrationError};

use crate::FunctionParameter;

/// The immutable signature of a registered function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    name: String,
    parameters: IndexMap<String, FunctionParameter>,
    positional_consumer: Option<usize>,
    named_consumer: Option<usize>,
    required_permission: PermissionLevel,
    return_type: DataType,
    hash: FunctionHash,
}

impl FunctionDefinition {
    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> impl ExactSizeIterator<Item = &FunctionParameter> {
        self.parameters.values()
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&FunctionParameter> {
        self.parameters.get(name)
    }

    /// Whether the function declares any parameter.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// The parameter absorbing extra positional arguments.
    pub fn positional_consumer(&self) -> Option<&FunctionParameter> {
        self.positional_consumer
            .and_then(|i| self.parameters.get_index(i))
            .map(|(_, p)| p)
    }

    /// The parameter absorbing extra named arguments.
    pub fn named_consumer(&self) -> Option<&FunctionParameter> {
        self.named_consumer
            .and_then(|i| self.parameters.get_index(i))
            .map(|(_, p)| p)
    }

    /// Whether `name` may be passed as a named argument.
    ///
    /// Every name is valid when the function has a named consumer.
    pub fn is_valid_parameter_name(&self, name: &str) -> bool {
        self.named_consumer.is_some() || self.parameters.contains_key(name)
    }

    /// Permission a caller needs to invoke this function.
    pub fn required_permission(&self) -> PermissionLevel {
        self.required_permission
    }

    /// Declared return type.
    pub fn return_type(&self) -> DataType {
        self.return_type
    }

    /// Signature hash.
    pub fn hash(&self) -> FunctionHash {
        self.hash
    }

    /// Ordered parameter kinds.
    pub fn parameter_kinds(&self) -> Vec<ParamKind> {
        self.parameters.values().map(FunctionParameter::kind).collect()
    }
}

/// Builder for [`FunctionDefinition`].
///
/// Methods chain; the first validation failure is kept and reported by
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct FunctionDefinitionBuilder {
    name: Option<String>,
    parameters: Vec<FunctionParameter>,
    required_permission: PermissionLevel,
    return_type: Option<DataType>,
    error: Option<RegistrationError>,
}

impl Default for FunctionDefinitionBuilder {
    fn default() -> Self {
        Self {
            name: None,
            parameters: Vec::new(),
            required_permission: PermissionLevel::default(),
            return_type: None,
            error: None,
        }
    }
}

impl FunctionDefinitionBuilder {
    /// Start a definition for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().name(name)
    }

    /// Set the function name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a required parameter.
    pub fn add_parameter(self, name: impl Into<String>, data_type: DataType) -> Self {
        self.push(FunctionParameter::new(name, data_type))
    }

    /// Add a parameter with a default value.
    pub fn add_parameter_with_default(
        self,
        name: impl Into<String>,
        data_type: DataType,
        default: DataValue,
    ) -> Self {
        self.push(FunctionParameter::with_default(name, data_type, default))
    }

    /// Add the parameter absorbing extra positional arguments.
    pub fn add_list_varargs_parameter(self, name: impl Into<String>) -> Self {
        self.push(FunctionParameter::list_varargs(name))
    }

    /// Add the parameter absorbing extra named arguments.
    pub fn add_dictionary_varargs_parameter(self, name: impl Into<String>) -> Self {
        self.push(FunctionParameter::dictionary_varargs(name))
    }

    /// Add a prepared parameter.
    pub fn push(mut self, param: FunctionParameter) -> Self {
        if self.error.is_some() {
            return self;
        }

        let function = self.name.clone().unwrap_or_default();
        if self.parameters.iter().any(|p| p.consumes_remaining()) {
            self.error = Some(if param.consumes_remaining() {
                RegistrationError::MultipleVarargs { function }
            } else {
                RegistrationError::VarargsNotLast { function }
            });
            return self;
        }
        if self.parameters.iter().any(|p| p.name() == param.name()) {
            self.error = Some(RegistrationError::DuplicateParameter {
                function,
                parameter: param.name().to_string(),
            });
            return self;
        }

        self.parameters.push(param);
        self
    }

    /// Set the permission a caller needs.
    pub fn default_permission(mut self, level: PermissionLevel) -> Self {
        self.required_permission = level;
        self
    }

    /// Set the return type.
    pub fn return_type(mut self, data_type: DataType) -> Self {
        self.return_type = Some(data_type);
        self
    }

    /// Finish the definition.
    pub fn build(self) -> Result<FunctionDefinition, RegistrationError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(RegistrationError::MissingName),
        };
        let return_type = self
            .return_type
            .ok_or_else(|| RegistrationError::MissingReturnType(name.clone()))?;

        let kinds: Vec<ParamKind> = self.parameters.iter().map(FunctionParameter::kind).collect();
        let hash = FunctionHash::from_signature(&name, &kinds);

        let mut positional_consumer = None;
        let mut named_consumer = None;
        let mut parameters = IndexMap::with_capacity(self.parameters.len());
        for (i, param) in self.parameters.into_iter().enumerate() {
            match param.kind() {
                ParamKind::ListVarargs => positional_consumer = Some(i),
                ParamKind::DictionaryVarargs => named_consumer = Some(i),
                ParamKind::Single(_) => {}
            }
            parameters.insert(param.name().to_string(), param);
        }

        Ok(FunctionDefinition {
            name,
            parameters,
            positional_consumer,
            named_consumer,
            required_permission: self.required_permission,
            return_type,
            hash,
        })
    }
}
