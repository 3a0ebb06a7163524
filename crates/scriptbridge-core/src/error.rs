//! Error types for the bridge.
//!
//! Each phase of the bridge has its own error type so callers can handle
//! failures at the granularity they need:
//!
//! ```text
//! BridgeError (top-level wrapper)
//! ├── ConfigurationError - export builder misuse, raised while declaring
//! ├── ConversionError    - a value cannot be represented under a DataType
//! ├── RegistrationError  - registry bookkeeping (duplicates, closed registry)
//! ├── ScriptError        - failures reported by the script engine
//! └── DispatchError      - call-time failures (lookup, permission, arguments)
//! ```
//!
//! Phase errors convert into [`BridgeError`] with `?`:
//!
//! ```ignore
//! fn load(sink: &mut ExportCollector) -> Result<(), BridgeError> {
//!     let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None)?;
//!     f.add_parameter("nums", "List*", None)?;
//!     f.export(sink)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::{DataType, PermissionLevel};

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised synchronously while a script declares an exported function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// The exported function name was empty.
    #[error("function name is empty")]
    EmptyFunctionName,

    /// The return type was empty.
    #[error("function return type is empty")]
    EmptyReturnType,

    /// The name of the implementing script function was empty.
    #[error("script function name is empty")]
    EmptyScriptFunctionName,

    /// A parameter name was empty.
    #[error("parameter name is empty")]
    EmptyParameterName,

    /// A parameter type was empty.
    #[error("parameter type is empty")]
    EmptyParameterType,

    /// A type name was empty.
    #[error("type is empty")]
    EmptyType,

    /// A type name was not recognized.
    #[error("unknown type '{0}'")]
    UnknownType(String),

    /// A permission name was not recognized.
    #[error("unknown permission level '{0}'")]
    UnknownPermission(String),

    /// A parameter was added after the variadic parameter.
    #[error("varargs parameter must be last in parameter list of '{function}' (adding '{parameter}')")]
    VarargsNotLast {
        /// The function being declared.
        function: String,
        /// The rejected parameter.
        parameter: String,
    },

    /// Two parameters share a name.
    #[error("parameter '{parameter}' declared twice in '{function}'")]
    DuplicateParameter {
        /// The function being declared.
        function: String,
        /// The duplicated parameter name.
        parameter: String,
    },

    /// A default value could not be represented under the parameter type.
    #[error("invalid default for parameter '{parameter}': {source}")]
    InvalidDefault {
        /// The parameter whose default was rejected.
        parameter: String,
        /// Why the conversion failed.
        source: ConversionError,
    },
}

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors that occur when a value cannot be represented under a [`DataType`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// The value's runtime type cannot become the requested type.
    #[error("cannot convert {actual} to {expected}")]
    TypeMismatch {
        /// The requested type.
        expected: DataType,
        /// Runtime type name of the offending value.
        actual: &'static str,
    },

    /// A string was expected to hold a number and did not.
    #[error("'{value}' is not a valid {target}")]
    NotNumeric {
        /// The offending text.
        value: String,
        /// The numeric type requested.
        target: DataType,
    },

    /// A NaN or infinite float cannot become an integer.
    #[error("non-finite value {value} cannot be converted to LONG")]
    NonFinite {
        /// The offending value.
        value: f64,
    },

    /// A float whose integral part does not fit a LONG.
    #[error("{value} is out of range for LONG")]
    OutOfRange {
        /// The offending value.
        value: f64,
    },

    /// An integer does not fit the requested native type.
    #[error("integer {value} out of range for {target_type}")]
    IntegerOverflow {
        /// The offending value.
        value: i64,
        /// The native type requested.
        target_type: &'static str,
    },

    /// An object converted to RESULT had no `value` field.
    #[error("object cannot be converted to a result: missing 'value'")]
    MissingResultValue,

    /// A field of a result object had the wrong shape.
    #[error("result field '{field}' cannot hold {actual}")]
    InvalidResultField {
        /// The field name.
        field: &'static str,
        /// Runtime type name of the offending value.
        actual: &'static str,
    },

    /// Nesting exceeded the configured depth.
    #[error("value nesting exceeds maximum depth {max_depth}")]
    DepthExceeded {
        /// The configured limit.
        max_depth: usize,
    },
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while defining functions in the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// A function with this name is already defined.
    #[error("function '{0}' has already been defined")]
    DuplicateFunction(String),

    /// The registry no longer accepts registrations.
    #[error("registry is closed: cannot register '{name}'")]
    RegistryClosed {
        /// The function that was rejected.
        name: String,
    },

    /// A definition was built without a name.
    #[error("function definition has no name")]
    MissingName,

    /// A definition was built without a return type.
    #[error("function '{0}' has no return type")]
    MissingReturnType(String),

    /// Two parameters share a name.
    #[error("parameter '{parameter}' declared twice in '{function}'")]
    DuplicateParameter {
        /// The function name.
        function: String,
        /// The duplicated parameter name.
        parameter: String,
    },

    /// A parameter follows the argument consumer.
    #[error("varargs parameter must be last in parameter list of '{function}'")]
    VarargsNotLast {
        /// The function name.
        function: String,
    },

    /// More than one argument consumer was declared.
    #[error("cannot have more than one varargs parameter in '{function}'")]
    MultipleVarargs {
        /// The function name.
        function: String,
    },
}

// ============================================================================
// Script Errors
// ============================================================================

/// Errors reported by the script engine while running an implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// The named script function does not exist.
    #[error("{0} not defined")]
    UndefinedFunction(String),

    /// An argument the implementation asked for was not passed.
    #[error("missing argument '{0}'")]
    MissingArgument(String),

    /// An argument could not be read as the requested type.
    #[error("argument conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The implementation failed.
    #[error("script function '{function}' failed: {message}")]
    Failed {
        /// The script function.
        function: String,
        /// The failure message.
        message: String,
    },
}

// ============================================================================
// Dispatch Errors
// ============================================================================

/// Errors that occur while dispatching a call from the host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// No function is registered under this name.
    #[error("unknown function {0}")]
    UnknownFunction(String),

    /// Dispatch was attempted while registration is still open.
    #[error("registry is still open for registration")]
    RegistryOpen,

    /// The caller lacks the permission the function requires.
    #[error("you do not have permission to call {function} (requires {required}, have {actual})")]
    PermissionDenied {
        /// The function called.
        function: String,
        /// Permission the function requires.
        required: PermissionLevel,
        /// Permission the caller has.
        actual: PermissionLevel,
    },

    /// Arguments were passed to a function that takes none.
    #[error("function {function} does not accept any parameters")]
    NoParametersAccepted {
        /// The function called.
        function: String,
    },

    /// More positional arguments than parameters, and no list consumer.
    #[error("too many parameters for function {function} (expected at most {expected})")]
    TooManyArguments {
        /// The function called.
        function: String,
        /// Number of positional parameters.
        expected: usize,
    },

    /// An argument was supplied both positionally and by name, or twice by name.
    #[error("call to function {function} defines argument {argument} more than once")]
    DuplicateArgument {
        /// The function called.
        function: String,
        /// The duplicated argument.
        argument: String,
    },

    /// A named argument matched no parameter and there is no dictionary consumer.
    #[error("invalid parameter name {argument} for function {function}")]
    InvalidParameterName {
        /// The function called.
        function: String,
        /// The unknown argument name.
        argument: String,
    },

    /// A parameter without a default was not supplied.
    #[error("parameter {parameter} missing from call to function {function}")]
    MissingArgument {
        /// The function called.
        function: String,
        /// The missing parameter.
        parameter: String,
    },

    /// An argument could not be coerced to its parameter type.
    #[error("argument {parameter} of function {function}: {source}")]
    Argument {
        /// The function called.
        function: String,
        /// The parameter being bound.
        parameter: String,
        /// Why coercion failed.
        source: ConversionError,
    },

    /// The implementation returned a value incompatible with the return type.
    #[error("return value of function {function}: {source}")]
    ReturnValue {
        /// The function called.
        function: String,
        /// Why conversion failed.
        source: ConversionError,
    },

    /// The script engine reported a failure.
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl DispatchError {
    /// Name of the function the error concerns, when known.
    pub fn function(&self) -> Option<&str> {
        match self {
            DispatchError::UnknownFunction(name) => Some(name),
            DispatchError::PermissionDenied { function, .. }
            | DispatchError::NoParametersAccepted { function }
            | DispatchError::TooManyArguments { function, .. }
            | DispatchError::DuplicateArgument { function, .. }
            | DispatchError::InvalidParameterName { function, .. }
            | DispatchError::MissingArgument { function, .. }
            | DispatchError::Argument { function, .. }
            | DispatchError::ReturnValue { function, .. } => Some(function),
            DispatchError::RegistryOpen | DispatchError::Script(_) => None,
        }
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// The unified error type for all bridge operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// A configuration error.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A conversion error.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A script error.
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// A dispatch error.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl BridgeError {
    /// Check if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BridgeError::Configuration(_))
    }

    /// Check if this is a conversion error.
    pub fn is_conversion(&self) -> bool {
        matches!(self, BridgeError::Conversion(_))
    }

    /// Check if this is a registration error.
    pub fn is_registration(&self) -> bool {
        matches!(self, BridgeError::Registration(_))
    }

    /// Check if this is a script error.
    pub fn is_script(&self) -> bool {
        matches!(self, BridgeError::Script(_))
    }

    /// Check if this is a dispatch error.
    pub fn is_dispatch(&self) -> bool {
        matches!(self, BridgeError::Dispatch(_))
    }
}

/// Result alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

// ============================================================================
// Tests
// ============================================================================
