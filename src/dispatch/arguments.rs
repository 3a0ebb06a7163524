//! Call arguments and their binding to parameters.

use indexmap::IndexMap;
use scriptbridge_core::{DataValue, Dictionary, DispatchError, PermissionLevel};
use scriptbridge_registry::{FunctionDefinition, FunctionParameter};

/// Arguments of a call as written by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentList {
    positional: Vec<DataValue>,
    named: Dictionary,
}

impl ArgumentList {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an argument list of positional arguments only.
    pub fn positional(values: impl IntoIterator<Item = DataValue>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            named: Dictionary::new(),
        }
    }

    /// Create an argument list from both kinds of arguments.
    pub fn from_parts(positional: Vec<DataValue>, named: Dictionary) -> Self {
        Self { positional, named }
    }

    /// Append a positional argument.
    pub fn push(mut self, value: impl Into<DataValue>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a named argument.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<DataValue>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Positional arguments in call order.
    pub fn positional_arguments(&self) -> &[DataValue] {
        &self.positional
    }

    /// Named arguments.
    pub fn named_arguments(&self) -> &Dictionary {
        &self.named
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// Who is making a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    /// The caller's permission level.
    pub permission: PermissionLevel,
    /// Display name of the caller, for logs.
    pub name: Option<String>,
}

impl CallerContext {
    /// Create a context at `permission`.
    pub fn new(permission: PermissionLevel) -> Self {
        Self {
            permission,
            name: None,
        }
    }

    /// Set the caller's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// A GM caller.
    pub fn gm() -> Self {
        Self::new(PermissionLevel::Gm)
    }

    /// A player caller.
    pub fn player() -> Self {
        Self::new(PermissionLevel::Player)
    }

    /// An observer caller.
    pub fn observer() -> Self {
        Self::new(PermissionLevel::Observer)
    }
}

fn coerce(def: &FunctionDefinition, param: &FunctionParameter, value: DataValue) -> Result<DataValue, DispatchError> {
    param
        .data_type()
        .coerce(value)
        .map_err(|source| DispatchError::Argument {
            function: def.name().to_string(),
            parameter: param.name().to_string(),
            source,
        })
}

/// Bind `args` to the parameters of `def`.
///
/// Positional arguments fill parameters in order, with any surplus going to
/// the list consumer. Named arguments fill parameters by name, with unknown
/// names going to the dictionary consumer. Defaults fill what is left. Every
/// bound value is coerced to its parameter type.
///
/// Returns the bound values keyed by parameter name in declaration order.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_arguments(def: &FunctionDefinition, args: ArgumentList) -> Result<Dictionary, DispatchError> {
    let function = def.name();
    if !def.has_parameters() && !args.is_empty() {
        return Err(DispatchError::NoParametersAccepted {
            function: function.to_string(),
        });
    }

    let ArgumentList { positional, named } = args;
    let mut bound: IndexMap<String, DataValue> = IndexMap::with_capacity(def.parameters().len());

    // Positional arguments
    let positional_params = def.parameters().filter(|p| !p.consumes_remaining()).count();
    let mut params = def.parameters();
    let mut surplus = Vec::new();
    for value in positional {
        match params.next() {
            Some(param) if !param.consumes_remaining() => {
                let value = coerce(def, param, value)?;
                bound.insert(param.name().to_string(), value);
            }
            _ if def.positional_consumer().is_some() => surplus.push(value),
            _ => {
                return Err(DispatchError::TooManyArguments {
                    function: function.to_string(),
                    expected: positional_params,
                });
            }
        }
    }
    if let Some(consumer) = def.positional_consumer() {
        bound.insert(consumer.name().to_string(), DataValue::List(surplus));
    }

    // Named arguments
    let mut unknown = Dictionary::new();
    for (name, value) in named {
        if bound.contains_key(&name) {
            return Err(DispatchError::DuplicateArgument {
                function: function.to_string(),
                argument: name,
            });
        }
        if !def.is_valid_parameter_name(&name) {
            return Err(DispatchError::InvalidParameterName {
                function: function.to_string(),
                argument: name,
            });
        }
        match def.parameter(&name) {
            Some(param) if !param.consumes_remaining() => {
                let value = coerce(def, param, value)?;
                bound.insert(name, value);
            }
            _ => {
                unknown.insert(name, value);
            }
        }
    }
    if let Some(consumer) = def.named_consumer() {
        bound.insert(consumer.name().to_string(), DataValue::Dictionary(unknown));
    }

    // Defaults, then check that every parameter is bound
    let mut resolved = Dictionary::with_capacity(bound.len());
    for param in def.parameters() {
        let value = match bound.swap_remove(param.name()) {
            Some(value) => value,
            None => match param.default_value() {
                Some(default) => coerce(def, param, default.clone())?,
                None => {
                    return Err(DispatchError::MissingArgument {
                        function: function.to_string(),
                        parameter: param.name().to_string(),
                    });
                }
            },
        };
        resolved.insert(param.name().to_string(), value);
    }

    Ok(resolved)
}
