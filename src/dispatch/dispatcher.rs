//! Host-side calls into registered functions.

use scriptbridge_core::{BridgeConfig, DataValue, Dictionary, DispatchError};
use scriptbridge_registry::{FunctionEntry, FunctionImpl, FunctionRegistry};
use tracing::{debug, trace};

use super::arguments::{ArgumentList, CallerContext, resolve_arguments};
use crate::engine::ScriptEngine;
use crate::marshal::{Marshaller, convert_args};

/// Calls registered functions on behalf of the host.
///
/// A dispatcher borrows the registry for lookup and the script engine for
/// running script-implemented functions. The registry must be closed.
///
/// ```
/// use scriptbridge::dispatch::{ArgumentList, CallerContext, Dispatcher};
/// use scriptbridge::engine::NativeScriptEngine;
/// use scriptbridge::registry::{FunctionDefinitionBuilder, FunctionRegistry, NativeFn};
/// use scriptbridge::{DataType, DataValue};
///
/// let mut registry = FunctionRegistry::new();
/// let def = FunctionDefinitionBuilder::new("double")
///     .add_parameter("n", DataType::Long)
///     .return_type(DataType::Long)
///     .build()
///     .unwrap();
/// registry
///     .register_builtin(def, NativeFn::from_fn(|args| {
///         let n = args["n"].as_long().unwrap_or_default();
///         Ok(DataValue::Long(n * 2))
///     }))
///     .unwrap();
/// registry.close();
///
/// let mut engine = NativeScriptEngine::new();
/// let mut dispatcher = Dispatcher::new(&registry, &mut engine);
/// let value = dispatcher
///     .call("double", ArgumentList::new().push(21i64), &CallerContext::observer())
///     .unwrap();
/// assert_eq!(value, DataValue::Long(42));
/// ```
pub struct Dispatcher<'a> {
    registry: &'a FunctionRegistry,
    engine: &'a mut dyn ScriptEngine,
    marshaller: Marshaller,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher with default conversion limits.
    pub fn new(registry: &'a FunctionRegistry, engine: &'a mut dyn ScriptEngine) -> Self {
        Self {
            registry,
            engine,
            marshaller: Marshaller::default(),
        }
    }

    /// Create a dispatcher using the conversion limits in `config`.
    pub fn with_config(
        registry: &'a FunctionRegistry,
        engine: &'a mut dyn ScriptEngine,
        config: &BridgeConfig,
    ) -> Self {
        Self {
            registry,
            engine,
            marshaller: Marshaller::from_config(config),
        }
    }

    /// The registry calls resolve against.
    pub fn registry(&self) -> &FunctionRegistry {
        self.registry
    }

    /// Call the function `name` with `args` as `caller`.
    ///
    /// Resolves the function, checks the caller's permission, binds and
    /// coerces the arguments, runs the implementation, and converts its
    /// result to the declared return type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn call(
        &mut self,
        name: &str,
        args: ArgumentList,
        caller: &CallerContext,
    ) -> Result<DataValue, DispatchError> {
        let registry = self.registry;
        if registry.is_open() {
            return Err(DispatchError::RegistryOpen);
        }

        let entry = registry
            .lookup(name)
            .ok_or_else(|| DispatchError::UnknownFunction(name.to_string()))?;

        let required = entry.def.required_permission();
        if !caller.permission.has_at_least(required) {
            debug!(
                function = %entry.name(),
                caller = caller.name.as_deref().unwrap_or("-"),
                %required,
                actual = %caller.permission,
                "permission denied"
            );
            return Err(DispatchError::PermissionDenied {
                function: entry.name().to_string(),
                required,
                actual: caller.permission,
            });
        }

        let bound = resolve_arguments(&entry.def, args)?;
        trace!(function = %entry.name(), arguments = bound.len(), "arguments bound");

        let value = self.invoke(entry, &bound)?;
        debug!(
            function = %entry.name(),
            source = ?entry.source,
            result = %value.data_type(),
            "dispatched call"
        );
        Ok(value)
    }

    fn invoke(
        &mut self,
        entry: &FunctionEntry,
        bound: &Dictionary,
    ) -> Result<DataValue, DispatchError> {
        let return_type = entry.def.return_type();
        let return_error = |source| DispatchError::ReturnValue {
            function: entry.name().to_string(),
            source,
        };

        match &entry.implementation {
            FunctionImpl::Script { js_function_name } => {
                let script_args = convert_args(bound);
                let value = self.engine.invoke(js_function_name, script_args)?;
                self.marshaller
                    .convert_to_data_value(&value, return_type)
                    .map_err(return_error)
            }
            FunctionImpl::Native(native) => {
                let value = native.call(bound)?;
                return_type.coerce(value).map_err(return_error)
            }
        }
    }
}
