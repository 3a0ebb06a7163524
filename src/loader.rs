//! Loading exported script functions into the registry.
//!
//! A load function plays the part of a script's top level: it builds
//! [`ExportedFunction`]s and exports them into the [`ExportContext`] it is
//! given. [`ScriptLoader`] then turns every exported declaration into a
//! [`FunctionDefinition`] and defines it as a script function.
//!
//! [`ExportedFunction`]: crate::export::ExportedFunction

use scriptbridge_core::{BridgeConfig, BridgeError, ParamKind, RegistrationError};
use scriptbridge_registry::{FunctionDefinition, FunctionDefinitionBuilder, FunctionParameter, FunctionRegistry};
use tracing::{debug, warn};

use crate::export::{ExportCollector, ExportSink, ExportedDescriptor};

/// The sink handed to a load function.
#[derive(Debug)]
pub struct ExportContext<'a> {
    collector: &'a mut ExportCollector,
}

impl ExportContext<'_> {
    /// Number of functions exported so far.
    pub fn exported(&self) -> usize {
        self.collector.len()
    }
}

impl ExportSink for ExportContext<'_> {
    fn export_function(&mut self, descriptor: ExportedDescriptor) -> Result<(), RegistrationError> {
        self.collector.export_function(descriptor)
    }
}

/// Loads scripts' exported functions into a [`FunctionRegistry`].
///
/// ```
/// use scriptbridge::export::ExportedFunction;
/// use scriptbridge::loader::ScriptLoader;
/// use scriptbridge::registry::FunctionRegistry;
///
/// let mut registry = FunctionRegistry::new();
/// let mut loader = ScriptLoader::new();
/// let names = loader
///     .load(&mut registry, |ctx| {
///         let mut f = ExportedFunction::new("listSum", "DOUBLE", "doListSum", None)?;
///         f.add_parameter("nums", "List*", None)?;
///         f.export(ctx)?;
///         Ok(())
///     })
///     .unwrap();
///
/// assert_eq!(names, vec!["listSum".to_string()]);
/// assert!(registry.user_function("listSum").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ScriptLoader {
    collector: ExportCollector,
    config: BridgeConfig,
}

impl ScriptLoader {
    /// Create a loader with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader using `config`.
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            collector: ExportCollector::new(),
            config,
        }
    }

    /// Run `load_fn` and define everything it exports.
    ///
    /// Either every exported function is defined or none is: a failing load
    /// function or a rejected definition leaves the registry as it was.
    /// Returns the defined names in export order.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn load<F>(&mut self, registry: &mut FunctionRegistry, load_fn: F) -> Result<Vec<String>, BridgeError>
    where
        F: FnOnce(&mut ExportContext<'_>) -> Result<(), BridgeError>,
    {
        self.collector.clear();
        let mut ctx = ExportContext {
            collector: &mut self.collector,
        };
        load_fn(&mut ctx)?;

        let definitions = self
            .collector
            .take()
            .into_iter()
            .map(|descriptor| {
                let def = self.definition(&descriptor)?;
                Ok((def, descriptor.js_function_name))
            })
            .collect::<Result<Vec<_>, RegistrationError>>()?;

        let mut defined: Vec<String> = Vec::with_capacity(definitions.len());
        for (def, js_function_name) in definitions {
            let name = def.name().to_string();
            if let Err(err) = registry.define_script(def, js_function_name) {
                warn!(function = %name, error = %err, "rolling back script load");
                for name in &defined {
                    registry.undefine(name)?;
                }
                return Err(err.into());
            }
            defined.push(name);
        }

        debug!(count = defined.len(), "loaded script functions");
        Ok(defined)
    }

    /// Remove every user function, then [`load`](Self::load).
    ///
    /// If the load fails the removed functions are defined again, so a failed
    /// reload leaves the registry as it was.
    pub fn reload<F>(&mut self, registry: &mut FunctionRegistry, load_fn: F) -> Result<Vec<String>, BridgeError>
    where
        F: FnOnce(&mut ExportContext<'_>) -> Result<(), BridgeError>,
    {
        let previous = registry.take_user_functions()?;
        debug!(removed = previous.len(), "cleared user functions for reload");

        match self.load(registry, load_fn) {
            Ok(names) => Ok(names),
            Err(err) => {
                warn!(error = %err, restored = previous.len(), "reload failed, restoring user functions");
                for entry in previous {
                    registry.define(entry)?;
                }
                Err(err)
            }
        }
    }

    fn definition(&self, descriptor: &ExportedDescriptor) -> Result<FunctionDefinition, RegistrationError> {
        let builder = FunctionDefinitionBuilder::new(descriptor.name.as_str())
            .return_type(descriptor.return_type)
            .default_permission(descriptor.permission.unwrap_or(self.config.default_permission));

        descriptor
            .parameter_list
            .iter()
            .fold(builder, |builder, spec| {
                let param = match (spec.kind(), &spec.default_val) {
                    (ParamKind::ListVarargs, _) => FunctionParameter::list_varargs(spec.name.as_str()),
                    (ParamKind::DictionaryVarargs, _) => FunctionParameter::dictionary_varargs(spec.name.as_str()),
                    (ParamKind::Single(ty), Some(default)) => {
                        FunctionParameter::with_default(spec.name.as_str(), ty, default.clone())
                    }
                    (ParamKind::Single(ty), None) => FunctionParameter::new(spec.name.as_str(), ty),
                };
                builder.push(param)
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportedFunction;
    use scriptbridge_core::{DataType, DataValue, PermissionLevel, ScriptValue};

    fn load_dice(ctx: &mut ExportContext<'_>) -> Result<(), BridgeError> {
        let mut f = ExportedFunction::new("rollSomeDice", "RESULT", "doRollSomeDice", Some("PLAYER"))?;
        f.add_parameter("num", "LONG", Some(ScriptValue::Int(1)))?;
        f.add_parameter("sides", "LONG", None)?;
        f.export(ctx)?;

        let mut f = ExportedFunction::new("describe", "STRING", "doDescribe", None)?;
        f.add_parameter("target", "STRING", None)?;
        f.add_parameter("opts", "Dictionary*", None)?;
        f.export(ctx)?;
        Ok(())
    }

    #[test]
    fn load_defines_script_functions() {
        let mut registry = FunctionRegistry::new();
        let mut loader = ScriptLoader::new();
        let names = loader.load(&mut registry, load_dice).unwrap();
        assert_eq!(names, vec!["rollSomeDice", "describe"]);

        let roll = registry.user_function("rollSomeDice").unwrap();
        assert_eq!(roll.js_function_name(), Some("doRollSomeDice"));
        assert_eq!(roll.def.required_permission(), PermissionLevel::Player);
        assert_eq!(roll.def.return_type(), DataType::Result);
        assert_eq!(
            roll.def.parameter("num").and_then(|p| p.default_value()),
            Some(&DataValue::Long(1))
        );

        let describe = registry.user_function("describe").unwrap();
        assert_eq!(describe.def.required_permission(), PermissionLevel::Observer);
        assert_eq!(
            describe.def.parameter_kinds(),
            vec![ParamKind::Single(DataType::String), ParamKind::DictionaryVarargs]
        );
    }

    #[test]
    fn default_permission_from_config() {
        let config = BridgeConfig {
            default_permission: PermissionLevel::Gm,
            ..BridgeConfig::default()
        };
        let mut registry = FunctionRegistry::new();
        ScriptLoader::with_config(config).load(&mut registry, load_dice).unwrap();
        assert_eq!(
            registry.user_function("describe").unwrap().def.required_permission(),
            PermissionLevel::Gm
        );
    }

    #[test]
    fn failed_load_defines_nothing() {
        let mut registry = FunctionRegistry::new();
        let mut loader = ScriptLoader::new();
        let err = loader
            .load(&mut registry, |ctx| {
                load_dice(ctx)?;
                ExportedFunction::new("describe", "LONG", "doOther", None)?.export(ctx)?;
                Ok(())
            })
            .unwrap_err();

        assert_eq!(
            err,
            BridgeError::Registration(RegistrationError::DuplicateFunction("describe".to_string()))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn reload_replaces_user_functions() {
        let mut registry = FunctionRegistry::new();
        let mut loader = ScriptLoader::new();
        loader.load(&mut registry, load_dice).unwrap();
        let names = loader
            .reload(&mut registry, |ctx| {
                ExportedFunction::new("now", "LONG", "doNow", None)?.export(ctx)?;
                Ok(())
            })
            .unwrap();

        assert_eq!(names, vec!["now"]);
        assert_eq!(registry.user_function_names(), vec!["now"]);
    }

    #[test]
    fn failed_reload_keeps_previous_functions() {
        let mut registry = FunctionRegistry::new();
        let mut loader = ScriptLoader::new();
        loader.load(&mut registry, load_dice).unwrap();

        let err = loader
            .reload(&mut registry, |ctx| {
                ExportedFunction::new("now", "LONG", "doNow", None)?.export(ctx)?;
                ExportedFunction::new("", "LONG", "doBroken", None)?.export(ctx)?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(registry.user_function_names(), vec!["describe", "rollSomeDice"]);
        assert_eq!(
            registry.user_function("rollSomeDice").and_then(|f| f.js_function_name()),
            Some("doRollSomeDice")
        );

        let err = loader
            .reload(&mut registry, |ctx| {
                ExportedFunction::new("now", "LONG", "doNow", None)?.export(ctx)?;
                ExportedFunction::new("now", "LONG", "doNowAgain", None)?.export(ctx)?;
                Ok(())
            })
            .unwrap_err();
        assert!(err.is_registration());
        assert_eq!(registry.user_function_names(), vec!["describe", "rollSomeDice"]);
    }

    #[test]
    fn closed_registry_rejects_load() {
        let mut registry = FunctionRegistry::new();
        registry.close();
        let err = ScriptLoader::new().load(&mut registry, load_dice).unwrap_err();
        assert!(err.is_registration());
    }
}
