//! The script environment seen from the bridge.
//!
//! [`ScriptEngine`] is the seam between the bridge and whatever runs script
//! code: it resolves a script function by name and calls it with a single
//! [`ScriptArgs`] object. [`NativeScriptEngine`] implements it with Rust
//! closures, which is how embedders without an interpreter (and the tests)
//! provide script functions.

use std::fmt;

use rustc_hash::FxHashMap;
use scriptbridge_core::{ScriptArgs, ScriptError, ScriptValue};

/// Something that can run named script functions.
pub trait ScriptEngine {
    /// Run `js_function_name` with `args` as its only argument.
    fn invoke(&mut self, js_function_name: &str, args: ScriptArgs) -> Result<ScriptValue, ScriptError>;

    /// Whether `js_function_name` is defined.
    fn has_function(&self, js_function_name: &str) -> bool;
}

type ScriptFn = Box<dyn FnMut(&ScriptArgs) -> Result<ScriptValue, ScriptError> + Send>;

/// A [`ScriptEngine`] whose functions are Rust closures.
///
/// ```
/// use scriptbridge::engine::{NativeScriptEngine, ScriptEngine};
/// use scriptbridge::{ScriptArgs, ScriptValue};
///
/// let mut engine = NativeScriptEngine::new();
/// engine.register("doListSum", |args| {
///     let nums: Vec<f64> = args.arg("nums")?;
///     Ok(ScriptValue::Float(nums.iter().sum()))
/// });
///
/// let mut args = ScriptArgs::new();
/// args.insert("nums", ScriptValue::array([1i64, 2, 3]));
/// assert_eq!(engine.invoke("doListSum", args).unwrap(), ScriptValue::Float(6.0));
/// ```
#[derive(Default)]
pub struct NativeScriptEngine {
    functions: FxHashMap<String, ScriptFn>,
}

impl NativeScriptEngine {
    /// Create an engine with no functions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a script function.
    pub fn register<F>(&mut self, js_function_name: impl Into<String>, f: F)
    where
        F: FnMut(&ScriptArgs) -> Result<ScriptValue, ScriptError> + Send + 'static,
    {
        self.functions.insert(js_function_name.into(), Box::new(f));
    }

    /// Remove a script function.
    pub fn unregister(&mut self, js_function_name: &str) -> bool {
        self.functions.remove(js_function_name).is_some()
    }

    /// Number of defined functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is defined.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl ScriptEngine for NativeScriptEngine {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn invoke(&mut self, js_function_name: &str, args: ScriptArgs) -> Result<ScriptValue, ScriptError> {
        let f = self
            .functions
            .get_mut(js_function_name)
            .ok_or_else(|| ScriptError::UndefinedFunction(js_function_name.to_string()))?;
        f(&args)
    }

    fn has_function(&self, js_function_name: &str) -> bool {
        self.functions.contains_key(js_function_name)
    }
}

impl fmt::Debug for NativeScriptEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("NativeScriptEngine")
            .field("functions", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_function() {
        let mut engine = NativeScriptEngine::new();
        assert!(!engine.has_function("doNothing"));
        assert_eq!(
            engine.invoke("doNothing", ScriptArgs::new()),
            Err(ScriptError::UndefinedFunction("doNothing".to_string()))
        );
    }

    #[test]
    fn stateful_function() {
        let mut engine = NativeScriptEngine::new();
        let mut calls = 0i64;
        engine.register("doCount", move |_| {
            calls += 1;
            Ok(ScriptValue::Int(calls))
        });

        assert_eq!(engine.invoke("doCount", ScriptArgs::new()), Ok(ScriptValue::Int(1)));
        assert_eq!(engine.invoke("doCount", ScriptArgs::new()), Ok(ScriptValue::Int(2)));
    }

    #[test]
    fn replace_and_remove() {
        let mut engine = NativeScriptEngine::new();
        engine.register("f", |_| Ok(ScriptValue::Int(1)));
        engine.register("f", |_| Ok(ScriptValue::Int(2)));
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.invoke("f", ScriptArgs::new()), Ok(ScriptValue::Int(2)));
        assert!(engine.unregister("f"));
        assert!(engine.is_empty());
    }
}
