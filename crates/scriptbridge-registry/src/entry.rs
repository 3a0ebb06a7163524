//! Function entries for the registry.
//!
//! A [`FunctionEntry`] combines a [`FunctionDefinition`] with how the function
//! is implemented and where it came from.

use std::fmt;
use std::sync::Arc;

use scriptbridge_core::{DataValue, Dictionary, ScriptError};

use crate::FunctionDefinition;

/// Trait for callable native built-ins.
///
/// A built-in receives the bound, coerced arguments keyed by parameter name
/// in declaration order.
pub trait NativeCallable {
    /// Call this function.
    fn call(&self, args: &Dictionary) -> Result<DataValue, ScriptError>;
}

impl<F> NativeCallable for F
where
    F: Fn(&Dictionary) -> Result<DataValue, ScriptError>,
{
    fn call(&self, args: &Dictionary) -> Result<DataValue, ScriptError> {
        (self)(args)
    }
}

/// Type-erased native function.
///
/// The callable is shared behind an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct NativeFn {
    inner: Arc<dyn NativeCallable + Send + Sync>,
}

impl NativeFn {
    /// Wrap a callable.
    pub fn new<F>(f: F) -> Self
    where
        F: NativeCallable + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Wrap a closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Dictionary) -> Result<DataValue, ScriptError> + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Call the function.
    pub fn call(&self, args: &Dictionary) -> Result<DataValue, ScriptError> {
        self.inner.call(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").finish_non_exhaustive()
    }
}

/// How a function is implemented.
#[derive(Debug, Clone)]
pub enum FunctionImpl {
    /// Implemented by a named function in the script environment.
    Script {
        /// Name of the implementing script function.
        js_function_name: String,
    },
    /// Implemented in Rust.
    Native(NativeFn),
}

impl FunctionImpl {
    /// Create a script implementation.
    pub fn script(js_function_name: impl Into<String>) -> Self {
        FunctionImpl::Script {
            js_function_name: js_function_name.into(),
        }
    }
}

/// Where a function came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionSource {
    /// Shipped with the host.
    Builtin,
    /// Defined by a loaded script.
    Script,
}

impl FunctionSource {
    /// Check if this is a built-in.
    pub fn is_builtin(&self) -> bool {
        matches!(self, FunctionSource::Builtin)
    }

    /// Check if this came from a script.
    pub fn is_script(&self) -> bool {
        matches!(self, FunctionSource::Script)
    }
}

/// Registry entry for a function.
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    /// Signature.
    pub def: FunctionDefinition,
    /// Implementation.
    pub implementation: FunctionImpl,
    /// Source.
    pub source: FunctionSource,
}

impl FunctionEntry {
    /// Create a new entry.
    pub fn new(def: FunctionDefinition, implementation: FunctionImpl, source: FunctionSource) -> Self {
        Self {
            def,
            implementation,
            source,
        }
    }

    /// Create a built-in entry backed by Rust code.
    pub fn builtin(def: FunctionDefinition, native_fn: NativeFn) -> Self {
        Self::new(def, FunctionImpl::Native(native_fn), FunctionSource::Builtin)
    }

    /// Create an entry implemented by a script function.
    pub fn script(def: FunctionDefinition, js_function_name: impl Into<String>) -> Self {
        Self::new(def, FunctionImpl::script(js_function_name), FunctionSource::Script)
    }

    /// Function name.
    pub fn name(&self) -> &str {
        self.def.name()
    }

    /// Check if this is implemented in Rust.
    pub fn is_native(&self) -> bool {
        matches!(self.implementation, FunctionImpl::Native(_))
    }

    /// Check if this is implemented by a script function.
    pub fn is_script(&self) -> bool {
        matches!(self.implementation, FunctionImpl::Script { .. })
    }

    /// The native function, if any.
    pub fn native_fn(&self) -> Option<&NativeFn> {
        match &self.implementation {
            FunctionImpl::Native(f) => Some(f),
            FunctionImpl::Script { .. } => None,
        }
    }

    /// The implementing script function name, if any.
    pub fn js_function_name(&self) -> Option<&str> {
        match &self.implementation {
            FunctionImpl::Script { js_function_name } => Some(js_function_name),
            FunctionImpl::Native(_) => None,
        }
    }
}

impl PartialEq for FunctionEntry {
    fn eq(&self, other: &Self) -> bool {
        // NativeFn has no equality
        self.def == other.def && self.source == other.source
    }
}
