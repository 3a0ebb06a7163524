//! FunctionRegistry - built-in and user-defined function storage.
//!
//! # Storage Model
//!
//! - **Built-ins**: functions shipped with the host, registered by name.
//! - **User functions**: functions defined by loaded scripts, registered by name.
//!
//! Lookup prefers a user function over a built-in of the same name. A name
//! starting with the built-in prefix (`builtin.` by default) bypasses user
//! functions and selects the built-in directly.
//!
//! # Lifecycle
//!
//! `FunctionRegistry` is **not thread-safe** and has two phases:
//!
//! - **Registration phase**: the registry is open. Built-ins and script
//!   functions are defined and undefined.
//! - **Execution phase**: after [`close`](FunctionRegistry::close) every
//!   mutation fails with [`RegistrationError::RegistryClosed`] and the
//!   dispatcher may call into it. [`reopen`](FunctionRegistry::reopen)
//!   returns to the registration phase, for example to reload scripts.
//!
//! # Example
//!
//! ```
//! use scriptbridge_core::DataType;
//! use scriptbridge_registry::{FunctionDefinitionBuilder, FunctionRegistry};
//!
//! let mut registry = FunctionRegistry::new();
//! let def = FunctionDefinitionBuilder::new("listSum")
//!     .add_list_varargs_parameter("nums")
//!     .return_type(DataType::Double)
//!     .build()
//!     .unwrap();
//! registry.define_script(def, "doListSum").unwrap();
//! registry.close();
//!
//! assert!(registry.lookup("listSum").is_some());
//! ```

use rustc_hash::FxHashMap;
use scriptbridge_core::{BridgeConfig, RegistrationError};
use tracing::debug;

use crate::{FunctionDefinition, FunctionEntry, FunctionSource, NativeFn};

/// Registry of callable functions.
#[derive(Debug)]
pub struct FunctionRegistry {
    /// Built-in functions by name.
    builtins: FxHashMap<String, FunctionEntry>,

    /// User-defined functions by name.
    user: FxHashMap<String, FunctionEntry>,

    /// Prefix that forces built-in lookup.
    builtin_prefix: String,

    /// Whether registration is allowed.
    open: bool,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create an empty, open registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&BridgeConfig::default())
    }

    /// Create an empty, open registry.
    pub fn with_config(config: &BridgeConfig) -> Self {
        Self {
            builtins: FxHashMap::default(),
            user: FxHashMap::default(),
            builtin_prefix: config.builtin_prefix.clone(),
            open: true,
        }
    }

    // ==========================================================================
    // Lifecycle
    // ==========================================================================

    /// Whether the registry accepts registrations.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// End the registration phase.
    pub fn close(&mut self) {
        if self.open {
            debug!(
                builtins = self.builtins.len(),
                user = self.user.len(),
                "function registry closed"
            );
        }
        self.open = false;
    }

    /// Return to the registration phase.
    pub fn reopen(&mut self) {
        if !self.open {
            debug!("function registry reopened");
        }
        self.open = true;
    }

    fn ensure_open(&self, name: &str) -> Result<(), RegistrationError> {
        if self.open {
            Ok(())
        } else {
            Err(RegistrationError::RegistryClosed {
                name: name.to_string(),
            })
        }
    }

    fn ensure_unique(&self, name: &str) -> Result<(), RegistrationError> {
        if self.builtins.contains_key(name) || self.user.contains_key(name) {
            Err(RegistrationError::DuplicateFunction(name.to_string()))
        } else {
            Ok(())
        }
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a built-in implemented in Rust.
    pub fn register_builtin(
        &mut self,
        def: FunctionDefinition,
        native_fn: NativeFn,
    ) -> Result<(), RegistrationError> {
        let name = def.name().to_string();
        self.ensure_open(&name)?;
        if self.builtins.contains_key(&name) {
            return Err(RegistrationError::DuplicateFunction(name));
        }

        debug!(function = %name, hash = %def.hash(), "registered built-in");
        self.builtins.insert(name, FunctionEntry::builtin(def, native_fn));
        Ok(())
    }

    /// Define a user function.
    ///
    /// Fails if a built-in or user function of the same name exists.
    pub fn define(&mut self, entry: FunctionEntry) -> Result<(), RegistrationError> {
        let name = entry.name().to_string();
        self.ensure_open(&name)?;
        self.ensure_unique(&name)?;

        debug!(
            function = %name,
            source = ?entry.source,
            permission = %entry.def.required_permission(),
            "defined function"
        );
        self.user.insert(name, entry);
        Ok(())
    }

    /// Define a user function implemented by the named script function.
    pub fn define_script(
        &mut self,
        def: FunctionDefinition,
        js_function_name: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        self.define(FunctionEntry::script(def, js_function_name))
    }

    /// Remove a user function, returning it if it existed.
    pub fn undefine(&mut self, name: &str) -> Result<Option<FunctionEntry>, RegistrationError> {
        self.ensure_open(name)?;
        let removed = self.user.remove(name);
        if removed.is_some() {
            debug!(function = %name, "undefined function");
        }
        Ok(removed)
    }

    /// Remove every user function, returning how many were removed.
    pub fn undefine_all(&mut self) -> Result<usize, RegistrationError> {
        self.ensure_open("*")?;
        let count = self.user.len();
        self.user.clear();
        debug!(count, "undefined all user functions");
        Ok(count)
    }

    /// Remove every user function and hand the entries back.
    ///
    /// Entries come back in name order and can be restored with
    /// [`define`](Self::define).
    pub fn take_user_functions(&mut self) -> Result<Vec<FunctionEntry>, RegistrationError> {
        self.ensure_open("*")?;
        let mut entries: Vec<FunctionEntry> = self.user.drain().map(|(_, entry)| entry).collect();
        entries.sort_unstable_by(|a, b| a.name().cmp(b.name()));
        debug!(count = entries.len(), "took all user functions");
        Ok(entries)
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Find the function a call to `name` resolves to.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn lookup(&self, name: &str) -> Option<&FunctionEntry> {
        if let Some(stripped) = self.strip_builtin_prefix(name) {
            return self.builtins.get(stripped);
        }
        self.user.get(name).or_else(|| self.builtins.get(name))
    }

    /// Find a user function by exact name.
    pub fn user_function(&self, name: &str) -> Option<&FunctionEntry> {
        self.user.get(name)
    }

    /// Find a built-in by exact name.
    pub fn builtin(&self, name: &str) -> Option<&FunctionEntry> {
        self.builtins.get(name)
    }

    /// Whether a call to `name` resolves to something.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Names of user functions, sorted.
    pub fn user_function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.user.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Names of built-ins, sorted.
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.builtins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of functions.
    pub fn len(&self) -> usize {
        self.builtins.len() + self.user.len()
    }

    /// Whether no function is registered.
    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty() && self.user.is_empty()
    }

    /// Iterate over all entries of the given source.
    pub fn entries(&self, source: FunctionSource) -> impl Iterator<Item = &FunctionEntry> {
        let map = match source {
            FunctionSource::Builtin => &self.builtins,
            FunctionSource::Script => &self.user,
        };
        map.values()
    }

    fn strip_builtin_prefix<'a>(&self, name: &'a str) -> Option<&'a str> {
        if self.builtin_prefix.is_empty() {
            None
        } else {
            name.strip_prefix(self.builtin_prefix.as_str())
        }
    }
}
