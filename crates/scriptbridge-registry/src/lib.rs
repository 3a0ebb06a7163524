//! Function registry for the scriptbridge crates.
//!
//! - [`FunctionParameter`]: a declared parameter, possibly variadic
//! - [`FunctionDefinition`], [`FunctionDefinitionBuilder`]: function signatures
//! - [`FunctionEntry`]: a definition plus its implementation and source
//! - [`FunctionRegistry`]: built-in and user-defined functions with an
//!   open/closed lifecycle

mod definition;
mod entry;
mod parameter;
mod registry;

pub use definition::{FunctionDefinition, FunctionDefinitionBuilder};
pub use entry::{FunctionEntry, FunctionImpl, FunctionSource, NativeCallable, NativeFn};
pub use parameter::FunctionParameter;
pub use registry::FunctionRegistry;
