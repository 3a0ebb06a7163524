//! Bridge between a host's typed values and a dynamically typed script
//! environment.
//!
//! Scripts declare functions with [`export::ExportedFunction`]; the
//! [`loader`] turns those declarations into registry entries; the
//! [`dispatch::Dispatcher`] calls them from the host, marshalling arguments
//! and return values with [`marshal`].

pub mod dispatch;
pub mod engine;
pub mod export;
pub mod loader;
pub mod marshal;

pub use scriptbridge_core::error;
pub use scriptbridge_registry as registry;

// Re-export main types
pub use scriptbridge_core::{
    BridgeConfig, BridgeError, BridgeResult, DataType, DataValue, DetailedResult, DetailedResultBuilder,
    Dictionary, FromScript, IntoScript, ParamKind, PermissionLevel, ResultData, ScriptArgs, ScriptMap,
    ScriptValue,
};

pub mod prelude {
    pub use crate::dispatch::{ArgumentList, CallerContext, Dispatcher};
    pub use crate::engine::{NativeScriptEngine, ScriptEngine};
    pub use crate::export::{ExportSink, ExportedFunction};
    pub use crate::loader::{ExportContext, ScriptLoader};
    pub use crate::marshal::{convert_args, convert_data_value, convert_to_data_value};
    pub use scriptbridge_core::error::*;
    pub use scriptbridge_core::{
        BridgeConfig, DataType, DataValue, DetailedResult, Dictionary, FromScript, IntoScript, PermissionLevel,
        ResultData, ScriptArgs, ScriptValue,
    };
    pub use scriptbridge_registry::{FunctionDefinitionBuilder, FunctionRegistry, NativeFn};
}
