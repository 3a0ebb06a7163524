//! Dispatch of host calls to registered functions.
//!
//! A call names a function and supplies an [`ArgumentList`]. The
//! [`Dispatcher`] resolves the name through the registry, checks the
//! caller's permission, binds arguments to parameters, and runs either the
//! native implementation or the script function behind it.

mod arguments;
mod dispatcher;

pub use arguments::{ArgumentList, CallerContext, resolve_arguments};
pub use dispatcher::Dispatcher;
