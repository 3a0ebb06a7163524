//! Value marshalling between host values and script values.
//!
//! - [`convert_data_value`] / [`convert_args`]: host to script. Never fails;
//!   unknown host tags degrade to strings.
//! - [`convert_to_data_value`]: script to host under a declared [`DataType`],
//!   failing with [`ConversionError`] on incompatible values.
//! - [`convert_to_data_value_untyped`]: script to host by runtime type, used
//!   for nested values and defaults.
//!
//! [`DataType`]: scriptbridge_core::DataType
//! [`ConversionError`]: scriptbridge_core::ConversionError

mod forward;
mod reverse;

pub use forward::{convert_args, convert_data_value};
pub use reverse::{Marshaller, convert_to_data_value, convert_to_data_value_untyped};
