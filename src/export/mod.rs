//! Declaring script functions for the host.
//!
//! A script builds an [`ExportedFunction`] per function it offers, adds its
//! parameters, and exports it into an [`ExportSink`]. [`ExportCollector`] is
//! the sink used while loading scripts.

mod function;
mod sink;

pub use function::{ExportedFunction, ParameterSpec};
pub use sink::{ExportCollector, ExportSink, ExportedDescriptor};
