//! Where exported declarations go.

use scriptbridge_core::{DataType, PermissionLevel, RegistrationError};
use tracing::debug;

use super::ParameterSpec;

/// Immutable snapshot of a finished [`ExportedFunction`](super::ExportedFunction).
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDescriptor {
    /// Exported name.
    pub name: String,
    /// Declared parameters in order.
    pub parameter_list: Vec<ParameterSpec>,
    /// Declared return type.
    pub return_type: DataType,
    /// Name of the implementing script function.
    pub js_function_name: String,
    /// Required permission, if one was declared.
    pub permission: Option<PermissionLevel>,
}

impl ExportedDescriptor {
    /// Whether the last parameter is variadic.
    pub fn has_varargs(&self) -> bool {
        self.parameter_list.last().is_some_and(|p| p.vararg_flag)
    }
}

/// Receives exported function declarations.
///
/// The sink decides what a repeated name means.
pub trait ExportSink {
    /// Accept one declaration.
    fn export_function(&mut self, descriptor: ExportedDescriptor) -> Result<(), RegistrationError>;
}

/// A sink that keeps every declaration in export order.
#[derive(Debug, Default, Clone)]
pub struct ExportCollector {
    descriptors: Vec<ExportedDescriptor>,
}

impl ExportCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected declarations in export order.
    pub fn descriptors(&self) -> &[ExportedDescriptor] {
        &self.descriptors
    }

    /// Find the first declaration with this name.
    pub fn get(&self, name: &str) -> Option<&ExportedDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Number of collected declarations.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Forget every declaration.
    pub fn clear(&mut self) {
        self.descriptors.clear();
    }

    /// Remove and return every declaration.
    pub fn take(&mut self) -> Vec<ExportedDescriptor> {
        std::mem::take(&mut self.descriptors)
    }
}

impl ExportSink for ExportCollector {
    fn export_function(&mut self, descriptor: ExportedDescriptor) -> Result<(), RegistrationError> {
        debug!(function = %descriptor.name, "collected exported function");
        self.descriptors.push(descriptor);
        Ok(())
    }
}
