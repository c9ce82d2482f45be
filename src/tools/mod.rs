//! Tool catalog, tool transport, and argument validation.

pub mod catalog;
pub mod transport;
pub mod validation;

pub use catalog::{adapt, RawToolDescriptor, ToolCatalog, ToolDescriptor, ToolParameters};
pub use transport::ToolTransport;
pub use validation::validate_arguments;
